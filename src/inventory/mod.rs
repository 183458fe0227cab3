//! The in-memory product registry and its aggregate summary.

pub mod registry;
pub mod summary;

pub use registry::*;
pub use summary::*;
