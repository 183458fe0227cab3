//! Whole-registry snapshots on disk.

mod snapshot;
pub mod store;

pub use store::*;
