//! Typed handles for talking to the inventory actor.

#[macro_use]
mod macros;
pub mod inventory_client;

pub use inventory_client::*;
