use std::path::PathBuf;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::ProductId;

/// Errors returned by inventory operations.
///
/// Every variant except `ActorCommunication` is recoverable at the call site:
/// the registry is left exactly as it was before the failing call.
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("Product ID already exists: {0}")]
    DuplicateId(ProductId),
    #[error("Product name cannot be empty")]
    InvalidName,
    #[error("Invalid quantity {quantity}: {reason}")]
    InvalidQuantity { quantity: i64, reason: &'static str },
    #[error("Invalid price {price}: {reason}")]
    InvalidPrice { price: Decimal, reason: &'static str },
    #[error("Product not found: {0}")]
    NotFound(ProductId),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
}

/// Errors raised while reading or writing the snapshot file.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error on snapshot {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Corrupt snapshot {path:?}: {reason}")]
    Corrupt { path: PathBuf, reason: String },
    #[error("Unsupported snapshot version {found} in {path:?}")]
    UnsupportedVersion { path: PathBuf, found: u32 },
    #[error("Failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),
}

impl PersistenceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn corrupt(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Corrupt {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

pub type InventoryResult<T> = Result<T, InventoryError>;
