use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{Product, ProductDraft, ProductId};
use crate::error::PersistenceError;
use crate::inventory::Registry;

pub(crate) const SNAPSHOT_FORMAT: &str = "inventory-snapshot";
pub(crate) const SNAPSHOT_VERSION: u32 = 1;

/// Borrowed view of the registry as written to disk.
#[derive(Debug, Serialize)]
pub(crate) struct SnapshotOut<'a> {
    format: &'static str,
    version: u32,
    products: Vec<&'a Product>,
}

impl<'a> SnapshotOut<'a> {
    pub(crate) fn from_registry(registry: &'a Registry) -> Self {
        let mut products: Vec<&Product> = registry.iter().collect();
        products.sort_unstable_by_key(|product| product.id);
        Self {
            format: SNAPSHOT_FORMAT,
            version: SNAPSHOT_VERSION,
            products,
        }
    }
}

/// Header read first so an unknown version is reported as such rather than
/// as a field mismatch in the body.
#[derive(Debug, Deserialize)]
struct SnapshotHeader {
    format: String,
    version: u32,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SnapshotIn {
    #[allow(dead_code)]
    format: String,
    #[allow(dead_code)]
    version: u32,
    products: Vec<SnapshotEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SnapshotEntry {
    id: ProductId,
    name: String,
    quantity: i64,
    price: Decimal,
}

/// Parses snapshot bytes and rebuilds a registry, re-validating every entry.
///
/// Any invalid entry rejects the whole snapshot; a partially rebuilt registry
/// is never returned.
pub(crate) fn decode(path: &Path, bytes: &[u8]) -> Result<Registry, PersistenceError> {
    let header: SnapshotHeader = serde_json::from_slice(bytes)
        .map_err(|e| PersistenceError::corrupt(path, e.to_string()))?;
    if header.format != SNAPSHOT_FORMAT {
        return Err(PersistenceError::corrupt(
            path,
            format!("unrecognized format tag {:?}", header.format),
        ));
    }
    if header.version != SNAPSHOT_VERSION {
        return Err(PersistenceError::UnsupportedVersion {
            path: path.to_path_buf(),
            found: header.version,
        });
    }

    let body: SnapshotIn = serde_json::from_slice(bytes)
        .map_err(|e| PersistenceError::corrupt(path, e.to_string()))?;

    let mut registry = Registry::new();
    for entry in body.products {
        let id = entry.id;
        registry
            .create(id, ProductDraft::new(entry.name, entry.quantity, entry.price))
            .map_err(|e| PersistenceError::corrupt(path, format!("entry {id}: {e}")))?;
    }
    Ok(registry)
}

pub(crate) fn encode(registry: &Registry) -> Result<Vec<u8>, PersistenceError> {
    let mut bytes = serde_json::to_vec_pretty(&SnapshotOut::from_registry(registry))?;
    bytes.push(b'\n');
    Ok(bytes)
}
