use std::collections::hash_map::Entry;
use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::domain::{Product, ProductDraft, ProductId};
use crate::error::{InventoryError, InventoryResult};
use crate::inventory::summary::{InventoryTotals, SummaryReport};

/// Owns every product for the lifetime of the process.
///
/// Operations validate before they mutate, so a failed call never leaves a
/// partially applied change behind. Nothing here performs I/O.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Registry {
    products: HashMap<ProductId, Product>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a new product.
    ///
    /// # Errors
    /// `DuplicateId` if `id` is taken, otherwise the first field validation failure.
    pub fn create(&mut self, id: ProductId, draft: ProductDraft) -> InventoryResult<&Product> {
        match self.products.entry(id) {
            Entry::Occupied(_) => Err(InventoryError::DuplicateId(id)),
            Entry::Vacant(slot) => {
                let product = Product::from_draft(id, draft)?;
                Ok(slot.insert(product))
            }
        }
    }

    pub fn get(&self, id: ProductId) -> InventoryResult<&Product> {
        self.products.get(&id).ok_or(InventoryError::NotFound(id))
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.products.contains_key(&id)
    }

    /// Snapshot of all entries in unspecified order.
    pub fn list(&self) -> Vec<Product> {
        self.products.values().cloned().collect()
    }

    /// Replaces name, quantity and price of an existing entry.
    pub fn update(&mut self, id: ProductId, draft: ProductDraft) -> InventoryResult<&Product> {
        let product = self
            .products
            .get_mut(&id)
            .ok_or(InventoryError::NotFound(id))?;
        product.replace(draft)?;
        Ok(product)
    }

    pub fn delete(&mut self, id: ProductId) -> InventoryResult<Product> {
        self.products.remove(&id).ok_or(InventoryError::NotFound(id))
    }

    pub fn summary(&self) -> SummaryReport {
        if self.products.is_empty() {
            return SummaryReport::Empty;
        }

        let (total_quantity, total_value) = self.products.values().fold(
            (0u64, Decimal::ZERO),
            |(quantity, value), product| {
                (
                    quantity + u64::from(product.quantity),
                    value + product.value(),
                )
            },
        );

        SummaryReport::Totals(InventoryTotals {
            total_products: self.products.len(),
            total_quantity,
            total_value,
        })
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }
}
