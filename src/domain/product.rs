use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{InventoryError, InventoryResult};

/// Unique key of a product within the inventory.
pub type ProductId = i32;

/// Largest unit price accepted by the inventory.
///
/// Together with [`MAX_PRICE_SCALE`] this keeps `quantity * price` summed over
/// any realistic number of entries inside `Decimal`'s 96-bit mantissa.
pub const MAX_PRICE: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Maximum number of fractional digits a price may carry.
pub const MAX_PRICE_SCALE: u32 = 4;

/// Stored prices always carry at least cents.
const MIN_PRICE_SCALE: u32 = 2;

/// Represents a product in the inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub price: Decimal,
}

/// Payload for creating a product or replacing an existing product's fields.
///
/// Fields are raw, unvalidated input; quantity is signed so that negative
/// entries reach validation instead of failing to parse.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub quantity: i64,
    pub price: Decimal,
}

/// Validated field values ready to be written into a [`Product`].
#[derive(Debug)]
struct ProductFields {
    name: String,
    quantity: u32,
    price: Decimal,
}

impl ProductDraft {
    pub fn new(name: impl Into<String>, quantity: i64, price: Decimal) -> Self {
        Self {
            name: name.into(),
            quantity,
            price,
        }
    }

    fn validate(self) -> InventoryResult<ProductFields> {
        let name = validate_name(&self.name)?;
        let quantity = validate_quantity(self.quantity)?;
        let price = validate_price(self.price)?;
        Ok(ProductFields {
            name,
            quantity,
            price,
        })
    }
}

impl Product {
    /// Builds a product from an id and a draft, validating every field.
    pub fn from_draft(id: ProductId, draft: ProductDraft) -> InventoryResult<Self> {
        let fields = draft.validate()?;
        Ok(Self {
            id,
            name: fields.name,
            quantity: fields.quantity,
            price: fields.price,
        })
    }

    /// Replaces name, quantity and price. The id never changes.
    ///
    /// # Errors
    /// Returns the first validation failure; on error `self` is untouched.
    pub fn replace(&mut self, draft: ProductDraft) -> InventoryResult<()> {
        let fields = draft.validate()?;
        self.name = fields.name;
        self.quantity = fields.quantity;
        self.price = fields.price;
        Ok(())
    }

    /// Stock value of this entry, `quantity * price`, exact.
    pub fn value(&self) -> Decimal {
        Decimal::from(self.quantity) * self.price
    }
}

pub fn validate_name(name: &str) -> InventoryResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(InventoryError::InvalidName);
    }
    Ok(trimmed.to_string())
}

pub fn validate_quantity(quantity: i64) -> InventoryResult<u32> {
    if quantity < 0 {
        return Err(InventoryError::InvalidQuantity {
            quantity,
            reason: "quantity cannot be negative",
        });
    }
    u32::try_from(quantity).map_err(|_| InventoryError::InvalidQuantity {
        quantity,
        reason: "quantity exceeds the supported maximum",
    })
}

pub fn validate_price(price: Decimal) -> InventoryResult<Decimal> {
    if price < Decimal::ZERO {
        return Err(InventoryError::InvalidPrice {
            price,
            reason: "price cannot be negative",
        });
    }
    if price > MAX_PRICE {
        return Err(InventoryError::InvalidPrice {
            price,
            reason: "price exceeds the supported maximum",
        });
    }
    if price.normalize().scale() > MAX_PRICE_SCALE {
        return Err(InventoryError::InvalidPrice {
            price,
            reason: "price has too many decimal places",
        });
    }
    // Canonical form: trailing zeros stripped down to cents, "-0" as 0.00.
    let mut canonical = price.normalize();
    if canonical.scale() < MIN_PRICE_SCALE {
        canonical.rescale(MIN_PRICE_SCALE);
    }
    Ok(canonical)
}
