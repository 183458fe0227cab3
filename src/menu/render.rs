use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::Product;
use crate::error::InventoryError;
use crate::inventory::InventoryTotals;

pub const MENU: &str = "\n=== Inventory Management System ===\n\
1. Add Product\n\
2. View Products\n\
3. Update Product\n\
4. Delete Product\n\
5. Display Inventory Summary\n\
6. Exit";

/// Formats a money amount with two decimals, rounding half away from zero.
pub fn money(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}")
}

pub fn product_line(product: &Product, currency: &str) -> String {
    format!(
        "ID: {} | Name: {} | Qty: {} | Price: {} {}",
        product.id,
        product.name,
        product.quantity,
        currency,
        money(product.price)
    )
}

pub fn summary_lines(totals: &InventoryTotals, currency: &str) -> Vec<String> {
    vec![
        "\n=== Inventory Summary ===".to_string(),
        format!("Total Products: {}", totals.total_products),
        format!("Total Quantity: {}", totals.total_quantity),
        format!("Total Inventory Value: {} {}", currency, money(totals.total_value)),
    ]
}

/// User-facing message for a failed operation. Each kind reads differently.
pub fn error_message(err: &InventoryError) -> String {
    match err {
        InventoryError::DuplicateId(_) => "Product ID already exists!".to_string(),
        InventoryError::InvalidName => "Product name cannot be empty!".to_string(),
        InventoryError::InvalidQuantity { quantity, .. } if *quantity < 0 => {
            "Quantity cannot be negative!".to_string()
        }
        InventoryError::InvalidQuantity { quantity, .. } => {
            format!("Quantity {quantity} is too large!")
        }
        InventoryError::InvalidPrice { price, .. } if *price < Decimal::ZERO => {
            "Price cannot be negative!".to_string()
        }
        InventoryError::InvalidPrice { price, reason } => format!("Invalid price {price}: {reason}!"),
        InventoryError::NotFound(_) => "Product not found!".to_string(),
        InventoryError::Persistence(e) => format!("Error saving inventory file: {e}"),
        InventoryError::ActorCommunication(e) => format!("Inventory unavailable: {e}"),
    }
}
