use rust_decimal::Decimal;

/// Aggregate figures over every entry in a non-empty registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryTotals {
    pub total_products: usize,
    pub total_quantity: u64,
    /// Exact sum of `quantity * price`; round only for display.
    pub total_value: Decimal,
}

/// Result of summarising the registry.
///
/// An empty registry is reported as [`SummaryReport::Empty`] rather than as
/// zero-valued totals, so callers can show a dedicated message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryReport {
    Empty,
    Totals(InventoryTotals),
}
