use serde::{Deserialize, Serialize};

/// The full cascading metrics set derived from a recipe.
///
/// A pure projection: recomputed on every read, never persisted as
/// authoritative state. Monetary fields are rounded to 3 decimals,
/// percentage fields to 2, at each derivation step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    /// Sum of all product line costs
    pub total_line_item_cost: f64,

    /// Sum of all additional-cost totals
    pub total_additional_cost: f64,

    /// total_line_item_cost + total_additional_cost
    pub total_cost: f64,

    /// total_cost / produced_quantity + operating expense (0 if no yield)
    pub unit_cost: f64,

    /// unit_cost marked up by the profit margin
    pub suggested_price: f64,

    /// suggested_price × produced_quantity
    pub total_revenue: f64,

    /// Revenue over raw cost, before operating expense
    pub gross_profit: f64,

    /// Revenue over full unit cost
    pub net_profit: f64,

    /// Gross profit share of the suggested price, in percent
    pub gross_margin_percent: f64,

    /// Net profit share of the suggested price, in percent
    pub net_margin_percent: f64,
}
