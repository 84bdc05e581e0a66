use crate::models::metrics::DerivedMetrics;
use crate::models::recipe::Recipe;
use crate::numeric::{round2, round3};

/// Computes the full derived-metrics chain from a recipe.
///
/// Pure — no I/O, no state, referentially transparent: calling it twice
/// with identical inputs yields bit-identical results. Cheap enough to
/// invoke on every keystroke-triggered mutation without debouncing.
pub struct MetricsService;

impl MetricsService {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate the ten formulas of the pricing chain, in order.
    ///
    /// Each step is rounded before it feeds the next, so intermediate
    /// rounding is part of the contract, not a display concern. Every
    /// division guard degrades to 0 instead of raising.
    pub fn compute(&self, recipe: &Recipe) -> DerivedMetrics {
        let quantity = recipe.parameters.produced_quantity;
        let expense = recipe.parameters.operating_expense_per_unit;
        let margin = recipe.parameters.profit_margin_percent;

        let total_line_item_cost =
            round3(recipe.products.iter().map(|p| p.line_cost).sum());
        let total_additional_cost =
            round3(recipe.additional_costs.iter().map(|c| c.total).sum());
        let total_cost = round3(total_line_item_cost + total_additional_cost);

        let unit_cost = round3(if quantity > 0.0 {
            total_cost / quantity + expense
        } else {
            0.0
        });
        let suggested_price = round3(unit_cost * (1.0 + margin / 100.0));
        let total_revenue = round3(suggested_price * quantity);

        let gross_profit = round3(if quantity > 0.0 {
            (suggested_price - total_cost / quantity) * quantity
        } else {
            0.0
        });
        let net_profit = round3((suggested_price - unit_cost) * quantity);

        let gross_margin_percent = round2(if suggested_price > 0.0 {
            (suggested_price - total_cost / quantity.max(1.0)) / suggested_price * 100.0
        } else {
            0.0
        });
        let net_margin_percent = round2(if suggested_price > 0.0 {
            (suggested_price - unit_cost) / suggested_price * 100.0
        } else {
            0.0
        });

        DerivedMetrics {
            total_line_item_cost,
            total_additional_cost,
            total_cost,
            unit_cost,
            suggested_price,
            total_revenue,
            gross_profit,
            net_profit,
            gross_margin_percent,
            net_margin_percent,
        }
    }
}

impl Default for MetricsService {
    fn default() -> Self {
        Self::new()
    }
}
