use serde::{Deserialize, Serialize};

use super::additional_cost::AdditionalCost;
use super::product::Product;

/// The scalar inputs of the pricing chain, alongside the recipe's name
/// (the identifier used for save/load).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeParameters {
    /// Identifier for save/load — unique per owner
    pub name: String,

    /// How many units one batch of the recipe yields.
    /// Must be > 0 for the per-unit division; otherwise unit cost is 0.
    pub produced_quantity: f64,

    /// Flat operating expense added to each unit's cost
    pub operating_expense_per_unit: f64,

    /// Percentage markup applied to unit cost for the suggested price
    pub profit_margin_percent: f64,
}

impl Default for RecipeParameters {
    fn default() -> Self {
        Self {
            name: String::new(),
            produced_quantity: 0.0,
            operating_expense_per_unit: 0.0,
            profit_margin_percent: 0.0,
        }
    }
}

/// The current-recipe aggregate: two ordered line-item collections plus
/// the scalar parameters.
///
/// Exactly one editing session owns a `Recipe` at a time. It is created
/// empty or hydrated from a saved snapshot, mutated in place by the store
/// services, and replaced wholesale when a new recipe is created or
/// another is loaded. Derived metrics are a stateless projection over it
/// (see `MetricsService`), never stored here.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Recipe {
    /// Ingredient line items, in display order
    pub products: Vec<Product>,

    /// Packaging/overhead line items, in display order
    pub additional_costs: Vec<AdditionalCost>,

    /// Scalar pricing parameters
    pub parameters: RecipeParameters,
}

impl Recipe {
    /// Create an empty recipe with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            products: Vec::new(),
            additional_costs: Vec::new(),
            parameters: RecipeParameters {
                name: name.into(),
                ..RecipeParameters::default()
            },
        }
    }
}
