use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::additional_cost::AdditionalCost;
use super::product::Product;
use super::recipe::{Recipe, RecipeParameters};

/// A persisted recipe snapshot: the name it is keyed by, both line-item
/// collections as nested structured data, and the scalar parameters.
///
/// Derived metrics are deliberately absent — they are reconstructable,
/// so persistence stores only the inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedRecipe {
    /// Recipe name — together with the owner identity this is the
    /// upsert key, so two saves under the same name overwrite
    pub name: String,

    pub products: Vec<Product>,

    pub additional_costs: Vec<AdditionalCost>,

    pub parameters: RecipeParameters,

    /// When this snapshot was written
    pub saved_at: NaiveDate,
}

impl SavedRecipe {
    /// Snapshot the current aggregate for persistence.
    pub fn from_recipe(recipe: &Recipe, saved_at: NaiveDate) -> Self {
        Self {
            name: recipe.parameters.name.clone(),
            products: recipe.products.clone(),
            additional_costs: recipe.additional_costs.clone(),
            parameters: recipe.parameters.clone(),
            saved_at,
        }
    }

    /// Reconstruct the aggregate from this snapshot.
    ///
    /// Derived fields are re-derived rather than trusted, so a snapshot
    /// written by an older build can never carry stale totals forward.
    pub fn to_recipe(&self) -> Recipe {
        let mut recipe = Recipe {
            products: self.products.clone(),
            additional_costs: self.additional_costs.clone(),
            parameters: self.parameters.clone(),
        };
        for product in &mut recipe.products {
            product.derive_line_cost();
        }
        for cost in &mut recipe.additional_costs {
            cost.derive();
        }
        recipe
    }
}
