use crate::models::additional_cost::{AdditionalCost, AdditionalCostField};
use crate::models::recipe::Recipe;

/// Manages the ordered collection of additional-cost line items.
/// Same operation shape as `ProductService`, differing only in the
/// derivation formula invoked.
pub struct CostService;

impl CostService {
    pub fn new() -> Self {
        Self
    }

    /// Add a cost line to the end of the collection.
    /// Id assignment and derive-before-insert match the product store.
    pub fn add(&self, recipe: &mut Recipe, mut cost: AdditionalCost) -> u32 {
        let id = recipe.additional_costs.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        cost.id = id;
        cost.derive();
        recipe.additional_costs.push(cost);
        id
    }

    /// Apply a field update to the cost line with the given id.
    /// Missing ids are a silent no-op (see `ProductService::update`).
    pub fn update(&self, recipe: &mut Recipe, id: u32, field: AdditionalCostField) {
        let Some(cost) = recipe.additional_costs.iter_mut().find(|c| c.id == id) else {
            return;
        };
        let rederive = field.affects_totals();
        match field {
            AdditionalCostField::Description(description) => cost.description = description,
            AdditionalCostField::PackageCost(package_cost) => cost.package_cost = package_cost,
            AdditionalCostField::UnitsPerPackage(units) => cost.units_per_package = units,
            AdditionalCostField::UnitsUsed(units) => cost.units_used = units,
        }
        if rederive {
            cost.derive();
        }
    }

    /// Remove the cost line with the given id, preserving the order of
    /// the remaining items. Missing ids are a silent no-op.
    pub fn remove(&self, recipe: &mut Recipe, id: u32) {
        recipe.additional_costs.retain(|c| c.id != id);
    }
}

impl Default for CostService {
    fn default() -> Self {
        Self::new()
    }
}
