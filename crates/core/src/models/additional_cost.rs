use serde::{Deserialize, Serialize};

use crate::numeric;

/// A packaging/overhead line item in a recipe.
///
/// `unit_cost` and `total` are derived: unit cost splits the package cost
/// across the units in a package, total scales it by the units consumed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdditionalCost {
    /// Unique within a recipe, stable across reorders
    pub id: u32,

    /// What this cost is (e.g., "Box", "Label", "Gas")
    pub description: String,

    /// Price of one purchased package
    pub package_cost: f64,

    /// Units contained in one package. Must be > 0 for a meaningful
    /// unit cost; otherwise `unit_cost` (and so `total`) degrades to 0.
    pub units_per_package: f64,

    /// Derived: package cost / units per package
    pub unit_cost: f64,

    /// Units consumed by the recipe
    pub units_used: f64,

    /// Derived: unit cost × units used
    pub total: f64,
}

impl AdditionalCost {
    /// Create a blank cost line with the given description. The id is
    /// assigned by the store when the item is added.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            id: 0,
            description: description.into(),
            package_cost: 0.0,
            units_per_package: 0.0,
            unit_cost: 0.0,
            units_used: 0.0,
            total: 0.0,
        }
    }

    /// Builder helper for the three cost inputs.
    pub fn with_costing(mut self, package_cost: f64, units_per_package: f64, units_used: f64) -> Self {
        self.package_cost = package_cost;
        self.units_per_package = units_per_package;
        self.units_used = units_used;
        self
    }

    /// Recompute `unit_cost` and `total` from the current inputs.
    /// A non-positive units-per-package degrades both to 0.
    pub fn derive(&mut self) {
        self.unit_cost = if self.units_per_package <= 0.0 {
            0.0
        } else {
            numeric::round3(self.package_cost / self.units_per_package)
        };
        self.total = numeric::round3(self.unit_cost * self.units_used);
    }
}

/// The user-updatable fields of an [`AdditionalCost`].
/// `unit_cost` and `total` are derived and deliberately absent.
#[derive(Debug, Clone, PartialEq)]
pub enum AdditionalCostField {
    Description(String),
    PackageCost(f64),
    UnitsPerPackage(f64),
    UnitsUsed(f64),
}

impl AdditionalCostField {
    /// Whether changing this field participates in the derivation chain.
    pub fn affects_totals(&self) -> bool {
        !matches!(self, AdditionalCostField::Description(_))
    }
}
