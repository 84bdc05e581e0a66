use serde::{Deserialize, Serialize};

use crate::numeric;

/// An ingredient line item in a recipe.
///
/// `line_cost` is derived, never set directly: it follows the effective
/// price (user override or catalog fallback) scaled by how much of the
/// purchased presentation the recipe consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique within a recipe, stable across reorders
    pub id: u32,

    /// Ingredient name — also the key used for catalog lookups
    pub name: String,

    /// User-entered price for the presentation/package.
    /// `0.0` is the "no user override" marker, not a free ingredient.
    pub user_price: f64,

    /// Price looked up from the ingredient catalog by name.
    /// `None` means the catalog has never matched this name.
    pub catalog_price: Option<f64>,

    /// Grams (or other mass unit) per purchased package. Must be > 0
    /// for a meaningful cost; otherwise `line_cost` degrades to 0.
    pub presentation_size: f64,

    /// Grams (or unit) consumed by the recipe
    pub recipe_usage: f64,

    /// Derived: effective price × usage / presentation size, rounded
    pub line_cost: f64,

    /// Optional supplier name
    #[serde(default)]
    pub supplier: Option<String>,
}

impl Product {
    /// Create a blank line item with the given name. The id is assigned
    /// by the store when the item is added.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            user_price: 0.0,
            catalog_price: None,
            presentation_size: 0.0,
            recipe_usage: 0.0,
            line_cost: 0.0,
            supplier: None,
        }
    }

    /// Builder helper for the three pricing inputs.
    pub fn with_pricing(mut self, user_price: f64, presentation_size: f64, recipe_usage: f64) -> Self {
        self.user_price = user_price;
        self.presentation_size = presentation_size;
        self.recipe_usage = recipe_usage;
        self
    }

    pub fn with_catalog_price(mut self, price: f64) -> Self {
        self.catalog_price = Some(price);
        self
    }

    pub fn with_supplier(mut self, supplier: impl Into<String>) -> Self {
        self.supplier = Some(supplier.into());
        self
    }

    /// The price actually used in cost calculation.
    ///
    /// Business rule: a user override takes precedence **unless it is
    /// exactly zero**, in which case the catalog price is the fallback.
    /// A genuinely free ingredient cannot be expressed through this field.
    pub fn effective_price(&self) -> f64 {
        if self.user_price != 0.0 {
            self.user_price
        } else {
            self.catalog_price.unwrap_or(0.0)
        }
    }

    /// Recompute `line_cost` from the current inputs.
    /// A non-positive presentation size degrades the cost to 0.
    pub fn derive_line_cost(&mut self) {
        self.line_cost = if self.presentation_size <= 0.0 {
            0.0
        } else {
            numeric::round3(self.effective_price() * self.recipe_usage / self.presentation_size)
        };
    }
}

/// The user-updatable fields of a [`Product`], each carrying its new value.
///
/// Derived fields (`catalog_price`, `line_cost`) are absent on purpose:
/// attempting to write them is a compile-time error, not a runtime check.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductField {
    Name(String),
    UserPrice(f64),
    PresentationSize(f64),
    RecipeUsage(f64),
    Supplier(Option<String>),
}

impl ProductField {
    /// Whether changing this field participates in the line-cost derivation.
    pub fn affects_line_cost(&self) -> bool {
        matches!(
            self,
            ProductField::UserPrice(_)
                | ProductField::PresentationSize(_)
                | ProductField::RecipeUsage(_)
        )
    }
}
