use crate::models::product::{Product, ProductField};
use crate::models::recipe::Recipe;

/// Manages the ordered collection of product (ingredient) line items.
///
/// Pure business logic — no I/O. Catalog lookups triggered by renames are
/// the facade's job: it resolves the price through the injected catalog
/// and writes it back via [`ProductService::set_catalog_price`].
pub struct ProductService;

impl ProductService {
    pub fn new() -> Self {
        Self
    }

    /// Add a product to the end of the collection.
    ///
    /// Assigns `id = max(existing) + 1` (or 1 if empty) and derives the
    /// line cost before insertion, so a new item is never visible with a
    /// stale derived value. Returns the assigned id.
    pub fn add(&self, recipe: &mut Recipe, mut product: Product) -> u32 {
        let id = recipe.products.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        product.id = id;
        product.derive_line_cost();
        recipe.products.push(product);
        id
    }

    /// Apply a field update to the product with the given id.
    ///
    /// Missing ids are a silent no-op: a concurrent remove may have taken
    /// the row out from under an in-flight edit, and dropping that edit is
    /// the intended idempotency behavior.
    ///
    /// Recomputes `line_cost` only when the changed field participates in
    /// its derivation.
    pub fn update(&self, recipe: &mut Recipe, id: u32, field: ProductField) {
        let Some(product) = recipe.products.iter_mut().find(|p| p.id == id) else {
            return;
        };
        let rederive = field.affects_line_cost();
        match field {
            ProductField::Name(name) => product.name = name,
            ProductField::UserPrice(price) => product.user_price = price,
            ProductField::PresentationSize(size) => product.presentation_size = size,
            ProductField::RecipeUsage(usage) => product.recipe_usage = usage,
            ProductField::Supplier(supplier) => product.supplier = supplier,
        }
        if rederive {
            product.derive_line_cost();
        }
    }

    /// Write a refreshed catalog price and recompute the line cost.
    /// Missing ids are a silent no-op, same as `update`.
    pub fn set_catalog_price(&self, recipe: &mut Recipe, id: u32, price: Option<f64>) {
        let Some(product) = recipe.products.iter_mut().find(|p| p.id == id) else {
            return;
        };
        product.catalog_price = price;
        product.derive_line_cost();
    }

    /// Remove the product with the given id, preserving the order of the
    /// remaining items. Missing ids are a silent no-op.
    pub fn remove(&self, recipe: &mut Recipe, id: u32) {
        recipe.products.retain(|p| p.id != id);
    }
}

impl Default for ProductService {
    fn default() -> Self {
        Self::new()
    }
}
