pub mod errors;
pub mod models;
pub mod numeric;
pub mod providers;
pub mod services;
pub mod storage;

use std::sync::Arc;

use uuid::Uuid;

use errors::CoreError;
use models::{
    additional_cost::{AdditionalCost, AdditionalCostField},
    metrics::DerivedMetrics,
    product::{Product, ProductField},
    recipe::{Recipe, RecipeParameters},
    saved::SavedRecipe,
};
use providers::traits::{IngredientCatalog, RecipeRepository};
use services::{
    cell_editor::{CellEditor, CellField},
    cost_service::CostService,
    metrics_service::MetricsService,
    product_service::ProductService,
    reorder,
};
use storage::{csv, gateway::PersistenceGateway};

/// Main entry point for the recipe costing core library.
///
/// Owns the current-recipe aggregate and all services needed to operate
/// on it. Every mutation goes through the stores, which keep per-line
/// derived values current; the full metrics chain is recomputed from
/// scratch on every [`RecipeCosting::metrics`] call — it is a pure
/// projection, cheap enough to run per keystroke.
#[must_use]
pub struct RecipeCosting {
    recipe: Recipe,
    owner: Option<Uuid>,
    product_service: ProductService,
    cost_service: CostService,
    metrics_service: MetricsService,
    editor: CellEditor,
    catalog: Arc<dyn IngredientCatalog>,
    gateway: PersistenceGateway,
    /// Tracks whether any mutation has occurred since the last save/load.
    dirty: bool,
}

impl std::fmt::Debug for RecipeCosting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecipeCosting")
            .field("recipe", &self.recipe.parameters.name)
            .field("products", &self.recipe.products.len())
            .field("additional_costs", &self.recipe.additional_costs.len())
            .field("owner", &self.owner)
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl RecipeCosting {
    /// Create a session around an empty recipe with the given name.
    pub fn new(
        name: impl Into<String>,
        catalog: Arc<dyn IngredientCatalog>,
        repository: Arc<dyn RecipeRepository>,
    ) -> Self {
        Self::build(Recipe::new(name), catalog, repository)
    }

    /// Discard the current aggregate and start over with an empty recipe.
    pub fn create_new(&mut self, name: impl Into<String>) {
        self.recipe = Recipe::new(name);
        self.editor = CellEditor::new();
        self.dirty = false;
    }

    // ── Products ────────────────────────────────────────────────────

    /// Add a product line item. Returns the assigned id.
    pub fn add_product(&mut self, product: Product) -> u32 {
        let id = self.product_service.add(&mut self.recipe, product);
        self.dirty = true;
        id
    }

    /// Apply a field update to a product. Renaming additionally refreshes
    /// the catalog price for the new name. Missing ids are a silent no-op.
    pub async fn update_product(&mut self, id: u32, field: ProductField) {
        let renamed = match &field {
            ProductField::Name(name) => Some(name.clone()),
            _ => None,
        };
        self.product_service.update(&mut self.recipe, id, field);
        self.dirty = true;
        if let Some(name) = renamed {
            self.refresh_catalog_price(id, &name).await;
        }
    }

    /// Remove a product line item. Missing ids are a silent no-op.
    pub fn remove_product(&mut self, id: u32) {
        self.product_service.remove(&mut self.recipe, id);
        self.dirty = true;
    }

    /// Move a product to a new display position. Derived values and
    /// metrics are unaffected.
    pub fn move_product(&mut self, id: u32, target_index: usize) {
        reorder::move_item(&mut self.recipe.products, id, target_index);
        self.dirty = true;
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.recipe.products
    }

    #[must_use]
    pub fn get_product(&self, id: u32) -> Option<&Product> {
        self.recipe.products.iter().find(|p| p.id == id)
    }

    // ── Additional Costs ────────────────────────────────────────────

    /// Add an additional-cost line item. Returns the assigned id.
    pub fn add_additional_cost(&mut self, cost: AdditionalCost) -> u32 {
        let id = self.cost_service.add(&mut self.recipe, cost);
        self.dirty = true;
        id
    }

    /// Apply a field update to a cost line. Missing ids are a silent no-op.
    pub fn update_additional_cost(&mut self, id: u32, field: AdditionalCostField) {
        self.cost_service.update(&mut self.recipe, id, field);
        self.dirty = true;
    }

    /// Remove a cost line item. Missing ids are a silent no-op.
    pub fn remove_additional_cost(&mut self, id: u32) {
        self.cost_service.remove(&mut self.recipe, id);
        self.dirty = true;
    }

    /// Move a cost line to a new display position.
    pub fn move_additional_cost(&mut self, id: u32, target_index: usize) {
        reorder::move_item(&mut self.recipe.additional_costs, id, target_index);
        self.dirty = true;
    }

    #[must_use]
    pub fn additional_costs(&self) -> &[AdditionalCost] {
        &self.recipe.additional_costs
    }

    #[must_use]
    pub fn get_additional_cost(&self, id: u32) -> Option<&AdditionalCost> {
        self.recipe.additional_costs.iter().find(|c| c.id == id)
    }

    // ── Parameters ──────────────────────────────────────────────────

    pub fn rename_recipe(&mut self, name: impl Into<String>) {
        self.recipe.parameters.name = name.into();
        self.dirty = true;
    }

    pub fn set_produced_quantity(&mut self, quantity: f64) {
        self.recipe.parameters.produced_quantity = quantity;
        self.dirty = true;
    }

    pub fn set_operating_expense_per_unit(&mut self, expense: f64) {
        self.recipe.parameters.operating_expense_per_unit = expense;
        self.dirty = true;
    }

    pub fn set_profit_margin_percent(&mut self, margin: f64) {
        self.recipe.parameters.profit_margin_percent = margin;
        self.dirty = true;
    }

    #[must_use]
    pub fn parameters(&self) -> &RecipeParameters {
        &self.recipe.parameters
    }

    // ── Metrics ─────────────────────────────────────────────────────

    /// Recompute the full derived-metrics chain from the current state.
    #[must_use]
    pub fn metrics(&self) -> DerivedMetrics {
        self.metrics_service.compute(&self.recipe)
    }

    // ── Inline Cell Editing ─────────────────────────────────────────

    /// Begin editing a cell. Returns `false` for read-only (derived)
    /// columns. At most one cell is in edit mode at a time; starting a
    /// new edit replaces the active cell.
    pub fn start_edit(&mut self, item_id: u32, field: CellField) -> bool {
        self.editor.start_edit(item_id, field)
    }

    /// Replace the pending text of the active cell.
    pub fn type_text(&mut self, text: &str) {
        self.editor.type_text(text);
    }

    /// Commit the pending edit into the owning store. Numeric columns go
    /// through the permissive parser (bad text becomes zero); committing
    /// a product name triggers the catalog lookup.
    pub async fn commit_edit(&mut self) {
        let Some(edit) = self.editor.commit() else {
            return;
        };
        match edit.field {
            CellField::ProductName => {
                self.update_product(edit.item_id, ProductField::Name(edit.text)).await;
            }
            CellField::ProductUserPrice => {
                self.update_product(
                    edit.item_id,
                    ProductField::UserPrice(numeric::parse_number(&edit.text)),
                )
                .await;
            }
            CellField::ProductPresentationSize => {
                self.update_product(
                    edit.item_id,
                    ProductField::PresentationSize(numeric::parse_number(&edit.text)),
                )
                .await;
            }
            CellField::ProductRecipeUsage => {
                self.update_product(
                    edit.item_id,
                    ProductField::RecipeUsage(numeric::parse_number(&edit.text)),
                )
                .await;
            }
            CellField::ProductSupplier => {
                let supplier = if edit.text.trim().is_empty() {
                    None
                } else {
                    Some(edit.text)
                };
                self.update_product(edit.item_id, ProductField::Supplier(supplier)).await;
            }
            CellField::CostDescription => {
                self.update_additional_cost(
                    edit.item_id,
                    AdditionalCostField::Description(edit.text),
                );
            }
            CellField::CostPackageCost => {
                self.update_additional_cost(
                    edit.item_id,
                    AdditionalCostField::PackageCost(numeric::parse_number(&edit.text)),
                );
            }
            CellField::CostUnitsPerPackage => {
                self.update_additional_cost(
                    edit.item_id,
                    AdditionalCostField::UnitsPerPackage(numeric::parse_number(&edit.text)),
                );
            }
            CellField::CostUnitsUsed => {
                self.update_additional_cost(
                    edit.item_id,
                    AdditionalCostField::UnitsUsed(numeric::parse_number(&edit.text)),
                );
            }
            // Read-only columns are rejected by start_edit and can never
            // reach a commit.
            CellField::ProductCatalogPrice
            | CellField::ProductLineCost
            | CellField::CostUnitCost
            | CellField::CostTotal => {}
        }
    }

    /// Discard the pending edit without committing.
    pub fn cancel_edit(&mut self) {
        self.editor.cancel();
    }

    #[must_use]
    pub fn active_cell(&self) -> Option<(u32, CellField)> {
        self.editor.active_cell()
    }

    #[must_use]
    pub fn pending_text(&self) -> &str {
        self.editor.pending_text()
    }

    // ── CSV Export / Import ─────────────────────────────────────────

    /// Serialize the current recipe to the three-section CSV document.
    #[must_use]
    pub fn export_csv(&self) -> String {
        csv::encode(&self.recipe)
    }

    /// Replace the current aggregate with one parsed from a CSV document.
    /// Malformed rows are logged and skipped, never an error.
    pub fn import_csv(&mut self, text: &str) {
        self.recipe = csv::decode(text);
        self.editor = CellEditor::new();
        self.dirty = true;
    }

    /// Export the full recipe as pretty-printed JSON (unencoded snapshot
    /// for debugging/display).
    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.recipe)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize recipe: {e}")))
    }

    // ── Persistence ─────────────────────────────────────────────────

    /// Set or clear the owner identity used as the persistence key.
    pub fn set_owner(&mut self, owner: Option<Uuid>) {
        self.owner = owner;
    }

    #[must_use]
    pub fn owner(&self) -> Option<Uuid> {
        self.owner
    }

    /// Upsert the current recipe under `(owner, recipe name)`.
    /// Clears the unsaved-changes flag on success.
    pub async fn save(&mut self) -> Result<SavedRecipe, CoreError> {
        let snapshot = self.gateway.save(self.owner, &self.recipe).await?;
        self.dirty = false;
        Ok(snapshot)
    }

    /// List all recipes saved by the current owner.
    pub async fn list_saved(&self) -> Result<Vec<SavedRecipe>, CoreError> {
        self.gateway.list(self.owner).await
    }

    /// Replace the current aggregate with one loaded from a snapshot,
    /// refreshing catalog prices by name.
    pub async fn load_saved(&mut self, snapshot: &SavedRecipe) -> Result<(), CoreError> {
        self.recipe = self.gateway.load(snapshot, self.catalog.as_ref()).await?;
        self.editor = CellEditor::new();
        self.dirty = false;
        Ok(())
    }

    /// Returns `true` if the recipe has been modified since the last
    /// save or load.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    // ── Internal ────────────────────────────────────────────────────

    async fn refresh_catalog_price(&mut self, id: u32, name: &str) {
        match self.catalog.find_by_name(name).await {
            Ok(found) => {
                self.product_service.set_catalog_price(
                    &mut self.recipe,
                    id,
                    found.map(|m| m.presentation_price),
                );
            }
            Err(e) => {
                tracing::warn!(
                    catalog = self.catalog.name(),
                    ingredient = name,
                    error = %e,
                    "catalog lookup failed; keeping previous price"
                );
            }
        }
    }

    fn build(
        recipe: Recipe,
        catalog: Arc<dyn IngredientCatalog>,
        repository: Arc<dyn RecipeRepository>,
    ) -> Self {
        Self {
            recipe,
            owner: None,
            product_service: ProductService::new(),
            cost_service: CostService::new(),
            metrics_service: MetricsService::new(),
            editor: CellEditor::new(),
            catalog,
            gateway: PersistenceGateway::new(repository),
            dirty: false,
        }
    }
}
