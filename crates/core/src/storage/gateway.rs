use std::sync::Arc;

use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::recipe::Recipe;
use crate::models::saved::SavedRecipe;
use crate::providers::traits::{IngredientCatalog, RecipeRepository};

/// High-level persistence operations: save/list/load recipes against a
/// pluggable repository.
///
/// Saving is an upsert keyed by `(owner, recipe name)` — the repository
/// contract makes concurrent saves of the same name last-write-wins.
pub struct PersistenceGateway {
    repository: Arc<dyn RecipeRepository>,
}

impl PersistenceGateway {
    pub fn new(repository: Arc<dyn RecipeRepository>) -> Self {
        Self { repository }
    }

    /// Snapshot the recipe and upsert it under `(owner, name)`.
    /// Fails with `Unauthenticated` when no owner identity is present.
    /// Returns the saved snapshot on success.
    pub async fn save(
        &self,
        owner: Option<Uuid>,
        recipe: &Recipe,
    ) -> Result<SavedRecipe, CoreError> {
        let owner = owner.ok_or(CoreError::Unauthenticated)?;
        let snapshot = SavedRecipe::from_recipe(recipe, chrono::Utc::now().date_naive());
        self.repository.upsert(owner, snapshot.clone()).await?;
        tracing::debug!(
            repository = self.repository.name(),
            recipe = %snapshot.name,
            "saved recipe snapshot"
        );
        Ok(snapshot)
    }

    /// All snapshots belonging to the owner. An empty vec is the explicit
    /// "nothing saved yet" signal, not an error.
    pub async fn list(&self, owner: Option<Uuid>) -> Result<Vec<SavedRecipe>, CoreError> {
        let owner = owner.ok_or(CoreError::Unauthenticated)?;
        self.repository.list(owner).await
    }

    /// Reconstruct the aggregate from a snapshot, refreshing each
    /// product's catalog price by name — catalog prices can drift between
    /// save and load.
    ///
    /// A lookup miss or catalog failure leaves the stored price in place
    /// rather than failing the load.
    pub async fn load(
        &self,
        snapshot: &SavedRecipe,
        catalog: &dyn IngredientCatalog,
    ) -> Result<Recipe, CoreError> {
        let mut recipe = snapshot.to_recipe();

        for product in &mut recipe.products {
            match catalog.find_by_name(&product.name).await {
                Ok(Some(entry)) => {
                    product.catalog_price = Some(entry.presentation_price);
                    product.derive_line_cost();
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(
                        catalog = catalog.name(),
                        ingredient = %product.name,
                        error = %e,
                        "catalog refresh failed on load; keeping stored price"
                    );
                }
            }
        }

        tracing::debug!(recipe = %snapshot.name, "loaded recipe snapshot");
        Ok(recipe)
    }
}
