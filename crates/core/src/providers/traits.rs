use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::saved::SavedRecipe;

/// A catalog match for an ingredient name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogMatch {
    /// Price of the ingredient's presentation/package
    pub presentation_price: f64,
}

/// Lookup interface into the ingredient catalog (typically fed by the
/// inventory subsystem).
///
/// Injected into the facade rather than reached for ambiently, so the
/// catalog can be swapped without touching the calculator. Matching is
/// by name, case-insensitive and trimmed — that contract belongs to the
/// implementation, since it owns the index.
#[async_trait]
pub trait IngredientCatalog: Send + Sync {
    /// Human-readable name of this catalog (for logs/errors).
    fn name(&self) -> &str;

    /// Find the catalog entry for an ingredient name.
    /// `Ok(None)` means no match; `Err` is reserved for transport failure.
    async fn find_by_name(&self, name: &str) -> Result<Option<CatalogMatch>, CoreError>;
}

/// Storage interface for saved recipes, keyed by `(owner, recipe name)`.
///
/// The snapshot is opaque to the store: how it is represented on the wire
/// is the implementation's concern. Conflicting writes to the same key
/// are last-write-wins by contract.
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Human-readable name of this repository (for logs/errors).
    fn name(&self) -> &str;

    /// Insert or overwrite the snapshot stored under
    /// `(owner, snapshot.name)`.
    async fn upsert(&self, owner: Uuid, snapshot: SavedRecipe) -> Result<(), CoreError>;

    /// All snapshots belonging to the owner. An owner with no saved
    /// recipes yields an empty vec, not an error.
    async fn list(&self, owner: Uuid) -> Result<Vec<SavedRecipe>, CoreError>;
}
