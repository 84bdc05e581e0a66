use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::saved::SavedRecipe;

use super::traits::{CatalogMatch, IngredientCatalog, RecipeRepository};

/// Normalized key for name-based catalog lookups.
fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// An ingredient catalog backed by a fixed name → price map.
///
/// Used as the local-mode catalog (seeded from the inventory subsystem's
/// cached prices) and as a fixture in tests. Matching is case-insensitive
/// and trimmed.
#[derive(Debug, Default)]
pub struct StaticIngredientCatalog {
    prices: HashMap<String, f64>,
}

impl StaticIngredientCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from `(name, presentation price)` pairs.
    pub fn with_prices<I, S>(prices: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            prices: prices
                .into_iter()
                .map(|(name, price)| (normalize(&name.into()), price))
                .collect(),
        }
    }

    /// Insert or update a single price entry.
    pub fn set_price(&mut self, name: impl Into<String>, price: f64) {
        self.prices.insert(normalize(&name.into()), price);
    }
}

#[async_trait]
impl IngredientCatalog for StaticIngredientCatalog {
    fn name(&self) -> &str {
        "StaticIngredientCatalog"
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<CatalogMatch>, CoreError> {
        Ok(self
            .prices
            .get(&normalize(name))
            .map(|&presentation_price| CatalogMatch { presentation_price }))
    }
}

/// A recipe repository holding snapshots in process memory.
///
/// Snapshots are stored as opaque bincode blobs keyed by
/// `(owner, recipe name)` — a plain map insert, which makes the
/// last-write-wins upsert contract literal. Suitable for offline/local
/// mode and as the repository fixture in tests.
#[derive(Debug, Default)]
pub struct InMemoryRecipeRepository {
    records: Mutex<HashMap<(Uuid, String), Vec<u8>>>,
}

impl InMemoryRecipeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored snapshots across all owners.
    pub fn record_count(&self) -> usize {
        self.records.lock().map(|records| records.len()).unwrap_or(0)
    }
}

#[async_trait]
impl RecipeRepository for InMemoryRecipeRepository {
    fn name(&self) -> &str {
        "InMemoryRecipeRepository"
    }

    async fn upsert(&self, owner: Uuid, snapshot: SavedRecipe) -> Result<(), CoreError> {
        let key = (owner, snapshot.name.clone());
        let blob = bincode::serialize(&snapshot)?;
        let mut records = self
            .records
            .lock()
            .map_err(|_| CoreError::Persistence("repository lock poisoned".into()))?;
        records.insert(key, blob);
        Ok(())
    }

    async fn list(&self, owner: Uuid) -> Result<Vec<SavedRecipe>, CoreError> {
        let records = self
            .records
            .lock()
            .map_err(|_| CoreError::Persistence("repository lock poisoned".into()))?;
        let mut snapshots = Vec::new();
        for ((record_owner, _), blob) in records.iter() {
            if *record_owner == owner {
                let snapshot: SavedRecipe = bincode::deserialize(blob)
                    .map_err(|e| CoreError::Deserialization(e.to_string()))?;
                snapshots.push(snapshot);
            }
        }
        // Map iteration order is arbitrary; sort for a stable listing.
        snapshots.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(snapshots)
    }
}
