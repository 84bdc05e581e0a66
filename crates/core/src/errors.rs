use thiserror::Error;

/// Unified error type for the entire recipe-costing-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
///
/// The surface is deliberately small: bad numeric input and malformed CSV
/// rows are absorbed locally (substituted with zero / skipped), never
/// raised. Only collaborator failures and serialization become errors.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Identity ────────────────────────────────────────────────────
    #[error("Not signed in — an owner identity is required to save or load recipes")]
    Unauthenticated,

    // ── Collaborators ───────────────────────────────────────────────
    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Ingredient catalog error: {0}")]
    Catalog(String),

    // ── Serialization ───────────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<bincode::Error> for CoreError {
    fn from(e: bincode::Error) -> Self {
        CoreError::Serialization(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}
