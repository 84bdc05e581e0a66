pub mod traits;

// In-memory implementations (offline/local mode, test fixtures)
pub mod memory;
