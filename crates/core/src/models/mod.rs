pub mod additional_cost;
pub mod metrics;
pub mod product;
pub mod recipe;
pub mod saved;
