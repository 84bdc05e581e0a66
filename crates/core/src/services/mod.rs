pub mod cell_editor;
pub mod cost_service;
pub mod metrics_service;
pub mod product_service;
pub mod reorder;
