pub mod csv;
pub mod gateway;
