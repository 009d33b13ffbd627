//! JSON API handlers for cf-web

pub mod columns;
pub mod health;
pub mod proteins;

pub use columns::column_routes;
pub use health::health_routes;
pub use proteins::protein_routes;
