//! Catalogo API: products and categories catalog backend over PostgreSQL.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use auth::TokenService;
pub use config::{AppConfig, ConfigError};
pub use error::ApiError;
pub use routes::app_router;
pub use service::CatalogService;
pub use state::AppState;
pub use store::{ensure_catalog_tables, ensure_database_exists};
