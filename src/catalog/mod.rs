//! Product Catalog Domain Module
//!
//! This module contains the merchant product catalog, including:
//! - Domain models (Product, identifiers, inputs, responses)
//! - The concurrency-safe in-memory store
//! - The service enforcing catalog rules
//! - Application state and REST API handlers

pub mod handlers;
pub mod helpers;
pub mod models;
pub mod service;
pub mod state;
pub mod store;

// Re-export commonly used types for convenience
pub use handlers::routes;
pub use service::{CatalogService, MerchantScope};
pub use state::{AppState, SharedState};
pub use store::CatalogStore;
