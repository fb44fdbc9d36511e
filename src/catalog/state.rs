//! Catalog Application State
//!
//! Holds the catalog service shared by every request handler.

use super::{
    service::{CatalogService, MerchantScope},
    store::CatalogStore,
};
use std::sync::Arc;

// =============================================================================
// Application State
// =============================================================================

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

pub struct AppState {
    /// Business-rule layer over the in-memory catalog store.
    pub catalog: CatalogService,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(MerchantScope::default())
    }
}

impl AppState {
    /// Creates an AppState around a fresh, empty catalog.
    pub fn new(scope: MerchantScope) -> Self {
        let store = Arc::new(CatalogStore::new());
        tracing::info!(?scope, "Catalog store initialised");

        Self {
            catalog: CatalogService::new(store, scope),
        }
    }
}
