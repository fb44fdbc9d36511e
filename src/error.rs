//! Catalog error model.

use crate::catalog::models::Sku;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type used across the catalog.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Typed outcomes of a failed catalog operation.
///
/// None of these are fatal; the store is left untouched whenever one is
/// returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Creation attempted with a SKU already present.
    #[error("product already exists")]
    AlreadyExists(Sku),

    #[error("product not found")]
    NotFound(Sku),

    /// The calling merchant does not own the product.
    #[error("unauthorized to perform this action")]
    NotAuthorized,

    /// A caller-supplied field failed a precondition.
    #[error("{0}")]
    InvalidInput(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl CatalogError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            CatalogError::AlreadyExists(_) | CatalogError::InvalidInput(_) => {
                StatusCode::BAD_REQUEST
            }
            CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
            CatalogError::NotAuthorized => StatusCode::FORBIDDEN,
            CatalogError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            CatalogError::Config(msg) => tracing::error!("Configuration error: {}", msg),
            CatalogError::NotAuthorized => tracing::warn!("Rejected cross-merchant mutation"),
            other => tracing::debug!(status = %status, "Request rejected: {}", other),
        }

        let body = Json(json!({
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}
