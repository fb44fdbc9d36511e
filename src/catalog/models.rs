//! Catalog Domain Models
//!
//! This module contains the product entity, its identifiers, and the
//! request/response shapes exchanged with the HTTP layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

// =============================================================================
// Identifiers
// =============================================================================

/// Stock-keeping unit identifying a single product across the whole catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sku(Uuid);

impl Sku {
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Generates a fresh random SKU.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Sku {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// Identifier of the merchant owning one or more products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MerchantId(Uuid);

impl MerchantId {
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for MerchantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for MerchantId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

// =============================================================================
// Product Entity
// =============================================================================

/// A catalog entry owned by a single merchant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    /// Unique identifier, fixed at creation
    #[serde(rename = "sku_id")]
    pub sku: Sku,

    /// Owning merchant, fixed at creation
    pub merchant_id: MerchantId,

    pub name: String,

    pub description: String,

    /// Price in the smallest currency unit
    pub price: u64,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// Field changes requested by an update.
///
/// `None` or blank text leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
}

// =============================================================================
// HTTP Inputs
// =============================================================================

/// Body of `POST /api/products`.
///
/// Identifiers stay textual here so malformed ones can be reported with a
/// dedicated message instead of a generic JSON error.
#[derive(Debug, Deserialize)]
pub struct CreateProductInput {
    pub sku_id: String,
    pub merchant_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: i64,
}

/// Body of `PATCH /api/products/{sku_id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateProductInput {
    pub merchant_id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
}

impl UpdateProductInput {
    pub fn into_patch(self) -> ProductPatch {
        ProductPatch {
            name: self.name,
            description: self.description,
            price: self.price,
        }
    }
}

/// Body of `DELETE /api/products/{sku_id}`.
#[derive(Debug, Deserialize)]
pub struct DeleteProductInput {
    pub merchant_id: String,
}

// =============================================================================
// HTTP Responses
// =============================================================================

/// Uniform success envelope returned by every catalog route.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}
