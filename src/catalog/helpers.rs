//! Catalog Business Logic Helpers
//!
//! Small pure functions shared by the service and the HTTP handlers: field
//! validation, patch merging, identifier parsing.

use super::models::{Product, ProductPatch};
use crate::error::{CatalogError, CatalogResult};
use chrono::{DateTime, Utc};
use std::str::FromStr;

pub const INVALID_ID_MESSAGE: &str = "ID is not in its proper form";

/// Parses a textual identifier, mapping failures to `InvalidInput`.
pub fn parse_id<T: FromStr>(raw: &str) -> CatalogResult<T> {
    raw.parse()
        .map_err(|_| CatalogError::invalid_input(INVALID_ID_MESSAGE))
}

/// Requires `value` to contain something other than whitespace.
pub fn require_text(value: &str, field: &str) -> CatalogResult<()> {
    if value.trim().is_empty() {
        return Err(CatalogError::invalid_input(format!("{field} required")));
    }
    Ok(())
}

/// Converts a signed price into the stored unsigned amount.
pub fn validate_price(price: i64) -> CatalogResult<u64> {
    u64::try_from(price)
        .map_err(|_| CatalogError::invalid_input("price cannot be less than zero"))
}

/// Builds the product that results from applying `patch` to `existing`.
///
/// # Behaviour
///
/// * `name` and `description` are replaced only by non-blank text.
/// * `price` is replaced whenever supplied; a negative value is rejected.
/// * Identity fields and `created_at` are carried over, `updated_at` becomes
///   `now` but never earlier than `created_at`.
pub fn merge_patch(
    existing: &Product,
    patch: &ProductPatch,
    now: DateTime<Utc>,
) -> CatalogResult<Product> {
    let price = match patch.price {
        Some(price) => validate_price(price)?,
        None => existing.price,
    };

    Ok(Product {
        sku: existing.sku,
        merchant_id: existing.merchant_id,
        name: pick_text(&patch.name, &existing.name),
        description: pick_text(&patch.description, &existing.description),
        price,
        created_at: existing.created_at,
        updated_at: now.max(existing.created_at),
    })
}

fn pick_text(candidate: &Option<String>, current: &str) -> String {
    match candidate {
        Some(text) if !text.trim().is_empty() => text.clone(),
        _ => current.to_string(),
    }
}

/// One-line summary used in log output, e.g. `"3 product(s) for merchant <id>"`.
pub fn format_listing_summary(products: &[Product]) -> String {
    match products.first() {
        Some(first) => format!(
            "{} product(s) for merchant {}",
            products.len(),
            first.merchant_id
        ),
        None => "no products".to_string(),
    }
}
