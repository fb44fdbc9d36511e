//! REST API handlers for catalog operations
//!
//! Each handler parses and validates the transport-level input, calls the
//! [`CatalogService`](super::service::CatalogService), and wraps the outcome in
//! the shared JSON envelope.

use super::{
    helpers::{parse_id, require_text, validate_price},
    models::*,
    state::SharedState,
};
use crate::error::{CatalogError, CatalogResult};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, patch, post},
    Json, Router,
};

pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON";

/// Creates routes for catalog operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/", get(liveness))
        .route("/api/products", post(create_product))
        .route(
            "/api/products/:sku_id",
            patch(edit_product).delete(delete_product),
        )
        .route(
            "/api/merchants/:merchant_id/products",
            get(fetch_merchant_products),
        )
}

async fn liveness() -> &'static str {
    "catalog service is live\n"
}

/// Unwraps a JSON body, reporting any decoding failure as invalid input.
fn decode<T>(body: Result<Json<T>, JsonRejection>) -> CatalogResult<T> {
    match body {
        Ok(Json(payload)) => Ok(payload),
        Err(e) => {
            tracing::debug!("JSON parse error: {}", e.body_text());
            Err(CatalogError::invalid_input(INVALID_JSON_MESSAGE))
        }
    }
}

/// Endpoint: POST /api/products
async fn create_product(
    State(state): State<SharedState>,
    body: Result<Json<CreateProductInput>, JsonRejection>,
) -> CatalogResult<Json<ApiResponse<Product>>> {
    let input = decode(body)?;

    require_text(&input.name, "name")?;
    require_text(&input.description, "description")?;
    validate_price(input.price)?;
    let merchant_id: MerchantId = parse_id(&input.merchant_id)?;
    let sku: Sku = parse_id(&input.sku_id)?;

    let product = state.catalog.create_product(
        merchant_id,
        sku,
        &input.name,
        &input.description,
        input.price,
    )?;

    Ok(Json(ApiResponse::new(
        "product created successfully",
        product,
    )))
}

/// Endpoint: PATCH /api/products/{sku_id}
/// Blank or missing fields keep their stored values.
async fn edit_product(
    State(state): State<SharedState>,
    Path(sku_id): Path<String>,
    body: Result<Json<UpdateProductInput>, JsonRejection>,
) -> CatalogResult<Json<ApiResponse<Product>>> {
    let sku: Sku = parse_id(&sku_id)?;
    let input = decode(body)?;

    if let Some(price) = input.price {
        validate_price(price)?;
    }
    let merchant_id: MerchantId = parse_id(&input.merchant_id)?;

    let product = state
        .catalog
        .update_product(merchant_id, sku, input.into_patch())?;

    Ok(Json(ApiResponse::new(
        "product updated successfully",
        product,
    )))
}

/// Endpoint: DELETE /api/products/{sku_id}
async fn delete_product(
    State(state): State<SharedState>,
    Path(sku_id): Path<String>,
    body: Result<Json<DeleteProductInput>, JsonRejection>,
) -> CatalogResult<Json<ApiResponse<Option<Product>>>> {
    let sku: Sku = parse_id(&sku_id)?;
    let input = decode(body)?;
    let merchant_id: MerchantId = parse_id(&input.merchant_id)?;

    state.catalog.delete_product(merchant_id, sku)?;

    Ok(Json(ApiResponse::new("product deleted successfully", None)))
}

/// Endpoint: GET /api/merchants/{merchant_id}/products
async fn fetch_merchant_products(
    State(state): State<SharedState>,
    Path(merchant_id): Path<String>,
) -> CatalogResult<Json<ApiResponse<Vec<Product>>>> {
    let merchant_id: MerchantId = parse_id(&merchant_id)?;
    let products = state.catalog.list_by_merchant(merchant_id);

    Ok(Json(ApiResponse::new(
        "products retrieved successfully",
        products,
    )))
}
