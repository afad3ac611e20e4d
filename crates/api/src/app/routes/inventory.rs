use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Extension, Path, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use uniformdesk_core::{InventoryItemId, SchoolId};
use uniformdesk_inventory::{NewInventoryItem, StockFilter};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_all).post(create_item))
        .route("/:id", get(get_item))
        .route("/:id/restock", post(restock_item))
}

#[tracing::instrument(skip_all)]
pub async fn create_item(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::CreateItemRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    let school_id: SchoolId = match body.school_id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let input = NewInventoryItem {
        school_id,
        item_type: body.item_type,
        size: body.size,
        quantity: body.quantity,
        low_stock_threshold: body.low_stock_threshold,
    };

    match services.restock().add_item(input) {
        Ok(item) => (StatusCode::CREATED, Json(dto::inventory_to_json(&item))).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let item_id: InventoryItemId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.restock().get(item_id) {
        Ok(Some(item)) => (StatusCode::OK, Json(dto::inventory_to_json(&item))).into_response(),
        Ok(None) => errors::json_error(
            StatusCode::NOT_FOUND,
            "item_not_found",
            format!("Inventory item not found: {item_id}"),
        ),
        Err(e) => errors::store_error_to_response(e),
    }
}

#[tracing::instrument(skip_all)]
pub async fn restock_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<dto::RestockRequest>, JsonRejection>,
) -> axum::response::Response {
    let item_id: InventoryItemId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    match services.restock().restock(item_id, body.quantity) {
        Ok(item) => (StatusCode::OK, Json(dto::inventory_to_json(&item))).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// Seller view: every school's stock.
pub async fn list_all(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.restock().list_all() {
        Ok(items) => (StatusCode::OK, Json(dto::inventory_list_to_json(&items))).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn list_for_school(
    Extension(services): Extension<Arc<AppServices>>,
    Path(school_id): Path<String>,
    query: Result<Query<dto::InventoryQuery>, QueryRejection>,
) -> axum::response::Response {
    let school_id: SchoolId = match school_id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let Query(query) = match query {
        Ok(q) => q,
        Err(rejection) => return errors::query_rejection_to_response(rejection),
    };
    let filter: StockFilter = match query.status.parse() {
        Ok(f) => f,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.restock().list(&school_id, filter, &query.search) {
        Ok(items) => (StatusCode::OK, Json(dto::inventory_list_to_json(&items))).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

#[tracing::instrument(skip_all)]
pub async fn reorder_low_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Path(school_id): Path<String>,
) -> axum::response::Response {
    let school_id: SchoolId = match school_id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.restock().reorder_low_stock(&school_id) {
        Ok(items) => (StatusCode::OK, Json(dto::inventory_list_to_json(&items))).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
