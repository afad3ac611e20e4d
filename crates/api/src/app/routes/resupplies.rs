use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use uniformdesk_core::SchoolId;
use uniformdesk_inventory::NewResupply;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new().route("/", get(list_all).post(schedule_resupply))
}

#[tracing::instrument(skip_all)]
pub async fn schedule_resupply(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::ScheduleResupplyRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    let school_id: SchoolId = match body.school_id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let input = NewResupply {
        school_id,
        item_type: body.item_type,
        quantity: body.quantity,
        scheduled_date: body.scheduled_date,
        status: body.status,
        delivery_notes: body.delivery_notes,
    };

    match services.schedule_resupply(input) {
        Ok(resupply) => (StatusCode::CREATED, Json(resupply)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn list_all(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.all_resupplies() {
        Ok(deliveries) => (StatusCode::OK, Json(deliveries)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn list_for_school(
    Extension(services): Extension<Arc<AppServices>>,
    Path(school_id): Path<String>,
) -> axum::response::Response {
    let school_id: SchoolId = match school_id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.resupplies_at(&school_id) {
        Ok(deliveries) => (StatusCode::OK, Json(deliveries)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
