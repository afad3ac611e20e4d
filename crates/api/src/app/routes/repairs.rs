use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use uniformdesk_core::{SchoolId, StudentId};
use uniformdesk_infra::StoreError;
use uniformdesk_students::NewRepair;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new().route("/", get(list_all).post(report_repair))
}

#[tracing::instrument(skip_all)]
pub async fn report_repair(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::ReportRepairRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    let school_id: SchoolId = match body.school_id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let student_id: StudentId = match body.student_id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let input = NewRepair {
        school_id,
        student_id,
        item_type: body.item_type,
        description: body.description,
        status: body.status,
    };

    match services.report_repair(input) {
        Ok(repair) => (StatusCode::CREATED, Json(repair)).into_response(),
        Err(StoreError::NotFound) => errors::json_error(
            StatusCode::NOT_FOUND,
            "student_not_found",
            format!("Student not found: {student_id}"),
        ),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn list_all(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.all_repairs() {
        Ok(repairs) => (StatusCode::OK, Json(repairs)).into_response(),
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

    match services.repairs_at(&school_id) {
        Ok(repairs) => (StatusCode::OK, Json(repairs)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
