use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Path, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};

use uniformdesk_core::{SchoolId, StudentId};
use uniformdesk_inventory::IssueUniform;

use crate::app::{dto, errors};
use crate::app::services::AppServices;

/// `POST /issue-uniform`: the one write path that moves stock to a student.
#[tracing::instrument(skip_all)]
pub async fn issue_uniform(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::IssueUniformRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    let student_id: StudentId = match body.student_id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let school_id: SchoolId = match body.school_id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let cmd = match IssueUniform::new(
        student_id,
        school_id,
        &body.item_type,
        &body.size,
        body.quantity,
        &body.issued_by,
    ) {
        Ok(cmd) => cmd,
        Err(e) => return errors::issue_error_to_response(e.into()),
    };

    match services.issue_uniform(cmd) {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(e) => errors::issue_error_to_response(e),
    }
}

pub async fn history_for_student(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let student_id: StudentId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.issuance().history_for_student(student_id) {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(e) => errors::issue_error_to_response(e),
    }
}

pub async fn history_for_school(
    Extension(services): Extension<Arc<AppServices>>,
    Path(school_id): Path<String>,
) -> axum::response::Response {
    let school_id: SchoolId = match school_id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.issuance().history_for_school(&school_id) {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(e) => errors::issue_error_to_response(e),
    }
}
