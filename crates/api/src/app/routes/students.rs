use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use uniformdesk_core::{SchoolId, StudentId};
use uniformdesk_infra::StoreError;
use uniformdesk_students::{NewStudent, StudentUpdate};

use crate::app::routes::issuance;
use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(register_student))
        .route("/:id", get(get_student).patch(update_student))
        .route("/:id/issuances", get(issuance::history_for_student))
}

#[tracing::instrument(skip_all)]
pub async fn register_student(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::RegisterStudentRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    let school_id: SchoolId = match body.school_id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let input = NewStudent {
        school_id,
        name: body.name,
        admission_number: body.admission_number,
        grade: body.grade,
        total_amount: body.total_amount,
        amount_paid: body.amount_paid,
    };

    match services.register_student(input) {
        Ok(student) => (StatusCode::CREATED, Json(dto::student_to_json(&student))).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_student(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let student_id: StudentId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.student(student_id) {
        Ok(Some(student)) => (StatusCode::OK, Json(dto::student_to_json(&student))).into_response(),
        Ok(None) => errors::json_error(
            StatusCode::NOT_FOUND,
            "student_not_found",
            format!("Student not found: {student_id}"),
        ),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// `PATCH /students/:id`: partial update of uniform status, payment and grade.
#[tracing::instrument(skip_all)]
pub async fn update_student(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<StudentUpdate>, JsonRejection>,
) -> axum::response::Response {
    let student_id: StudentId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let Json(update) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    match services.update_student(student_id, update) {
        Ok(student) => (StatusCode::OK, Json(dto::student_to_json(&student))).into_response(),
        Err(StoreError::NotFound) => errors::json_error(
            StatusCode::NOT_FOUND,
            "student_not_found",
            format!("Student not found: {student_id}"),
        ),
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

    match services.students_at(&school_id) {
        Ok(students) => {
            let body: Vec<serde_json::Value> = students.iter().map(dto::student_to_json).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}
