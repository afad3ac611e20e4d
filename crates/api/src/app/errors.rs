use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use uniformdesk_core::DomainError;
use uniformdesk_infra::{IssueError, StoreError};

pub fn issue_error_to_response(err: IssueError) -> axum::response::Response {
    let message = err.to_string();
    match err {
        IssueError::InvalidInput(_) => json_error(StatusCode::BAD_REQUEST, "invalid_input", message),
        IssueError::ItemNotFound(_) => json_error(StatusCode::NOT_FOUND, "item_not_found", message),
        IssueError::InsufficientStock { .. } => {
            json_error(StatusCode::BAD_REQUEST, "insufficient_stock", message)
        }
        IssueError::Store(e) => store_error_to_response(e),
    }
}

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    let message = err.to_string();
    match err {
        StoreError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", message),
        StoreError::InsufficientStock { .. } => {
            json_error(StatusCode::BAD_REQUEST, "insufficient_stock", message)
        }
        StoreError::Invalid(msg) | StoreError::InvalidState(msg) => {
            json_error(StatusCode::BAD_REQUEST, "invalid_input", msg)
        }
        StoreError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
        StoreError::Unavailable(_) => {
            tracing::error!(error = %message, "store unavailable");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_unavailable", message)
        }
    }
}

/// Errors from parsing path/body identifiers and other request fields.
pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        other => store_error_to_response(other.into()),
    }
}

pub fn json_rejection_to_response(rejection: JsonRejection) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "invalid_payload", rejection.body_text())
}

pub fn query_rejection_to_response(rejection: QueryRejection) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "invalid_payload", rejection.body_text())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": message.into(),
            "code": code,
        })),
    )
        .into_response()
}
