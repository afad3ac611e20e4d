use std::sync::Arc;

use axum::{
    extract::{Extension, Query, rejection::QueryRejection},
    http::StatusCode,
    response::IntoResponse,
};

use uniformdesk_core::SchoolId;

use crate::app::dto::StreamQuery;
use crate::app::errors;
use crate::app::services::{self, AppServices};

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// `GET /stream?schoolId=`: realtime issuance and low-stock notifications.
pub async fn stream(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<StreamQuery>, QueryRejection>,
) -> axum::response::Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(rejection) => return errors::query_rejection_to_response(rejection),
    };
    let school_id = match query.school_id.as_deref().map(str::parse::<SchoolId>).transpose() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    services::school_sse_stream(services, school_id).into_response()
}
