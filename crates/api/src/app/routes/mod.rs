use axum::{
    Router,
    routing::{get, post},
};

pub mod inventory;
pub mod issuance;
pub mod repairs;
pub mod resupplies;
pub mod students;
pub mod system;

/// Router for every endpoint except `/health`.
pub fn router() -> Router {
    Router::new()
        .route("/stream", get(system::stream))
        .route("/issue-uniform", post(issuance::issue_uniform))
        .nest("/inventory", inventory::router())
        .nest("/students", students::router())
        .nest("/repairs", repairs::router())
        .nest("/resupplies", resupplies::router())
        .nest("/schools/:school_id", school_router())
}

/// Per-school views, all keyed by the `school_id` path segment.
fn school_router() -> Router {
    Router::new()
        .route("/inventory", get(inventory::list_for_school))
        .route("/inventory/reorder", post(inventory::reorder_low_stock))
        .route("/students", get(students::list_for_school))
        .route("/issuances", get(issuance::history_for_school))
        .route("/repairs", get(repairs::list_for_school))
        .route("/resupplies", get(resupplies::list_for_school))
}
