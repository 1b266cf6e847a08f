mod analytics;
mod health;
mod state;
mod submissions;

pub use state::AdminState;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use super::middleware::{log_responses, set_request_context};

pub fn build_admin_router(state: AdminState) -> Router {
    Router::new()
        .route("/", get(analytics::admin_analytics))
        .route("/submissions", get(submissions::admin_submissions))
        .route(
            "/submissions/{id}/read",
            post(submissions::admin_submission_mark_read),
        )
        .route(
            "/submissions/{id}/delete",
            post(submissions::admin_submission_delete),
        )
        .route("/_health/db", get(health::admin_health))
        .with_state(state)
        .layer(middleware::from_fn(log_responses))
        .layer(middleware::from_fn(set_request_context))
}
