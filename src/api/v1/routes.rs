/*
 * Responsibility
 * - v1 URL layout
 * - Open routes: /health, /csrf/token
 * - Guarded routes: /nodes/{id}/edit, /nodes/{id}/delete (path-bound CSRF token required)
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::api::v1::handlers::{
    csrf::issue_token,
    health::health,
    nodes::{delete_node, edit_node},
};
use crate::middleware;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let guarded = Router::new()
        .route("/nodes/{id}/edit", post(edit_node))
        .route("/nodes/{id}/delete", post(delete_node));
    let guarded = middleware::csrf::apply(guarded, state);

    Router::new()
        .route("/health", get(health))
        .route("/csrf/token", get(issue_token))
        .merge(guarded)
}
