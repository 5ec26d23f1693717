/*
 * Responsibility
 * - Sample state-changing actions guarded by the path-bound CSRF check
 * - Handlers run only after the guard allowed the request
 */
use axum::{Json, extract::Path};

use crate::api::v1::dto::csrf::NodeActionResponse;

pub async fn edit_node(Path(id): Path<String>) -> Json<NodeActionResponse> {
    Json(NodeActionResponse { id, action: "edit" })
}

pub async fn delete_node(Path(id): Path<String>) -> Json<NodeActionResponse> {
    Json(NodeActionResponse {
        id,
        action: "delete",
    })
}
