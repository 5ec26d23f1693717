/*
 * Responsibility
 * - GET /csrf/token?path=... : issue the token bound to a concrete path for this session
 * - The subject is canonicalised exactly like the guard does (single leading '/' removed)
 */
use axum::{
    Extension, Json,
    extract::{Query, State},
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
};
use std::collections::HashMap;

use crate::{
    api::v1::dto::csrf::{TokenQuery, TokenResponse},
    error::AppError,
    services::csrf::{CacheDirective, SessionSeed, build_subject},
    state::AppState,
};

pub async fn issue_token(
    State(state): State<AppState>,
    seed: Option<Extension<SessionSeed>>,
    Query(query): Query<TokenQuery>,
) -> Result<Response, AppError> {
    query
        .validate()
        .map_err(|msg| AppError::bad_request("INVALID_PATH", msg))?;

    let subject = build_subject(&query.path, &HashMap::new());
    let tokens = state.csrf_tokens.for_session(seed.map(|Extension(s)| s));
    let token = tokens.get(&subject)?;

    let mut res = Json(TokenResponse {
        path: query.path,
        token,
    })
    .into_response();

    // per-session secret material: never cache
    if let Ok(v) = HeaderValue::from_str(&CacheDirective::uncacheable().header_value()) {
        res.headers_mut().insert(header::CACHE_CONTROL, v);
    }
    Ok(res)
}
