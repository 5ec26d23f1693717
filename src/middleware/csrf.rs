//! Path-bound CSRF route guard.
//!
//! Apply with `route_layer` to the routes that require a `?token=` bound to
//! their own path, so `MatchedPath` is available:
//!
//! ```ignore
//! let protected = Router::new().route("/nodes/{id}/edit", post(edit_node));
//! let protected = middleware::csrf::apply(protected, state.clone());
//! ```
//!
//! The session seed must already be in request extensions (see
//! `middleware::session_seed`). Without it the request is forbidden.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderValue, Request, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
};

use crate::api::v1::extractors::CsrfRequest;
use crate::error::AppError;
use crate::services::csrf::{AccessDecision, CsrfAccessCheck, SessionSeed, TokenValidator};
use crate::state::AppState;

/// Guard every route already added to `router`.
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.route_layer(middleware::from_fn_with_state(state, csrf_guard))
}

async fn csrf_guard(
    State(state): State<AppState>,
    CsrfRequest(input): CsrfRequest,
    req: Request<Body>,
    next: Next,
) -> Response {
    let seed = req.extensions().get::<SessionSeed>().cloned();
    if seed.is_none() {
        tracing::warn!(path = %req.uri().path(), "csrf guard reached without a session seed");
    }

    let validator: Arc<dyn TokenValidator> = Arc::new(state.csrf_tokens.for_session(seed));
    let decision = CsrfAccessCheck::new(validator).check(&input).await;

    let response = if decision.is_allowed() {
        next.run(req).await
    } else {
        tracing::debug!(
            template = input.template.as_deref().unwrap_or("<unmatched>"),
            has_token = input.token.is_some(),
            "csrf access denied"
        );
        AppError::CsrfForbidden.into_response()
    };

    with_cache_directive(response, &decision)
}

/// Stamp the decision's cache directive on the outgoing response.
pub fn with_cache_directive(mut response: Response, decision: &AccessDecision) -> Response {
    match HeaderValue::from_str(&decision.cache.header_value()) {
        Ok(value) => {
            response.headers_mut().insert(header::CACHE_CONTROL, value);
        }
        Err(e) => tracing::error!(error = %e, "invalid cache-control value"),
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::{http::StatusCode, routing::post};
    use std::collections::HashMap;
    use tower::ServiceExt;

    fn state(query_key: &str) -> AppState {
        let env = HashMap::from([
            ("CSRF_PRIVATE_KEY", "0123456789abcdef0123456789abcdef"),
            ("CSRF_TOKEN_QUERY_KEY", query_key),
        ]);
        let config = Config::from_lookup(|k| env.get(k).map(|v| v.to_string())).unwrap();
        AppState::new(config.csrf).unwrap()
    }

    /// Router with the guard but no seed layer; `seed` is injected by hand.
    fn app(state: AppState, seed: Option<SessionSeed>) -> Router {
        let guarded = Router::new().route("/items/{id}/archive", post(|| async { "archived" }));
        apply(guarded, state.clone())
            .layer(middleware::from_fn(move |mut req: Request<Body>, next: Next| {
                let seed = seed.clone();
                async move {
                    if let Some(seed) = seed {
                        req.extensions_mut().insert(seed);
                    }
                    next.run(req).await
                }
            }))
            .with_state(state)
    }

    fn post_to(uri: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn allows_with_configured_query_key() {
        let state = state("csrf");
        let seed = SessionSeed::from_bytes(b"seed".to_vec());
        let token = state
            .csrf_tokens
            .for_session(Some(seed.clone()))
            .get("items/9/archive")
            .unwrap();

        let app = app(state, Some(seed));
        let ok = app
            .clone()
            .oneshot(post_to(&format!("/items/9/archive?csrf={token}")))
            .await
            .unwrap();
        assert_eq!(ok.status(), StatusCode::OK);
        assert_eq!(
            ok.headers().get(header::CACHE_CONTROL).unwrap(),
            "no-store, max-age=0"
        );

        // default key name is not consulted when another one is configured
        let denied = app
            .oneshot(post_to(&format!("/items/9/archive?token={token}")))
            .await
            .unwrap();
        assert_eq!(denied.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn missing_session_seed_fails_closed() {
        let state = state("token");
        let token = state
            .csrf_tokens
            .for_session(Some(SessionSeed::from_bytes(b"seed".to_vec())))
            .get("items/9/archive")
            .unwrap();

        let res = app(state, None)
            .oneshot(post_to(&format!("/items/9/archive?token={token}")))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            res.headers().get(header::CACHE_CONTROL).unwrap(),
            "no-store, max-age=0"
        );
    }
}
