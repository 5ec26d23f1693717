/*
 * Responsibility
 * - Translate an axum request into the plain CSRF inputs (template, raw params, token)
 * - Never rejects: anything missing becomes None/empty and the check fails closed
 *
 * Sources
 * - template: MatchedPath (includes any nest prefix, e.g. /api/v1/nodes/{id}/edit)
 * - params:   RawPathParams (percent-decoded, not deserialized)
 * - token:    query string, key from CsrfConfig (first occurrence wins)
 */
use std::collections::HashMap;
use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, MatchedPath, RawPathParams},
    http::request::Parts,
};

use crate::services::csrf::CsrfInput;
use crate::state::AppState;

/// CSRF inputs for the current request.
#[derive(Debug, Clone)]
pub struct CsrfRequest(pub CsrfInput);

/// Read `key` from a raw query string.
pub fn query_value(query: Option<&str>, key: &str) -> Option<String> {
    let query = query?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

pub async fn csrf_input_from_parts<S>(parts: &mut Parts, state: &S, token_key: &str) -> CsrfInput
where
    S: Send + Sync,
{
    let template = MatchedPath::from_request_parts(parts, state)
        .await
        .ok()
        .map(|p| p.as_str().to_string());

    let params = match RawPathParams::from_request_parts(parts, state).await {
        Ok(raw) => raw
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        Err(_) => HashMap::new(),
    };

    let token = query_value(parts.uri.query(), token_key);

    CsrfInput {
        template,
        params,
        token,
    }
}

impl FromRequestParts<AppState> for CsrfRequest {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let key = state.csrf.token_query_key.clone();
        Ok(Self(csrf_input_from_parts(parts, state, &key).await))
    }
}
