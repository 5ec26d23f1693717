//! Minimal session-seed layer for the demo service.
//!
//! The CSRF guard only needs a per-session secret in request extensions. A real
//! deployment gets it from its session store; this layer keeps it in an
//! HttpOnly cookie so the service is usable on its own.
//!
//! - Valid cookie: the decoded seed is inserted as-is.
//! - Missing or undecodable cookie: a fresh seed is generated, inserted, and
//!   sent back with `Set-Cookie`.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderValue, Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::services::csrf::SessionSeed;
use crate::state::AppState;

pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.layer(middleware::from_fn_with_state(state, session_seed_middleware))
}

async fn session_seed_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let cookie_name = state.csrf.seed_cookie.as_str();

    let existing = req
        .headers()
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|h| parse_cookie(h, cookie_name))
        .and_then(|v| SessionSeed::decode(v).ok());

    let (seed, is_new) = match existing {
        Some(seed) => (seed, false),
        None => (SessionSeed::generate()?, true),
    };

    let set_cookie = if is_new {
        let cookie = make_seed_cookie(cookie_name, &seed, state.csrf.secure_cookie);
        let value = HeaderValue::from_str(&cookie).map_err(|e| {
            tracing::error!(error = %e, "invalid seed cookie header");
            AppError::Internal
        })?;
        Some(value)
    } else {
        None
    };

    req.extensions_mut().insert(seed);
    let mut response = next.run(req).await;

    if let Some(value) = set_cookie {
        tracing::debug!("issued new csrf session seed");
        response.headers_mut().append(header::SET_COOKIE, value);
    }

    Ok(response)
}

fn make_seed_cookie(name: &str, seed: &SessionSeed, secure: bool) -> String {
    let mut parts = vec![
        format!("{}={}", name, seed.encode()),
        "Path=/".into(),
        "HttpOnly".into(),
        "SameSite=Lax".into(),
    ];
    if secure {
        parts.push("Secure".into());
    }
    parts.join("; ")
}

/// Parse a specific cookie from a Cookie header value.
pub fn parse_cookie<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|part| {
        part.trim()
            .strip_prefix(name)
            .and_then(|rest| rest.strip_prefix('='))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_cookie_found() {
        assert_eq!(parse_cookie("a=1; csrf_seed=abc; b=2", "csrf_seed"), Some("abc"));
    }

    #[test]
    fn parse_cookie_requires_exact_name() {
        assert_eq!(parse_cookie("csrf_seed_old=abc", "csrf_seed"), None);
        assert_eq!(parse_cookie("", "csrf_seed"), None);
    }

    #[test]
    fn seed_cookie_format() {
        let seed = SessionSeed::from_bytes(b"seed".to_vec());
        let cookie = make_seed_cookie("csrf_seed", &seed, false);
        assert!(cookie.starts_with(&format!("csrf_seed={}", seed.encode())));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(!cookie.contains("Secure"));
    }

    #[test]
    fn seed_cookie_secure_flag() {
        let seed = SessionSeed::from_bytes(b"seed".to_vec());
        let cookie = make_seed_cookie("csrf_seed", &seed, true);
        assert!(cookie.ends_with("; Secure"));
        assert!(cookie.contains("HttpOnly"));
    }
}
