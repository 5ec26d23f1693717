//! Test utilities: fixed config, app builder, seed cookies.

#![allow(dead_code)]

use std::collections::HashMap;

use axum::Router;
use axum::body::Body;
use axum::http::Request;
use route_csrf::app::build_router;
use route_csrf::config::Config;
use route_csrf::services::csrf::SessionSeed;
use route_csrf::state::AppState;

pub const PRIVATE_KEY: &str = "test-private-key-0123456789abcdef";
pub const SEED_COOKIE: &str = "csrf_seed";

pub fn test_config() -> Config {
    test_config_with(&[])
}

/// Test config with extra environment entries on top of the private key.
pub fn test_config_with(extra: &[(&str, &str)]) -> Config {
    let mut env = HashMap::from([("CSRF_PRIVATE_KEY".to_string(), PRIVATE_KEY.to_string())]);
    env.extend(extra.iter().map(|(k, v)| (k.to_string(), v.to_string())));
    Config::from_lookup(|key| env.get(key).cloned()).expect("test config")
}

pub fn build_test_app() -> (Router, AppState) {
    build_test_app_with_config(test_config())
}

pub fn build_test_app_with_config(config: Config) -> (Router, AppState) {
    let state = AppState::new(config.csrf.clone()).expect("test state");
    (build_router(state.clone(), &config), state)
}

pub fn seed(label: &str) -> SessionSeed {
    SessionSeed::from_bytes(format!("seed-{label}").into_bytes())
}

pub fn seed_cookie(seed: &SessionSeed) -> String {
    format!("{}={}", SEED_COOKIE, seed.encode())
}

pub fn request(method: &str, uri: &str, seed: Option<&SessionSeed>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(seed) = seed {
        builder = builder.header("Cookie", seed_cookie(seed));
    }
    builder.body(Body::empty()).unwrap()
}
