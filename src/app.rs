/*
 * Responsibility
 * - Config load -> state -> Router assembly
 * - Middleware order (outermost first): http, cors, session seed, csrf guard (per route)
 * - tracing subscriber + axum::serve()
 */
use anyhow::Result;
use axum::Router;
use tracing_subscriber::EnvFilter;

use crate::{api, config::Config, middleware, state::AppState};

pub async fn run() -> Result<()> {
    init_tracing();

    let config = Config::from_env()?;
    let state = AppState::new(config.csrf.clone())?;

    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, env = ?config.app_env, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let v1 = api::v1::routes(state.clone());
    let v1 = middleware::session_seed::apply(v1, state.clone());

    let app = Router::new().nest("/api/v1", v1).with_state(state);
    let app = middleware::cors::apply(app, config);
    middleware::http::apply(app)
}
