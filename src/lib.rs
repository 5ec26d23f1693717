//! Path-bound CSRF access check.
//!
//! A request to a guarded route is allowed only when its `token` query
//! parameter was issued for that exact path (template placeholders filled with
//! the captured values) within the caller's session.
//!
//! The decision logic in [`services::csrf`] is framework-free; [`middleware`]
//! and [`api`] adapt it to axum.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;
