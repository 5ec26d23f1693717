/*
 * Responsibility
 * - Router-level middleware: transport (http), CORS, session seed, CSRF route guard
 */
pub mod cors;
pub mod csrf;
pub mod http;
pub mod session_seed;
