/*
 * Responsibility
 * - Request/response DTOs for the CSRF token endpoint
 */
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct TokenQuery {
    /// Concrete request path the token will be bound to, e.g. `/api/v1/nodes/42/edit`.
    ///
    /// Must be given already percent-decoded: the guard binds to decoded path
    /// segments, so a token for `/nodes/a%20b/edit` is requested as `/nodes/a b/edit`.
    pub path: String,
}

impl TokenQuery {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.path.trim().is_empty() {
            return Err("path is required");
        }
        if self.path.len() > 2048 {
            return Err("path must be <= 2048 chars");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub path: String,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct NodeActionResponse {
    pub id: String,
    pub action: &'static str,
}
