/*
 * Responsibility
 * - Shared context bound to the Router (AppState)
 *   - csrf token generator (server key) + CSRF request settings
 * - Cheap to Clone (Arc inside)
 */
use std::sync::Arc;

use crate::config::CsrfConfig;
use crate::services::csrf::{CsrfTokenGenerator, GeneratorError};

#[derive(Clone, Debug)]
pub struct AppState {
    pub csrf_tokens: Arc<CsrfTokenGenerator>,
    pub csrf: Arc<CsrfConfig>,
}

impl AppState {
    pub fn new(csrf: CsrfConfig) -> Result<Self, GeneratorError> {
        let generator = CsrfTokenGenerator::new(csrf.private_key.clone())?;
        Ok(Self {
            csrf_tokens: Arc::new(generator),
            csrf: Arc::new(csrf),
        })
    }
}
