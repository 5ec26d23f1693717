//! Route-level CSRF access decision.
//!
//! This module is framework-free: it takes plain values (template, captured
//! params, token) and returns an [`AccessDecision`]. HTTP adapters live in
//! `middleware::csrf` and `api::v1::extractors`.

use std::collections::HashMap;
use std::sync::Arc;

use crate::services::csrf::subject::build_subject;
use crate::services::csrf::validator::TokenValidator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessOutcome {
    Allowed,
    Forbidden,
}

/// Cache directive attached to a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheDirective {
    pub max_age: u32,
}

impl CacheDirective {
    /// The decision depends on a per-request token and must never be reused.
    pub const fn uncacheable() -> Self {
        Self { max_age: 0 }
    }

    pub fn is_cacheable(&self) -> bool {
        self.max_age > 0
    }

    /// Value for the HTTP `Cache-Control` response header.
    pub fn header_value(&self) -> String {
        if self.is_cacheable() {
            format!("private, max-age={}", self.max_age)
        } else {
            "no-store, max-age=0".to_string()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessDecision {
    pub outcome: AccessOutcome,
    pub cache: CacheDirective,
}

impl AccessDecision {
    pub fn allowed() -> Self {
        Self {
            outcome: AccessOutcome::Allowed,
            cache: CacheDirective::uncacheable(),
        }
    }

    pub fn forbidden() -> Self {
        Self {
            outcome: AccessOutcome::Forbidden,
            cache: CacheDirective::uncacheable(),
        }
    }

    pub fn is_allowed(&self) -> bool {
        self.outcome == AccessOutcome::Allowed
    }
}

/// Plain inputs for one check, already translated from framework types.
#[derive(Debug, Clone, Default)]
pub struct CsrfInput {
    /// Matched route template. `None` when the router did not expose one.
    pub template: Option<String>,
    pub params: HashMap<String, String>,
    /// Query token; `None` when the parameter was absent.
    pub token: Option<String>,
}

/// Grants access only when the request carries a token bound to the matched path.
pub struct CsrfAccessCheck<V: ?Sized> {
    validator: Arc<V>,
}

impl<V: ?Sized> Clone for CsrfAccessCheck<V> {
    fn clone(&self) -> Self {
        Self {
            validator: self.validator.clone(),
        }
    }
}

impl<V: ?Sized> std::fmt::Debug for CsrfAccessCheck<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // validator holds key material
        f.debug_struct("CsrfAccessCheck").finish_non_exhaustive()
    }
}

impl<V> CsrfAccessCheck<V>
where
    V: TokenValidator + ?Sized,
{
    pub fn new(validator: Arc<V>) -> Self {
        Self { validator }
    }

    /// Decide access for one request.
    ///
    /// Fails closed: a missing template, a missing token, or a validator error
    /// all produce `Forbidden`. The decision is uncacheable in every branch.
    pub async fn check(&self, input: &CsrfInput) -> AccessDecision {
        let Some(template) = input.template.as_deref() else {
            return AccessDecision::forbidden();
        };

        let subject = build_subject(template, &input.params);
        let token = input.token.as_deref().unwrap_or("");

        match self.validator.validate(token, &subject).await {
            Ok(true) => AccessDecision::allowed(),
            Ok(false) | Err(_) => AccessDecision::forbidden(),
        }
    }
}
