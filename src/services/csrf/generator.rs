//! HMAC-SHA256 CSRF token generator.
//!
//! token = base64url_nopad(HMAC-SHA256(key = session_seed || private_key, subject))
//!
//! The server-wide private key comes from configuration. The per-session seed is
//! owned by the session layer; this module only consumes it.

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;

use crate::services::csrf::validator::{TokenValidator, ValidatorError};

type HmacSha256 = Hmac<Sha256>;

pub const MIN_PRIVATE_KEY_LEN: usize = 32;
pub const SEED_LEN: usize = 32;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("csrf private key must be at least 32 bytes, got {0}")]
    PrivateKeyTooShort(usize),
    #[error("invalid session seed encoding")]
    InvalidSeed,
    #[error("random source unavailable: {0}")]
    Random(String),
}

/// Per-session secret mixed into every token of that session.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionSeed(Vec<u8>);

impl SessionSeed {
    pub fn generate() -> Result<Self, GeneratorError> {
        let mut bytes = vec![0u8; SEED_LEN];
        getrandom::fill(&mut bytes).map_err(|e| GeneratorError::Random(e.to_string()))?;
        Ok(Self(bytes))
    }

    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Parse the cookie/transport form produced by [`SessionSeed::encode`].
    pub fn decode(encoded: &str) -> Result<Self, GeneratorError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(encoded.trim())
            .map_err(|_| GeneratorError::InvalidSeed)?;
        if bytes.is_empty() {
            return Err(GeneratorError::InvalidSeed);
        }
        Ok(Self(bytes))
    }

    pub fn encode(&self) -> String {
        URL_SAFE_NO_PAD.encode(&self.0)
    }

    fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for SessionSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.write_str("SessionSeed(..)")
    }
}

/// Server-wide generator. Cheap to clone.
#[derive(Clone)]
pub struct CsrfTokenGenerator {
    private_key: Vec<u8>,
}

impl std::fmt::Debug for CsrfTokenGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CsrfTokenGenerator").finish_non_exhaustive()
    }
}

impl CsrfTokenGenerator {
    pub fn new(private_key: impl Into<Vec<u8>>) -> Result<Self, GeneratorError> {
        let private_key = private_key.into();
        if private_key.len() < MIN_PRIVATE_KEY_LEN {
            return Err(GeneratorError::PrivateKeyTooShort(private_key.len()));
        }
        Ok(Self { private_key })
    }

    /// Bind the generator to one session. `None` yields a view that can
    /// neither issue nor validate tokens.
    pub fn for_session(&self, seed: Option<SessionSeed>) -> SessionTokens {
        SessionTokens {
            private_key: self.private_key.clone(),
            seed,
        }
    }
}

/// Token operations for a single session.
#[derive(Clone)]
pub struct SessionTokens {
    private_key: Vec<u8>,
    seed: Option<SessionSeed>,
}

impl std::fmt::Debug for SessionTokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionTokens")
            .field("has_seed", &self.seed.is_some())
            .finish()
    }
}

impl SessionTokens {
    /// Issue the token for `subject` (e.g. while rendering a link to it).
    pub fn get(&self, subject: &str) -> Result<String, ValidatorError> {
        let mac = self.mac(subject)?;
        Ok(URL_SAFE_NO_PAD.encode(mac))
    }

    fn mac(&self, subject: &str) -> Result<Vec<u8>, ValidatorError> {
        let seed = self
            .seed
            .as_ref()
            .filter(|s| !s.as_bytes().is_empty())
            .ok_or(ValidatorError::MissingSeed)?;

        let mut key = Vec::with_capacity(seed.as_bytes().len() + self.private_key.len());
        key.extend_from_slice(seed.as_bytes());
        key.extend_from_slice(&self.private_key);

        let mut mac = HmacSha256::new_from_slice(&key)
            .map_err(|e| ValidatorError::Backend(e.to_string()))?;
        mac.update(subject.as_bytes());
        Ok(mac.finalize().into_bytes().to_vec())
    }
}

#[async_trait]
impl TokenValidator for SessionTokens {
    async fn validate(&self, token: &str, subject: &str) -> Result<bool, ValidatorError> {
        if token.is_empty() {
            return Ok(false);
        }
        let expected = self.get(subject)?;
        if expected.len() != token.len() {
            return Ok(false);
        }
        Ok(expected.as_bytes().ct_eq(token.as_bytes()).into())
    }
}
