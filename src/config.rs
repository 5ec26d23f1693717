/*
 * Responsibility
 * - Load settings from the environment (.env supported): listen port, CORS, CSRF keys
 * - Validate them up front (missing or invalid values abort startup)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use crate::services::csrf::generator::MIN_PRIVATE_KEY_LEN;

pub const DEFAULT_TOKEN_QUERY_KEY: &str = "token";
pub const DEFAULT_SEED_COOKIE: &str = "csrf_seed";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// CSRF settings shared by the token issuer and the route guard.
#[derive(Clone)]
pub struct CsrfConfig {
    pub private_key: Vec<u8>,
    pub token_query_key: String,
    pub seed_cookie: String,
    /// Mark the seed cookie `Secure` (production only).
    pub secure_cookie: bool,
}

impl fmt::Debug for CsrfConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material
        f.debug_struct("CsrfConfig")
            .field("token_query_key", &self.token_query_key)
            .field("seed_cookie", &self.seed_cookie)
            .field("secure_cookie", &self.secure_cookie)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub struct Config {
    pub addr: SocketAddr,

    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    pub csrf: CsrfConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the process environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = match lookup("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(&lookup("APP_ENV").unwrap_or_else(|| "development".into()));

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let private_key = lookup("CSRF_PRIVATE_KEY")
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("CSRF_PRIVATE_KEY"))?;
        if private_key.len() < MIN_PRIVATE_KEY_LEN {
            return Err(ConfigError::Invalid("CSRF_PRIVATE_KEY"));
        }

        let token_query_key = lookup("CSRF_TOKEN_QUERY_KEY")
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|| DEFAULT_TOKEN_QUERY_KEY.to_string());
        if token_query_key.is_empty() {
            return Err(ConfigError::Invalid("CSRF_TOKEN_QUERY_KEY"));
        }

        let seed_cookie = lookup("CSRF_SEED_COOKIE")
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|| DEFAULT_SEED_COOKIE.to_string());
        if seed_cookie.is_empty() {
            return Err(ConfigError::Invalid("CSRF_SEED_COOKIE"));
        }

        Ok(Self {
            addr,
            app_env,
            cors_allowed_origins,
            csrf: CsrfConfig {
                private_key: private_key.into_bytes(),
                token_query_key,
                seed_cookie,
                secure_cookie: app_env.is_production(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const KEY: &str = "0123456789abcdef0123456789abcdef";

    fn load(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let cfg = load(&[("CSRF_PRIVATE_KEY", KEY)]).unwrap();
        assert_eq!(cfg.addr.port(), 3000);
        assert_eq!(cfg.app_env, AppEnv::Development);
        assert!(cfg.cors_allowed_origins.is_empty());
        assert_eq!(cfg.csrf.token_query_key, "token");
        assert_eq!(cfg.csrf.seed_cookie, "csrf_seed");
        assert!(!cfg.csrf.secure_cookie);
        assert_eq!(cfg.csrf.private_key, KEY.as_bytes());
    }

    #[test]
    fn overrides() {
        let cfg = load(&[
            ("CSRF_PRIVATE_KEY", KEY),
            ("PORT", "8080"),
            ("APP_ENV", "PROD"),
            ("CORS_ALLOWED_ORIGINS", "https://a.example, ,https://b.example"),
            ("CSRF_TOKEN_QUERY_KEY", "csrf"),
        ])
        .unwrap();
        assert_eq!(cfg.addr.port(), 8080);
        assert!(cfg.app_env.is_production());
        assert!(cfg.csrf.secure_cookie);
        assert_eq!(
            cfg.cors_allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
        assert_eq!(cfg.csrf.token_query_key, "csrf");
    }

    #[test]
    fn private_key_is_required_and_long_enough() {
        assert_eq!(
            load(&[]).unwrap_err(),
            ConfigError::Missing("CSRF_PRIVATE_KEY")
        );
        assert_eq!(
            load(&[("CSRF_PRIVATE_KEY", "short")]).unwrap_err(),
            ConfigError::Invalid("CSRF_PRIVATE_KEY")
        );
    }

    #[test]
    fn invalid_values() {
        assert_eq!(
            load(&[("CSRF_PRIVATE_KEY", KEY), ("PORT", "nope")]).unwrap_err(),
            ConfigError::Invalid("PORT")
        );
        assert_eq!(
            load(&[("CSRF_PRIVATE_KEY", KEY), ("CSRF_TOKEN_QUERY_KEY", " ")]).unwrap_err(),
            ConfigError::Invalid("CSRF_TOKEN_QUERY_KEY")
        );
    }

    #[test]
    fn debug_hides_private_key() {
        let cfg = load(&[("CSRF_PRIVATE_KEY", KEY)]).unwrap();
        assert!(!format!("{:?}", cfg).contains(KEY));
    }
}
