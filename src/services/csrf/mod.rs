pub mod access;
pub mod generator;
pub mod subject;
pub mod validator;

pub use access::{AccessDecision, AccessOutcome, CacheDirective, CsrfAccessCheck, CsrfInput};
pub use generator::{CsrfTokenGenerator, GeneratorError, SessionSeed, SessionTokens};
pub use subject::build_subject;
pub use validator::{TokenValidator, ValidatorError};
