mod generator;
mod reset;

use thiserror::Error;

pub use generator::{
    generate_password, PasswordOptions, DEFAULT_COMPLEXITY, DEFAULT_LENGTH, MAX_COMPLEXITY,
    MAX_LENGTH, MIN_LENGTH,
};
pub use reset::PasswordReset;

/// Errors raised while validating password options.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password length must be between 8 and 100, got {0}")]
    InvalidLength(u8),
    #[error("Password complexity must be between 0 and 5, got {0}")]
    InvalidComplexity(u8),
}
