//! CLI error types.

use std::path::PathBuf;

use orguser_core::password::PasswordError;
use orguser_core::platform::PlatformError;
use orguser_core::user::DefinitionError;
use thiserror::Error;

/// Result type alias for the CLI crate.
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that abort a whole command.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Platform(#[from] PlatformError),

    #[error("{0}")]
    Password(#[from] PasswordError),

    #[error("{0}")]
    Definition(#[from] DefinitionError),

    #[error("No target org set. Pass --target-org or set a default with ORGUSER_TARGET_ORG.")]
    NoTargetOrg,

    #[error("No authorization found for {username}. Log in to the org first.")]
    NoAuthInfo { username: String },

    #[error("No access token stored for {username} or its parent user")]
    NoAccessToken { username: String },

    #[error("Invalid instance URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Could not read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not determine the home directory; set ORGUSER_HOME")]
    NoHomeDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_error_displays_unchanged() {
        let error: CliError = PlatformError::NotFound {
            entity_type: "PermissionSetLicense",
            name: "Sales".to_string(),
        }
        .into();
        assert_eq!(error.to_string(), "PermissionSetLicense not found: Sales");
    }

    #[test]
    fn no_auth_info_names_the_user() {
        let error = CliError::NoAuthInfo {
            username: "a@example.com".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "No authorization found for a@example.com. Log in to the org first."
        );
    }
}
