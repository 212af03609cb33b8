use thiserror::Error;

/// Errors raised by calls against the remote platform.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlatformError {
    #[error("{message}")]
    Api {
        status: u16,
        error_code: String,
        message: String,
    },
    #[error("Expected exactly one record but found {count} for query: {query}")]
    SingleRecord { count: usize, query: String },
    #[error("{entity_type} not found: {name}")]
    NotFound {
        entity_type: &'static str,
        name: String,
    },
    #[error("Session is not valid: {0}")]
    Unauthorized(String),
    #[error("Request failed: {0}")]
    Transport(String),
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl PlatformError {
    /// The remote message text, used for signature matching.
    pub fn message(&self) -> String {
        match self {
            PlatformError::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// The platform error code, when the platform sent one.
    pub fn error_code(&self) -> Option<&str> {
        match self {
            PlatformError::Api { error_code, .. } => Some(error_code),
            _ => None,
        }
    }
}

/// Result type for platform operations.
pub type Result<T> = std::result::Result<T, PlatformError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_displays_remote_message() {
        let error = PlatformError::Api {
            status: 400,
            error_code: "DUPLICATE_VALUE".to_string(),
            message: "Duplicate PermissionSetAssignment. Assignee: 005".to_string(),
        };
        assert_eq!(error.to_string(), "Duplicate PermissionSetAssignment. Assignee: 005");
        assert_eq!(error.error_code(), Some("DUPLICATE_VALUE"));
    }

    #[test]
    fn single_record_display() {
        let error = PlatformError::SingleRecord {
            count: 0,
            query: "SELECT Id FROM User".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Expected exactly one record but found 0 for query: SELECT Id FROM User"
        );
        assert_eq!(error.error_code(), None);
    }

    #[test]
    fn not_found_message_matches_display() {
        let error = PlatformError::NotFound {
            entity_type: "PermissionSetLicense",
            name: "Sales".to_string(),
        };
        assert_eq!(error.message(), "PermissionSetLicense not found: Sales");
    }
}
