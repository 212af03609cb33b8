//! HTTP client for the platform REST API.

mod query;
mod sobjects;

use async_trait::async_trait;
use orguser_core::platform::{OrgConnection, PlatformError, Result};
use serde::Deserialize;
use serde_json::{Map, Value};
use url::Url;

use crate::error::CliError;
use crate::store::{AuthEntry, AuthStore};

/// Error item in the platform's `[{"message": .., "errorCode": ..}]` bodies.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiErrorItem {
    message: String,
    #[serde(default)]
    error_code: Option<String>,
}

/// HTTP client bound to one org and one user session.
#[derive(Debug, Clone)]
pub struct OrgClient {
    client: reqwest::Client,
    instance_url: Url,
    api_version: String,
    access_token: String,
    username: String,
    org_id: String,
}

impl OrgClient {
    /// Create a new client for an instance URL.
    pub fn new(
        instance_url: &str,
        api_version: impl Into<String>,
        access_token: impl Into<String>,
        username: impl Into<String>,
        org_id: impl Into<String>,
    ) -> std::result::Result<Self, CliError> {
        let instance_url = Url::parse(instance_url).map_err(|source| CliError::InvalidUrl {
            url: instance_url.to_string(),
            source,
        })?;
        Ok(Self {
            client: reqwest::Client::new(),
            instance_url,
            api_version: api_version.into(),
            access_token: access_token.into(),
            username: username.into(),
            org_id: org_id.into(),
        })
    }

    /// Create a client from a stored authorization.
    pub fn from_auth(
        store: &AuthStore,
        entry: &AuthEntry,
        api_version: &str,
    ) -> std::result::Result<Self, CliError> {
        let token = store.access_token_for(entry)?;
        Self::new(
            &entry.instance_url,
            api_version,
            token,
            &entry.username,
            &entry.org_id,
        )
    }

    /// Get the instance URL.
    pub fn instance_url(&self) -> &Url {
        &self.instance_url
    }

    /// Build a URL for a path under the versioned data API.
    fn data_url(&self, path: &str) -> Result<Url> {
        self.url(&format!("/services/data/v{}{}", self.api_version, path))
    }

    /// Build a URL for an absolute path on the instance.
    fn url(&self, path: &str) -> Result<Url> {
        self.instance_url
            .join(path)
            .map_err(|e| PlatformError::Transport(format!("invalid URL path {path}: {e}")))
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.bearer_auth(&self.access_token)
    }

    /// Send a request, mapping transport failures.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|e| PlatformError::Transport(e.to_string()))?;
        tracing::debug!(status = %response.status(), url = %response.url(), "Platform response");
        Ok(response)
    }

    /// Handle error responses.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        if response.status().is_success() {
            response
                .json()
                .await
                .map_err(|e| PlatformError::Decode(e.to_string()))
        } else {
            Err(Self::error_from(response).await)
        }
    }

    /// Handle responses where no body is expected.
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_from(response).await)
        }
    }

    async fn error_from(response: reqwest::Response) -> PlatformError {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        parse_error_body(status, &body)
    }
}

/// Maps an error status and body to a [`PlatformError`].
pub(crate) fn parse_error_body(status: u16, body: &str) -> PlatformError {
    let first = serde_json::from_str::<Vec<ApiErrorItem>>(body)
        .ok()
        .and_then(|items| items.into_iter().next());
    let (error_code, message) = match first {
        Some(item) => (
            item.error_code.unwrap_or_else(|| "UNKNOWN_ERROR".to_string()),
            item.message,
        ),
        None => ("UNKNOWN_ERROR".to_string(), body.trim().to_string()),
    };

    if status == 401 {
        return PlatformError::Unauthorized(message);
    }
    PlatformError::Api {
        status,
        error_code,
        message,
    }
}

#[async_trait]
impl OrgConnection for OrgClient {
    fn username(&self) -> &str {
        &self.username
    }

    fn org_id(&self) -> &str {
        &self.org_id
    }

    async fn query(&self, soql: &str) -> Result<Vec<Value>> {
        self.query_all(soql).await
    }

    async fn create(&self, sobject: &str, fields: &Map<String, Value>) -> Result<String> {
        self.create_record(sobject, fields).await
    }

    async fn set_password(&self, user_id: &str, password: &str) -> Result<()> {
        self.set_user_password(user_id, password).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_platform_error_array() {
        let error = parse_error_body(
            400,
            r#"[{"message":"Duplicate PermissionSetAssignment. Assignee: 005","errorCode":"DUPLICATE_VALUE","fields":[]}]"#,
        );
        assert_eq!(
            error,
            PlatformError::Api {
                status: 400,
                error_code: "DUPLICATE_VALUE".to_string(),
                message: "Duplicate PermissionSetAssignment. Assignee: 005".to_string(),
            }
        );
    }

    #[test]
    fn falls_back_to_raw_body() {
        let error = parse_error_body(500, "  upstream exploded \n");
        assert_eq!(error.message(), "upstream exploded");
        assert_eq!(error.error_code(), Some("UNKNOWN_ERROR"));
    }

    #[test]
    fn maps_401_to_unauthorized() {
        let error = parse_error_body(
            401,
            r#"[{"message":"Session expired or invalid","errorCode":"INVALID_SESSION_ID"}]"#,
        );
        assert_eq!(
            error,
            PlatformError::Unauthorized("Session expired or invalid".to_string())
        );
    }

    #[test]
    fn rejects_invalid_instance_url() {
        let result = OrgClient::new("not a url", "61.0", "t", "u", "o");
        assert!(matches!(result, Err(CliError::InvalidUrl { .. })));
    }

    #[test]
    fn builds_versioned_data_urls() {
        let client = OrgClient::new("https://acme.my.example.com", "61.0", "t", "u", "o").unwrap();
        assert_eq!(
            client.data_url("/sobjects/User").unwrap().as_str(),
            "https://acme.my.example.com/services/data/v61.0/sobjects/User"
        );
    }
}
