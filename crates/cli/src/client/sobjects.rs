//! Record API operations.

use orguser_core::platform::{PlatformError, Result};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::OrgClient;

#[derive(Debug, Deserialize)]
struct CreateResponse {
    id: String,
    #[serde(default = "default_true")]
    success: bool,
    #[serde(default)]
    errors: Vec<Value>,
}

fn default_true() -> bool {
    true
}

impl OrgClient {
    /// Create one record and return its Id.
    pub async fn create_record(&self, sobject: &str, fields: &Map<String, Value>) -> Result<String> {
        let request = self
            .client
            .post(self.data_url(&format!("/sobjects/{sobject}"))?)
            .json(fields);
        let created: CreateResponse = self.handle_response(self.send(request).await?).await?;
        if !created.success {
            return Err(PlatformError::Decode(format!(
                "create of {sobject} reported failure: {:?}",
                created.errors
            )));
        }
        tracing::debug!(sobject, id = %created.id, "Record created");
        Ok(created.id)
    }

    /// Replace a user's password.
    pub async fn set_user_password(&self, user_id: &str, password: &str) -> Result<()> {
        let request = self
            .client
            .post(self.data_url(&format!("/sobjects/User/{user_id}/password"))?)
            .json(&json!({ "NewPassword": password }));
        self.handle_empty_response(self.send(request).await?).await
    }
}
