use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::batch::RemoteOperation;
use crate::platform::{OrgConnection, PlatformError, Result};

const DUPLICATE_USERNAME: &str = "DUPLICATE_USERNAME";

/// Creates one User record from prepared fields.
///
/// The success value is the new user's Id.
pub struct UserCreation<'a, C: ?Sized> {
    conn: &'a C,
    fields: Map<String, Value>,
}

impl<'a, C: OrgConnection + ?Sized> UserCreation<'a, C> {
    pub fn new(conn: &'a C, fields: Map<String, Value>) -> Self {
        Self { conn, fields }
    }

    pub fn username(&self) -> &str {
        self.fields
            .get("Username")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

#[async_trait]
impl<C: OrgConnection + ?Sized> RemoteOperation for UserCreation<'_, C> {
    fn name(&self) -> &'static str {
        "user-create"
    }

    async fn invoke(&self, _username: &str, _item: &str) -> Result<String> {
        self.conn.create("User", &self.fields).await
    }

    fn describe_failure(&self, error: &PlatformError) -> String {
        let duplicate = error.error_code() == Some(DUPLICATE_USERNAME)
            || error.message().contains(DUPLICATE_USERNAME);
        if duplicate {
            format!(
                "The username \"{}\" is already in use. Usernames must be unique across all orgs; \
                 try --set-unique-username or pick another username.",
                self.username()
            )
        } else {
            error.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::{run_pairing, ExitStatus, AggregateResult};
    use crate::testing::MemoryOrg;
    use serde_json::json;

    fn fields(username: &str) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("Username".to_string(), json!(username));
        fields.insert("LastName".to_string(), json!("User"));
        fields
    }

    #[tokio::test]
    async fn creates_user_and_reports_id() {
        let org = MemoryOrg::new("admin@example.com", "00D1");
        let op = UserCreation::new(&org, fields("new@example.com"));
        let outcome = run_pairing(&op, op.username(), op.username(), "User").await;

        let result: AggregateResult = std::iter::once(outcome).collect();
        assert_eq!(ExitStatus::from(&result), ExitStatus::Success);
        assert_eq!(result.successes[0].target, "new@example.com");
        assert!(result.successes[0].value.starts_with('U'));
        assert_eq!(org.records("User").await.len(), 1);
    }

    #[tokio::test]
    async fn duplicate_username_is_failure_with_hint() {
        let org = MemoryOrg::new("admin@example.com", "00D1").with_user("005A", "taken@example.com");
        let op = UserCreation::new(&org, fields("taken@example.com"));
        let outcome = run_pairing(&op, op.username(), op.username(), "User").await;

        let result: AggregateResult = std::iter::once(outcome).collect();
        assert_eq!(ExitStatus::from(&result), ExitStatus::Failure);
        assert!(result.failures[0].message.contains("already in use"));
    }
}
