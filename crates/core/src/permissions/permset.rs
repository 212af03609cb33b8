use async_trait::async_trait;
use serde_json::{json, Map, Value};

use crate::batch::RemoteOperation;
use crate::platform::{decode_record, find_user_id, soql, IdRecord, OrgConnection, PlatformError, Result};

/// Message fragment the platform returns when the assignment already exists.
pub const DUPLICATE_PERMSET_SIGNATURE: &str = "Duplicate PermissionSetAssignment";

/// Assigns a permission set (the item) to a user (the target).
pub struct PermsetAssignment<'a, C: ?Sized> {
    conn: &'a C,
}

impl<'a, C: OrgConnection + ?Sized> PermsetAssignment<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    async fn find_permission_set_id(&self, name: &str) -> Result<String> {
        match self.conn.query_single(&soql::permission_set_query(name)).await {
            Ok(row) => decode_record::<IdRecord>(row).map(|r| r.id),
            Err(PlatformError::SingleRecord { count: 0, .. }) => Err(PlatformError::NotFound {
                entity_type: "PermissionSet",
                name: name.to_string(),
            }),
            Err(e) => Err(e),
        }
    }
}

/// Fields of a `PermissionSetAssignment` record.
pub fn permset_assignment_fields(assignee_id: &str, permission_set_id: &str) -> Map<String, Value> {
    let mut fields = Map::new();
    fields.insert("AssigneeId".to_string(), json!(assignee_id));
    fields.insert("PermissionSetId".to_string(), json!(permission_set_id));
    fields
}

#[async_trait]
impl<C: OrgConnection + ?Sized> RemoteOperation for PermsetAssignment<'_, C> {
    fn name(&self) -> &'static str {
        "permset-assign"
    }

    async fn invoke(&self, username: &str, item: &str) -> Result<String> {
        let user_id = find_user_id(self.conn, username).await?;
        let permission_set_id = self.find_permission_set_id(item).await?;
        self.conn
            .create(
                "PermissionSetAssignment",
                &permset_assignment_fields(&user_id, &permission_set_id),
            )
            .await?;
        Ok(item.to_string())
    }

    fn is_already_applied(&self, message: &str) -> bool {
        message.contains(DUPLICATE_PERMSET_SIGNATURE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::{BatchAggregator, ExitStatus};
    use crate::identity::{AliasResolver, MemoryAliasStore};
    use crate::testing::MemoryOrg;

    fn org() -> MemoryOrg {
        MemoryOrg::new("admin@example.com", "00D000000000001")
            .with_user("005A", "u1@example.com")
            .with_user("005B", "u2@example.com")
            .with_permission_set("0PS1", "PS1", None)
            .with_permission_set("0PS2", "PS2", None)
            .with_permission_set("0PS3", "Sales", Some("acme"))
    }

    fn aggregator() -> BatchAggregator<MemoryAliasStore> {
        BatchAggregator::new(AliasResolver::new(MemoryAliasStore::new()), 4)
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn assigns_every_pairing() {
        let org = org();
        let op = PermsetAssignment::new(&org);
        let result = aggregator()
            .run(
                &strings(&["u1@example.com", "u2@example.com"]),
                &strings(&["PS1", "PS2"]),
                &op,
            )
            .await;

        assert_eq!(result.successes.len(), 4);
        assert!(result.failures.is_empty());
        assert_eq!(org.records("PermissionSetAssignment").await.len(), 4);
    }

    #[tokio::test]
    async fn second_assignment_is_idempotent_success() {
        let org = org();
        let op = PermsetAssignment::new(&org);
        let targets = strings(&["u1@example.com"]);
        let items = strings(&["PS1"]);

        let first = aggregator().run(&targets, &items, &op).await;
        let second = aggregator().run(&targets, &items, &op).await;

        assert_eq!(ExitStatus::from(&first), ExitStatus::Success);
        assert_eq!(ExitStatus::from(&second), ExitStatus::Success);
        assert!(!first.successes[0].already_applied);
        assert!(second.successes[0].already_applied);
    }

    #[tokio::test]
    async fn unknown_user_is_failure() {
        let org = org();
        let op = PermsetAssignment::new(&org);
        let result = aggregator()
            .run(&strings(&["ghost@example.com"]), &strings(&["PS1"]), &op)
            .await;
        assert_eq!(result.failures[0].target, "ghost@example.com");
        assert!(result.failures[0].message.contains("not found"));
        assert_eq!(ExitStatus::from(&result).code(), 1);
    }

    #[tokio::test]
    async fn unknown_permission_set_is_failure() {
        let org = org();
        let op = PermsetAssignment::new(&org);
        let result = aggregator()
            .run(&strings(&["u1@example.com"]), &strings(&["Nope"]), &op)
            .await;
        assert_eq!(
            result.failures[0].message,
            "PermissionSet not found: Nope"
        );
    }

    #[tokio::test]
    async fn namespaced_permission_set_is_found() {
        let org = org();
        let op = PermsetAssignment::new(&org);
        let result = aggregator()
            .run(&strings(&["u1@example.com"]), &strings(&["acme__Sales"]), &op)
            .await;
        assert_eq!(result.successes[0].value, "acme__Sales");
    }

    #[test]
    fn assignment_fields() {
        let fields = permset_assignment_fields("005", "0PS");
        assert_eq!(fields["AssigneeId"], "005");
        assert_eq!(fields["PermissionSetId"], "0PS");
    }
}
