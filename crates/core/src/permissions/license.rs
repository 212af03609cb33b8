use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{json, Map, Value};

use crate::batch::RemoteOperation;
use crate::platform::{
    decode_records, find_user_id, soql, OrgConnection, PermissionSetLicenseRecord, PlatformError,
    Result,
};

/// Message fragment the platform returns when the license is already assigned.
pub const DUPLICATE_LICENSE_SIGNATURE: &str = "duplicate value found";

/// Resolves every license name to its Id.
///
/// This runs once before any pairing: a name that matches no license aborts
/// the whole command.
pub async fn resolve_licenses<C: OrgConnection + ?Sized>(
    conn: &C,
    names: &[String],
) -> Result<HashMap<String, String>> {
    let mut ids = HashMap::with_capacity(names.len());
    for name in names {
        let rows = conn.query(&soql::license_query(name)).await?;
        let license = decode_records::<PermissionSetLicenseRecord>(rows)?
            .into_iter()
            .next()
            .ok_or_else(|| PlatformError::NotFound {
                entity_type: "PermissionSetLicense",
                name: name.clone(),
            })?;
        tracing::debug!(license = %name, id = %license.id, "Resolved permission set license");
        ids.insert(name.clone(), license.id);
    }
    Ok(ids)
}

/// Fields of a `PermissionSetLicenseAssign` record.
pub fn license_assignment_fields(assignee_id: &str, license_id: &str) -> Map<String, Value> {
    let mut fields = Map::new();
    fields.insert("AssigneeId".to_string(), json!(assignee_id));
    fields.insert("PermissionSetLicenseId".to_string(), json!(license_id));
    fields
}

/// Assigns a permission set license (the item) to a user (the target).
pub struct LicenseAssignment<'a, C: ?Sized> {
    conn: &'a C,
    license_ids: HashMap<String, String>,
}

impl<'a, C: OrgConnection + ?Sized> LicenseAssignment<'a, C> {
    /// Builds the operation from the output of [`resolve_licenses`].
    pub fn new(conn: &'a C, license_ids: HashMap<String, String>) -> Self {
        Self { conn, license_ids }
    }
}

#[async_trait]
impl<C: OrgConnection + ?Sized> RemoteOperation for LicenseAssignment<'_, C> {
    fn name(&self) -> &'static str {
        "permsetlicense-assign"
    }

    async fn invoke(&self, username: &str, item: &str) -> Result<String> {
        let license_id = self
            .license_ids
            .get(item)
            .ok_or_else(|| PlatformError::NotFound {
                entity_type: "PermissionSetLicense",
                name: item.to_string(),
            })?;
        let user_id = find_user_id(self.conn, username).await?;
        self.conn
            .create(
                "PermissionSetLicenseAssign",
                &license_assignment_fields(&user_id, license_id),
            )
            .await?;
        Ok(item.to_string())
    }

    fn is_already_applied(&self, message: &str) -> bool {
        message.contains(DUPLICATE_LICENSE_SIGNATURE)
    }
}
