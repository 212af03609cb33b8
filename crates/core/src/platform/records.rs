use serde::{Deserialize, Serialize};

/// A row carrying only an Id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IdRecord {
    pub id: String,
}

/// A User row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserRecord {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub profile_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// A Profile row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProfileRecord {
    pub id: String,
    pub name: String,
}

/// A PermissionSetLicense row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PermissionSetLicenseRecord {
    pub id: String,
    pub developer_name: String,
    #[serde(default)]
    pub master_label: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::decode_record;
    use serde_json::json;

    #[test]
    fn user_record_ignores_attributes() {
        let row = json!({
            "attributes": { "type": "User", "url": "/services/data/v61.0/sobjects/User/005" },
            "Id": "005",
            "Username": "a@example.com",
            "ProfileId": "00e",
        });
        let user: UserRecord = decode_record(row).unwrap();
        assert_eq!(user.id, "005");
        assert_eq!(user.profile_id.as_deref(), Some("00e"));
        assert_eq!(user.email, None);
    }

    #[test]
    fn missing_required_field_is_decode_error() {
        let result: crate::platform::Result<ProfileRecord> = decode_record(json!({ "Id": "00e" }));
        assert!(matches!(
            result,
            Err(crate::platform::PlatformError::Decode(_))
        ));
    }
}
