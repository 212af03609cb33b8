//! In-memory org for tests.
//!
//! Answers the queries built by [`crate::platform::soql`] from seeded users,
//! profiles, permission sets and licenses, and stores created records.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use tokio::sync::RwLock;

use crate::platform::soql::{
    license_query, permission_set_query, profile_id_query, user_detail_query, user_id_query,
};
use crate::platform::{OrgConnection, PlatformError, Result};

const USERS_IN_PREFIX: &str = "SELECT Id, Username, ProfileId, Email FROM User WHERE Username IN (";
const PROFILES_IN_PREFIX: &str = "SELECT Id, Name FROM Profile WHERE Id IN (";

#[derive(Debug, Clone)]
struct SeedUser {
    id: String,
    username: String,
    profile_id: Option<String>,
    email: Option<String>,
}

#[derive(Debug, Default)]
struct OrgState {
    users: Vec<SeedUser>,
    profiles: Vec<(String, String)>,
    permission_sets: Vec<(String, String)>,
    licenses: Vec<(String, String, String)>,
    records: HashMap<String, Vec<Map<String, Value>>>,
    passwords: HashMap<String, String>,
    password_denied: HashSet<String>,
    failing_creates: HashMap<String, PlatformError>,
    queries: Vec<String>,
    next_id: usize,
}

/// In-memory [`OrgConnection`].
#[derive(Debug, Clone)]
pub struct MemoryOrg {
    username: String,
    org_id: String,
    state: Arc<RwLock<OrgState>>,
}

impl MemoryOrg {
    pub fn new(username: impl Into<String>, org_id: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            org_id: org_id.into(),
            state: Arc::new(RwLock::new(OrgState::default())),
        }
    }

    fn seed(self, f: impl FnOnce(&mut OrgState)) -> Self {
        // Builders run before the org is shared, so the lock is uncontended.
        if let Ok(mut state) = self.state.try_write() {
            f(&mut state);
        }
        self
    }

    pub fn with_user(self, id: &str, username: &str) -> Self {
        self.with_user_details(id, username, None, None)
    }

    pub fn with_user_details(
        self,
        id: &str,
        username: &str,
        profile_id: Option<&str>,
        email: Option<&str>,
    ) -> Self {
        let user = SeedUser {
            id: id.to_string(),
            username: username.to_string(),
            profile_id: profile_id.map(str::to_string),
            email: email.map(str::to_string),
        };
        self.seed(|s| s.users.push(user))
    }

    pub fn with_profile(self, id: &str, name: &str) -> Self {
        let profile = (id.to_string(), name.to_string());
        self.seed(|s| s.profiles.push(profile))
    }

    /// Seeds a permission set; `namespace` is the managed package prefix.
    pub fn with_permission_set(self, id: &str, name: &str, namespace: Option<&str>) -> Self {
        let full_name = match namespace {
            Some(ns) => format!("{ns}__{name}"),
            None => name.to_string(),
        };
        let entry = (id.to_string(), full_name);
        self.seed(|s| s.permission_sets.push(entry))
    }

    pub fn with_license(self, id: &str, developer_name: &str, label: &str) -> Self {
        let entry = (id.to_string(), developer_name.to_string(), label.to_string());
        self.seed(|s| s.licenses.push(entry))
    }

    /// Makes `set_password` fail with `INSUFFICIENT_ACCESS` for a user id.
    pub fn deny_password_reset(self, user_id: &str) -> Self {
        let id = user_id.to_string();
        self.seed(|s| {
            s.password_denied.insert(id);
        })
    }

    /// Makes every create of the given record type fail.
    pub fn fail_creates(self, sobject: &str, error: PlatformError) -> Self {
        let sobject = sobject.to_string();
        self.seed(|s| {
            s.failing_creates.insert(sobject, error);
        })
    }

    /// Records created so far for a record type.
    pub async fn records(&self, sobject: &str) -> Vec<Map<String, Value>> {
        self.state
            .read()
            .await
            .records
            .get(sobject)
            .cloned()
            .unwrap_or_default()
    }

    /// Password most recently set for a user id.
    pub async fn password_of(&self, user_id: &str) -> Option<String> {
        self.state.read().await.passwords.get(user_id).cloned()
    }

    /// Every query received, in order.
    pub async fn queries(&self) -> Vec<String> {
        self.state.read().await.queries.clone()
    }
}

impl OrgState {
    fn answer(&self, soql: &str) -> Vec<Value> {
        if let Some(list) = soql.strip_prefix(USERS_IN_PREFIX) {
            let wanted = quoted_values(list);
            return self
                .users
                .iter()
                .filter(|u| wanted.contains(&u.username))
                .map(user_row)
                .collect();
        }
        if let Some(list) = soql.strip_prefix(PROFILES_IN_PREFIX) {
            let wanted = quoted_values(list);
            return self
                .profiles
                .iter()
                .filter(|(id, _)| wanted.contains(id))
                .map(|(id, name)| json!({ "Id": id, "Name": name }))
                .collect();
        }
        for user in &self.users {
            if soql == user_id_query(&user.username) {
                return vec![json!({ "Id": user.id })];
            }
            if soql == user_detail_query(&user.username) {
                return vec![user_row(user)];
            }
        }
        for (id, name) in &self.permission_sets {
            if soql == permission_set_query(name) {
                return vec![json!({ "Id": id })];
            }
        }
        for (id, developer_name, label) in &self.licenses {
            if soql == license_query(developer_name) || soql == license_query(label) {
                return vec![json!({
                    "Id": id,
                    "DeveloperName": developer_name,
                    "MasterLabel": label,
                })];
            }
        }
        for (id, name) in &self.profiles {
            if soql == profile_id_query(name) {
                return vec![json!({ "Id": id })];
            }
        }
        Vec::new()
    }

    fn duplicate_error(&self, sobject: &str, fields: &Map<String, Value>) -> Option<PlatformError> {
        let same = |keys: &[&str]| {
            self.records.get(sobject).is_some_and(|existing| {
                existing
                    .iter()
                    .any(|r| keys.iter().all(|k| r.get(*k) == fields.get(*k)))
            })
        };
        match sobject {
            "PermissionSetAssignment" if same(&["AssigneeId", "PermissionSetId"]) => {
                Some(PlatformError::Api {
                    status: 400,
                    error_code: "DUPLICATE_VALUE".to_string(),
                    message: format!(
                        "Duplicate PermissionSetAssignment. Assignee: {}; Permission Set: {}",
                        fields["AssigneeId"], fields["PermissionSetId"]
                    ),
                })
            }
            "PermissionSetLicenseAssign" if same(&["AssigneeId", "PermissionSetLicenseId"]) => {
                Some(PlatformError::Api {
                    status: 400,
                    error_code: "DUPLICATE_VALUE".to_string(),
                    message: "duplicate value found: PermissionSetLicenseId duplicates value on record"
                        .to_string(),
                })
            }
            "User" => {
                let username = fields.get("Username").and_then(Value::as_str)?;
                self.users
                    .iter()
                    .any(|u| u.username == username)
                    .then(|| PlatformError::Api {
                        status: 400,
                        error_code: "DUPLICATE_USERNAME".to_string(),
                        message: "Duplicate Username.<br>The username already exists in this or another organization."
                            .to_string(),
                    })
            }
            _ => None,
        }
    }
}

fn user_row(user: &SeedUser) -> Value {
    json!({
        "Id": user.id,
        "Username": user.username,
        "ProfileId": user.profile_id,
        "Email": user.email,
    })
}

fn quoted_values(list: &str) -> Vec<String> {
    list.trim_end_matches(')')
        .split(", ")
        .map(|v| v.trim_matches('\'').to_string())
        .collect()
}

#[async_trait]
impl OrgConnection for MemoryOrg {
    fn username(&self) -> &str {
        &self.username
    }

    fn org_id(&self) -> &str {
        &self.org_id
    }

    async fn query(&self, soql: &str) -> Result<Vec<Value>> {
        let mut state = self.state.write().await;
        state.queries.push(soql.to_string());
        Ok(state.answer(soql))
    }

    async fn create(&self, sobject: &str, fields: &Map<String, Value>) -> Result<String> {
        let mut state = self.state.write().await;
        if let Some(error) = state.failing_creates.get(sobject) {
            return Err(error.clone());
        }
        if let Some(error) = state.duplicate_error(sobject, fields) {
            return Err(error);
        }
        state.next_id += 1;
        let id = format!("{}{:015}", &sobject[..1], state.next_id);
        if sobject == "User" {
            let username = fields
                .get("Username")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            state.users.push(SeedUser {
                id: id.clone(),
                username,
                profile_id: fields.get("ProfileId").and_then(Value::as_str).map(str::to_string),
                email: fields.get("Email").and_then(Value::as_str).map(str::to_string),
            });
        }
        state
            .records
            .entry(sobject.to_string())
            .or_default()
            .push(fields.clone());
        Ok(id)
    }

    async fn set_password(&self, user_id: &str, password: &str) -> Result<()> {
        let mut state = self.state.write().await;
        if state.password_denied.contains(user_id) {
            return Err(PlatformError::Api {
                status: 403,
                error_code: "INSUFFICIENT_ACCESS".to_string(),
                message: "insufficient access rights on cross-reference id".to_string(),
            });
        }
        state
            .passwords
            .insert(user_id.to_string(), password.to_string());
        Ok(())
    }
}
