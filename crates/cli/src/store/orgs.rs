//! Per-user authorization files under `orgs/`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::error::{CliError, Result};

use super::{read_json, write_json};

/// Locally stored authorization for one username.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthEntry {
    pub username: String,
    pub org_id: String,
    pub instance_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// User whose session created this one; its token is borrowed when this
    /// entry has none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_username: Option<String>,
}

/// Directory of `{username}.json` authorization files.
///
/// Writes are serialized through a single lock so concurrent tasks never
/// interleave writes to the same file.
#[derive(Debug)]
pub struct AuthStore {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl AuthStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    fn path_for(&self, username: &str) -> PathBuf {
        let file_name: String = username
            .chars()
            .map(|c| if c == '/' || c == '\\' { '_' } else { c })
            .collect();
        self.dir.join(format!("{file_name}.json"))
    }

    /// Reads the entry for a username, if one exists.
    pub fn get(&self, username: &str) -> Result<Option<AuthEntry>> {
        read_json(&self.path_for(username))
    }

    /// Reads the entry for a username or fails with [`CliError::NoAuthInfo`].
    pub fn require(&self, username: &str) -> Result<AuthEntry> {
        self.get(username)?.ok_or_else(|| CliError::NoAuthInfo {
            username: username.to_string(),
        })
    }

    /// Every stored entry, sorted by username.
    pub fn list(&self) -> Result<Vec<AuthEntry>> {
        let read_dir = match std::fs::read_dir(&self.dir) {
            Ok(read_dir) => read_dir,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut entries = Vec::new();
        for item in read_dir {
            let path = item?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                match read_json::<AuthEntry>(&path) {
                    Ok(Some(entry)) => entries.push(entry),
                    Ok(None) => {}
                    Err(error) => {
                        tracing::warn!(path = %path.display(), %error, "Skipping unreadable auth file");
                    }
                }
            }
        }
        entries.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(entries)
    }

    /// Writes an entry, replacing any existing one.
    pub async fn save(&self, entry: &AuthEntry) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        write_json(&self.path_for(&entry.username), entry)
    }

    /// Applies `change` to a stored entry and writes it back.
    pub async fn update(&self, username: &str, change: impl FnOnce(&mut AuthEntry)) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut entry = self.require(username)?;
        change(&mut entry);
        write_json(&self.path_for(username), &entry)
    }

    /// The token a connection for `entry` should use.
    pub fn access_token_for(&self, entry: &AuthEntry) -> Result<String> {
        if let Some(token) = &entry.access_token {
            return Ok(token.clone());
        }
        let parent = entry
            .parent_username
            .as_deref()
            .map(|parent| self.get(parent))
            .transpose()?
            .flatten();
        parent
            .and_then(|p| p.access_token)
            .ok_or_else(|| CliError::NoAccessToken {
                username: entry.username.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(username: &str, token: Option<&str>) -> AuthEntry {
        AuthEntry {
            username: username.to_string(),
            org_id: "00D1".to_string(),
            instance_url: "https://example.my.site.com".to_string(),
            access_token: token.map(str::to_string),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn save_get_and_list() {
        let dir = tempfile::tempdir().unwrap();
        let store = AuthStore::new(dir.path());
        store.save(&entry("b@example.com", Some("t2"))).await.unwrap();
        store.save(&entry("a@example.com", Some("t1"))).await.unwrap();

        assert_eq!(
            store.get("a@example.com").unwrap().unwrap().access_token.as_deref(),
            Some("t1")
        );
        let usernames: Vec<_> = store.list().unwrap().into_iter().map(|e| e.username).collect();
        assert_eq!(usernames, vec!["a@example.com", "b@example.com"]);
    }

    #[tokio::test]
    async fn update_changes_stored_entry() {
        let dir = tempfile::tempdir().unwrap();
        let store = AuthStore::new(dir.path());
        store.save(&entry("a@example.com", Some("t1"))).await.unwrap();

        store
            .update("a@example.com", |e| e.password = Some("s3cret".to_string()))
            .await
            .unwrap();

        assert_eq!(
            store.require("a@example.com").unwrap().password.as_deref(),
            Some("s3cret")
        );
    }

    #[tokio::test]
    async fn update_of_unknown_user_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = AuthStore::new(dir.path());
        let error = store.update("ghost@example.com", |_| {}).await.unwrap_err();
        assert!(matches!(error, CliError::NoAuthInfo { .. }));
    }

    #[tokio::test]
    async fn child_entry_borrows_parent_token() {
        let dir = tempfile::tempdir().unwrap();
        let store = AuthStore::new(dir.path());
        store.save(&entry("admin@example.com", Some("admin-token"))).await.unwrap();
        let child = AuthEntry {
            parent_username: Some("admin@example.com".to_string()),
            ..entry("child@example.com", None)
        };

        assert_eq!(store.access_token_for(&child).unwrap(), "admin-token");
        assert!(matches!(
            store.access_token_for(&entry("lonely@example.com", None)),
            Err(CliError::NoAccessToken { .. })
        ));
    }

    #[test]
    fn missing_directory_lists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = AuthStore::new(dir.path().join("absent"));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn serializes_camel_case_and_omits_empty() {
        let json = serde_json::to_value(entry("a@example.com", None)).unwrap();
        assert_eq!(json["instanceUrl"], "https://example.my.site.com");
        assert!(json.get("accessToken").is_none());
    }
}
