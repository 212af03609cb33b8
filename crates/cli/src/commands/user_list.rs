//! `user list`.

use std::collections::HashMap;

use orguser_core::batch::ExitStatus;
use orguser_core::identity::AliasStore;
use orguser_core::platform::OrgConnection;
use orguser_core::user::{find_users, profile_names};
use serde::Serialize;

use crate::error::Result;
use crate::output::{pretty, Report};

use super::CommandContext;

/// Marks the target org user in the `Default` column.
const DEFAULT_MARKER: &str = "(A)";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListedUser {
    pub default_marker: String,
    pub alias: String,
    pub username: String,
    pub profile_name: String,
    pub user_id: String,
}

/// Lists locally authorized users of the target org.
pub async fn list_users<C: OrgConnection + ?Sized>(
    ctx: &CommandContext,
    conn: &C,
    target_username: &str,
) -> Result<Report<Vec<ListedUser>>> {
    let entries: Vec<_> = ctx
        .auth
        .list()?
        .into_iter()
        .filter(|e| e.org_id == conn.org_id())
        .collect();
    let usernames: Vec<String> = entries.iter().map(|e| e.username.clone()).collect();

    let records: HashMap<String, _> = find_users(conn, &usernames)
        .await?
        .into_iter()
        .map(|u| (u.username.clone(), u))
        .collect();
    let mut profile_ids: Vec<String> = records.values().filter_map(|u| u.profile_id.clone()).collect();
    profile_ids.sort();
    profile_ids.dedup();
    let profiles = profile_names(conn, &profile_ids).await?;

    let users: Vec<ListedUser> = entries
        .into_iter()
        .map(|entry| {
            let record = records.get(&entry.username);
            let profile_name = record
                .and_then(|r| r.profile_id.as_ref())
                .and_then(|id| profiles.get(id))
                .cloned()
                .unwrap_or_default();
            let user_id = record
                .map(|r| r.id.clone())
                .or(entry.user_id)
                .unwrap_or_default();
            ListedUser {
                default_marker: if entry.username == target_username {
                    DEFAULT_MARKER.to_string()
                } else {
                    String::new()
                },
                alias: ctx.aliases.aliases_for(&entry.username).join(","),
                username: entry.username,
                profile_name,
                user_id,
            }
        })
        .collect();

    let rows: Vec<Vec<String>> = users
        .iter()
        .map(|u| {
            vec![
                u.default_marker.clone(),
                u.alias.clone(),
                u.username.clone(),
                u.profile_name.clone(),
                u.user_id.clone(),
            ]
        })
        .collect();
    let text = pretty::format_table(
        &format!("Users in org {}", conn.org_id()),
        &["Default", "Alias", "Username", "Profile Name", "User Id"],
        &rows,
    );

    Ok(Report {
        status: ExitStatus::Success,
        result: users,
        text,
        warnings: Vec::new(),
    })
}
