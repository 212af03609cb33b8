//! `user display`.

use orguser_core::batch::ExitStatus;
use orguser_core::identity::AliasStore;
use orguser_core::platform::OrgConnection;
use orguser_core::user::{find_user, profile_names};
use serde::Serialize;

use crate::error::Result;
use crate::output::{pretty, Report};

use super::CommandContext;

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDescription {
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_name: Option<String>,
    pub id: String,
    pub org_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    pub instance_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Describes a locally authorized user, combining the auth entry with the
/// remote user record.
pub async fn display_user<C: OrgConnection + ?Sized>(
    ctx: &CommandContext,
    conn: &C,
    username: &str,
    show_secrets: bool,
) -> Result<Report<UserDescription>> {
    let entry = ctx.auth.require(username)?;
    let user = find_user(conn, username).await?;
    let profile_name = match &user.profile_id {
        Some(id) => profile_names(conn, std::slice::from_ref(id)).await?.remove(id),
        None => None,
    };
    let access_token = if show_secrets {
        Some(ctx.auth.access_token_for(&entry)?)
    } else {
        None
    };

    let description = UserDescription {
        username: entry.username.clone(),
        profile_name,
        id: user.id,
        org_id: entry.org_id.clone(),
        access_token,
        instance_url: entry.instance_url.clone(),
        login_url: entry.login_url.clone(),
        alias: ctx.aliases.aliases_for(username).into_iter().next(),
        password: entry.password.clone(),
    };

    let text = pretty::format_key_values(
        "User Description",
        &[
            ("Username", Some(description.username.clone())),
            ("Profile Name", description.profile_name.clone()),
            ("Id", Some(description.id.clone())),
            ("Org Id", Some(description.org_id.clone())),
            ("Access Token", description.access_token.clone()),
            ("Instance Url", Some(description.instance_url.clone())),
            ("Login Url", description.login_url.clone()),
            ("Alias", description.alias.clone()),
            ("Password", description.password.clone()),
        ],
    );

    Ok(Report {
        status: ExitStatus::Success,
        result: description,
        text,
        warnings: Vec::new(),
    })
}
