//! Command handlers.
//!
//! Each handler takes the loaded [`CommandContext`] and a connection, and
//! returns a [`Report`](crate::output::Report). Handlers are generic over
//! [`OrgConnection`](orguser_core::platform::OrgConnection) so they run the
//! same against the HTTP client and the in-memory org.

pub mod password;
pub mod permset;
pub mod permsetlicense;
pub mod user_create;
pub mod user_display;
pub mod user_list;

use orguser_core::batch::BatchAggregator;
use orguser_core::identity::AliasResolver;

use crate::client::OrgClient;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::store::{FileAliasStore, AuthStore, Settings};

/// Local state shared by every command.
#[derive(Debug)]
pub struct CommandContext {
    pub config: Config,
    pub aliases: FileAliasStore,
    pub auth: AuthStore,
    pub settings: Settings,
}

impl CommandContext {
    /// Load the alias store, settings and auth store from the home directory.
    pub fn load(config: Config) -> Result<Self> {
        let aliases = FileAliasStore::load(config.alias_path())?;
        let settings = Settings::load(&config.settings_path())?;
        let auth = AuthStore::new(config.orgs_dir());
        Ok(Self {
            config,
            aliases,
            auth,
            settings,
        })
    }

    pub fn resolver(&self) -> AliasResolver<&FileAliasStore> {
        AliasResolver::new(&self.aliases)
    }

    pub fn aggregator(&self) -> BatchAggregator<&FileAliasStore> {
        BatchAggregator::new(self.resolver(), self.config.concurrency)
    }

    /// The target org label: the flag, then `ORGUSER_TARGET_ORG`, then
    /// `config.json`.
    pub fn target_org_label(&self, flag: Option<&str>) -> Result<String> {
        flag.map(str::to_string)
            .or_else(|| self.config.target_org.clone())
            .or_else(|| self.settings.target_org.clone())
            .ok_or(CliError::NoTargetOrg)
    }

    /// The target org username, with aliases resolved.
    pub fn target_username(&self, flag: Option<&str>) -> Result<String> {
        Ok(self.resolver().resolve(&self.target_org_label(flag)?))
    }

    /// Open an HTTP connection as a stored user.
    pub fn connect(&self, username: &str) -> Result<OrgClient> {
        let entry = self.auth.require(username)?;
        tracing::debug!(username, instance = %entry.instance_url, "Connecting");
        OrgClient::from_auth(&self.auth, &entry, &self.config.api_version)
    }
}

/// The users a batch acts on: `--on-behalf-of`, or else the target org user.
pub fn behalf_targets(on_behalf_of: &[String], target_label: &str) -> Vec<String> {
    if on_behalf_of.is_empty() {
        vec![target_label.to_string()]
    } else {
        on_behalf_of.to_vec()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::Path;

    use super::*;
    use crate::store::AuthEntry;

    pub const ORG_ID: &str = "00D000000000001";
    pub const ADMIN: &str = "admin@example.com";

    /// A context rooted in `home` with an admin authorization saved.
    pub async fn context(home: &Path) -> CommandContext {
        let config = Config::from_lookup(|key| match key {
            "ORGUSER_HOME" => Some(home.display().to_string()),
            _ => None,
        })
        .unwrap();
        let ctx = CommandContext::load(config).unwrap();
        ctx.auth
            .save(&AuthEntry {
                username: ADMIN.to_string(),
                org_id: ORG_ID.to_string(),
                instance_url: "https://acme.my.example.com".to_string(),
                login_url: Some("https://login.example.com".to_string()),
                access_token: Some("admin-token".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        ctx
    }

    pub fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }
}
