//! User CLI commands.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::TargetOrgArgs;

/// User management commands.
#[derive(Debug, Parser)]
pub struct UserCommand {
    #[command(subcommand)]
    pub action: UserAction,
}

/// Available user actions.
#[derive(Debug, Subcommand)]
pub enum UserAction {
    /// Create a user in the target org.
    Create(CreateUserArgs),
    /// Show details of the target org user.
    Display(DisplayUserArgs),
    /// List locally authorized users of the target org.
    List(ListUsersArgs),
}

#[derive(Debug, Args)]
pub struct CreateUserArgs {
    /// JSON user definition; `key=value` arguments override its fields.
    #[arg(long, short = 'f', visible_alias = "definitionfile")]
    pub definition_file: Option<PathBuf>,

    /// Alias to save for the new username.
    #[arg(long, short = 'a', visible_alias = "setalias")]
    pub set_alias: Option<String>,

    /// Append the org Id to the supplied username.
    #[arg(long, short = 's', visible_alias = "setuniqueusername")]
    pub set_unique_username: bool,

    #[command(flatten)]
    pub target: TargetOrgArgs,

    /// User fields as `key=value`, e.g. `email=me@example.com`.
    #[arg(value_name = "FIELD=VALUE")]
    pub fields: Vec<String>,
}

#[derive(Debug, Args)]
pub struct DisplayUserArgs {
    /// Include the access token in the output.
    #[arg(long)]
    pub show_secrets: bool,

    #[command(flatten)]
    pub target: TargetOrgArgs,
}

#[derive(Debug, Args)]
pub struct ListUsersArgs {
    #[command(flatten)]
    pub target: TargetOrgArgs,
}
