//! CLI command definitions.

pub mod legacy;
pub mod password;
pub mod permset;
pub mod permsetlicense;
pub mod user;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Manage users, permission sets and passwords in an org.
#[derive(Debug, Parser)]
#[command(name = "orguser")]
#[command(version, about = "Manage users, permission sets and passwords in an org", long_about = None)]
pub struct Cli {
    /// Print a JSON envelope instead of tables.
    #[arg(long, global = true)]
    pub json: bool,

    /// Emit debug logs on stderr.
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// State directory (aliases, settings, authorizations).
    #[arg(long, global = true, env = "ORGUSER_HOME")]
    pub home: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// User management.
    User(user::UserCommand),
    /// Permission set assignment.
    Permset(permset::PermsetCommand),
    /// Permission set license assignment.
    #[command(name = "permsetlicense")]
    PermsetLicense(permsetlicense::PermsetLicenseCommand),
    /// Password generation.
    Password(password::PasswordCommand),
}

/// The org whose session the command runs with.
#[derive(Debug, Clone, Default, Args)]
pub struct TargetOrgArgs {
    /// Username or alias of the target org; defaults to the configured target org.
    #[arg(
        long = "target-org",
        short = 'o',
        visible_alias = "targetusername",
        short_alias = 'u',
        value_name = "USERNAME_OR_ALIAS"
    )]
    pub target_org: Option<String>,
}

/// Users a command acts on behalf of.
#[derive(Debug, Clone, Default, Args)]
pub struct OnBehalfOfArgs {
    /// Usernames or aliases to act on; defaults to the target org user.
    #[arg(
        long = "on-behalf-of",
        short = 'b',
        visible_alias = "onbehalfof",
        num_args = 1..,
        value_delimiter = ',',
        value_name = "USERNAME_OR_ALIAS"
    )]
    pub on_behalf_of: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_permset_assign_with_multiple_values() {
        let cli = Cli::try_parse_from([
            "orguser", "permset", "assign", "--name", "PS1", "PS2", "-b", "u1,u2", "-o", "admin",
        ])
        .unwrap();
        let Commands::Permset(cmd) = cli.command else {
            panic!("expected permset command");
        };
        let permset::PermsetAction::Assign(args) = cmd.action;
        assert_eq!(args.name, vec!["PS1", "PS2"]);
        assert_eq!(args.on_behalf_of.on_behalf_of, vec!["u1", "u2"]);
        assert_eq!(args.target.target_org.as_deref(), Some("admin"));
    }

    #[test]
    fn accepts_legacy_flag_names() {
        let cli = Cli::try_parse_from([
            "orguser",
            "permset",
            "assign",
            "--permsetname",
            "PS1",
            "--onbehalfof",
            "u1",
            "-u",
            "admin",
        ])
        .unwrap();
        let Commands::Permset(cmd) = cli.command else {
            panic!("expected permset command");
        };
        let permset::PermsetAction::Assign(args) = cmd.action;
        assert_eq!(args.name, vec!["PS1"]);
        assert_eq!(args.on_behalf_of.on_behalf_of, vec!["u1"]);
        assert_eq!(args.target.target_org.as_deref(), Some("admin"));
    }

    #[test]
    fn global_json_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["orguser", "user", "list", "--json"]).unwrap();
        assert!(cli.json);
    }

    #[test]
    fn password_length_is_range_checked() {
        let result = Cli::try_parse_from(["orguser", "password", "generate", "--length", "7"]);
        assert!(result.is_err());
    }
}
