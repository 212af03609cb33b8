//! Permission set license CLI commands.

use clap::{Args, Parser, Subcommand};

use super::{OnBehalfOfArgs, TargetOrgArgs};

/// Permission set license commands.
#[derive(Debug, Parser)]
pub struct PermsetLicenseCommand {
    #[command(subcommand)]
    pub action: PermsetLicenseAction,
}

/// Available permission set license actions.
#[derive(Debug, Subcommand)]
pub enum PermsetLicenseAction {
    /// Assign permission set licenses to one or more users.
    Assign(AssignLicenseArgs),
}

#[derive(Debug, Args)]
pub struct AssignLicenseArgs {
    /// License developer names or labels.
    #[arg(
        long,
        short = 'n',
        required = true,
        num_args = 1..,
        value_delimiter = ','
    )]
    pub name: Vec<String>,

    #[command(flatten)]
    pub on_behalf_of: OnBehalfOfArgs,

    #[command(flatten)]
    pub target: TargetOrgArgs,
}
