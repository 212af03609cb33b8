//! Permission set CLI commands.

use clap::{Args, Parser, Subcommand};

use super::{OnBehalfOfArgs, TargetOrgArgs};

/// Permission set commands.
#[derive(Debug, Parser)]
pub struct PermsetCommand {
    #[command(subcommand)]
    pub action: PermsetAction,
}

/// Available permission set actions.
#[derive(Debug, Subcommand)]
pub enum PermsetAction {
    /// Assign permission sets to one or more users.
    Assign(AssignPermsetArgs),
}

#[derive(Debug, Args)]
pub struct AssignPermsetArgs {
    /// Permission set names; use `ns__Name` for managed package sets.
    #[arg(
        long,
        short = 'n',
        visible_alias = "permsetname",
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
