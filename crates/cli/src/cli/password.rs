//! Password CLI commands.

use clap::{Args, Parser, Subcommand};
use orguser_core::password::{DEFAULT_COMPLEXITY, DEFAULT_LENGTH};

use super::{OnBehalfOfArgs, TargetOrgArgs};

/// Password commands.
#[derive(Debug, Parser)]
pub struct PasswordCommand {
    #[command(subcommand)]
    pub action: PasswordAction,
}

/// Available password actions.
#[derive(Debug, Subcommand)]
pub enum PasswordAction {
    /// Generate and set a random password for one or more users.
    Generate(GeneratePasswordArgs),
}

#[derive(Debug, Args)]
pub struct GeneratePasswordArgs {
    /// Number of characters.
    #[arg(
        long,
        short = 'l',
        default_value_t = DEFAULT_LENGTH,
        value_parser = clap::value_parser!(u8).range(8..=100)
    )]
    pub length: u8,

    /// 0 lower; 1 lower+numbers; 2 lower+symbols; 3 lower+upper+numbers;
    /// 4 lower+numbers+symbols; 5 all.
    #[arg(
        long,
        short = 'c',
        default_value_t = DEFAULT_COMPLEXITY,
        value_parser = clap::value_parser!(u8).range(0..=5)
    )]
    pub complexity: u8,

    #[command(flatten)]
    pub on_behalf_of: OnBehalfOfArgs,

    #[command(flatten)]
    pub target: TargetOrgArgs,
}
