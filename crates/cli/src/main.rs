//! orguser CLI entry point.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use orguser_cli::cli::legacy::rewrite_legacy_args;
use orguser_cli::cli::password::PasswordAction;
use orguser_cli::cli::permset::PermsetAction;
use orguser_cli::cli::permsetlicense::PermsetLicenseAction;
use orguser_cli::cli::user::UserAction;
use orguser_cli::cli::{Cli, Commands};
use orguser_cli::commands::user_create::CreateUserRequest;
use orguser_cli::commands::{
    password, permset, permsetlicense, user_create, user_display, user_list, CommandContext,
};
use orguser_cli::output::{json, Report};
use orguser_cli::Config;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "orguser=warn,orguser_cli=warn,orguser_core=warn";
const VERBOSE_FILTER: &str = "orguser=debug,orguser_cli=debug,orguser_core=debug";

#[tokio::main]
async fn main() -> ExitCode {
    let (args, legacy) = rewrite_legacy_args(std::env::args());
    let cli = Cli::parse_from(args);

    // Initialize tracing subscriber
    let default_filter = if cli.verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env("ORGUSER_LOG")
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Some(rewrite) = legacy {
        tracing::warn!(
            "\"{}\" is deprecated; use \"orguser {}\" instead",
            rewrite.legacy,
            rewrite.replacement
        );
    }

    let as_json = cli.json;
    match run(cli).await {
        Ok(code) => ExitCode::from(code),
        Err(error) => {
            if as_json {
                println!("{}", json::format_error(1, &format!("{error:#}")));
            } else {
                eprintln!("Error: {error:#}");
            }
            ExitCode::from(1)
        }
    }
}

/// Print a report and return its exit code.
fn emit<T: Serialize>(report: &Report<T>, as_json: bool) -> u8 {
    let (stdout, stderr) = report.render(as_json);
    if !stderr.is_empty() {
        eprintln!("{stderr}");
    }
    if !stdout.is_empty() {
        println!("{stdout}");
    }
    report.status.code()
}

async fn run(cli: Cli) -> Result<u8> {
    let config = Config::load(cli.home.as_deref())?;
    tracing::debug!(home = %config.home.display(), api_version = %config.api_version, "Loaded configuration");
    let mut ctx = CommandContext::load(config)?;
    let as_json = cli.json;

    let code = match cli.command {
        Commands::Permset(cmd) => match cmd.action {
            PermsetAction::Assign(args) => {
                let label = ctx.target_org_label(args.target.target_org.as_deref())?;
                let conn = ctx.connect(&ctx.resolver().resolve(&label))?;
                let report = permset::assign_permsets(
                    &ctx,
                    &conn,
                    &label,
                    &args.name,
                    &args.on_behalf_of.on_behalf_of,
                )
                .await;
                emit(&report, as_json)
            }
        },
        Commands::PermsetLicense(cmd) => match cmd.action {
            PermsetLicenseAction::Assign(args) => {
                let label = ctx.target_org_label(args.target.target_org.as_deref())?;
                let conn = ctx.connect(&ctx.resolver().resolve(&label))?;
                let report = permsetlicense::assign_licenses(
                    &ctx,
                    &conn,
                    &label,
                    &args.name,
                    &args.on_behalf_of.on_behalf_of,
                )
                .await?;
                emit(&report, as_json)
            }
        },
        Commands::Password(cmd) => match cmd.action {
            PasswordAction::Generate(args) => {
                let label = ctx.target_org_label(args.target.target_org.as_deref())?;
                let conn = ctx.connect(&ctx.resolver().resolve(&label))?;
                let report = password::generate_passwords(
                    &ctx,
                    &conn,
                    &label,
                    &args.on_behalf_of.on_behalf_of,
                    args.length,
                    args.complexity,
                )
                .await?;
                emit(&report, as_json)
            }
        },
        Commands::User(cmd) => match cmd.action {
            UserAction::Create(args) => {
                let username = ctx.target_username(args.target.target_org.as_deref())?;
                let conn = ctx.connect(&username)?;
                let request = CreateUserRequest {
                    definition_file: args.definition_file,
                    set_alias: args.set_alias,
                    set_unique_username: args.set_unique_username,
                    fields: args.fields,
                };
                let report = user_create::create_user(&mut ctx, &conn, &request).await?;
                emit(&report, as_json)
            }
            UserAction::Display(args) => {
                let username = ctx.target_username(args.target.target_org.as_deref())?;
                let conn = ctx.connect(&username)?;
                let report =
                    user_display::display_user(&ctx, &conn, &username, args.show_secrets).await?;
                emit(&report, as_json)
            }
            UserAction::List(args) => {
                let username = ctx.target_username(args.target.target_org.as_deref())?;
                let conn = ctx.connect(&username)?;
                let report = user_list::list_users(&ctx, &conn, &username).await?;
                emit(&report, as_json)
            }
        },
    };

    Ok(code)
}
