//! `user create`.

use std::path::{Path, PathBuf};

use orguser_core::batch::{run_pairing, AggregateResult, ExitStatus, FailureRecord, Outcome, SuccessRecord};
use orguser_core::password::PasswordOptions;
use orguser_core::permissions::PermsetAssignment;
use orguser_core::platform::OrgConnection;
use orguser_core::user::{
    find_profile_id, find_user, parse_vararg, CreationContext, UserCreation, UserDefinition,
};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{CliError, Result};
use crate::output::{pretty, Report};
use crate::store::AuthEntry;

use super::password::run_password_batch;
use super::CommandContext;

/// Inputs of one `user create` invocation.
#[derive(Debug, Clone, Default)]
pub struct CreateUserRequest {
    pub definition_file: Option<PathBuf>,
    pub set_alias: Option<String>,
    pub set_unique_username: bool,
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserOutput {
    pub org_id: String,
    pub permission_set_assignments: Vec<String>,
    pub fields: Map<String, Value>,
    pub successes: Vec<SuccessRecord>,
    pub failures: Vec<FailureRecord>,
}

fn read_definition_file(path: &Path) -> Result<Value> {
    let read_error = |source| CliError::ReadFile {
        path: path.to_path_buf(),
        source,
    };
    let contents = std::fs::read_to_string(path).map_err(read_error)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Creates a user from a definition file and `key=value` fields, then applies
/// the definition's permission sets and password directives.
pub async fn create_user<C: OrgConnection + ?Sized>(
    ctx: &mut CommandContext,
    conn: &C,
    request: &CreateUserRequest,
) -> Result<Report<CreateUserOutput>> {
    let overrides = request
        .fields
        .iter()
        .map(|arg| parse_vararg(arg))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    let file = request
        .definition_file
        .as_deref()
        .map(read_definition_file)
        .transpose()?;
    let definition = UserDefinition::from_sources(file, &overrides)?;

    let admin_entry = ctx.auth.require(conn.username())?;
    let admin = find_user(conn, conn.username()).await?;
    let profile_id = if definition.has_profile_id() {
        None
    } else {
        Some(find_profile_id(conn, definition.profile_name_or_default()).await?)
    };

    let creation = CreationContext {
        admin_username: conn.username().to_string(),
        admin_email: admin.email,
        org_id: conn.org_id().to_string(),
        profile_id,
        timestamp_millis: u128::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or_default(),
        set_unique_username: request.set_unique_username,
    };
    let op = UserCreation::new(conn, definition.to_fields(&creation));
    let username = op.username().to_string();

    let outcome = run_pairing(&op, &username, &username, "User").await;
    let created_id = match &outcome {
        Outcome::Success(created) => Some(created.value.clone()),
        Outcome::Failure(_) => None,
    };
    let user_id = match created_id {
        Some(id) => id,
        None => {
            let result: AggregateResult = std::iter::once(outcome).collect();
            return Ok(Report {
                status: ExitStatus::from(&result),
                text: pretty::format_failures(&result),
                result: CreateUserOutput {
                    org_id: conn.org_id().to_string(),
                    permission_set_assignments: Vec::new(),
                    fields: op.fields().clone(),
                    successes: result.successes,
                    failures: result.failures,
                },
                warnings: Vec::new(),
            });
        }
    };
    tracing::info!(username = %username, user_id = %user_id, "User created");

    ctx.auth
        .save(&AuthEntry {
            username: username.clone(),
            org_id: conn.org_id().to_string(),
            instance_url: admin_entry.instance_url.clone(),
            login_url: admin_entry.login_url.clone(),
            user_id: Some(user_id.clone()),
            parent_username: Some(admin_entry.username.clone()),
            ..Default::default()
        })
        .await?;

    let targets = vec![username.clone()];
    let mut combined: AggregateResult = std::iter::once(outcome).collect();

    let mut sections = vec![format!(
        "Successfully created user \"{username}\" with ID {user_id} for org {}.\n\
         See more details about this user by running \"orguser user display -o {username}\".",
        conn.org_id()
    )];

    if let Some(alias) = &request.set_alias {
        if let Err(error) = ctx.aliases.set(alias, &username) {
            tracing::warn!(alias = %alias, username = %username, %error, "Could not save alias");
            let failure: AggregateResult = std::iter::once(Outcome::failure(
                &username,
                format!("Could not set alias \"{alias}\": {error}"),
            ))
            .collect();
            sections.push(pretty::format_failures(&failure));
            combined.merge(failure);
        }
    }

    let mut assigned = Vec::new();
    if !definition.permsets.is_empty() {
        let assign = PermsetAssignment::new(conn);
        let permsets = ctx
            .aggregator()
            .run(&targets, &definition.permsets, &assign)
            .await;
        assigned = permsets.successes.iter().map(|s| s.value.clone()).collect();
        sections.push(pretty::format_aggregate(
            &permsets,
            "Permsets Assigned",
            "Permission Set Assignment",
        ));
        combined.merge(permsets);
    }

    if definition.generate_password {
        let passwords = run_password_batch(ctx, conn, &targets, PasswordOptions::default()).await;
        sections.push(pretty::format_aggregate(&passwords, "Passwords", "Password"));
        combined.merge(passwords);
    }

    Ok(Report {
        status: ExitStatus::from(&combined),
        text: sections.join("\n\n"),
        result: CreateUserOutput {
            org_id: conn.org_id().to_string(),
            permission_set_assignments: assigned,
            fields: op.fields().clone(),
            successes: combined.successes,
            failures: combined.failures,
        },
        warnings: Vec::new(),
    })
}
