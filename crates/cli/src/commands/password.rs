//! `password generate`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use orguser_core::batch::{AggregateResult, ExitStatus, FailureRecord, RemoteOperation};
use orguser_core::password::{PasswordOptions, PasswordReset};
use orguser_core::platform::{OrgConnection, PlatformError};
use serde::Serialize;

use crate::error::Result;
use crate::output::{pretty, Report};
use crate::store::AuthStore;

use super::{behalf_targets, CommandContext};

/// Single item every target is paired with.
const PASSWORD_ITEM: &str = "password";

/// A password set for one user.
#[derive(Debug, Clone, Serialize)]
pub struct UserPassword {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PasswordOutput {
    pub passwords: Vec<UserPassword>,
    pub failures: Vec<FailureRecord>,
}

impl From<AggregateResult> for PasswordOutput {
    fn from(result: AggregateResult) -> Self {
        Self {
            passwords: result
                .successes
                .into_iter()
                .map(|s| UserPassword {
                    username: s.target,
                    password: s.value,
                })
                .collect(),
            failures: result.failures,
        }
    }
}

/// Resets the password remotely, then records it in the user's local
/// authorization when one exists.
///
/// Reset and save run under a per-username lock, so two pairings that
/// resolve to the same user leave the platform and the local store holding
/// the same password.
pub struct StoredPasswordReset<'a, C: ?Sized> {
    reset: PasswordReset<'a, C>,
    auth: &'a AuthStore,
    locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl<'a, C: OrgConnection + ?Sized> StoredPasswordReset<'a, C> {
    pub fn new(conn: &'a C, options: PasswordOptions, auth: &'a AuthStore) -> Self {
        Self {
            reset: PasswordReset::new(conn, options),
            auth,
            locks: Mutex::new(HashMap::new()),
        }
    }

    fn lock_for(&self, username: &str) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks.entry(username.to_string()).or_default().clone()
    }
}

#[async_trait]
impl<C: OrgConnection + ?Sized> RemoteOperation for StoredPasswordReset<'_, C> {
    fn name(&self) -> &'static str {
        self.reset.name()
    }

    async fn invoke(&self, username: &str, item: &str) -> orguser_core::platform::Result<String> {
        let lock = self.lock_for(username);
        let _guard = lock.lock().await;
        let password = self.reset.invoke(username, item).await?;
        match self.auth.get(username) {
            Ok(Some(_)) => {
                let stored = password.clone();
                if let Err(error) = self
                    .auth
                    .update(username, move |entry| entry.password = Some(stored))
                    .await
                {
                    tracing::warn!(username, %error, "Could not save password locally");
                }
            }
            Ok(None) => {
                tracing::debug!(username, "No local authorization, password not saved");
            }
            Err(error) => {
                tracing::warn!(username, %error, "Could not read local authorization");
            }
        }
        Ok(password)
    }

    fn describe_failure(&self, error: &PlatformError) -> String {
        self.reset.describe_failure(error)
    }
}

/// Runs one password reset per target user.
pub async fn run_password_batch<C: OrgConnection + ?Sized>(
    ctx: &CommandContext,
    conn: &C,
    targets: &[String],
    options: PasswordOptions,
) -> AggregateResult {
    let op = StoredPasswordReset::new(conn, options, &ctx.auth);
    ctx.aggregator()
        .run(targets, &[PASSWORD_ITEM.to_string()], &op)
        .await
}

/// Generates and sets a password for every target user.
pub async fn generate_passwords<C: OrgConnection + ?Sized>(
    ctx: &CommandContext,
    conn: &C,
    target_label: &str,
    on_behalf_of: &[String],
    length: u8,
    complexity: u8,
) -> Result<Report<PasswordOutput>> {
    let options = PasswordOptions::new(length, complexity)?;
    let targets = behalf_targets(on_behalf_of, target_label);
    let result = run_password_batch(ctx, conn, &targets, options).await;

    Ok(Report {
        status: ExitStatus::from(&result),
        text: format_passwords(&result),
        result: result.into(),
        warnings: Vec::new(),
    })
}

fn format_passwords(result: &AggregateResult) -> String {
    match (result.successes.as_slice(), result.failures.is_empty()) {
        ([only], true) => format!(
            "Successfully set the password \"{}\" for user {}.\n\
             You can see the password again by running \"orguser user display -o {}\".",
            only.value, only.target, only.target
        ),
        _ => pretty::format_aggregate(result, "Passwords", "Password"),
    }
}
