use async_trait::async_trait;

use crate::batch::RemoteOperation;
use crate::platform::{find_user_id, OrgConnection, PlatformError, Result};

use super::{generate_password, PasswordOptions};

const INSUFFICIENT_ACCESS: &str = "INSUFFICIENT_ACCESS";

/// Generates a password for the target user and sets it remotely.
///
/// The item is ignored; callers pass a single placeholder item so each target
/// yields exactly one outcome. The success value is the new password.
pub struct PasswordReset<'a, C: ?Sized> {
    conn: &'a C,
    options: PasswordOptions,
}

impl<'a, C: OrgConnection + ?Sized> PasswordReset<'a, C> {
    pub fn new(conn: &'a C, options: PasswordOptions) -> Self {
        Self { conn, options }
    }
}

#[async_trait]
impl<C: OrgConnection + ?Sized> RemoteOperation for PasswordReset<'_, C> {
    fn name(&self) -> &'static str {
        "password-generate"
    }

    async fn invoke(&self, username: &str, _item: &str) -> Result<String> {
        let password = generate_password(&self.options, &mut rand::rng());
        let user_id = find_user_id(self.conn, username).await?;
        self.conn.set_password(&user_id, &password).await?;
        Ok(password)
    }

    fn describe_failure(&self, error: &PlatformError) -> String {
        let insufficient = error.error_code() == Some(INSUFFICIENT_ACCESS)
            || error.message().contains(INSUFFICIENT_ACCESS);
        if insufficient {
            format!(
                "{error}. The target org user needs permission to reset passwords \
                 (\"Reset User Passwords and Unlock Users\")."
            )
        } else {
            error.to_string()
        }
    }
}
