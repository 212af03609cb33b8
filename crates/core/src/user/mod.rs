mod create;
mod definition;

use std::collections::HashMap;

use thiserror::Error;

use crate::platform::{
    decode_record, decode_records, soql, IdRecord, OrgConnection, PlatformError, ProfileRecord,
    Result, UserRecord,
};

pub use create::UserCreation;
pub use definition::{
    normalize_key, parse_vararg, CreationContext, UserDefinition, DEFAULT_PROFILE_NAME,
};

/// Errors raised while reading a user definition.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DefinitionError {
    #[error("Expected key=value but got: {0}")]
    InvalidVararg(String),
    #[error("User definition must be a JSON object")]
    NotAnObject,
    #[error("Invalid value for {key}: {reason}")]
    InvalidDirective { key: String, reason: String },
}

/// Looks up a profile Id by name.
pub async fn find_profile_id<C: OrgConnection + ?Sized>(conn: &C, name: &str) -> Result<String> {
    match conn.query_single(&soql::profile_id_query(name)).await {
        Ok(row) => decode_record::<IdRecord>(row).map(|r| r.id),
        Err(PlatformError::SingleRecord { count: 0, .. }) => Err(PlatformError::NotFound {
            entity_type: "Profile",
            name: name.to_string(),
        }),
        Err(e) => Err(e),
    }
}

/// Fetches one user's details by username.
pub async fn find_user<C: OrgConnection + ?Sized>(conn: &C, username: &str) -> Result<UserRecord> {
    match conn.query_single(&soql::user_detail_query(username)).await {
        Ok(row) => decode_record(row),
        Err(PlatformError::SingleRecord { count: 0, .. }) => Err(PlatformError::NotFound {
            entity_type: "User",
            name: username.to_string(),
        }),
        Err(e) => Err(e),
    }
}

/// Fetches the users matching any of the usernames.
pub async fn find_users<C: OrgConnection + ?Sized>(
    conn: &C,
    usernames: &[String],
) -> Result<Vec<UserRecord>> {
    if usernames.is_empty() {
        return Ok(Vec::new());
    }
    let rows = conn.query(&soql::users_by_username_query(usernames)).await?;
    decode_records(rows)
}

/// Maps profile Ids to profile names.
pub async fn profile_names<C: OrgConnection + ?Sized>(
    conn: &C,
    ids: &[String],
) -> Result<HashMap<String, String>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = conn.query(&soql::profile_names_query(ids)).await?;
    Ok(decode_records::<ProfileRecord>(rows)?
        .into_iter()
        .map(|p| (p.id, p.name))
        .collect())
}
