mod error;
mod records;
pub mod soql;
mod traits;

pub use error::{PlatformError, Result};
pub use records::{IdRecord, PermissionSetLicenseRecord, ProfileRecord, UserRecord};
pub use traits::{decode_record, decode_records, OrgConnection};

use soql::user_id_query;

/// Looks up the Id of a user by username.
pub async fn find_user_id<C: OrgConnection + ?Sized>(conn: &C, username: &str) -> Result<String> {
    match conn.query_single(&user_id_query(username)).await {
        Ok(row) => decode_record::<IdRecord>(row).map(|r| r.id),
        Err(PlatformError::SingleRecord { count: 0, .. }) => Err(PlatformError::NotFound {
            entity_type: "User",
            name: format!("{username} in org {}", conn.org_id()),
        }),
        Err(e) => Err(e),
    }
}
