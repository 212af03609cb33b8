use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::{PlatformError, Result};

/// An authenticated connection to one org on the remote platform.
#[async_trait]
pub trait OrgConnection: Send + Sync {
    /// Username the connection acts as.
    fn username(&self) -> &str;

    /// Id of the org the connection points at.
    fn org_id(&self) -> &str;

    /// Runs a query and returns every row, across all result pages.
    async fn query(&self, soql: &str) -> Result<Vec<Value>>;

    /// Creates one record of the given type and returns its id.
    async fn create(&self, sobject: &str, fields: &Map<String, Value>) -> Result<String>;

    /// Replaces a user's password.
    async fn set_password(&self, user_id: &str, password: &str) -> Result<()>;

    /// Runs a query that must match exactly one row.
    async fn query_single(&self, soql: &str) -> Result<Value> {
        let mut rows = self.query(soql).await?;
        if rows.len() != 1 {
            return Err(PlatformError::SingleRecord {
                count: rows.len(),
                query: soql.to_string(),
            });
        }
        Ok(rows.remove(0))
    }
}

/// Decodes a row into a typed record.
pub fn decode_record<T: DeserializeOwned>(row: Value) -> Result<T> {
    serde_json::from_value(row).map_err(|e| PlatformError::Decode(e.to_string()))
}

/// Decodes every row into a typed record.
pub fn decode_records<T: DeserializeOwned>(rows: Vec<Value>) -> Result<Vec<T>> {
    rows.into_iter().map(decode_record).collect()
}
