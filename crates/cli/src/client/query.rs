//! Query API operations.

use orguser_core::platform::Result;
use serde::Deserialize;
use serde_json::Value;

use super::OrgClient;

/// One page of query results.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueryPage {
    #[serde(default)]
    records: Vec<Value>,
    done: bool,
    #[serde(default)]
    next_records_url: Option<String>,
}

impl OrgClient {
    /// Run a query and return every row, following `nextRecordsUrl`.
    pub async fn query_all(&self, soql: &str) -> Result<Vec<Value>> {
        tracing::debug!(soql, "Running query");
        let request = self
            .client
            .get(self.data_url("/query")?)
            .query(&[("q", soql)]);
        let mut page: QueryPage = self.handle_response(self.send(request).await?).await?;
        let mut records = std::mem::take(&mut page.records);

        while let (false, Some(next)) = (page.done, page.next_records_url.take()) {
            let request = self.client.get(self.url(&next)?);
            page = self.handle_response(self.send(request).await?).await?;
            records.append(&mut page.records);
        }

        Ok(records)
    }
}
