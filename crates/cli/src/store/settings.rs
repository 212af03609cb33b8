//! `config.json` settings.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::read_json;

/// Persisted CLI settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Default target org username or alias.
    #[serde(rename = "target-org", default, skip_serializing_if = "Option::is_none")]
    pub target_org: Option<String>,
}

impl Settings {
    /// Loads settings; a missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self> {
        Ok(read_json(path)?.unwrap_or_default())
    }
}
