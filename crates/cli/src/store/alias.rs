//! `alias.json` file store.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use orguser_core::identity::AliasStore;
use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::{read_json, write_json};

#[derive(Debug, Default, Serialize, Deserialize)]
struct AliasFile {
    #[serde(default)]
    orgs: BTreeMap<String, String>,
}

/// Alias → username mapping persisted as `{"orgs": {alias: username}}`.
#[derive(Debug, Clone)]
pub struct FileAliasStore {
    path: PathBuf,
    aliases: HashMap<String, String>,
}

impl FileAliasStore {
    /// Loads the store; a missing file is an empty store.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file: AliasFile = read_json(&path)?.unwrap_or_default();
        Ok(Self {
            path,
            aliases: file.orgs.into_iter().collect(),
        })
    }

    /// Maps `alias` to `username` and writes the file.
    pub fn set(&mut self, alias: &str, username: &str) -> Result<()> {
        self.aliases.insert(alias.to_string(), username.to_string());
        let file = AliasFile {
            orgs: self
                .aliases
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        };
        write_json(&self.path, &file)?;
        tracing::debug!(alias, username, path = %self.path.display(), "Alias saved");
        Ok(())
    }
}

impl AliasStore for FileAliasStore {
    fn get(&self, alias: &str) -> Option<String> {
        self.aliases.get(alias).cloned()
    }

    fn aliases_for(&self, username: &str) -> Vec<String> {
        let mut aliases: Vec<String> = self
            .aliases
            .iter()
            .filter(|(_, v)| v.as_str() == username)
            .map(|(k, _)| k.clone())
            .collect();
        aliases.sort();
        aliases
    }
}
