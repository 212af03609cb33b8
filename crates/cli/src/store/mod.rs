//! File-backed local state under the orguser home directory.

pub mod alias;
pub mod orgs;
pub mod settings;

use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{CliError, Result};

pub use alias::FileAliasStore;
pub use orgs::{AuthEntry, AuthStore};
pub use settings::Settings;

/// Reads a JSON file, returning `None` when it does not exist.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(Some(serde_json::from_str(&contents)?)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(CliError::ReadFile {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Writes a value as pretty JSON, creating parent directories.
pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(value)?)?;
    Ok(())
}
