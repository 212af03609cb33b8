use std::{
    env,
    path::{Path, PathBuf},
};

use crate::error::{CliError, Result};

const DEFAULT_API_VERSION: &str = "61.0";
const DEFAULT_CONCURRENCY: usize = 4;
const HOME_DIR_NAME: &str = ".orguser";

/// CLI configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding `alias.json`, `config.json` and `orgs/`.
    pub home: PathBuf,
    /// REST API version used in request paths (default: "61.0")
    pub api_version: String,
    /// Maximum number of remote calls in flight per batch (default: 4)
    pub concurrency: usize,
    /// Default target org label, overriding `config.json`.
    pub target_org: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `ORGUSER_HOME` - State directory (default: "~/.orguser")
    /// - `ORGUSER_API_VERSION` - REST API version (default: "61.0")
    /// - `ORGUSER_CONCURRENCY` - Remote calls in flight per batch (default: 4)
    /// - `ORGUSER_TARGET_ORG` - Default target org username or alias
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let home = match lookup("ORGUSER_HOME") {
            Some(home) => PathBuf::from(home),
            None => dirs::home_dir()
                .ok_or(CliError::NoHomeDir)?
                .join(HOME_DIR_NAME),
        };
        Ok(Self {
            home,
            api_version: lookup("ORGUSER_API_VERSION")
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            concurrency: lookup("ORGUSER_CONCURRENCY")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_CONCURRENCY)
                .max(1),
            target_org: lookup("ORGUSER_TARGET_ORG").filter(|v| !v.trim().is_empty()),
        })
    }

    /// Load from the environment, with `home` taking the place of
    /// `ORGUSER_HOME` when the flag was given.
    pub fn load(home: Option<&Path>) -> Result<Self> {
        match home {
            Some(home) => Self::from_lookup(|key| match key {
                "ORGUSER_HOME" => Some(home.display().to_string()),
                _ => env::var(key).ok(),
            }),
            None => Self::from_env(),
        }
    }

    pub fn alias_path(&self) -> PathBuf {
        self.home.join("alias.json")
    }

    pub fn settings_path(&self) -> PathBuf {
        self.home.join("config.json")
    }

    pub fn orgs_dir(&self) -> PathBuf {
        self.home.join("orgs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_values() {
        let config = Config::from_lookup(lookup(&[("ORGUSER_HOME", "/tmp/orguser")])).unwrap();

        assert_eq!(config.home, PathBuf::from("/tmp/orguser"));
        assert_eq!(config.api_version, "61.0");
        assert_eq!(config.concurrency, 4);
        assert_eq!(config.target_org, None);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("ORGUSER_HOME", "/state"),
            ("ORGUSER_API_VERSION", "59.0"),
            ("ORGUSER_CONCURRENCY", "0"),
            ("ORGUSER_TARGET_ORG", "dev"),
        ]))
        .unwrap();

        assert_eq!(config.api_version, "59.0");
        assert_eq!(config.concurrency, 1);
        assert_eq!(config.target_org.as_deref(), Some("dev"));
    }

    #[test]
    fn test_invalid_concurrency_falls_back() {
        let config = Config::from_lookup(lookup(&[
            ("ORGUSER_HOME", "/state"),
            ("ORGUSER_CONCURRENCY", "many"),
        ]))
        .unwrap();
        assert_eq!(config.concurrency, 4);
    }

    #[test]
    fn test_paths() {
        let config = Config::load(Some(Path::new("/other"))).unwrap();
        assert_eq!(config.alias_path(), PathBuf::from("/other/alias.json"));
        assert_eq!(config.settings_path(), PathBuf::from("/other/config.json"));
        assert_eq!(config.orgs_dir(), PathBuf::from("/other/orgs"));
    }
}
