use std::collections::HashMap;

/// Read access to a persisted alias → username mapping.
pub trait AliasStore: Send + Sync {
    /// Returns the username mapped to the alias, if any.
    fn get(&self, alias: &str) -> Option<String>;

    /// Returns every alias pointing at the given username.
    fn aliases_for(&self, username: &str) -> Vec<String>;
}

/// Maps a user-supplied alias-or-username to a canonical username.
///
/// A label with no mapping is returned unchanged: it is assumed to already be
/// a username.
#[derive(Debug, Clone)]
pub struct AliasResolver<S> {
    store: S,
}

impl<S: AliasStore> AliasResolver<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Resolves an alias to its username or passes the input through.
    pub fn resolve(&self, alias_or_username: &str) -> String {
        self.store
            .get(alias_or_username)
            .unwrap_or_else(|| alias_or_username.to_string())
    }
}

impl<S: AliasStore> AliasStore for &S {
    fn get(&self, alias: &str) -> Option<String> {
        (*self).get(alias)
    }

    fn aliases_for(&self, username: &str) -> Vec<String> {
        (*self).aliases_for(username)
    }
}

/// In-memory alias store.
#[derive(Debug, Clone, Default)]
pub struct MemoryAliasStore {
    aliases: HashMap<String, String>,
}

impl MemoryAliasStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a mapping, replacing an existing one for the same alias.
    pub fn with_alias(mut self, alias: impl Into<String>, username: impl Into<String>) -> Self {
        self.aliases.insert(alias.into(), username.into());
        self
    }
}

impl From<HashMap<String, String>> for MemoryAliasStore {
    fn from(aliases: HashMap<String, String>) -> Self {
        Self { aliases }
    }
}

impl AliasStore for MemoryAliasStore {
    fn get(&self, alias: &str) -> Option<String> {
        self.aliases.get(alias).cloned()
    }

    fn aliases_for(&self, username: &str) -> Vec<String> {
        let mut aliases: Vec<String> = self
            .aliases
            .iter()
            .filter(|(_, value)| value.as_str() == username)
            .map(|(alias, _)| alias.clone())
            .collect();
        aliases.sort();
        aliases
    }
}
