use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::DefinitionError;

/// Profile used when the definition names none.
pub const DEFAULT_PROFILE_NAME: &str = "Standard User";

const PROFILE_NAME: &str = "profilename";
const PERMSETS: &str = "permsets";
const GENERATE_PASSWORD: &str = "generatepassword";

/// A user definition merged from a definition file and `key=value` pairs.
///
/// Field keys are normalized to the platform's field casing: the first
/// letter is upper-cased (`lastName` → `LastName`). The directive keys
/// `profileName`, `permsets` and `generatePassword` are matched
/// case-insensitively and kept out of `fields`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserDefinition {
    pub fields: BTreeMap<String, Value>,
    pub profile_name: Option<String>,
    pub permsets: Vec<String>,
    pub generate_password: bool,
}

/// Org facts needed to fill in defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreationContext {
    pub admin_username: String,
    pub admin_email: Option<String>,
    pub org_id: String,
    /// Looked-up profile Id; `None` when the definition pins its own.
    pub profile_id: Option<String>,
    pub timestamp_millis: u128,
    pub set_unique_username: bool,
}

/// Upper-cases the first character of a field key.
pub fn normalize_key(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Parses one `key=value` argument.
pub fn parse_vararg(arg: &str) -> Result<(String, String), DefinitionError> {
    match arg.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(DefinitionError::InvalidVararg(arg.to_string())),
    }
}

impl UserDefinition {
    /// Merges a parsed definition file with `key=value` overrides.
    pub fn from_sources(
        file: Option<Value>,
        overrides: &[(String, String)],
    ) -> Result<Self, DefinitionError> {
        let mut definition = UserDefinition::default();

        if let Some(file) = file {
            let Value::Object(object) = file else {
                return Err(DefinitionError::NotAnObject);
            };
            for (key, value) in object {
                definition.set(&key, value)?;
            }
        }

        for (key, value) in overrides {
            definition.set(key, Value::String(value.clone()))?;
        }

        Ok(definition)
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), DefinitionError> {
        match key.to_lowercase().as_str() {
            PROFILE_NAME => {
                self.profile_name = Some(expect_string(key, value)?);
            }
            PERMSETS => {
                self.permsets = parse_permsets(key, value)?;
            }
            GENERATE_PASSWORD => {
                self.generate_password = parse_bool(key, value)?;
            }
            _ => {
                self.fields.insert(normalize_key(key), value);
            }
        }
        Ok(())
    }

    /// The profile to look up for `ProfileId`, unless one was given directly.
    pub fn profile_name_or_default(&self) -> &str {
        self.profile_name.as_deref().unwrap_or(DEFAULT_PROFILE_NAME)
    }

    /// Whether the definition already pins a profile Id.
    pub fn has_profile_id(&self) -> bool {
        self.fields.contains_key("ProfileId")
    }

    /// Builds the User record, filling unset fields with defaults.
    pub fn to_fields(&self, ctx: &CreationContext) -> Map<String, Value> {
        let mut fields: Map<String, Value> = self
            .fields
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        let username = match fields.get("Username").and_then(Value::as_str) {
            Some(supplied) if ctx.set_unique_username => {
                format!("{supplied}.{}", ctx.org_id.to_lowercase())
            }
            Some(supplied) => supplied.to_string(),
            None => format!("{}_{}", ctx.timestamp_millis, ctx.admin_username),
        };
        fields.insert("Username".to_string(), Value::String(username));

        let defaults = [
            ("LastName", Some("User")),
            ("Alias", Some("standard")),
            ("Email", ctx.admin_email.as_deref()),
            ("TimeZoneSidKey", Some("America/Los_Angeles")),
            ("LocaleSidKey", Some("en_US")),
            ("LanguageLocaleKey", Some("en_US")),
            ("EmailEncodingKey", Some("UTF-8")),
            ("ProfileId", ctx.profile_id.as_deref()),
        ];
        for (key, value) in defaults {
            if let Some(value) = value {
                fields
                    .entry(key.to_string())
                    .or_insert_with(|| Value::String(value.to_string()));
            }
        }

        fields
    }
}

fn expect_string(key: &str, value: Value) -> Result<String, DefinitionError> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(DefinitionError::InvalidDirective {
            key: key.to_string(),
            reason: format!("expected a string, got {other}"),
        }),
    }
}

fn parse_permsets(key: &str, value: Value) -> Result<Vec<String>, DefinitionError> {
    let names: Vec<String> = match value {
        Value::String(s) => s.split(',').map(|p| p.trim().to_string()).collect(),
        Value::Array(items) => items
            .into_iter()
            .map(|item| expect_string(key, item))
            .collect::<Result<Vec<_>, _>>()?,
        other => {
            return Err(DefinitionError::InvalidDirective {
                key: key.to_string(),
                reason: format!("expected a list or comma-separated string, got {other}"),
            })
        }
    };
    Ok(names.into_iter().filter(|n| !n.is_empty()).collect())
}

fn parse_bool(key: &str, value: Value) -> Result<bool, DefinitionError> {
    match value {
        Value::Bool(b) => Ok(b),
        Value::String(s) if s.eq_ignore_ascii_case("true") => Ok(true),
        Value::String(s) if s.eq_ignore_ascii_case("false") => Ok(false),
        other => Err(DefinitionError::InvalidDirective {
            key: key.to_string(),
            reason: format!("expected true or false, got {other}"),
        }),
    }
}
