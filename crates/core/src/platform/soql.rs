//! Pure query builders.
//!
//! Every user-supplied value passes through [`quote`] before it lands in a
//! query string.

/// Quotes a string literal for use in a query.
pub fn quote(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{escaped}'")
}

/// Splits `ns__Name` into its namespace prefix and name.
///
/// Names with more than one `__` separator (for example `My__Custom__c`)
/// are treated as unnamespaced.
pub fn split_namespace(name: &str) -> (Option<&str>, &str) {
    let mut parts = name.split("__");
    match (parts.next(), parts.next(), parts.next()) {
        (Some(prefix), Some(rest), None) if !prefix.is_empty() && !rest.is_empty() => {
            (Some(prefix), rest)
        }
        _ => (None, name),
    }
}

/// Finds the Id of a user by username.
pub fn user_id_query(username: &str) -> String {
    format!("SELECT Id FROM User WHERE Username = {}", quote(username))
}

/// Finds the details shown by `user display`.
pub fn user_detail_query(username: &str) -> String {
    format!(
        "SELECT Id, Username, ProfileId, Email FROM User WHERE Username = {}",
        quote(username)
    )
}

/// Finds the Ids and profiles of several users at once.
pub fn users_by_username_query<S: AsRef<str>>(usernames: &[S]) -> String {
    format!(
        "SELECT Id, Username, ProfileId, Email FROM User WHERE Username IN ({})",
        in_list(usernames)
    )
}

/// Finds a permission set by name, honouring an `ns__` prefix.
pub fn permission_set_query(name: &str) -> String {
    match split_namespace(name) {
        (Some(prefix), base) => format!(
            "SELECT Id FROM PermissionSet WHERE Name = {} AND NamespacePrefix = {}",
            quote(base),
            quote(prefix)
        ),
        (None, base) => format!(
            "SELECT Id FROM PermissionSet WHERE Name = {} AND NamespacePrefix = null",
            quote(base)
        ),
    }
}

/// Finds a permission set license by developer name or label.
pub fn license_query(name: &str) -> String {
    let quoted = quote(name);
    format!(
        "SELECT Id, DeveloperName, MasterLabel FROM PermissionSetLicense \
         WHERE DeveloperName = {quoted} OR MasterLabel = {quoted}"
    )
}

/// Finds a profile Id by profile name.
pub fn profile_id_query(name: &str) -> String {
    format!("SELECT Id FROM Profile WHERE Name = {}", quote(name))
}

/// Finds the names of several profiles at once.
pub fn profile_names_query<S: AsRef<str>>(ids: &[S]) -> String {
    format!("SELECT Id, Name FROM Profile WHERE Id IN ({})", in_list(ids))
}

fn in_list<S: AsRef<str>>(values: &[S]) -> String {
    values
        .iter()
        .map(|v| quote(v.as_ref()))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_escapes_quotes_and_backslashes() {
        assert_eq!(quote("o'brien"), r"'o\'brien'");
        assert_eq!(quote(r"a\b"), r"'a\\b'");
    }

    #[test]
    fn quote_escapes_backslash_before_quote() {
        assert_eq!(quote(r"\'"), r"'\\\''");
    }

    #[test]
    fn split_namespace_recognises_prefix() {
        assert_eq!(split_namespace("acme__Sales"), (Some("acme"), "Sales"));
    }

    #[test]
    fn split_namespace_leaves_plain_names() {
        assert_eq!(split_namespace("Sales"), (None, "Sales"));
        assert_eq!(split_namespace("My__Custom__c"), (None, "My__Custom__c"));
        assert_eq!(split_namespace("__Sales"), (None, "__Sales"));
    }

    #[test]
    fn permission_set_query_with_namespace() {
        assert_eq!(
            permission_set_query("acme__Sales"),
            "SELECT Id FROM PermissionSet WHERE Name = 'Sales' AND NamespacePrefix = 'acme'"
        );
    }

    #[test]
    fn permission_set_query_without_namespace() {
        assert_eq!(
            permission_set_query("Sales"),
            "SELECT Id FROM PermissionSet WHERE Name = 'Sales' AND NamespacePrefix = null"
        );
    }

    #[test]
    fn license_query_matches_developer_name_or_label() {
        assert_eq!(
            license_query("Sales Console"),
            "SELECT Id, DeveloperName, MasterLabel FROM PermissionSetLicense \
             WHERE DeveloperName = 'Sales Console' OR MasterLabel = 'Sales Console'"
        );
    }

    #[test]
    fn users_by_username_query_builds_in_list() {
        assert_eq!(
            users_by_username_query(&["a@x.com", "b@x.com"]),
            "SELECT Id, Username, ProfileId, Email FROM User WHERE Username IN ('a@x.com', 'b@x.com')"
        );
    }

    #[test]
    fn profile_names_query_builds_in_list() {
        assert_eq!(
            profile_names_query(&["00e1"]),
            "SELECT Id, Name FROM Profile WHERE Id IN ('00e1')"
        );
    }
}
