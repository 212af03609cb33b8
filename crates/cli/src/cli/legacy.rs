//! Colon-style command names kept as deprecated aliases.
//!
//! Older releases exposed `force:user:permset:assign` style names. They are
//! rewritten to the nested subcommands before argument parsing.

/// Legacy command name and the subcommand path that replaces it.
const LEGACY_COMMANDS: &[(&str, &[&str])] = &[
    ("force:user:permset:assign", &["permset", "assign"]),
    ("user:permset:assign", &["permset", "assign"]),
    ("org:assign:permset", &["permset", "assign"]),
    ("force:user:permsetlicense:assign", &["permsetlicense", "assign"]),
    ("user:permsetlicense:assign", &["permsetlicense", "assign"]),
    ("org:assign:permsetlicense", &["permsetlicense", "assign"]),
    ("force:user:password:generate", &["password", "generate"]),
    ("user:password:generate", &["password", "generate"]),
    ("org:generate:password", &["password", "generate"]),
    ("force:user:create", &["user", "create"]),
    ("user:create", &["user", "create"]),
    ("org:create:user", &["user", "create"]),
    ("force:user:display", &["user", "display"]),
    ("user:display", &["user", "display"]),
    ("org:display:user", &["user", "display"]),
    ("force:user:list", &["user", "list"]),
    ("user:list", &["user", "list"]),
    ("org:list:users", &["user", "list"]),
];

/// A legacy name found in the arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyRewrite {
    pub legacy: &'static str,
    pub replacement: String,
}

/// Replaces the first legacy command name with its subcommand path.
pub fn rewrite_legacy_args<I>(args: I) -> (Vec<String>, Option<LegacyRewrite>)
where
    I: IntoIterator<Item = String>,
{
    let mut rewritten = Vec::new();
    let mut found = None;

    for arg in args {
        if found.is_none() {
            if let Some((legacy, path)) = LEGACY_COMMANDS.iter().find(|(name, _)| *name == arg) {
                rewritten.extend(path.iter().map(|p| p.to_string()));
                found = Some(LegacyRewrite {
                    legacy: *legacy,
                    replacement: path.join(" "),
                });
                continue;
            }
        }
        rewritten.push(arg);
    }

    (rewritten, found)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn rewrites_force_prefixed_name() {
        let (rewritten, found) =
            rewrite_legacy_args(args(&["orguser", "force:user:permset:assign", "-n", "PS1"]));
        assert_eq!(rewritten, args(&["orguser", "permset", "assign", "-n", "PS1"]));
        assert_eq!(
            found,
            Some(LegacyRewrite {
                legacy: "force:user:permset:assign",
                replacement: "permset assign".to_string(),
            })
        );
    }

    #[test]
    fn rewrites_after_global_flags() {
        let (rewritten, _) = rewrite_legacy_args(args(&["orguser", "--json", "org:list:users"]));
        assert_eq!(rewritten, args(&["orguser", "--json", "user", "list"]));
    }

    #[test]
    fn leaves_current_names_alone() {
        let input = args(&["orguser", "user", "create", "email=a@b.com"]);
        let (rewritten, found) = rewrite_legacy_args(input.clone());
        assert_eq!(rewritten, input);
        assert_eq!(found, None);
    }

    #[test]
    fn rewrites_only_the_first_occurrence() {
        let (rewritten, _) =
            rewrite_legacy_args(args(&["orguser", "user:create", "user:list"]));
        assert_eq!(rewritten, args(&["orguser", "user", "create", "user:list"]));
    }
}
