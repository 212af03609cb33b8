//! Pretty output formatting.

use orguser_core::batch::AggregateResult;

/// Render rows as an aligned, titled text table.
pub fn format_table(title: &str, headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{cell:<width$}", width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut output = format!("=== {title}\n");
    output.push_str(&line(headers.to_vec()));
    output.push('\n');
    let rule: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
    output.push_str(&line(rule.iter().map(String::as_str).collect()));
    for row in rows {
        output.push('\n');
        output.push_str(&line(row.iter().map(String::as_str).collect()));
    }
    output
}

/// Format key/value pairs as a two-column table, skipping empty values.
pub fn format_key_values(title: &str, pairs: &[(&str, Option<String>)]) -> String {
    let rows: Vec<Vec<String>> = pairs
        .iter()
        .filter_map(|(key, value)| {
            value
                .as_ref()
                .filter(|v| !v.is_empty())
                .map(|v| vec![key.to_string(), v.clone()])
        })
        .collect();
    format_table(title, &["Key", "Value"], &rows)
}

/// Format a batch result as a successes table and a failures table.
///
/// Either table is omitted when it has no rows.
pub fn format_aggregate(
    result: &AggregateResult,
    success_title: &str,
    value_header: &str,
) -> String {
    let mut sections = Vec::new();
    if !result.successes.is_empty() {
        let rows: Vec<Vec<String>> = result
            .successes
            .iter()
            .map(|s| vec![s.target.clone(), s.value.clone()])
            .collect();
        sections.push(format_table(success_title, &["Username", value_header], &rows));
    }
    if !result.failures.is_empty() {
        sections.push(format_failures(result));
    }
    sections.join("\n\n")
}

/// Format only the failures of a batch result.
pub fn format_failures(result: &AggregateResult) -> String {
    let rows: Vec<Vec<String>> = result
        .failures
        .iter()
        .map(|f| vec![f.target.clone(), f.message.clone()])
        .collect();
    format_table("Failures", &["Username", "Error Message"], &rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use orguser_core::batch::Outcome;

    #[test]
    fn table_aligns_columns() {
        let table = format_table(
            "Users",
            &["Username", "Id"],
            &[
                vec!["a@example.com".to_string(), "005A".to_string()],
                vec!["b@x.io".to_string(), "005B".to_string()],
            ],
        );
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "=== Users");
        assert_eq!(lines[1], "Username       Id");
        assert_eq!(lines[2], "─────────────  ────");
        assert_eq!(lines[3], "a@example.com  005A");
        assert_eq!(lines[4], "b@x.io         005B");
    }

    #[test]
    fn key_values_skip_empty() {
        let table = format_key_values(
            "User Description",
            &[
                ("Username", Some("a@example.com".to_string())),
                ("Password", None),
                ("Alias", Some(String::new())),
            ],
        );
        assert!(table.contains("a@example.com"));
        assert!(!table.contains("Password"));
        assert!(!table.contains("Alias"));
    }

    #[test]
    fn aggregate_shows_only_non_empty_sides() {
        let only_success: AggregateResult = vec![Outcome::success("u1", "PS1")].into_iter().collect();
        let text = format_aggregate(&only_success, "Permset Assignments", "Permission Set Assignment");
        assert!(text.contains("=== Permset Assignments"));
        assert!(!text.contains("Failures"));

        let mixed: AggregateResult = vec![
            Outcome::success("u1", "PS1"),
            Outcome::failure("u2", "User not found: u2"),
        ]
        .into_iter()
        .collect();
        let text = format_aggregate(&mixed, "Permset Assignments", "Permission Set Assignment");
        assert!(text.contains("=== Failures"));
        assert!(text.contains("User not found: u2"));
    }
}
