//! `permset assign`.

use orguser_core::batch::{AggregateResult, ExitStatus};
use orguser_core::permissions::PermsetAssignment;
use orguser_core::platform::OrgConnection;

use crate::output::{pretty, Report};

use super::{behalf_targets, CommandContext};

/// Assigns every permission set to every target user.
pub async fn assign_permsets<C: OrgConnection + ?Sized>(
    ctx: &CommandContext,
    conn: &C,
    target_label: &str,
    names: &[String],
    on_behalf_of: &[String],
) -> Report<AggregateResult> {
    let targets = behalf_targets(on_behalf_of, target_label);
    let op = PermsetAssignment::new(conn);
    let result = ctx.aggregator().run(&targets, names, &op).await;

    let warnings = result
        .already_applied()
        .map(|s| format!("Permission set \"{}\" is already assigned to {}.", s.value, s.target))
        .collect();

    Report {
        status: ExitStatus::from(&result),
        text: pretty::format_aggregate(&result, "Permsets Assigned", "Permission Set Assignment"),
        result,
        warnings,
    }
}
