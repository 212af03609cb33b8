//! `permsetlicense assign`.

use orguser_core::batch::{AggregateResult, ExitStatus};
use orguser_core::permissions::{resolve_licenses, LicenseAssignment};
use orguser_core::platform::OrgConnection;

use crate::error::Result;
use crate::output::{pretty, Report};

use super::{behalf_targets, CommandContext};

/// Assigns every permission set license to every target user.
///
/// License names are resolved first; an unknown name fails the command
/// before any assignment is attempted.
pub async fn assign_licenses<C: OrgConnection + ?Sized>(
    ctx: &CommandContext,
    conn: &C,
    target_label: &str,
    names: &[String],
    on_behalf_of: &[String],
) -> Result<Report<AggregateResult>> {
    let license_ids = resolve_licenses(conn, names).await?;
    let targets = behalf_targets(on_behalf_of, target_label);
    let op = LicenseAssignment::new(conn, license_ids);
    let result = ctx.aggregator().run(&targets, names, &op).await;

    let warnings = result
        .already_applied()
        .map(|s| {
            format!(
                "Permission set license \"{}\" is already assigned to {}.",
                s.value, s.target
            )
        })
        .collect();

    Ok(Report {
        status: ExitStatus::from(&result),
        text: pretty::format_aggregate(
            &result,
            "Permset Licenses Assigned",
            "Permission Set License Assignment",
        ),
        result,
        warnings,
    })
}
