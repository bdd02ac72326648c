use crate::diff::{components_equal, diff_components, render_human_summary};
use crate::errors::Result;
use crate::model::{Page, PageVersion};
use crate::snapshot::{create_snapshot, find_version, SnapshotRequest};

use super::model::{RevertOptions, RevertPlan};

/// Name given to the automatic backup taken before reverting to `version_number`
pub fn backup_name(version_number: u32) -> String {
    format!("Backup before revert to v{version_number}")
}

/// Plan a revert of `page` to one of its versions
///
/// `versions` must hold every stored version of the page. A backup of the
/// current state is planned only when `create_backup` is set and the
/// current components differ from the target under `options.comparison`.
///
/// # Errors
/// * `VersionNotFound` - If the version is absent or belongs to another page
pub fn plan_revert(
    page: &Page,
    versions: &[PageVersion],
    target_version_id: &str,
    options: &RevertOptions,
) -> Result<RevertPlan> {
    let target = find_version(&page.id, target_version_id, versions)?.clone();

    let diff = diff_components(page.components(), target.components(), options.comparison);
    let unchanged = components_equal(page.components(), target.components(), options.comparison);

    let backup = if options.create_backup && !unchanged {
        let description = format!(
            "Automatic backup of the page before reverting to version {}.\n{}",
            target.version_number(),
            render_human_summary(&diff)
        );
        Some(create_snapshot(
            page,
            versions,
            SnapshotRequest::by(options.author_id.clone())
                .named(backup_name(target.version_number()))
                .described(description),
        ))
    } else {
        None
    };

    let mut reverted = page.clone();
    reverted.replace_components(target.components().to_vec());

    tracing::debug!(
        page_id = %page.id,
        target_version = target.version_number(),
        backup = backup.is_some(),
        changes = diff.change_count(),
        "revert planned"
    );

    Ok(RevertPlan {
        target,
        backup,
        page: reverted,
        diff,
    })
}
