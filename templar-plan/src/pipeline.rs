//! Reconciliation pipeline entrypoint shared by the CLI and tests.

use templar_core::template::parse_template;
use templar_core::types::TemplateRecord;
use templar_core::Config;
use templar_git::VcsClient;

use crate::deleted::materialize_deleted;
use crate::differ::{compute_changes, ChangeSet};
use crate::error::PlanError;
use crate::reconcile::reconcile_modified;

/// Everything a reconciliation pass produced: the classified change set and
/// the flat template collection handed to the apply engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub changes: ChangeSet,
    pub templates: Vec<TemplateRecord>,
}

/// Run one reconciliation pass over a revision range.
///
/// Ordering of the output is new, then deleted, then modified records.
/// All-or-nothing: any parse or VCS error aborts the pass with no partial
/// result, and nothing in the repository is mutated.
pub fn plan(
    config: &Config,
    client: &dyn VcsClient,
    from_rev: Option<&str>,
    to_rev: Option<&str>,
    allow_dirty: bool,
) -> Result<Plan, PlanError> {
    let changes = compute_changes(client, from_rev, to_rev, allow_dirty)?;

    let mut templates = Vec::new();
    for diff in &changes.new_files {
        let text = client.read_worktree_file(&diff.path)?;
        templates.push(parse_template(&diff.path, &text)?);
    }
    templates.extend(materialize_deleted(&changes.deleted_files)?);
    templates.extend(reconcile_modified(config, client, &changes.modified_files)?);

    log::info!(
        "plan: {} new, {} deleted, {} modified",
        changes.new_files.len(),
        changes.deleted_files.len(),
        changes.modified_files.len()
    );
    Ok(Plan { changes, templates })
}
