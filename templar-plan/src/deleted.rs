//! Deletion materializer: deleted change records → fully-deleted templates.

use templar_core::template::parse_template;
use templar_core::types::{Deletion, TemplateRecord};

use crate::differ::GitDiff;
use crate::error::PlanError;

/// Parse each deleted document and force it into the fully-deleted state.
///
/// Documents already marked `deleted: true` are skipped — re-running the pass
/// over the same deletions is idempotent. Account scoping is left untouched:
/// whole-resource deletion overrides it.
pub fn materialize_deleted(deleted_files: &[GitDiff]) -> Result<Vec<TemplateRecord>, PlanError> {
    let mut templates = Vec::new();
    for diff in deleted_files {
        let Some(content) = &diff.content else {
            log::debug!(
                "deleted entry without content, skipping: {}",
                diff.path.display()
            );
            continue;
        };
        let mut template = parse_template(&diff.path, content)?;
        if template.scope().deleted.is_full() {
            continue;
        }
        template.scope_mut().deleted = Deletion::Full;
        log::info!("template marked as deleted: {}", diff.path.display());
        templates.push(template);
    }
    Ok(templates)
}
