//! Scope reconciler: compute which accounts fell out of a modified
//! template's live scope and layer scoped deletion directives over it.
//!
//! For each modified document the baseline (pre-image) and current
//! (working-tree) revisions are parsed and compared. Accounts that lost
//! coverage — dropped from `included_accounts` explicitly, dropped implicitly
//! by narrowing a wildcard, or newly added to `excluded_accounts` — are
//! collected into a [`DeletionDirective`] appended to the current record, so
//! the apply engine still targets them, but only to delete.

use templar_core::matcher::{has_wildcard, AccountMatcher, WILDCARD};
use templar_core::template::parse_template;
use templar_core::types::{DeletionDirective, TemplateRecord};
use templar_core::Config;
use templar_git::VcsClient;

use crate::differ::GitDiff;
use crate::error::PlanError;

/// Reconcile every modified change record into a template carrying the
/// deletion directives implied by its scope changes.
pub fn reconcile_modified(
    config: &Config,
    client: &dyn VcsClient,
    modified_files: &[GitDiff],
) -> Result<Vec<TemplateRecord>, PlanError> {
    let mut templates = Vec::new();
    for diff in modified_files {
        let Some(baseline_text) = &diff.content else {
            log::debug!(
                "modified entry without pre-image content, skipping: {}",
                diff.path.display()
            );
            continue;
        };
        let baseline = parse_template(&diff.path, baseline_text)?;
        let current_text = client.read_worktree_file(&diff.path)?;
        let current = parse_template(&diff.path, &current_text)?;
        templates.push(reconcile_record(config, &baseline, current));
    }
    Ok(templates)
}

/// Reconcile one record pair. Pure over its inputs.
fn reconcile_record(
    config: &Config,
    baseline: &TemplateRecord,
    mut current: TemplateRecord,
) -> TemplateRecord {
    let path = current.file_path.clone();
    let baseline_scope = baseline.scope().clone();

    // Accounts included in the current commit cannot be deleted; the snapshot
    // also becomes the directive's excluded_accounts.
    let live_accounts: Vec<String> = current.scope().included_accounts.clone();

    let mut deleted_included: Vec<String> = Vec::new();
    let scope = current.scope_mut();

    // Accounts dropped from included_accounts, implicitly or explicitly.
    // A current wildcard still covers everything, so nothing can have been
    // dropped and the pass is skipped.
    if !has_wildcard(&live_accounts) {
        if has_wildcard(&baseline_scope.included_accounts) {
            // Wildcard narrowed to an explicit subset: every registry account
            // not matched by the new list was implicitly dropped.
            for account in &config.accounts {
                let matcher = AccountMatcher::for_account(account);
                if matcher.found_in(&live_accounts) {
                    log::debug!(
                        "account still covered: {} ({})",
                        matcher.as_str(),
                        path.display()
                    );
                    continue;
                }
                log::info!(
                    "marking for deletion, implicitly removed from included_accounts: {} ({})",
                    matcher.as_str(),
                    path.display()
                );
                deleted_included.push(matcher.as_str().to_string());
                scope.included_accounts.push(matcher.as_str().to_string());
            }
        } else {
            // Explicit list shrink: baseline matchers absent from the current
            // list were dropped.
            for account in &baseline_scope.included_accounts {
                if AccountMatcher::new(account).found_in(&live_accounts) {
                    log::debug!("account still covered: {} ({})", account, path.display());
                    continue;
                }
                log::info!(
                    "marking for deletion, explicitly removed from included_accounts: {} ({})",
                    account,
                    path.display()
                );
                deleted_included.push(account.clone());
                scope.included_accounts.push(account.clone());
            }
        }
    }

    // Accounts newly added to excluded_accounts. Previously-live accounts
    // move into the directive instead of staying as plain exclusions.
    let mut rebuilt_excluded = Vec::new();
    for account in scope.excluded_accounts.clone() {
        let matcher = AccountMatcher::new(&account);
        if !baseline_scope.excluded_accounts.is_empty()
            && matcher.found_in(&baseline_scope.excluded_accounts)
        {
            log::debug!("already excluded: {} ({})", account, path.display());
            rebuilt_excluded.push(account);
        } else if matcher.found_in(&baseline_scope.included_accounts)
            || has_wildcard(&baseline_scope.included_accounts)
        {
            log::info!(
                "marking for deletion, newly added to excluded_accounts: {} ({})",
                account,
                path.display()
            );
            deleted_included.push(account.clone());
            scope.included_accounts.push(account);
        } else {
            log::debug!("newly excluded, never live: {} ({})", account, path.display());
            rebuilt_excluded.push(account);
        }
    }
    scope.excluded_accounts = rebuilt_excluded;

    if !deleted_included.is_empty() && !scope.deleted.is_full() {
        let directive = DeletionDirective::new(
            deleted_included,
            live_accounts
                .iter()
                .filter(|account| *account != WILDCARD)
                .cloned()
                .collect(),
        );
        scope.deleted.push_directive(directive);
    }

    current
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
