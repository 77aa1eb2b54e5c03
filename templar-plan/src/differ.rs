//! Revision differencer: classify managed template documents between two
//! repository revisions into new / deleted / modified buckets.
//!
//! Classification is driven entirely through [`VcsClient`], so the logic here
//! is exercised against in-memory fixtures; only the client touches git.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_yaml::Value;

use templar_core::template::{is_managed_template, parse_template};
use templar_core::TemplateError;
use templar_git::{ChangeKind, GitError, TreeChange, VcsClient};

use crate::error::PlanError;

/// File extension of template documents.
pub const TEMPLATE_EXTENSION: &str = "yaml";

// ---------------------------------------------------------------------------
// Change records
// ---------------------------------------------------------------------------

/// One file at one side of a diff.
///
/// `content` carries the pre-image (or deleted) blob when a later stage needs
/// it for comparison; it is absent for pure additions, whose content is read
/// fresh from the working tree by the consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitDiff {
    pub path: PathBuf,
    pub content: Option<String>,
    pub is_deleted: bool,
}

/// Classified changes for one revision range.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    pub new_files: Vec<GitDiff>,
    pub deleted_files: Vec<GitDiff>,
    pub modified_files: Vec<GitDiff>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.new_files.is_empty()
            && self.deleted_files.is_empty()
            && self.modified_files.is_empty()
    }
}

// ---------------------------------------------------------------------------
// compute_changes
// ---------------------------------------------------------------------------

/// Classify managed template changes between `from_rev` and `to_rev`.
///
/// - `from_rev` unset: fetch all remotes and diff against the remote default
///   branch tip (`origin/main` or `origin/master`).
/// - `to_rev` unset: the current `HEAD`.
///
/// A dirty working tree with `allow_dirty == false` is logged as a blocking
/// condition but does not abort the diff; the caller decides whether to
/// proceed with the result.
pub fn compute_changes(
    client: &dyn VcsClient,
    from_rev: Option<&str>,
    to_rev: Option<&str>,
    allow_dirty: bool,
) -> Result<ChangeSet, PlanError> {
    if client.is_working_tree_dirty()? && !allow_dirty {
        log::error!("template repository is dirty and allow_dirty is not enabled");
    }

    let from = match from_rev {
        Some(rev) => client.resolve_revision(rev)?,
        None => {
            client.fetch_all_remotes()?;
            let branch = default_branch(client)?;
            client.resolve_revision(&format!("origin/{branch}"))?
        }
    };
    let to = match to_rev {
        Some(rev) => client.resolve_revision(rev)?,
        None => client.resolve_revision("HEAD")?,
    };

    let mut set = ChangeSet::default();
    for change in client.diff_trees(&from, &to)? {
        match change.kind {
            ChangeKind::Added => classify_added(client, change, &mut set)?,
            ChangeKind::Deleted => classify_deleted(change, &mut set),
            ChangeKind::Modified => classify_modified(client, change, &mut set)?,
        }
    }
    Ok(set)
}

/// `main` if it exists among local branches, else `master`, else error.
fn default_branch(client: &dyn VcsClient) -> Result<String, PlanError> {
    let branches = client.list_branch_names()?;
    for candidate in ["main", "master"] {
        if branches.iter().any(|b| b == candidate) {
            return Ok(candidate.to_string());
        }
    }
    Err(PlanError::NoDefaultBranch { branches })
}

fn classify_added(
    client: &dyn VcsClient,
    change: TreeChange,
    set: &mut ChangeSet,
) -> Result<(), PlanError> {
    if !is_template_path(&change.new_path) {
        return Ok(());
    }
    let Some(text) = worktree_text(client, &change.new_path)? else {
        return Ok(());
    };
    if is_managed_template(&text) {
        set.new_files.push(GitDiff {
            path: change.new_path,
            content: None,
            is_deleted: false,
        });
    }
    Ok(())
}

fn classify_deleted(change: TreeChange, set: &mut ChangeSet) {
    if !is_template_path(&change.old_path) {
        return;
    }
    let Some(content) = change.old_content else {
        return;
    };
    if is_managed_template(&content) {
        set.deleted_files.push(GitDiff {
            path: change.old_path,
            content: Some(content),
            is_deleted: true,
        });
    }
}

fn classify_modified(
    client: &dyn VcsClient,
    change: TreeChange,
    set: &mut ChangeSet,
) -> Result<(), PlanError> {
    if !is_template_path(&change.new_path) {
        return Ok(());
    }
    let Some(current_text) = worktree_text(client, &change.new_path)? else {
        return Ok(());
    };
    if !is_managed_template(&current_text) {
        return Ok(());
    }
    let Some(old_content) = change.old_content else {
        log::debug!(
            "modified entry without pre-image content, skipping: {}",
            change.new_path.display()
        );
        return Ok(());
    };

    // Rename resolution. A rename of a managed document is either a pure
    // rename (no record), a rename-with-identity-change (deleted + new
    // split), or an ordinary modification.
    if change.old_path != change.new_path && is_managed_template(&old_content) {
        let current_doc: Value =
            serde_yaml::from_str(&current_text).map_err(|e| TemplateError::Parse {
                path: change.new_path.clone(),
                source: e,
            })?;
        let baseline_doc: Value =
            serde_yaml::from_str(&old_content).map_err(|e| TemplateError::Parse {
                path: change.old_path.clone(),
                source: e,
            })?;

        if documents_structurally_equal(&baseline_doc, &current_doc) {
            // Renamed without semantic change.
            return Ok(());
        }

        let baseline = parse_template(&change.old_path, &old_content)?;
        let current = parse_template(&change.new_path, &current_text)?;
        if baseline.resource_id() != current.resource_id() {
            // The old identity is gone and a distinct resource appeared.
            set.deleted_files.push(GitDiff {
                path: change.old_path,
                content: Some(old_content),
                is_deleted: true,
            });
            set.new_files.push(GitDiff {
                path: change.new_path,
                content: None,
                is_deleted: false,
            });
            return Ok(());
        }
    }

    set.modified_files.push(GitDiff {
        path: change.new_path,
        content: Some(old_content),
        is_deleted: false,
    });
    Ok(())
}

fn is_template_path(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext == TEMPLATE_EXTENSION)
        .unwrap_or(false)
}

/// Working-tree content, or `None` when the file is absent there.
fn worktree_text(client: &dyn VcsClient, path: &Path) -> Result<Option<String>, PlanError> {
    match client.read_worktree_file(path) {
        Ok(text) => Ok(Some(text)),
        Err(GitError::Io { ref source, .. }) if source.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

// ---------------------------------------------------------------------------
// Structural equality
// ---------------------------------------------------------------------------

/// Order-insensitive structural comparison of two YAML documents.
///
/// Mappings are compared by key set and sequences by their sorted canonical
/// forms, so reordering entries or list items does not count as a change.
fn documents_structurally_equal(a: &Value, b: &Value) -> bool {
    canonicalize(a) == canonicalize(b)
}

fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Mapping(map) => {
            let mut entries: Vec<(Value, Value)> = map
                .iter()
                .map(|(k, v)| (canonicalize(k), canonicalize(v)))
                .collect();
            entries.sort_by_key(|(k, _)| format!("{k:?}"));
            Value::Mapping(entries.into_iter().collect())
        }
        Value::Sequence(seq) => {
            let mut items: Vec<Value> = seq.iter().map(canonicalize).collect();
            items.sort_by_key(|item| format!("{item:?}"));
            Value::Sequence(items)
        }
        other => other.clone(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
