//! The version-control collaborator interface.
//!
//! Reconciliation code depends on this trait, never on a concrete git
//! library, so change classification stays a pure function over two trees
//! and is testable against in-memory fixtures.

use std::path::{Path, PathBuf};

use crate::error::GitError;

/// How a path changed between two trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Deleted,
    Modified,
}

/// One entry of a tree-level diff.
///
/// For additions `old_path == new_path` and `old_content` is `None`; for
/// deletions both paths are the pre-image path. A rename surfaces as
/// `Modified` with differing paths. Post-image content is never carried
/// here — consumers read it fresh from the working tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeChange {
    pub kind: ChangeKind,
    pub old_path: PathBuf,
    pub new_path: PathBuf,
    pub old_content: Option<String>,
}

/// Read-only client over one repository checkout.
pub trait VcsClient {
    /// Fetch every configured remote. Blocking, independent per remote.
    fn fetch_all_remotes(&self) -> Result<(), GitError>;

    /// Resolve a revision reference (branch, tag, sha) to a commit id.
    fn resolve_revision(&self, rev: &str) -> Result<String, GitError>;

    /// Tree-level diff between two resolved commits, rename-aware.
    fn diff_trees(&self, from: &str, to: &str) -> Result<Vec<TreeChange>, GitError>;

    /// True if the working tree has uncommitted changes.
    fn is_working_tree_dirty(&self) -> Result<bool, GitError>;

    /// Local branch names.
    fn list_branch_names(&self) -> Result<Vec<String>, GitError>;

    /// Read a repository-relative file from the working tree.
    fn read_worktree_file(&self, path: &Path) -> Result<String, GitError>;
}
