//! In-memory [`VcsClient`] fixture for unit tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use templar_git::{ChangeKind, GitError, TreeChange, VcsClient};

/// A fake repository: canned diff entries plus an in-memory working tree.
#[derive(Default)]
pub struct FakeRepo {
    branches: Vec<String>,
    dirty: bool,
    changes: Vec<TreeChange>,
    worktree: HashMap<PathBuf, String>,
    resolved: RefCell<Vec<String>>,
    fetched: RefCell<bool>,
}

impl FakeRepo {
    pub fn new() -> Self {
        Self {
            branches: vec!["main".to_string()],
            ..Self::default()
        }
    }

    pub fn with_branches(mut self, branches: &[&str]) -> Self {
        self.branches = branches.iter().map(|b| b.to_string()).collect();
        self
    }

    pub fn with_dirty(mut self, dirty: bool) -> Self {
        self.dirty = dirty;
        self
    }

    pub fn with_change(
        mut self,
        kind: ChangeKind,
        old_path: &str,
        new_path: &str,
        old_content: Option<&str>,
    ) -> Self {
        self.changes.push(TreeChange {
            kind,
            old_path: PathBuf::from(old_path),
            new_path: PathBuf::from(new_path),
            old_content: old_content.map(str::to_string),
        });
        self
    }

    pub fn with_worktree_file(mut self, path: &str, content: &str) -> Self {
        self.worktree.insert(PathBuf::from(path), content.to_string());
        self
    }

    /// Revisions passed to `resolve_revision`, in call order.
    pub fn resolved_revisions(&self) -> Vec<String> {
        self.resolved.borrow().clone()
    }

    pub fn fetched(&self) -> bool {
        *self.fetched.borrow()
    }
}

impl VcsClient for FakeRepo {
    fn fetch_all_remotes(&self) -> Result<(), GitError> {
        *self.fetched.borrow_mut() = true;
        Ok(())
    }

    fn resolve_revision(&self, rev: &str) -> Result<String, GitError> {
        self.resolved.borrow_mut().push(rev.to_string());
        Ok(rev.to_string())
    }

    fn diff_trees(&self, _from: &str, _to: &str) -> Result<Vec<TreeChange>, GitError> {
        Ok(self.changes.clone())
    }

    fn is_working_tree_dirty(&self) -> Result<bool, GitError> {
        Ok(self.dirty)
    }

    fn list_branch_names(&self) -> Result<Vec<String>, GitError> {
        Ok(self.branches.clone())
    }

    fn read_worktree_file(&self, path: &Path) -> Result<String, GitError> {
        self.worktree.get(path).cloned().ok_or_else(|| GitError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::new(ErrorKind::NotFound, "no such fixture file"),
        })
    }
}
