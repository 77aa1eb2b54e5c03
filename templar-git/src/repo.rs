//! `git2`-backed implementation of [`VcsClient`].

use std::path::{Path, PathBuf};

use git2::{BranchType, Delta, DiffFindOptions, Oid, Repository, StatusOptions};

use crate::client::{ChangeKind, TreeChange, VcsClient};
use crate::error::{io_err, GitError};

/// One opened repository checkout.
pub struct GitRepo {
    repo: Repository,
    path: PathBuf,
}

impl GitRepo {
    /// Open an existing repository at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, GitError> {
        let path = path.into();
        let repo = Repository::open(&path)?;
        Ok(Self { repo, path })
    }

    /// Clone `url` into `path`, or open and fetch if already cloned.
    pub fn clone_or_open(url: &str, path: impl Into<PathBuf>) -> Result<Self, GitError> {
        let path = path.into();
        if path.join(".git").exists() {
            log::info!("repository already cloned, fetching: {}", path.display());
            let repo = Self::open(path)?;
            repo.fetch_all_remotes()?;
            return Ok(repo);
        }
        log::info!("cloning {} into {}", url, path.display());
        let repo = Repository::clone(url, &path)?;
        Ok(Self { repo, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn workdir(&self) -> Result<&Path, GitError> {
        self.repo.workdir().ok_or_else(|| GitError::NoWorkingTree {
            path: self.path.clone(),
        })
    }

    fn blob_text(&self, id: Oid) -> Result<String, GitError> {
        let blob = self.repo.find_blob(id)?;
        Ok(String::from_utf8_lossy(blob.content()).into_owned())
    }
}

impl VcsClient for GitRepo {
    fn fetch_all_remotes(&self) -> Result<(), GitError> {
        for name in self.repo.remotes()?.iter().flatten() {
            log::debug!("fetching remote: {name}");
            let mut remote = self.repo.find_remote(name)?;
            remote.fetch(&[] as &[&str], None, None)?;
        }
        Ok(())
    }

    fn resolve_revision(&self, rev: &str) -> Result<String, GitError> {
        let object = self.repo.revparse_single(rev)?;
        let commit = object.peel_to_commit()?;
        Ok(commit.id().to_string())
    }

    fn diff_trees(&self, from: &str, to: &str) -> Result<Vec<TreeChange>, GitError> {
        let from_tree = self.repo.find_commit(Oid::from_str(from)?)?.tree()?;
        let to_tree = self.repo.find_commit(Oid::from_str(to)?)?.tree()?;

        let mut diff = self
            .repo
            .diff_tree_to_tree(Some(&from_tree), Some(&to_tree), None)?;
        // Pair delete+add into renames so rename resolution can run.
        let mut find_opts = DiffFindOptions::new();
        find_opts.renames(true);
        diff.find_similar(Some(&mut find_opts))?;

        let mut changes = Vec::new();
        for delta in diff.deltas() {
            let old_path = delta
                .old_file()
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_default();
            let new_path = delta
                .new_file()
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_default();

            let change = match delta.status() {
                Delta::Added => TreeChange {
                    kind: ChangeKind::Added,
                    old_path: new_path.clone(),
                    new_path,
                    old_content: None,
                },
                Delta::Deleted => TreeChange {
                    kind: ChangeKind::Deleted,
                    old_path: old_path.clone(),
                    new_path: old_path,
                    old_content: Some(self.blob_text(delta.old_file().id())?),
                },
                Delta::Modified | Delta::Renamed => TreeChange {
                    kind: ChangeKind::Modified,
                    old_path,
                    new_path,
                    old_content: Some(self.blob_text(delta.old_file().id())?),
                },
                _ => continue,
            };
            changes.push(change);
        }
        Ok(changes)
    }

    fn is_working_tree_dirty(&self) -> Result<bool, GitError> {
        let mut opts = StatusOptions::new();
        opts.include_untracked(false).include_ignored(false);
        let statuses = self.repo.statuses(Some(&mut opts))?;
        Ok(!statuses.is_empty())
    }

    fn list_branch_names(&self) -> Result<Vec<String>, GitError> {
        let mut names = Vec::new();
        for branch in self.repo.branches(Some(BranchType::Local))? {
            let (branch, _) = branch?;
            if let Some(name) = branch.name()? {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }

    fn read_worktree_file(&self, path: &Path) -> Result<String, GitError> {
        let full = self.workdir()?.join(path);
        std::fs::read_to_string(&full).map_err(|e| io_err(full, e))
    }
}
