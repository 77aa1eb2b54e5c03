//! Error types for templar-plan.

use thiserror::Error;

use templar_core::TemplateError;
use templar_git::GitError;

/// All errors that can abort a reconciliation pass.
///
/// A pass is all-or-nothing: any error here means no template set is
/// returned, and nothing has been mutated (the pass only reads).
#[derive(Debug, Error)]
pub enum PlanError {
    /// An error from the version-control client.
    #[error("git error: {0}")]
    Git(#[from] GitError),

    /// A template parse or configuration error.
    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    /// Default-revision resolution found neither `main` nor `master`.
    #[error("repository has no main or master branch (found: {branches:?})")]
    NoDefaultBranch { branches: Vec<String> },
}
