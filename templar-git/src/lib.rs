//! # templar-git
//!
//! Version-control collaborator: the read-only [`VcsClient`] interface the
//! reconciliation core depends on, plus the [`GitRepo`] implementation over
//! libgit2. This crate never mutates repository content; the only writes it
//! performs are clone/fetch bookkeeping inside `.git`.

pub mod client;
pub mod error;
pub mod repo;

pub use client::{ChangeKind, TreeChange, VcsClient};
pub use error::GitError;
pub use repo::GitRepo;
