//! # templar-plan
//!
//! Change classification and account-scope reconciliation.
//!
//! Call [`pipeline::plan`] to classify managed template changes between two
//! revisions and materialize the template records — new, fully deleted, and
//! modified-with-deletion-directives — ready for an apply engine.

pub mod deleted;
pub mod differ;
pub mod error;
pub mod pipeline;
pub mod reconcile;

#[cfg(test)]
pub(crate) mod testutil;

pub use deleted::materialize_deleted;
pub use differ::{compute_changes, ChangeSet, GitDiff, TEMPLATE_EXTENSION};
pub use error::PlanError;
pub use pipeline::{plan, Plan};
pub use reconcile::reconcile_modified;
