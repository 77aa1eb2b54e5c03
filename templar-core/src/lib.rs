//! Templar core library — domain types, template parsing, account matching.
//!
//! Public API surface:
//! - [`types`] — template records, deletion state, scoping
//! - [`template`] — management-tag check, type registry, parsing
//! - [`matcher`] — account matcher semantics
//! - [`config`] — the account registry
//! - [`error`] — [`TemplateError`]

pub mod config;
pub mod error;
pub mod matcher;
pub mod template;
pub mod types;

pub use config::{Account, Config};
pub use error::TemplateError;
pub use matcher::{has_wildcard, AccountMatcher, WILDCARD};
pub use template::{is_managed_template, parse_template, resolve_template_kind, TemplateKind};
pub use types::{
    Deletion, DeletionDirective, GroupMember, GroupTemplate, ResourceScope, RoleTemplate,
    TemplateBody, TemplateRecord,
};
