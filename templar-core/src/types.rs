//! Domain types for templar templates.
//!
//! Every managed resource is declared by one YAML template document. A
//! template carries an account scope (`included_accounts` / `excluded_accounts`)
//! and a deletion state that is either whole-resource or a list of per-account
//! [`DeletionDirective`]s. All types round-trip through serde + serde_yaml.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::template::{AWS_ROLE_TEMPLATE_TYPE, GOOGLE_GROUP_TEMPLATE_TYPE};

// ---------------------------------------------------------------------------
// Deletion state
// ---------------------------------------------------------------------------

/// A scoped deletion layered on top of an otherwise-live resource.
///
/// "Delete this resource on the accounts matched by `included_accounts`,
/// except those matched by `excluded_accounts`." Directives accumulate over
/// successive reconciliations and are never merged or deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletionDirective {
    #[serde(default = "default_true")]
    pub deleted: bool,
    #[serde(default)]
    pub included_accounts: Vec<String>,
    #[serde(default)]
    pub excluded_accounts: Vec<String>,
}

impl DeletionDirective {
    pub fn new(included_accounts: Vec<String>, excluded_accounts: Vec<String>) -> Self {
        Self {
            deleted: true,
            included_accounts,
            excluded_accounts,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Deletion state of a template.
///
/// On the wire this is either a bool (`deleted: true` / `deleted: false`) or
/// a sequence of directives. `Full` supersedes directives: once a template is
/// fully deleted, no directive is ever appended to it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "DeletionRepr", into = "DeletionRepr")]
pub enum Deletion {
    #[default]
    None,
    Full,
    Partial(Vec<DeletionDirective>),
}

impl Deletion {
    pub fn is_none(&self) -> bool {
        matches!(self, Deletion::None)
    }

    pub fn is_full(&self) -> bool {
        matches!(self, Deletion::Full)
    }

    /// Append a directive, upgrading `None` to a one-element `Partial` list.
    ///
    /// Appending to a fully-deleted template is a no-op; callers check
    /// [`Deletion::is_full`] before synthesizing a directive.
    pub fn push_directive(&mut self, directive: DeletionDirective) {
        match self {
            Deletion::None => *self = Deletion::Partial(vec![directive]),
            Deletion::Partial(directives) => directives.push(directive),
            Deletion::Full => {}
        }
    }
}

/// Wire shape of [`Deletion`]: `false` / `true` / `[directive, ...]`.
#[derive(Serialize, Deserialize, Clone)]
#[serde(untagged)]
enum DeletionRepr {
    Flag(bool),
    Directives(Vec<DeletionDirective>),
}

impl From<DeletionRepr> for Deletion {
    fn from(repr: DeletionRepr) -> Self {
        match repr {
            DeletionRepr::Flag(false) => Deletion::None,
            DeletionRepr::Flag(true) => Deletion::Full,
            DeletionRepr::Directives(directives) => Deletion::Partial(directives),
        }
    }
}

impl From<Deletion> for DeletionRepr {
    fn from(deletion: Deletion) -> Self {
        match deletion {
            Deletion::None => DeletionRepr::Flag(false),
            Deletion::Full => DeletionRepr::Flag(true),
            Deletion::Partial(directives) => DeletionRepr::Directives(directives),
        }
    }
}

// ---------------------------------------------------------------------------
// Account scope
// ---------------------------------------------------------------------------

/// Account-scoping block shared by every template kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceScope {
    /// Account matchers the resource is live on. May contain the wildcard
    /// matcher `"*"` meaning every account in the registry.
    #[serde(default = "default_included_accounts")]
    pub included_accounts: Vec<String>,
    /// Account matchers carved out of `included_accounts`. Only consulted for
    /// accounts that are otherwise included.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excluded_accounts: Vec<String>,
    #[serde(default, skip_serializing_if = "Deletion::is_none")]
    pub deleted: Deletion,
    /// Optional expiry; enforcement belongs to the apply engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Default for ResourceScope {
    fn default() -> Self {
        Self {
            included_accounts: default_included_accounts(),
            excluded_accounts: Vec::new(),
            deleted: Deletion::None,
            expires_at: None,
        }
    }
}

fn default_included_accounts() -> Vec<String> {
    vec![crate::matcher::WILDCARD.to_string()]
}

// ---------------------------------------------------------------------------
// Template kinds
// ---------------------------------------------------------------------------

/// Role of a member within a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum GroupMemberRole {
    #[default]
    Member,
    Manager,
    Owner,
}

/// Kind of principal a group member refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum GroupMemberType {
    #[default]
    User,
    Group,
}

/// A single member of a managed group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMember {
    pub email: String,
    #[serde(default)]
    pub role: GroupMemberRole,
    #[serde(default, rename = "type")]
    pub member_type: GroupMemberType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// A managed directory group (`Templar::Google::Group`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupTemplate {
    pub name: String,
    pub domain: String,
    pub email: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub members: Vec<GroupMember>,
    #[serde(flatten)]
    pub scope: ResourceScope,
}

/// A managed cloud IAM role (`Templar::AWS::Role`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleTemplate {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_session_duration: Option<u32>,
    #[serde(flatten)]
    pub scope: ResourceScope,
}

/// Kind-tagged template body, dispatched on the `template_type` document tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "template_type")]
pub enum TemplateBody {
    #[serde(rename = "Templar::Google::Group")]
    GoogleGroup(GroupTemplate),
    #[serde(rename = "Templar::AWS::Role")]
    AwsRole(RoleTemplate),
}

/// A parsed template document plus its repository-relative location.
///
/// Records are transient: constructed fresh from document bytes for each
/// reconciliation pass and handed to the apply engine. The durable state is
/// the document in the repository, never this struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateRecord {
    #[serde(skip)]
    pub file_path: PathBuf,
    #[serde(flatten)]
    pub body: TemplateBody,
}

impl TemplateRecord {
    /// The document's kind tag.
    pub fn template_type(&self) -> &'static str {
        match &self.body {
            TemplateBody::GoogleGroup(_) => GOOGLE_GROUP_TEMPLATE_TYPE,
            TemplateBody::AwsRole(_) => AWS_ROLE_TEMPLATE_TYPE,
        }
    }

    /// Kind-specific computed identity, used to detect identity changes
    /// across a rename.
    pub fn resource_id(&self) -> &str {
        match &self.body {
            TemplateBody::GoogleGroup(group) => &group.email,
            TemplateBody::AwsRole(role) => &role.name,
        }
    }

    pub fn scope(&self) -> &ResourceScope {
        match &self.body {
            TemplateBody::GoogleGroup(group) => &group.scope,
            TemplateBody::AwsRole(role) => &role.scope,
        }
    }

    pub fn scope_mut(&mut self) -> &mut ResourceScope {
        match &mut self.body {
            TemplateBody::GoogleGroup(group) => &mut group.scope,
            TemplateBody::AwsRole(role) => &mut role.scope,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
