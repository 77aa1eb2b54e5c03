//! Template materialization: raw document bytes → [`TemplateRecord`].
//!
//! A document is "managed" only if its raw text matches the management-tag
//! marker; the check is a regex over the raw text, run before any structural
//! parse so malformed or irrelevant YAML is rejected cheaply. Parsing then
//! dispatches on the `template_type` tag through a static type registry.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use serde_yaml::Value;

use crate::error::{parse_err, TemplateError};
use crate::types::TemplateRecord;

// ---------------------------------------------------------------------------
// Type registry
// ---------------------------------------------------------------------------

pub const GOOGLE_GROUP_TEMPLATE_TYPE: &str = "Templar::Google::Group";
pub const AWS_ROLE_TEMPLATE_TYPE: &str = "Templar::AWS::Role";

/// A registered template kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    GoogleGroup,
    AwsRole,
}

/// Static registry mapping kind tags to template kinds.
pub const TEMPLATE_TYPE_REGISTRY: &[(&str, TemplateKind)] = &[
    (GOOGLE_GROUP_TEMPLATE_TYPE, TemplateKind::GoogleGroup),
    (AWS_ROLE_TEMPLATE_TYPE, TemplateKind::AwsRole),
];

/// Resolve a `template_type` tag against the registry.
pub fn resolve_template_kind(tag: &str, path: &Path) -> Result<TemplateKind, TemplateError> {
    TEMPLATE_TYPE_REGISTRY
        .iter()
        .find(|(registered, _)| *registered == tag)
        .map(|(_, kind)| *kind)
        .ok_or_else(|| TemplateError::UnknownTemplateType {
            tag: tag.to_string(),
            path: path.to_path_buf(),
        })
}

// ---------------------------------------------------------------------------
// Management tag
// ---------------------------------------------------------------------------

/// Marker pattern denoting "managed by templar". Matched against raw text.
pub const MANAGED_TEMPLATE_PATTERN: &str = r#"template_type:\s*['"]?Templar::"#;

fn managed_template_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(MANAGED_TEMPLATE_PATTERN).expect("valid marker pattern"))
}

/// True if the raw document text carries the management tag.
pub fn is_managed_template(text: &str) -> bool {
    managed_template_regex().is_match(text)
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse one template document into a [`TemplateRecord`].
///
/// The `template_type` tag is resolved against the registry first so that an
/// unregistered kind surfaces as [`TemplateError::UnknownTemplateType`]
/// rather than a generic deserialization error.
pub fn parse_template(
    file_path: impl Into<PathBuf>,
    text: &str,
) -> Result<TemplateRecord, TemplateError> {
    let file_path = file_path.into();

    let document: Value =
        serde_yaml::from_str(text).map_err(|e| parse_err(file_path.clone(), e))?;
    let tag = document
        .get("template_type")
        .and_then(Value::as_str)
        .ok_or_else(|| TemplateError::MissingTemplateType {
            path: file_path.clone(),
        })?;
    resolve_template_kind(tag, &file_path)?;

    let mut record: TemplateRecord =
        serde_yaml::from_value(document).map_err(|e| parse_err(file_path.clone(), e))?;
    record.file_path = file_path;
    Ok(record)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    use crate::types::{Deletion, TemplateBody};

    const GROUP_DOC: &str = concat!(
        "template_type: Templar::Google::Group\n",
        "name: engineering\n",
        "domain: example.com\n",
        "email: engineering@example.com\n",
        "members:\n",
        "  - email: alice@example.com\n",
    );

    #[test]
    fn management_tag_detection() {
        assert!(is_managed_template(GROUP_DOC));
        assert!(is_managed_template(
            "template_type: 'Templar::AWS::Role'\nname: x\n"
        ));
        assert!(!is_managed_template("template_type: Other::Thing\n"));
        assert!(!is_managed_template("just: yaml\n"));
    }

    #[test]
    fn parse_group_template() {
        let record = parse_template("groups/engineering.yaml", GROUP_DOC).expect("parse");
        assert_eq!(record.file_path, PathBuf::from("groups/engineering.yaml"));
        assert_eq!(record.resource_id(), "engineering@example.com");
        assert!(matches!(record.body, TemplateBody::GoogleGroup(_)));
        // included_accounts defaults to the wildcard when absent
        assert_eq!(record.scope().included_accounts, vec!["*"]);
        assert_eq!(record.scope().deleted, Deletion::None);
    }

    #[test]
    fn parse_role_with_directive_list() {
        let doc = concat!(
            "template_type: Templar::AWS::Role\n",
            "name: deploy-bot\n",
            "included_accounts:\n",
            "  - staging\n",
            "deleted:\n",
            "  - deleted: true\n",
            "    included_accounts:\n",
            "      - prod\n",
            "    excluded_accounts:\n",
            "      - staging\n",
        );
        let record = parse_template("roles/deploy-bot.yaml", doc).expect("parse");
        match &record.scope().deleted {
            Deletion::Partial(directives) => {
                assert_eq!(directives.len(), 1);
                assert_eq!(directives[0].included_accounts, vec!["prod"]);
                assert_eq!(directives[0].excluded_accounts, vec!["staging"]);
            }
            other => panic!("expected Partial, got {other:?}"),
        }
    }

    #[test]
    fn unknown_template_type_is_configuration_error() {
        let doc = "template_type: Templar::Unknown::Kind\nname: x\n";
        let err = parse_template("bad.yaml", doc).unwrap_err();
        assert!(matches!(
            err,
            TemplateError::UnknownTemplateType { ref tag, .. } if tag == "Templar::Unknown::Kind"
        ));
    }

    #[test]
    fn missing_template_type_is_an_error() {
        let err = parse_template("bad.yaml", "name: x\n").unwrap_err();
        assert!(matches!(err, TemplateError::MissingTemplateType { .. }));
    }

    #[test]
    fn malformed_yaml_is_parse_error_with_path() {
        let err = parse_template("bad.yaml", "template_type: [unclosed\n").unwrap_err();
        match err {
            TemplateError::Parse { path, .. } => {
                assert_eq!(path, PathBuf::from("bad.yaml"));
            }
            other => panic!("expected Parse, got {other:?}"),
        }
    }
}
