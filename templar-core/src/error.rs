//! Error types for templar-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from template parsing and configuration.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Underlying I/O failure (file not found, permission denied, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error.
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// YAML parse error — includes file path and line context from serde_yaml.
    #[error("failed to parse template at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The document has no `template_type` tag.
    #[error("template at {path} has no template_type tag")]
    MissingTemplateType { path: PathBuf },

    /// The `template_type` tag is not in the type registry. Configuration
    /// error: aborts the pass, never a silent skip.
    #[error("unknown template_type '{tag}' at {path}")]
    UnknownTemplateType { tag: String, path: PathBuf },

    /// The account registry file did not exist at the expected path.
    #[error("config not found at {path}")]
    ConfigNotFound { path: PathBuf },
}

/// Convenience constructor for [`TemplateError::Parse`].
pub(crate) fn parse_err(path: impl Into<PathBuf>, source: serde_yaml::Error) -> TemplateError {
    TemplateError::Parse {
        path: path.into(),
        source,
    }
}
