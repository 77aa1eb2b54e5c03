//! Account registry configuration.
//!
//! The registry defines the universe of matchable accounts. It is consumed,
//! not owned: templar reads it to expand wildcard scopes, nothing more.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TemplateError;

/// One addressable account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub account_id: String,
    pub account_name: String,
}

/// Top-level templar configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Ordered universe of accounts templates can match against.
    #[serde(default)]
    pub accounts: Vec<Account>,
}

impl Config {
    /// Load configuration from a YAML file.
    ///
    /// Returns `TemplateError::ConfigNotFound` if absent and
    /// `TemplateError::Parse` (with path + line context) if malformed.
    pub fn load(path: &Path) -> Result<Config, TemplateError> {
        if !path.exists() {
            return Err(TemplateError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        let contents = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&contents).map_err(|e| TemplateError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }
}
