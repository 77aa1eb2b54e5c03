//! Account matchers.
//!
//! A matcher is a string pattern identifying one or more accounts: the
//! wildcard `"*"`, an exact identifier, or a regex fragment. Coverage checks
//! run the pattern as a regex search over the newline-joined matcher list.
//!
//! Caveat, kept on purpose: because matching is a substring/regex search and
//! not set membership, an identifier that is a prefix of another will
//! cross-match (`"prod"` is found in a list containing `"prod-eu"`). Callers
//! that need exact semantics must use unambiguous identifiers.

use regex::Regex;

use crate::config::Account;

/// The wildcard matcher: every account in the registry.
pub const WILDCARD: &str = "*";

/// True if any matcher in the list is the wildcard.
pub fn has_wildcard(matchers: &[String]) -> bool {
    matchers.iter().any(|m| m == WILDCARD)
}

/// A single account matcher pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountMatcher(String);

impl AccountMatcher {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self(pattern.into())
    }

    /// Matcher covering one registry account by id or name: `(id|name)`.
    pub fn for_account(account: &Account) -> Self {
        Self(format!(
            "({}|{})",
            account.account_id, account.account_name
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_wildcard(&self) -> bool {
        self.0 == WILDCARD
    }

    /// Search for this pattern anywhere in the newline-joined matcher list.
    ///
    /// The pattern is run as a regex; if it is not a valid regex it degrades
    /// to a plain substring search.
    pub fn found_in(&self, matchers: &[String]) -> bool {
        let haystack = matchers.join("\n");
        match Regex::new(&self.0) {
            Ok(re) => re.is_match(&haystack),
            Err(_) => haystack.contains(&self.0),
        }
    }
}
