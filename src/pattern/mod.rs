//! # Pattern Adapters
//!
//! The binding engine never talks to a pattern engine directly. It only needs
//! a group count and a match operation, captured by the [`ArgPattern`] trait:
//!
//! - [`RegexPattern`] - capture groups of a `regex::Regex`
//! - [`ShlexPattern`] - shell-style positional/option splitter (no regex semantics)
//!
//! Any matcher that reports a fixed group count and yields one [`GroupMatch`]
//! per group can back a [`crate::RegexArgConverter`].

mod regex_pattern;
mod shlex_pattern;

pub use regex_pattern::RegexPattern;
pub use shlex_pattern::{split_words, ShlexPattern};

use std::fmt;

/// Outcome of one capture group in a successful match
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupMatch {
    /// Group did not participate (e.g. an optional `(...)?` that was skipped)
    Absent,
    /// Group matched this text; may be empty
    Present(String),
}

impl GroupMatch {
    pub fn is_present(&self) -> bool {
        matches!(self, GroupMatch::Present(_))
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            GroupMatch::Absent => None,
            GroupMatch::Present(text) => Some(text),
        }
    }
}

impl From<Option<&str>> for GroupMatch {
    fn from(text: Option<&str>) -> Self {
        match text {
            Some(t) => GroupMatch::Present(t.to_string()),
            None => GroupMatch::Absent,
        }
    }
}

/// Capability a pattern engine must expose to the binding engine
pub trait ArgPattern: Send + Sync + fmt::Debug {
    /// Source text, used in diagnostics and rendering
    fn source(&self) -> &str;

    /// Number of capture groups. Fixed for the lifetime of the pattern.
    fn group_count(&self) -> usize;

    /// Match the whole input.
    ///
    /// Returns `None` when the input does not conform; otherwise exactly
    /// `group_count()` entries in group order.
    fn match_groups(&self, input: &str) -> Option<Vec<GroupMatch>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_match_from_option() {
        assert_eq!(GroupMatch::from(None), GroupMatch::Absent);
        assert_eq!(
            GroupMatch::from(Some("")),
            GroupMatch::Present(String::new())
        );
        assert!(GroupMatch::Present(String::new()).is_present());
        assert_eq!(GroupMatch::Present("x".into()).text(), Some("x"));
        assert_eq!(GroupMatch::Absent.text(), None);
    }
}
