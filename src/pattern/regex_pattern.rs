//! `regex` crate adapter

use regex::Regex;

use super::{ArgPattern, GroupMatch};
use crate::error::ReargError;

/// Capture groups of a compiled regex.
///
/// Matching is anchored at the start of the input only: a match that begins
/// later counts as no match. Anchoring the end is left to the pattern (`$`).
#[derive(Debug, Clone)]
pub struct RegexPattern {
    regex: Regex,
}

impl RegexPattern {
    pub fn new(source: &str) -> Result<Self, ReargError> {
        Ok(Self {
            regex: Regex::new(source)?,
        })
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }
}

impl From<Regex> for RegexPattern {
    fn from(regex: Regex) -> Self {
        Self { regex }
    }
}

impl ArgPattern for RegexPattern {
    fn source(&self) -> &str {
        self.regex.as_str()
    }

    fn group_count(&self) -> usize {
        // captures_len counts the implicit whole-match group
        self.regex.captures_len() - 1
    }

    fn match_groups(&self, input: &str) -> Option<Vec<GroupMatch>> {
        let caps = self.regex.captures(input)?;
        if caps.get(0).map_or(true, |m| m.start() != 0) {
            return None;
        }

        Some(
            caps.iter()
                .skip(1)
                .map(|group| GroupMatch::from(group.map(|m| m.as_str())))
                .collect(),
        )
    }
}
