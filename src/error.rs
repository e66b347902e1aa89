//! Error types with fix suggestions
//!
//! Error code ranges:
//! - REARG-010-019: Structural errors (pattern vs. parameter declaration)
//! - REARG-020-029: Input mismatch errors
//! - REARG-030-039: Builtin conversion errors
//! - REARG-040-049: Configuration errors

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReargError>;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

#[derive(Error, Debug)]
pub enum ReargError {
    // ─────────────────────────────────────────────────────────────
    // Structural errors (REARG-010 to REARG-013)
    // ─────────────────────────────────────────────────────────────
    #[error("REARG-010: Too many groups for {nparams} parameters: {ngroups} groups")]
    TooManyGroups { nparams: usize, ngroups: usize },

    #[error("REARG-011: Not enough groups for {nparams} parameters: {ngroups} groups")]
    NotEnoughGroups { nparams: usize, ngroups: usize },

    #[error("REARG-012: Parameter '{name}' is declared more than once")]
    DuplicateParameter { name: String },

    #[error("REARG-013: Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    // ─────────────────────────────────────────────────────────────
    // Input mismatch (REARG-020)
    // ─────────────────────────────────────────────────────────────
    #[error("REARG-020: Not matched with {pattern}: {argstr:?}")]
    NotMatchedWithPattern { pattern: String, argstr: String },

    // ─────────────────────────────────────────────────────────────
    // Builtin conversion errors (REARG-030 to REARG-031)
    // ─────────────────────────────────────────────────────────────
    #[error("REARG-030: Cannot convert {raw:?} to {converter} for parameter '{parameter}': {reason}")]
    Conversion {
        parameter: String,
        converter: String,
        raw: String,
        reason: String,
    },

    #[error("REARG-031: Unknown converter '{name}' for parameter '{parameter}'")]
    UnknownConverter { parameter: String, name: String },

    // ─────────────────────────────────────────────────────────────
    // Configuration errors (REARG-040 to REARG-042)
    // ─────────────────────────────────────────────────────────────
    #[error("REARG-040: YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("REARG-041: IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("REARG-042: Invalid converter definition: {0}")]
    Config(String),
}

impl ReargError {
    /// Construction-time mismatch between the pattern and the parameter list.
    /// Fatal to the converter being built, never worth retrying.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            ReargError::TooManyGroups { .. }
                | ReargError::NotEnoughGroups { .. }
                | ReargError::DuplicateParameter { .. }
                | ReargError::InvalidPattern(_)
        )
    }

    /// The input did not conform to the pattern. Recoverable by the caller.
    pub fn is_input_mismatch(&self) -> bool {
        matches!(self, ReargError::NotMatchedWithPattern { .. })
    }
}

impl FixSuggestion for ReargError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            ReargError::TooManyGroups { .. } => {
                Some("Declare one parameter per capture group, or make extra groups non-capturing with (?:...)")
            }
            ReargError::NotEnoughGroups { .. } => {
                Some("Add a capture group for every declared parameter")
            }
            ReargError::DuplicateParameter { .. } => Some("Use unique parameter names"),
            ReargError::InvalidPattern(_) => Some("Check the regex syntax of the pattern"),
            ReargError::NotMatchedWithPattern { .. } => {
                Some("Check the input against the pattern, or make the unmatched parts optional")
            }
            ReargError::Conversion { .. } => {
                Some("Tighten the capture group so it only matches text the converter accepts")
            }
            ReargError::UnknownConverter { .. } => Some(
                "Use a builtin converter (str, int, float, bool, flag, json, split) or supply a host that handles it",
            ),
            ReargError::YamlParse(_) => Some("Check YAML syntax: indentation and quoting"),
            ReargError::Io(_) => Some("Check file path and permissions"),
            ReargError::Config(_) => Some("Check the 'kind', 'pattern' and 'parameters' keys"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structural_messages_carry_counts() {
        let err = ReargError::TooManyGroups {
            nparams: 2,
            ngroups: 3,
        };
        assert_eq!(
            err.to_string(),
            "REARG-010: Too many groups for 2 parameters: 3 groups"
        );
        assert!(err.is_structural());
        assert!(!err.is_input_mismatch());

        let err = ReargError::NotEnoughGroups {
            nparams: 3,
            ngroups: 1,
        };
        assert!(err.to_string().contains("Not enough groups for 3 parameters: 1 groups"));
    }

    #[test]
    fn mismatch_message_quotes_input() {
        let err = ReargError::NotMatchedWithPattern {
            pattern: r"(\d+)".to_string(),
            argstr: "Hello\nWorld".to_string(),
        };
        assert_eq!(
            err.to_string(),
            r#"REARG-020: Not matched with (\d+): "Hello\nWorld""#
        );
        assert!(err.is_input_mismatch());
        assert!(!err.is_structural());
    }

    #[test]
    fn every_variant_has_a_suggestion() {
        let errors = vec![
            ReargError::DuplicateParameter { name: "x".into() },
            ReargError::Conversion {
                parameter: "count".into(),
                converter: "int".into(),
                raw: "x".into(),
                reason: "invalid digit".into(),
            },
            ReargError::UnknownConverter {
                parameter: "member".into(),
                name: "member".into(),
            },
            ReargError::Config("missing pattern".into()),
        ];
        for err in errors {
            assert!(err.fix_suggestion().is_some(), "{err}");
        }
    }
}
