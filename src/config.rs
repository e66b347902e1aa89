//! Converter definitions loaded from YAML
//!
//! ```yaml
//! pattern: '^(\S+[ \S]*?)(?: -c(\d+))?( -n)?$'
//! parameters:
//!   - name: string
//!     default: "hello!"
//!   - name: count
//!     converter: int
//!     default: 2
//!   - name: new_line
//!     converter: flag
//! ```
//!
//! `kind: shlex` selects the shell-style splitter instead of a regex (no
//! `pattern` key then). A `default:` key that is present, even as `null`,
//! declares a default; leaving it out declares none.

use std::path::Path;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::engine::RegexArgConverter;
use crate::error::ReargError;
use crate::parameter::{Converter, DefaultValue, Parameter};
use crate::pattern::ShlexPattern;

/// Which pattern adapter a definition uses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternKind {
    #[default]
    Regex,
    Shlex,
}

/// One converter definition file
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConverterConfig {
    #[serde(default)]
    pub kind: PatternKind,

    /// Regex source (required for `kind: regex`)
    #[serde(default)]
    pub pattern: Option<String>,

    /// Parameters in group order
    #[serde(default)]
    pub parameters: Vec<ParameterConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParameterConfig {
    pub name: String,

    /// Converter name, see [`Converter::from_name`]
    #[serde(default)]
    pub converter: Option<String>,

    /// `Some(Value::Null)` when written as `default: null`
    #[serde(default, deserialize_with = "present")]
    pub default: Option<Value>,
}

/// Distinguish `default: null` from a missing key
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl ParameterConfig {
    pub fn to_parameter(&self) -> Parameter {
        let mut parameter = Parameter::new(&self.name);
        if let Some(name) = &self.converter {
            parameter = parameter.converter(Converter::from_name(name));
        }
        if let Some(value) = &self.default {
            parameter = parameter.with_default_value(DefaultValue::HasDefault(value.clone()));
        }
        parameter
    }
}

impl ConverterConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self, ReargError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReargError> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml(&yaml)
    }

    pub fn parameters(&self) -> Vec<Parameter> {
        self.parameters.iter().map(ParameterConfig::to_parameter).collect()
    }

    /// Build and validate the converter this file describes
    pub fn build(&self) -> Result<RegexArgConverter, ReargError> {
        match (self.kind, self.pattern.as_deref()) {
            (PatternKind::Regex, Some(source)) => {
                RegexArgConverter::new(source, self.parameters())
            }
            (PatternKind::Regex, None) => Err(ReargError::Config(
                "'pattern' is required for kind: regex".to_string(),
            )),
            (PatternKind::Shlex, None) => {
                RegexArgConverter::with_pattern(ShlexPattern::new(), self.parameters())
            }
            (PatternKind::Shlex, Some(_)) => Err(ReargError::Config(
                "'pattern' is not used with kind: shlex".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    const REPEAT_YAML: &str = r#"
pattern: '^(\S+[ \S]*?)(?: -c(\d+))?( -n)?$'
parameters:
  - name: string
    default: "hello!"
  - name: count
    converter: int
    default: 2
  - name: new_line
    converter: flag
"#;

    #[test]
    fn parse_repeat_definition() {
        let config = ConverterConfig::from_yaml(REPEAT_YAML).unwrap();
        assert_eq!(config.kind, PatternKind::Regex);
        assert_eq!(config.parameters.len(), 3);
        assert_eq!(config.parameters[0].default, Some(json!("hello!")));
        assert_eq!(config.parameters[1].converter.as_deref(), Some("int"));
        assert!(config.parameters[2].default.is_none());
    }

    #[test]
    fn null_default_differs_from_missing() {
        let yaml = r#"
pattern: '(a)?(b)?'
parameters:
  - name: first
    default: null
  - name: second
"#;
        let config = ConverterConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.parameters[0].default, Some(Value::Null));
        assert_eq!(config.parameters[1].default, None);

        let params = config.parameters();
        assert!(params[0].has_default());
        assert!(!params[1].has_default());
    }

    #[test]
    fn build_produces_working_converter() {
        let converter = ConverterConfig::from_yaml(REPEAT_YAML)
            .unwrap()
            .build()
            .unwrap();
        let args = converter.parse_blocking("Welcome :) -n").unwrap();
        assert_eq!(
            args.to_value(),
            json!({"string": "Welcome :)", "count": 2, "new_line": true})
        );
    }

    #[test]
    fn build_reports_group_mismatch() {
        let yaml = r#"
pattern: '(a)(b)'
parameters:
  - name: only
"#;
        let err = ConverterConfig::from_yaml(yaml).unwrap().build().unwrap_err();
        assert!(err.to_string().contains("REARG-010"));
    }

    #[test]
    fn shlex_kind() {
        let yaml = r#"
kind: shlex
parameters:
  - name: args
    converter: json
  - name: kwargs
    converter: json
"#;
        let converter = ConverterConfig::from_yaml(yaml).unwrap().build().unwrap();
        let args = converter.parse_blocking("x --y=1").unwrap();
        assert_eq!(args["args"], json!(["x"]));
        assert_eq!(args["kwargs"], json!({"y": "1"}));
    }

    #[test]
    fn pattern_kind_mismatch_is_config_error() {
        let err = ConverterConfig::from_yaml("parameters: []")
            .unwrap()
            .build()
            .unwrap_err();
        assert!(matches!(err, ReargError::Config(_)));

        let err = ConverterConfig::from_yaml("kind: shlex\npattern: '(x)'")
            .unwrap()
            .build()
            .unwrap_err();
        assert!(matches!(err, ReargError::Config(_)));
    }

    #[test]
    fn unknown_keys_rejected() {
        let err = ConverterConfig::from_yaml("pattern: x\nparams: []").unwrap_err();
        assert!(err.to_string().contains("REARG-040"));
    }

    #[test]
    fn load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("repeat.yaml");
        fs::write(&path, REPEAT_YAML).unwrap();

        let config = ConverterConfig::load(&path).unwrap();
        assert_eq!(config.parameters().len(), 3);

        let err = ConverterConfig::load(dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, ReargError::Io(_)));
    }
}
