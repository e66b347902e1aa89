//! Parameter declarations
//!
//! A [`Parameter`] binds one capture group (by position) to a name, with an
//! optional converter and an optional default used when the group does not
//! take part in the match.
//!
//! ```rust
//! use reargparse::{Converter, Parameter};
//!
//! let count = Parameter::new("count").converter(Converter::Int).default(2);
//! assert!(count.has_default());
//!
//! let new_line = Parameter::new("new_line").converter(Converter::Flag);
//! assert!(!new_line.has_default());
//! ```

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

/// Caller-supplied conversion closure for [`Converter::Custom`]
pub type ConvertFn = dyn Fn(&str) -> std::result::Result<Value, String> + Send + Sync;

/// Whether a parameter falls back to a value when its group is absent.
///
/// `HasDefault(Value::Null)`, `HasDefault(false)` and `HasDefault(0)` are all
/// real defaults; only `NoDefault` omits the parameter.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DefaultValue {
    #[default]
    NoDefault,
    HasDefault(Value),
}

impl DefaultValue {
    pub fn value(&self) -> Option<&Value> {
        match self {
            DefaultValue::NoDefault => None,
            DefaultValue::HasDefault(v) => Some(v),
        }
    }
}

/// How matched text becomes a value.
///
/// Builtin variants are interpreted by [`crate::BuiltinConverters`];
/// `Named` converters are left to the host's [`crate::ConvertValue`].
#[derive(Clone)]
pub enum Converter {
    /// Raw text as a JSON string
    Str,
    /// Signed 64-bit integer
    Int,
    /// 64-bit float
    Float,
    /// Strict boolean: true/false, yes/no, on/off, 1/0
    Bool,
    /// Truthiness: any non-empty text is `true`
    Flag,
    /// JSON text
    Json,
    /// Shell-like word split into an array of strings
    Split,
    /// Host-defined converter, resolved through the invocation context
    Named(String),
    /// Caller-supplied closure
    Custom(Arc<ConvertFn>),
}

impl Converter {
    /// Map a converter name (as written in YAML definitions) to a converter.
    ///
    /// Unknown names become [`Converter::Named`] so a host can claim them.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "str" | "string" => Converter::Str,
            "int" | "integer" => Converter::Int,
            "float" | "number" => Converter::Float,
            "bool" | "boolean" => Converter::Bool,
            "flag" => Converter::Flag,
            "json" => Converter::Json,
            "split" | "words" => Converter::Split,
            _ => Converter::Named(name.trim().to_string()),
        }
    }

    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&str) -> std::result::Result<Value, String> + Send + Sync + 'static,
    {
        Converter::Custom(Arc::new(f))
    }

    /// Short name used in diagnostics
    pub fn name(&self) -> &str {
        match self {
            Converter::Str => "str",
            Converter::Int => "int",
            Converter::Float => "float",
            Converter::Bool => "bool",
            Converter::Flag => "flag",
            Converter::Json => "json",
            Converter::Split => "split",
            Converter::Named(name) => name,
            Converter::Custom(_) => "custom",
        }
    }
}

impl fmt::Debug for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Converter::Str => f.write_str("Str"),
            Converter::Int => f.write_str("Int"),
            Converter::Float => f.write_str("Float"),
            Converter::Bool => f.write_str("Bool"),
            Converter::Flag => f.write_str("Flag"),
            Converter::Json => f.write_str("Json"),
            Converter::Split => f.write_str("Split"),
            Converter::Named(name) => f.debug_tuple("Named").field(name).finish(),
            Converter::Custom(_) => f.write_str("Custom(<fn>)"),
        }
    }
}

/// One named, positionally-bound parameter
#[derive(Debug, Clone)]
pub struct Parameter {
    name: String,
    converter: Option<Converter>,
    default: DefaultValue,
}

impl Parameter {
    /// Parameter without converter or default: raw text when matched,
    /// omitted when its group is absent.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            converter: None,
            default: DefaultValue::NoDefault,
        }
    }

    pub fn converter(mut self, converter: Converter) -> Self {
        self.converter = Some(converter);
        self
    }

    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = DefaultValue::HasDefault(value.into());
        self
    }

    pub fn with_default_value(mut self, default: DefaultValue) -> Self {
        self.default = default;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn converter_spec(&self) -> Option<&Converter> {
        self.converter.as_ref()
    }

    pub fn default_value(&self) -> &DefaultValue {
        &self.default
    }

    pub fn has_default(&self) -> bool {
        matches!(self.default, DefaultValue::HasDefault(_))
    }
}
