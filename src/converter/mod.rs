//! # Conversion Capability
//!
//! Turning matched text into a value is the host's business. The binding
//! engine only calls [`ConvertValue::convert_value`], once per present group,
//! strictly in declaration order, awaiting each call before starting the next.
//!
//! - [`ConvertValue`] - host trait, async and context-aware
//! - [`BuiltinConverters`] - context-free host for the builtin [`Converter`]s
//! - [`MockConverter`] - test host that records call order and injects failures
//!
//! ## Host errors
//!
//! A host's error type must absorb [`ReargError`] (for input mismatches) via
//! `From`. Errors the host raises itself reach the caller untouched:
//!
//! ```rust
//! use reargparse::{BuiltinConverters, ConvertValue, Parameter};
//! use async_trait::async_trait;
//! use serde_json::Value;
//!
//! struct Upper;
//!
//! #[async_trait]
//! impl ConvertValue<()> for Upper {
//!     type Error = anyhow::Error;
//!
//!     async fn convert_value(
//!         &self,
//!         ctx: &mut (),
//!         parameter: &Parameter,
//!         raw: &str,
//!     ) -> Result<Value, Self::Error> {
//!         if parameter.name() == "shout" {
//!             return Ok(Value::from(raw.to_uppercase()));
//!         }
//!         Ok(BuiltinConverters.convert_value(ctx, parameter, raw).await?)
//!     }
//! }
//! ```

mod mock;

pub use mock::MockConverter;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ReargError;
use crate::parameter::{Converter, Parameter};
use crate::pattern::split_words;

/// Host-supplied "convert raw text using context C" capability
#[async_trait]
pub trait ConvertValue<C: ?Sized + Send>: Send + Sync {
    /// Error raised by the host; propagated by the engine as-is
    type Error: From<ReargError> + Send;

    /// Convert the text matched for `parameter`.
    ///
    /// May consult or update `ctx`; later parameters observe those updates.
    async fn convert_value(
        &self,
        ctx: &mut C,
        parameter: &Parameter,
        raw: &str,
    ) -> Result<Value, Self::Error>;
}

/// Builtin conversions, independent of any context
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinConverters;

#[async_trait]
impl<C: ?Sized + Send> ConvertValue<C> for BuiltinConverters {
    type Error = ReargError;

    async fn convert_value(
        &self,
        _ctx: &mut C,
        parameter: &Parameter,
        raw: &str,
    ) -> Result<Value, ReargError> {
        convert_builtin(parameter, raw)
    }
}

/// Apply the parameter's converter (raw text when it has none).
pub fn convert_builtin(parameter: &Parameter, raw: &str) -> Result<Value, ReargError> {
    let Some(converter) = parameter.converter_spec() else {
        return Ok(Value::from(raw));
    };

    let failed = |reason: String| ReargError::Conversion {
        parameter: parameter.name().to_string(),
        converter: converter.name().to_string(),
        raw: raw.to_string(),
        reason,
    };

    match converter {
        Converter::Str => Ok(Value::from(raw)),
        Converter::Int => raw
            .trim()
            .parse::<i64>()
            .map(Value::from)
            .map_err(|e| failed(e.to_string())),
        Converter::Float => {
            let f = raw.trim().parse::<f64>().map_err(|e| failed(e.to_string()))?;
            serde_json::Number::from_f64(f)
                .map(Value::Number)
                .ok_or_else(|| failed("not a finite number".to_string()))
        }
        Converter::Bool => parse_bool(raw)
            .map(Value::Bool)
            .ok_or_else(|| failed("expected true/false, yes/no, on/off or 1/0".to_string())),
        Converter::Flag => Ok(Value::Bool(!raw.is_empty())),
        Converter::Json => serde_json::from_str(raw).map_err(|e| failed(e.to_string())),
        Converter::Split => split_words(raw)
            .map(Value::from)
            .ok_or_else(|| failed("unbalanced quotes".to_string())),
        Converter::Named(name) => Err(ReargError::UnknownConverter {
            parameter: parameter.name().to_string(),
            name: name.clone(),
        }),
        Converter::Custom(f) => f(raw).map_err(failed),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}
