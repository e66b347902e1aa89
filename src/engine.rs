//! Binding engine
//!
//! [`RegexArgConverter`] pairs a pattern with an ordered parameter list.
//! The pairing is validated once, at construction; afterwards the converter
//! is immutable and can be shared across any number of concurrent calls.
//!
//! ```rust
//! use reargparse::{Converter, Parameter, RegexArgConverter};
//! use serde_json::json;
//!
//! let converter = RegexArgConverter::new(
//!     r"^(\S+[ \S]*?)(?: -c(\d+))?( -n)?$",
//!     vec![
//!         Parameter::new("string").default("hello!"),
//!         Parameter::new("count").converter(Converter::Int).default(2),
//!         Parameter::new("new_line").converter(Converter::Flag),
//!     ],
//! )
//! .unwrap();
//!
//! let args = converter.parse_blocking("Welcome :) -n").unwrap();
//! assert_eq!(args["string"], json!("Welcome :)"));
//! assert_eq!(args["count"], json!(2));
//! assert_eq!(args["new_line"], json!(true));
//! ```

use std::sync::Arc;

use rustc_hash::FxHashSet;
use tracing::{debug, instrument, trace};

use crate::arguments::{resolve_defaults, Arguments};
use crate::converter::{BuiltinConverters, ConvertValue};
use crate::error::ReargError;
use crate::parameter::{DefaultValue, Parameter};
use crate::pattern::{ArgPattern, GroupMatch, RegexPattern};

/// Validated pattern + parameter declaration
#[derive(Debug, Clone)]
pub struct RegexArgConverter {
    pattern: Arc<dyn ArgPattern>,
    source: Arc<str>,
    parameters: Arc<[Parameter]>,
    names: Arc<[String]>,
}

impl RegexArgConverter {
    /// Compile `source` as a regex and bind its groups to `parameters`.
    pub fn new(source: &str, parameters: Vec<Parameter>) -> Result<Self, ReargError> {
        Self::with_pattern(RegexPattern::new(source)?, parameters)
    }

    pub fn with_pattern<P>(pattern: P, parameters: Vec<Parameter>) -> Result<Self, ReargError>
    where
        P: ArgPattern + 'static,
    {
        Self::from_shared(Arc::new(pattern), parameters)
    }

    /// Bind an already shared pattern.
    ///
    /// Fails with `TooManyGroups`/`NotEnoughGroups` when the group count
    /// differs from the number of parameters, and `DuplicateParameter` when
    /// a name repeats.
    pub fn from_shared(
        pattern: Arc<dyn ArgPattern>,
        parameters: Vec<Parameter>,
    ) -> Result<Self, ReargError> {
        let nparams = parameters.len();
        let ngroups = pattern.group_count();

        if ngroups > nparams {
            return Err(ReargError::TooManyGroups { nparams, ngroups });
        }
        if ngroups < nparams {
            return Err(ReargError::NotEnoughGroups { nparams, ngroups });
        }

        if let Some(name) = first_duplicate(&parameters) {
            return Err(ReargError::DuplicateParameter {
                name: name.to_string(),
            });
        }

        let source: Arc<str> = Arc::from(pattern.source());
        let names: Arc<[String]> = parameters.iter().map(|p| p.name().to_string()).collect();

        debug!(pattern = %source, params = nparams, "built argument converter");

        Ok(Self {
            pattern,
            source,
            parameters: parameters.into(),
            names,
        })
    }

    pub fn pattern(&self) -> &dyn ArgPattern {
        self.pattern.as_ref()
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Arguments as if every group were absent
    pub fn defaults(&self) -> Arguments {
        resolve_defaults(Arc::clone(&self.source), &self.parameters)
    }

    /// Match `argstr` and convert each present group through `host`.
    ///
    /// Conversions run one at a time in declaration order. The first host
    /// error is returned unchanged and no later parameter is converted.
    #[instrument(level = "debug", skip_all, fields(pattern = %self.source))]
    pub async fn convert<C, H>(
        &self,
        host: &H,
        ctx: &mut C,
        argstr: &str,
    ) -> Result<Arguments, H::Error>
    where
        C: ?Sized + Send,
        H: ConvertValue<C> + ?Sized,
    {
        let Some(groups) = self.pattern.match_groups(argstr) else {
            debug!(argstr, "input not matched");
            return Err(ReargError::NotMatchedWithPattern {
                pattern: self.source.to_string(),
                argstr: argstr.to_string(),
            }
            .into());
        };

        let mut arguments = Arguments::new(Arc::clone(&self.source), Arc::clone(&self.names));

        for (parameter, group) in self.parameters.iter().zip(groups) {
            match group {
                GroupMatch::Absent => {
                    if let DefaultValue::HasDefault(value) = parameter.default_value() {
                        trace!(param = parameter.name(), "group absent, using default");
                        arguments.insert(parameter.name(), value.clone());
                    }
                }
                GroupMatch::Present(text) => {
                    trace!(param = parameter.name(), raw = %text, "converting");
                    let value = host.convert_value(ctx, parameter, &text).await?;
                    arguments.insert(parameter.name(), value);
                }
            }
        }

        Ok(arguments)
    }

    /// Like [`convert`](Self::convert), but an omitted or blank input yields
    /// [`defaults`](Self::defaults) instead of being matched.
    pub async fn convert_or_defaults<C, H>(
        &self,
        host: &H,
        ctx: &mut C,
        argstr: Option<&str>,
    ) -> Result<Arguments, H::Error>
    where
        C: ?Sized + Send,
        H: ConvertValue<C> + ?Sized,
    {
        match argstr {
            Some(s) if !s.trim().is_empty() => self.convert(host, ctx, s).await,
            _ => Ok(self.defaults()),
        }
    }

    /// Convert with the builtin converters and no context.
    pub async fn parse(&self, argstr: &str) -> Result<Arguments, ReargError> {
        self.convert(&BuiltinConverters, &mut (), argstr).await
    }

    /// Blocking [`parse`](Self::parse) for callers without an async runtime.
    pub fn parse_blocking(&self, argstr: &str) -> Result<Arguments, ReargError> {
        futures::executor::block_on(self.parse(argstr))
    }
}

fn first_duplicate(parameters: &[Parameter]) -> Option<&str> {
    let mut seen = FxHashSet::default();
    parameters
        .iter()
        .map(Parameter::name)
        .find(|name| !seen.insert(*name))
}
