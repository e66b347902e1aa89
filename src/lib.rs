//! reargparse - bind regex capture groups to named, typed parameters
//!
//! Declare "this free-form input decomposes into these named, possibly
//! optional fields" instead of hand-writing a parser per input shape:
//!
//! ```rust
//! use reargparse::{Converter, Parameter, RegexArgConverter};
//!
//! let converter = RegexArgConverter::new(
//!     r"(\d+)(?: (\S+))?",
//!     vec![
//!         Parameter::new("times").converter(Converter::Int),
//!         Parameter::new("content").default("repeating..."),
//!     ],
//! )
//! .unwrap();
//!
//! let args = converter.parse_blocking("3").unwrap();
//! assert_eq!(args["times"], 3);
//! assert_eq!(args["content"], "repeating...");
//! ```

pub mod arguments;
pub mod config;
pub mod converter;
pub mod engine;
pub mod error;
pub mod parameter;
pub mod pattern;

pub use arguments::{render, resolve_defaults, Arguments};
pub use config::{ConverterConfig, ParameterConfig, PatternKind};
pub use converter::{convert_builtin, BuiltinConverters, ConvertValue, MockConverter};
pub use engine::RegexArgConverter;
pub use error::{FixSuggestion, ReargError, Result};
pub use parameter::{Converter, DefaultValue, Parameter};
pub use pattern::{ArgPattern, GroupMatch, RegexPattern, ShlexPattern};
