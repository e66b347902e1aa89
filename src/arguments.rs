//! Parsed arguments - the result of one binding pass
//!
//! `Arguments` holds converted values keyed by parameter name, but only for
//! parameters that ended up present (matched and converted, or defaulted).
//! It keeps the full parameter list and pattern source so it can be rendered
//! in declaration order, missing parameters included.
//!
//! Uses FxHashMap for faster hashing on small string keys.

use std::fmt;
use std::ops::Index;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde_json::{Map, Value};

use crate::parameter::{DefaultValue, Parameter};

/// Converted arguments (parameter name → value)
#[derive(Debug, Clone)]
pub struct Arguments {
    /// Source text of the originating pattern
    pattern: Arc<str>,
    /// Every declared parameter name, in declaration order
    params: Arc<[String]>,
    /// Present parameters only
    values: FxHashMap<String, Value>,
}

impl Arguments {
    /// Empty arguments for the given pattern and parameter names
    pub fn new(pattern: Arc<str>, params: Arc<[String]>) -> Self {
        Self {
            pattern,
            params,
            values: FxHashMap::default(),
        }
    }

    pub(crate) fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Number of present parameters
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// All declared parameter names, present or not
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Present parameters in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.params
            .iter()
            .filter_map(|name| self.values.get(name).map(|v| (name.as_str(), v)))
    }

    /// Names of declared parameters that are not present
    pub fn missing(&self) -> impl Iterator<Item = &str> {
        self.params
            .iter()
            .filter(|name| !self.values.contains_key(name.as_str()))
            .map(String::as_str)
    }

    /// Present values as a JSON object
    pub fn to_value(&self) -> Value {
        let map: Map<String, Value> = self
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect();
        Value::Object(map)
    }

    pub fn into_values(self) -> FxHashMap<String, Value> {
        self.values
    }
}

impl Index<&str> for Arguments {
    type Output = Value;

    /// Panics if the parameter is not present
    fn index(&self, name: &str) -> &Value {
        match self.values.get(name) {
            Some(value) => value,
            None => panic!("parameter '{name}' is not present in {self}"),
        }
    }
}

impl fmt::Display for Arguments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(&self.pattern, &self.params, &self.values))
    }
}

/// The arguments an input would produce if no group matched
///
/// Contains exactly the parameters that declare a default.
pub fn resolve_defaults(pattern: Arc<str>, parameters: &[Parameter]) -> Arguments {
    let names: Arc<[String]> = parameters.iter().map(|p| p.name().to_string()).collect();
    let mut arguments = Arguments::new(pattern, names);

    for parameter in parameters {
        if let DefaultValue::HasDefault(value) = parameter.default_value() {
            arguments.insert(parameter.name(), value.clone());
        }
    }

    arguments
}

/// Render arguments for diagnostics: `Args(r'<pattern>' => [a=1] <b>)`
///
/// Present parameters show as `[name=value]`, missing ones as `<name>`.
/// Strings print without quotes, everything else as compact JSON.
pub fn render(pattern: &str, params: &[String], values: &FxHashMap<String, Value>) -> String {
    let items: Vec<String> = params
        .iter()
        .map(|name| match values.get(name) {
            Some(Value::String(s)) => format!("[{name}={s}]"),
            Some(value) => format!("[{name}={value}]"),
            None => format!("<{name}>"),
        })
        .collect();

    format!("Args(r'{}' => {})", pattern, items.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameter::Converter;
    use serde_json::json;

    const PATTERN: &str = r"^(\S+[ \S]*?)(?: -c(\d+))?( -n)?$";

    fn repeat_params() -> Vec<Parameter> {
        vec![
            Parameter::new("string").default("hello!"),
            Parameter::new("count").converter(Converter::Int).default(2),
            Parameter::new("new_line").converter(Converter::Flag),
        ]
    }

    #[test]
    fn defaults_contain_only_declared_defaults() {
        let args = resolve_defaults(Arc::from(PATTERN), &repeat_params());

        assert_eq!(args.get("string"), Some(&json!("hello!")));
        assert_eq!(args.get("count"), Some(&json!(2)));
        assert!(!args.contains("new_line"));
        assert_eq!(args.len(), 2);
        assert_eq!(args.params(), ["string", "count", "new_line"]);
    }

    #[test]
    fn null_default_is_present() {
        let params = vec![Parameter::new("maybe").default(Value::Null)];
        let args = resolve_defaults(Arc::from("(x)?"), &params);
        assert!(args.contains("maybe"));
        assert_eq!(args["maybe"], Value::Null);
    }

    #[test]
    fn defaults_are_idempotent() {
        let params = repeat_params();
        let a = resolve_defaults(Arc::from(PATTERN), &params);
        let b = resolve_defaults(Arc::from(PATTERN), &params);
        assert_eq!(a.to_value(), b.to_value());
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn render_shows_missing_parameters() {
        let args = resolve_defaults(Arc::from(PATTERN), &repeat_params());
        assert_eq!(
            args.to_string(),
            format!("Args(r'{PATTERN}' => [string=hello!] [count=2] <new_line>)")
        );
    }

    #[test]
    fn render_non_string_values_as_json() {
        let params: Arc<[String]> = vec!["list".to_string(), "flag".to_string()].into();
        let mut values = FxHashMap::default();
        values.insert("list".to_string(), json!(["a", 1]));
        values.insert("flag".to_string(), json!(true));

        assert_eq!(
            render("p", &params, &values),
            r#"Args(r'p' => [list=["a",1]] [flag=true])"#
        );
    }

    #[test]
    fn render_without_parameters() {
        assert_eq!(render("abc", &[], &FxHashMap::default()), "Args(r'abc' => )");
    }

    #[test]
    fn iter_and_missing_follow_declaration_order() {
        let names: Arc<[String]> = ["c", "a", "b"].iter().map(|s| s.to_string()).collect();
        let mut args = Arguments::new(Arc::from("p"), names);
        args.insert("b", json!(2));
        args.insert("c", json!(3));

        let present: Vec<&str> = args.iter().map(|(name, _)| name).collect();
        assert_eq!(present, vec!["c", "b"]);
        assert_eq!(args.missing().collect::<Vec<_>>(), vec!["a"]);
    }

    #[test]
    fn to_value_serializes_present_values() {
        let args = resolve_defaults(Arc::from(PATTERN), &repeat_params());
        assert_eq!(args.to_value(), json!({"string": "hello!", "count": 2}));
    }

    #[test]
    #[should_panic(expected = "parameter 'new_line' is not present")]
    fn index_panics_on_missing() {
        let args = resolve_defaults(Arc::from(PATTERN), &repeat_params());
        let _ = &args["new_line"];
    }
}
