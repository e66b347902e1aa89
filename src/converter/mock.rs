//! Mock converter for testing
//!
//! Records every conversion request and can be told to fail on a given
//! parameter. Everything else is delegated to the builtin converters.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use rustc_hash::FxHashMap;
use serde_json::Value;

use super::{convert_builtin, ConvertValue};
use crate::error::ReargError;
use crate::parameter::{Converter, Parameter};

/// Mock host that records the order of conversions
#[derive(Debug, Clone, Default)]
pub struct MockConverter {
    /// Parameter names in the order they were converted
    calls: Arc<Mutex<Vec<String>>>,
    /// Parameter whose conversion fails
    fail_on: Option<String>,
    /// Fixed results for named converters
    named: FxHashMap<String, Value>,
    /// Simulated latency per conversion
    delay: Option<Duration>,
}

impl MockConverter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail when converting the named parameter
    pub fn fail_on(mut self, parameter: impl Into<String>) -> Self {
        self.fail_on = Some(parameter.into());
        self
    }

    /// Resolve `Converter::Named(name)` to a fixed value
    pub fn with_named(mut self, name: impl Into<String>, value: Value) -> Self {
        self.named.insert(name.into(), value);
        self
    }

    /// Sleep before each conversion
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Parameter names converted so far
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }
}

#[async_trait]
impl<C: ?Sized + Send> ConvertValue<C> for MockConverter {
    type Error = ReargError;

    async fn convert_value(
        &self,
        _ctx: &mut C,
        parameter: &Parameter,
        raw: &str,
    ) -> Result<Value, ReargError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.calls.lock().unwrap().push(parameter.name().to_string());

        if self.fail_on.as_deref() == Some(parameter.name()) {
            return Err(ReargError::Conversion {
                parameter: parameter.name().to_string(),
                converter: "mock".to_string(),
                raw: raw.to_string(),
                reason: "mock failure".to_string(),
            });
        }

        if let Some(Converter::Named(name)) = parameter.converter_spec() {
            if let Some(value) = self.named.get(name) {
                return Ok(value.clone());
            }
        }

        convert_builtin(parameter, raw)
    }
}
