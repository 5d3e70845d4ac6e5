use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Option key carrying the path or name of the descriptor being read or
/// written. Mappings match its extension against their accepted list.
pub const LOCATION_KEY: &str = "location";

/// Format-specific override properties supplied by a mapping.
pub type Properties = BTreeMap<String, String>;

/// Opaque request context handed to mapping predicates.
///
/// The registry never interprets the contents; it only forwards the context
/// to `Mapping::accept` and reports it back when nothing matched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Options(BTreeMap<String, Value>);

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a context that only names the descriptor location.
    pub fn for_location(location: impl Into<String>) -> Self {
        Self::new().with(LOCATION_KEY, location.into())
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn location(&self) -> Option<&str> {
        self.get(LOCATION_KEY).and_then(Value::as_str)
    }

    /// True when `key` holds `true` or a string spelling of it.
    pub fn is_truthy(&self, key: &str) -> bool {
        match self.get(key) {
            Some(Value::Bool(flag)) => *flag,
            Some(Value::String(text)) => text.trim().eq_ignore_ascii_case("true"),
            _ => false,
        }
    }
}

impl fmt::Display for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(&self.0) {
            Ok(json) => f.write_str(&json),
            Err(_) => write!(f, "{:?}", self.0),
        }
    }
}
