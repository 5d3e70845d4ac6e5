use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Stable identifier naming one descriptor format (e.g., `yaml`, `json`).
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Flavour(pub String);

impl Flavour {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Flavour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Flavour {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Flavour {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Preference rank of a mapping; higher wins.
pub type Priority = f32;

/// Total ascending order over priorities.
///
/// Every NaN, whatever its sign or payload, is equal to every other NaN and
/// ranks above all numbers; `-0.0` ranks below `0.0`.
pub(crate) fn compare(a: Priority, b: Priority) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.total_cmp(&b),
    }
}

/// Descending priority order used by the sorted view.
pub(crate) fn descending(a: Priority, b: Priority) -> Ordering {
    compare(b, a)
}

/// Which side of the descriptor round trip a resolution served.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    Input,
    Output,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Input => "input",
            Direction::Output => "output",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
