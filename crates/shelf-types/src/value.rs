use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Attribute mapping derived from a stored object's payload.
///
/// Keys are sorted so that serialized output is stable across runs.
pub type Attributes = BTreeMap<String, AttrValue>;

/// Well-known attribute names.
pub mod keys {
    /// Playback length in seconds, set for recognized audio formats.
    pub const DURATION: &str = "duration";
}

/// A single attribute value.
///
/// `Int` and `Float` are numeric and compare numerically against query
/// literals. `Text` compares as a string. `Bool` compares against the
/// literals `true` and `false`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl AttrValue {
    /// Numeric view of the value, if it is numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            Self::Bool(_) | Self::Text(_) => None,
        }
    }

    /// Compare against a literal taken from a query string.
    ///
    /// Numeric values parse the literal as a float first; a literal that is
    /// not a number never equals a numeric value.
    pub fn matches_literal(&self, literal: &str) -> bool {
        match self {
            Self::Int(_) | Self::Float(_) => match literal.trim().parse::<f64>() {
                Ok(parsed) => self.as_f64() == Some(parsed),
                Err(_) => false,
            },
            Self::Text(s) => s == literal,
            Self::Bool(b) => match literal {
                "true" => *b,
                "false" => !*b,
                _ => false,
            },
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v}"),
        }
    }
}

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u32> for AttrValue {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<u16> for AttrValue {
    fn from(v: u16) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}
