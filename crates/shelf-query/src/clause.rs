use std::fmt;

use shelf_types::{keys, AttrValue, Attributes};

use crate::error::{QueryError, QueryResult};

/// Parameter that selects by record name.
pub const NAME: &str = "name";
/// Parameter for the inclusive lower duration bound.
pub const MIN_DURATION: &str = "minduration";
/// Parameter for the inclusive upper duration bound.
pub const MAX_DURATION: &str = "maxduration";

/// One filter predicate.
#[derive(Clone, Debug, PartialEq)]
pub enum Clause {
    /// Record name equals the value exactly.
    Name(String),
    /// Record has a numeric `duration` no smaller than the bound.
    MinDuration(f64),
    /// Record has a numeric `duration` no larger than the bound.
    MaxDuration(f64),
    /// Record has attribute `key` and it equals `value`.
    Equals { key: String, value: String },
}

impl Clause {
    /// Build a clause from one request parameter.
    pub fn parse(key: &str, value: &str) -> QueryResult<Self> {
        Ok(match key {
            NAME => Self::Name(value.to_string()),
            MIN_DURATION => Self::MinDuration(parse_bound(key, value)?),
            MAX_DURATION => Self::MaxDuration(parse_bound(key, value)?),
            _ => Self::Equals {
                key: key.to_string(),
                value: value.to_string(),
            },
        })
    }

    /// The parameter name this clause was built from.
    pub fn key(&self) -> &str {
        match self {
            Self::Name(_) => NAME,
            Self::MinDuration(_) => MIN_DURATION,
            Self::MaxDuration(_) => MAX_DURATION,
            Self::Equals { key, .. } => key,
        }
    }

    /// Evaluate against one record.
    pub fn matches(&self, name: &str, attrs: &Attributes) -> bool {
        match self {
            Self::Name(expected) => name == expected,
            Self::MinDuration(min) => duration(attrs).is_some_and(|d| d >= *min),
            Self::MaxDuration(max) => duration(attrs).is_some_and(|d| d <= *max),
            Self::Equals { key, value } => attrs
                .get(key)
                .is_some_and(|attr| attr.matches_literal(value)),
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(v) | Self::Equals { value: v, .. } => write!(f, "{}={v}", self.key()),
            Self::MinDuration(v) | Self::MaxDuration(v) => write!(f, "{}={v}", self.key()),
        }
    }
}

fn duration(attrs: &Attributes) -> Option<f64> {
    attrs.get(keys::DURATION).and_then(AttrValue::as_f64)
}

fn parse_bound(clause: &str, value: &str) -> QueryResult<f64> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| QueryError::InvalidNumericLiteral {
            clause: clause.to_string(),
            value: value.to_string(),
        })
}
