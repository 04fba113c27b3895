use std::fmt;

use indexmap::IndexMap;
use shelf_types::Attributes;

use crate::clause::Clause;
use crate::error::QueryResult;

/// A conjunction of clauses.
///
/// An empty query matches every record.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Query {
    clauses: Vec<Clause>,
}

impl Query {
    /// A query with no clauses.
    pub fn all() -> Self {
        Self::default()
    }

    /// Build a query from request parameters.
    ///
    /// When a parameter repeats, its last value is used and the clause keeps
    /// the position of the first occurrence.
    pub fn from_pairs<I, K, V>(pairs: I) -> QueryResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut params: IndexMap<String, String> = IndexMap::new();
        for (key, value) in pairs {
            params.insert(key.into(), value.into());
        }
        let clauses = params
            .iter()
            .map(|(key, value)| Clause::parse(key, value))
            .collect::<QueryResult<Vec<_>>>()?;
        Ok(Self { clauses })
    }

    /// Append a clause.
    pub fn with(mut self, clause: Clause) -> Self {
        self.clauses.push(clause);
        self
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// The value of the first `name` clause, if any.
    pub fn name(&self) -> Option<&str> {
        self.clauses.iter().find_map(|clause| match clause {
            Clause::Name(name) => Some(name.as_str()),
            _ => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Evaluate every clause in order, stopping at the first failure.
    pub fn matches(&self, name: &str, attrs: &Attributes) -> bool {
        self.clauses.iter().all(|clause| clause.matches(name, attrs))
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            write!(f, "{clause}")?;
        }
        Ok(())
    }
}
