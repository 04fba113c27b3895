use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Unique name of a stored object.
///
/// The text after the last `.` is the type suffix used to pick a metadata
/// parser. Suffix matching is case-sensitive.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ObjectName(String);

impl ObjectName {
    /// Validate and wrap a name. Empty names are rejected.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        if name.is_empty() {
            return Err(TypeError::InvalidName("name must not be empty".into()));
        }
        Ok(Self(name))
    }

    /// The name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Type suffix: the text after the last `.`, or `None` without a dot.
    pub fn suffix(&self) -> Option<&str> {
        suffix_of(&self.0)
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Type suffix of a raw name.
pub fn suffix_of(name: &str) -> Option<&str> {
    name.rsplit_once('.').map(|(_, suffix)| suffix)
}

impl fmt::Debug for ObjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectName({})", self.0)
    }
}

impl fmt::Display for ObjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ObjectName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ObjectName {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ObjectName> for String {
    fn from(name: ObjectName) -> Self {
        name.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_name_rejected() {
        assert!(matches!(ObjectName::new(""), Err(TypeError::InvalidName(_))));
    }

    #[test]
    fn suffix_after_last_dot() {
        let name = ObjectName::new("song.final.wav").unwrap();
        assert_eq!(name.suffix(), Some("wav"));
        assert_eq!(suffix_of("track.mp3"), Some("mp3"));
        assert_eq!(suffix_of("trailing."), Some(""));
    }

    #[test]
    fn no_dot_means_no_suffix() {
        assert_eq!(ObjectName::new("README").unwrap().suffix(), None);
    }

    #[test]
    fn suffix_is_case_sensitive() {
        assert_eq!(suffix_of("LOUD.WAV"), Some("WAV"));
    }

    #[test]
    fn display_and_debug() {
        let name = ObjectName::new("a.wav").unwrap();
        assert_eq!(name.to_string(), "a.wav");
        assert_eq!(format!("{name:?}"), "ObjectName(a.wav)");
        assert_eq!(name.as_ref(), "a.wav");
    }

    #[test]
    fn serde_roundtrip_validates() {
        let name: ObjectName = serde_json::from_str("\"b.txt\"").unwrap();
        assert_eq!(name.as_str(), "b.txt");
        assert!(serde_json::from_str::<ObjectName>("\"\"").is_err());
    }
}
