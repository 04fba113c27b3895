use std::fmt;

use shelf_types::{suffix_of, Attributes};
use tracing::{debug, warn};

use crate::error::{MetaError, MetaResult};
use crate::mp3::Mp3Info;
use crate::wav::WavInfo;

/// Formats with a metadata parser.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Format {
    Wav,
    Mp3,
}

impl Format {
    /// Pick a parser from an exact, case-sensitive suffix.
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "wav" => Some(Self::Wav),
            "mp3" => Some(Self::Mp3),
            _ => None,
        }
    }

    pub fn parse(self, data: &[u8]) -> MetaResult<Attributes> {
        match self {
            Self::Wav => WavInfo::parse(data).map(|info| info.to_attributes()),
            Self::Mp3 => Mp3Info::parse(data).map(|info| info.to_attributes()),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wav => write!(f, "wav"),
            Self::Mp3 => write!(f, "mp3"),
        }
    }
}

/// Extract attributes, reporting why none could be produced.
pub fn try_extract(name: &str, data: &[u8]) -> MetaResult<Attributes> {
    let suffix = suffix_of(name);
    let format = suffix
        .and_then(Format::from_suffix)
        .ok_or_else(|| MetaError::UnrecognizedFormat(suffix.map(str::to_string)))?;
    format.parse(data)
}

/// Extract attributes for an upload.
///
/// Unrecognized suffixes and malformed containers both yield an empty
/// mapping; an upload is never rejected because of its metadata.
pub fn extract(name: &str, data: &[u8]) -> Attributes {
    match try_extract(name, data) {
        Ok(attrs) => {
            debug!(name, count = attrs.len(), "extracted attributes");
            attrs
        }
        Err(MetaError::UnrecognizedFormat(_)) => Attributes::new(),
        Err(err) => {
            warn!(name, error = %err, "metadata extraction failed, storing without attributes");
            Attributes::new()
        }
    }
}
