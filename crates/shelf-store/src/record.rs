use bytes::Bytes;
use shelf_types::Attributes;

/// A stored file: name, derived attributes, and payload.
///
/// `payload` is reference-counted, so cloning a record does not copy the
/// blob.
#[derive(Clone, Debug, PartialEq)]
pub struct StoredRecord {
    pub name: String,
    pub attributes: Attributes,
    pub payload: Bytes,
}

impl StoredRecord {
    pub fn new(name: impl Into<String>, attributes: Attributes, payload: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            attributes,
            payload: payload.into(),
        }
    }

    /// Payload size in bytes.
    pub fn size(&self) -> u64 {
        self.payload.len() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_types::AttrValue;

    #[test]
    fn new_keeps_attributes_and_size() {
        let mut attrs = Attributes::new();
        attrs.insert("duration".into(), AttrValue::Float(2.0));
        let record = StoredRecord::new("a.wav", attrs, b"RIFF".to_vec());
        assert_eq!(record.attributes["duration"], AttrValue::Float(2.0));
        assert_eq!(record.size(), 4);
    }

    #[test]
    fn clone_shares_payload() {
        let record = StoredRecord::new("b.bin", Attributes::new(), vec![7u8; 1024]);
        let copy = record.clone();
        assert_eq!(record.payload.as_ptr(), copy.payload.as_ptr());
    }
}
