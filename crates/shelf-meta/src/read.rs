//! Bounds-checked integer reads over byte slices.

pub(crate) fn u16_le(data: &[u8], at: usize) -> Option<u16> {
    let bytes = data.get(at..at.checked_add(2)?)?;
    Some(u16::from_le_bytes([bytes[0], bytes[1]]))
}

pub(crate) fn u32_le(data: &[u8], at: usize) -> Option<u32> {
    let bytes = data.get(at..at.checked_add(4)?)?;
    Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

pub(crate) fn u32_be(data: &[u8], at: usize) -> Option<u32> {
    let bytes = data.get(at..at.checked_add(4)?)?;
    Some(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_within_bounds() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05];
        assert_eq!(u16_le(&data, 0), Some(0x0201));
        assert_eq!(u32_le(&data, 1), Some(0x0504_0302));
        assert_eq!(u32_be(&data, 0), Some(0x0102_0304));
    }

    #[test]
    fn reads_past_end_are_none() {
        let data = [0u8; 3];
        assert_eq!(u16_le(&data, 2), None);
        assert_eq!(u32_le(&data, 0), None);
        assert_eq!(u32_be(&data, usize::MAX), None);
    }
}
