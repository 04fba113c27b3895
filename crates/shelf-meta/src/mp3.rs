//! MPEG audio (MP3) stream parsing.
//!
//! Locates the first audio frame after any ID3v2 tags, decodes its header,
//! and derives the stream length from a Xing/Info or VBRI header when one
//! is present, or from the constant-bitrate estimate otherwise.

use shelf_types::{keys, AttrValue, Attributes};

use crate::error::{MetaError, MetaResult};
use crate::extract::Format;
use crate::read::u32_be;

/// Bitrates in kbit/s, indexed by `[table][bitrate_index]`.
const BITRATES: [[u32; 16]; 5] = [
    // MPEG-1 layer I
    [0, 32, 64, 96, 128, 160, 192, 224, 256, 288, 320, 352, 384, 416, 448, 0],
    // MPEG-1 layer II
    [0, 32, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320, 384, 0],
    // MPEG-1 layer III
    [0, 32, 40, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320, 0],
    // MPEG-2/2.5 layer I
    [0, 32, 48, 56, 64, 80, 96, 112, 128, 144, 160, 176, 192, 224, 256, 0],
    // MPEG-2/2.5 layers II and III
    [0, 8, 16, 24, 32, 40, 48, 56, 64, 80, 96, 112, 128, 144, 160, 0],
];

const ID3V1_LEN: usize = 128;

/// MPEG audio version.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MpegVersion {
    V1,
    V2,
    V2_5,
}

impl MpegVersion {
    pub fn as_f64(self) -> f64 {
        match self {
            Self::V1 => 1.0,
            Self::V2 => 2.0,
            Self::V2_5 => 2.5,
        }
    }
}

/// Channel mode, numbered as in the frame header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelMode {
    Stereo = 0,
    JointStereo = 1,
    DualChannel = 2,
    Mono = 3,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BitrateMode {
    Unknown,
    Constant,
    Variable,
}

impl BitrateMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::Constant => "CBR",
            Self::Variable => "VBR",
        }
    }
}

/// A decoded 4-byte frame header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameHeader {
    pub version: MpegVersion,
    pub layer: u8,
    pub protected: bool,
    /// Bits per second.
    pub bitrate: u32,
    pub sample_rate: u32,
    pub padding: bool,
    pub mode: ChannelMode,
}

impl FrameHeader {
    /// Decode a header, rejecting reserved and free-format values.
    pub fn parse(raw: u32) -> Option<Self> {
        if raw >> 21 != 0x7FF {
            return None;
        }
        let version = match (raw >> 19) & 0b11 {
            0b00 => MpegVersion::V2_5,
            0b10 => MpegVersion::V2,
            0b11 => MpegVersion::V1,
            _ => return None,
        };
        let layer = match (raw >> 17) & 0b11 {
            0b01 => 3,
            0b10 => 2,
            0b11 => 1,
            _ => return None,
        };
        let protected = (raw >> 16) & 1 == 0;
        let bitrate_index = ((raw >> 12) & 0xF) as usize;
        let rate_index = ((raw >> 10) & 0b11) as usize;
        let padding = (raw >> 9) & 1 == 1;
        let mode = match (raw >> 6) & 0b11 {
            0 => ChannelMode::Stereo,
            1 => ChannelMode::JointStereo,
            2 => ChannelMode::DualChannel,
            _ => ChannelMode::Mono,
        };

        let table = match (version, layer) {
            (MpegVersion::V1, 1) => 0,
            (MpegVersion::V1, 2) => 1,
            (MpegVersion::V1, _) => 2,
            (_, 1) => 3,
            _ => 4,
        };
        let kbps = BITRATES[table][bitrate_index];
        if kbps == 0 {
            return None;
        }
        let base_rate = match rate_index {
            0 => 44100,
            1 => 48000,
            2 => 32000,
            _ => return None,
        };
        let sample_rate = match version {
            MpegVersion::V1 => base_rate,
            MpegVersion::V2 => base_rate / 2,
            MpegVersion::V2_5 => base_rate / 4,
        };

        Some(Self {
            version,
            layer,
            protected,
            bitrate: kbps * 1000,
            sample_rate,
            padding,
            mode,
        })
    }

    pub fn samples_per_frame(&self) -> u32 {
        match (self.layer, self.version) {
            (1, _) => 384,
            (3, MpegVersion::V2 | MpegVersion::V2_5) => 576,
            _ => 1152,
        }
    }

    /// Frame length in bytes, including the header.
    pub fn frame_len(&self) -> usize {
        let padding = u32::from(self.padding);
        let len = match (self.layer, self.version) {
            (1, _) => (12 * self.bitrate / self.sample_rate + padding) * 4,
            (3, MpegVersion::V2 | MpegVersion::V2_5) => 72 * self.bitrate / self.sample_rate + padding,
            _ => 144 * self.bitrate / self.sample_rate + padding,
        };
        len as usize
    }

    pub fn channels(&self) -> u8 {
        if self.mode == ChannelMode::Mono {
            1
        } else {
            2
        }
    }

    /// Offset of a Xing/Info tag inside the frame.
    fn xing_offset(&self) -> usize {
        let side_info = match (self.version, self.mode) {
            (MpegVersion::V1, ChannelMode::Mono) => 17,
            (MpegVersion::V1, _) => 32,
            (_, ChannelMode::Mono) => 9,
            _ => 17,
        };
        4 + if self.protected { 2 } else { 0 } + side_info
    }
}

/// Stream information for an MP3 payload.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mp3Info {
    pub header: FrameHeader,
    /// Average bitrate in bits per second.
    pub bitrate: u32,
    pub bitrate_mode: BitrateMode,
    /// Stream length in seconds.
    pub length: f64,
}

impl Mp3Info {
    pub fn parse(data: &[u8]) -> MetaResult<Self> {
        let start = skip_id3v2(data);
        let (offset, header) = find_first_frame(data, start)
            .ok_or_else(|| MetaError::malformed(Format::Mp3, "can't sync to MPEG frame"))?;

        let frame_end = (offset + header.frame_len()).min(data.len());
        let frame = &data[offset..frame_end];
        let spf = f64::from(header.samples_per_frame());
        let rate = f64::from(header.sample_rate);

        if let Some(vbr) = VbrHeader::find(frame, &header) {
            if let Some(frames) = vbr.frames.filter(|f| *f > 0) {
                let length = f64::from(frames) * spf / rate;
                let bitrate = match vbr.bytes {
                    Some(bytes) if bytes > 0 && length > 0.0 => (f64::from(bytes) * 8.0 / length) as u32,
                    _ => header.bitrate,
                };
                return Ok(Self {
                    header,
                    bitrate,
                    bitrate_mode: vbr.mode,
                    length,
                });
            }
        }

        let mut audio_end = data.len();
        if audio_end >= offset + ID3V1_LEN && data[audio_end - ID3V1_LEN..].starts_with(b"TAG") {
            audio_end -= ID3V1_LEN;
        }
        let audio_bytes = (audio_end - offset) as f64;
        Ok(Self {
            header,
            bitrate: header.bitrate,
            bitrate_mode: BitrateMode::Unknown,
            length: audio_bytes * 8.0 / f64::from(header.bitrate),
        })
    }

    pub fn to_attributes(&self) -> Attributes {
        let h = &self.header;
        let mut attrs = Attributes::new();
        attrs.insert("version".into(), AttrValue::Float(h.version.as_f64()));
        attrs.insert("layer".into(), AttrValue::Int(i64::from(h.layer)));
        attrs.insert("bitrate".into(), AttrValue::from(self.bitrate));
        attrs.insert("sample_rate".into(), AttrValue::from(h.sample_rate));
        attrs.insert("mode".into(), AttrValue::Int(h.mode as i64));
        attrs.insert("channels".into(), AttrValue::Int(i64::from(h.channels())));
        attrs.insert("protected".into(), AttrValue::Bool(h.protected));
        attrs.insert("padding".into(), AttrValue::Bool(h.padding));
        attrs.insert("bitrate_mode".into(), AttrValue::from(self.bitrate_mode.as_str()));
        attrs.insert("length".into(), AttrValue::Float(self.length));
        attrs.insert(keys::DURATION.into(), AttrValue::Float(self.length));
        attrs
    }
}

/// Skip consecutive ID3v2 tags and return the offset after them.
fn skip_id3v2(data: &[u8]) -> usize {
    let mut pos = 0;
    while data.len() >= pos + 10 && &data[pos..pos + 3] == b"ID3" {
        let flags = data[pos + 5];
        let size = data[pos + 6..pos + 10]
            .iter()
            .fold(0usize, |acc, b| (acc << 7) | usize::from(b & 0x7F));
        let footer = if flags & 0x10 != 0 { 10 } else { 0 };
        pos += 10 + size + footer;
    }
    pos.min(data.len())
}

/// Scan for a frame header whose successor (when in range) is also valid.
fn find_first_frame(data: &[u8], start: usize) -> Option<(usize, FrameHeader)> {
    let mut pos = start;
    while pos + 4 <= data.len() {
        if data[pos] == 0xFF && data[pos + 1] & 0xE0 == 0xE0 {
            if let Some(header) = u32_be(data, pos).and_then(FrameHeader::parse) {
                let next = pos + header.frame_len();
                let confirmed = match u32_be(data, next) {
                    Some(raw) => FrameHeader::parse(raw).is_some(),
                    None => true,
                };
                if confirmed {
                    return Some((pos, header));
                }
            }
        }
        pos += 1;
    }
    None
}

struct VbrHeader {
    mode: BitrateMode,
    frames: Option<u32>,
    bytes: Option<u32>,
}

impl VbrHeader {
    fn find(frame: &[u8], header: &FrameHeader) -> Option<Self> {
        Self::xing(frame, header.xing_offset()).or_else(|| Self::vbri(frame))
    }

    fn xing(frame: &[u8], at: usize) -> Option<Self> {
        let mode = match frame.get(at..at + 4)? {
            b"Xing" => BitrateMode::Variable,
            b"Info" => BitrateMode::Constant,
            _ => return None,
        };
        let flags = u32_be(frame, at + 4)?;
        let mut cursor = at + 8;
        let frames = if flags & 0x1 != 0 {
            let v = u32_be(frame, cursor);
            cursor += 4;
            v
        } else {
            None
        };
        let bytes = if flags & 0x2 != 0 {
            u32_be(frame, cursor)
        } else {
            None
        };
        Some(Self { mode, frames, bytes })
    }

    fn vbri(frame: &[u8]) -> Option<Self> {
        const AT: usize = 4 + 32;
        if frame.get(AT..AT + 4)? != b"VBRI" {
            return None;
        }
        Some(Self {
            mode: BitrateMode::Variable,
            bytes: u32_be(frame, AT + 10),
            frames: u32_be(frame, AT + 14),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// MPEG-1 layer III, 128 kbit/s, 44.1 kHz, no CRC, no padding, stereo.
    const V1_L3_128: [u8; 4] = [0xFF, 0xFB, 0x90, 0x00];
    /// Same, mono.
    const V1_L3_128_MONO: [u8; 4] = [0xFF, 0xFB, 0x90, 0xC0];

    fn frames(header: [u8; 4], count: usize) -> Vec<u8> {
        let len = FrameHeader::parse(u32::from_be_bytes(header)).unwrap().frame_len();
        let mut out = Vec::with_capacity(len * count);
        for _ in 0..count {
            out.extend_from_slice(&header);
            out.resize(out.len() + len - 4, 0);
        }
        out
    }

    fn id3v2(body_len: usize) -> Vec<u8> {
        let mut tag = b"ID3\x04\x00\x00".to_vec();
        let size = body_len as u32;
        tag.extend_from_slice(&[
            ((size >> 21) & 0x7F) as u8,
            ((size >> 14) & 0x7F) as u8,
            ((size >> 7) & 0x7F) as u8,
            (size & 0x7F) as u8,
        ]);
        tag.resize(tag.len() + body_len, 0);
        tag
    }

    #[test]
    fn header_fields() {
        let h = FrameHeader::parse(u32::from_be_bytes(V1_L3_128)).unwrap();
        assert_eq!(h.version, MpegVersion::V1);
        assert_eq!(h.layer, 3);
        assert_eq!(h.bitrate, 128_000);
        assert_eq!(h.sample_rate, 44100);
        assert!(!h.protected);
        assert!(!h.padding);
        assert_eq!(h.mode, ChannelMode::Stereo);
        assert_eq!(h.channels(), 2);
        assert_eq!(h.samples_per_frame(), 1152);
        assert_eq!(h.frame_len(), 417);
    }

    #[test]
    fn mpeg2_layer3_frame_geometry() {
        // MPEG-2 layer III, 64 kbit/s, 22.05 kHz, padded, mono.
        let h = FrameHeader::parse(u32::from_be_bytes([0xFF, 0xF3, 0x82, 0xC0])).unwrap();
        assert_eq!(h.version, MpegVersion::V2);
        assert_eq!(h.bitrate, 64_000);
        assert_eq!(h.sample_rate, 22050);
        assert!(h.padding);
        assert_eq!(h.samples_per_frame(), 576);
        assert_eq!(h.frame_len(), 72 * 64_000 / 22050 + 1);
    }

    #[test]
    fn reserved_values_rejected() {
        // Reserved version.
        assert!(FrameHeader::parse(u32::from_be_bytes([0xFF, 0xEB, 0x90, 0x00])).is_none());
        // Reserved layer.
        assert!(FrameHeader::parse(u32::from_be_bytes([0xFF, 0xF9, 0x90, 0x00])).is_none());
        // Free-format and bad bitrate.
        assert!(FrameHeader::parse(u32::from_be_bytes([0xFF, 0xFB, 0x00, 0x00])).is_none());
        assert!(FrameHeader::parse(u32::from_be_bytes([0xFF, 0xFB, 0xF0, 0x00])).is_none());
        // Reserved sample rate.
        assert!(FrameHeader::parse(u32::from_be_bytes([0xFF, 0xFB, 0x9C, 0x00])).is_none());
        // No sync.
        assert!(FrameHeader::parse(0x1234_5678).is_none());
    }

    #[test]
    fn cbr_length_from_size() {
        let data = frames(V1_L3_128, 10);
        let info = Mp3Info::parse(&data).unwrap();
        assert_eq!(info.bitrate, 128_000);
        assert_eq!(info.bitrate_mode, BitrateMode::Unknown);
        assert_eq!(info.length, (417.0 * 10.0 * 8.0) / 128_000.0);
    }

    #[test]
    fn skips_id3v2_and_id3v1() {
        let mut data = id3v2(300);
        data.extend(frames(V1_L3_128, 4));
        let mut trailer = b"TAG".to_vec();
        trailer.resize(ID3V1_LEN, b' ');
        data.extend(trailer);

        let info = Mp3Info::parse(&data).unwrap();
        assert_eq!(info.length, (417.0 * 4.0 * 8.0) / 128_000.0);
    }

    #[test]
    fn skips_leading_garbage() {
        let mut data = vec![0x00, 0xFF, 0x12, 0x34, 0x56];
        data.extend(frames(V1_L3_128, 3));
        let info = Mp3Info::parse(&data).unwrap();
        assert_eq!(info.header.sample_rate, 44100);
    }

    #[test]
    fn xing_header_gives_vbr_length() {
        let mut data = frames(V1_L3_128_MONO, 3);
        // Mono MPEG-1: 4-byte header + 17 bytes side info.
        let at = 4 + 17;
        data[at..at + 4].copy_from_slice(b"Xing");
        data[at + 4..at + 8].copy_from_slice(&3u32.to_be_bytes());
        data[at + 8..at + 12].copy_from_slice(&1000u32.to_be_bytes());
        data[at + 12..at + 16].copy_from_slice(&400_000u32.to_be_bytes());

        let info = Mp3Info::parse(&data).unwrap();
        let expected = 1000.0 * 1152.0 / 44100.0;
        assert_eq!(info.length, expected);
        assert_eq!(info.bitrate_mode, BitrateMode::Variable);
        assert_eq!(info.bitrate, (400_000.0 * 8.0 / expected) as u32);
    }

    #[test]
    fn info_header_is_constant_bitrate() {
        let mut data = frames(V1_L3_128, 2);
        let at = 4 + 32;
        data[at..at + 4].copy_from_slice(b"Info");
        data[at + 4..at + 8].copy_from_slice(&1u32.to_be_bytes());
        data[at + 8..at + 12].copy_from_slice(&500u32.to_be_bytes());

        let info = Mp3Info::parse(&data).unwrap();
        assert_eq!(info.bitrate_mode, BitrateMode::Constant);
        assert_eq!(info.bitrate, 128_000);
        assert_eq!(info.length, 500.0 * 1152.0 / 44100.0);
    }

    #[test]
    fn vbri_header_gives_length() {
        let mut data = frames(V1_L3_128, 2);
        let at = 36;
        data[at..at + 4].copy_from_slice(b"VBRI");
        data[at + 14..at + 18].copy_from_slice(&200u32.to_be_bytes());

        let info = Mp3Info::parse(&data).unwrap();
        assert_eq!(info.bitrate_mode, BitrateMode::Variable);
        assert_eq!(info.length, 200.0 * 1152.0 / 44100.0);
    }

    #[test]
    fn attributes_include_duration() {
        let info = Mp3Info::parse(&frames(V1_L3_128_MONO, 2)).unwrap();
        let attrs = info.to_attributes();
        assert_eq!(attrs["duration"], attrs["length"]);
        assert_eq!(attrs["channels"], AttrValue::Int(1));
        assert_eq!(attrs["mode"], AttrValue::Int(3));
        assert_eq!(attrs["version"], AttrValue::Float(1.0));
        assert_eq!(attrs["layer"], AttrValue::Int(3));
        assert_eq!(attrs["sample_rate"], AttrValue::Int(44100));
        assert_eq!(attrs["protected"], AttrValue::Bool(false));
    }

    #[test]
    fn no_frame_is_malformed() {
        let err = Mp3Info::parse(b"plain text, not audio").unwrap_err();
        assert!(matches!(err, MetaError::MalformedContainer { format: Format::Mp3, .. }));
        assert!(Mp3Info::parse(&id3v2(20)).is_err());
    }
}
