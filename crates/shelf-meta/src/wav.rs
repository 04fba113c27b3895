//! RIFF/WAVE header parsing.
//!
//! Only uncompressed PCM is recognized, either as a plain `WAVE_FORMAT_PCM`
//! tag or wrapped in `WAVE_FORMAT_EXTENSIBLE` with the PCM sub-format GUID.

use shelf_types::{keys, AttrValue, Attributes};

use crate::error::{MetaError, MetaResult};
use crate::extract::Format;
use crate::read::{u16_le, u32_le};

const WAVE_FORMAT_PCM: u16 = 0x0001;
const WAVE_FORMAT_EXTENSIBLE: u16 = 0xFFFE;
const STREAMING_SIZE: usize = u32::MAX as usize;

/// KSDATAFORMAT_SUBTYPE_PCM in on-disk byte order.
const PCM_SUBFORMAT: [u8; 16] = [
    0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10, 0x00, 0x80, 0x00, 0x00, 0xAA, 0x00, 0x38, 0x9B, 0x71,
];

/// Stream parameters read from a WAV header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WavInfo {
    pub channels: u16,
    /// Bytes per sample.
    pub sample_width: u16,
    pub frame_rate: u32,
    pub frame_count: u64,
}

impl WavInfo {
    /// Parse the container header. Sample data is not decoded.
    pub fn parse(data: &[u8]) -> MetaResult<Self> {
        if data.len() < 12 || &data[0..4] != b"RIFF" {
            return Err(malformed("file does not start with RIFF id"));
        }
        if &data[8..12] != b"WAVE" {
            return Err(malformed("not a WAVE file"));
        }

        let mut format: Option<FmtChunk> = None;
        let mut pos = 12usize;
        while pos + 8 <= data.len() {
            let Some(size) = u32_le(data, pos + 4) else {
                break;
            };
            let id = &data[pos..pos + 4];
            let size = size as usize;
            let body_start = pos + 8;
            let body_end = body_start.saturating_add(size).min(data.len());
            let body = &data[body_start..body_end];

            match id {
                b"fmt " => format = Some(FmtChunk::parse(body)?),
                b"data" => {
                    let fmt = format.ok_or_else(|| malformed("data chunk before fmt chunk"))?;
                    let frame_size = u64::from(fmt.channels) * u64::from(fmt.sample_width);
                    // Streaming writers leave 0 or u32::MAX as a placeholder size.
                    let data_len = match size {
                        0 | STREAMING_SIZE => (data.len() - body_start) as u64,
                        declared => declared as u64,
                    };
                    return Ok(Self {
                        channels: fmt.channels,
                        sample_width: fmt.sample_width,
                        frame_rate: fmt.frame_rate,
                        frame_count: data_len / frame_size,
                    });
                }
                _ => {}
            }

            // Chunks are word aligned.
            pos = body_start.saturating_add(size).saturating_add(size & 1);
        }

        Err(match format {
            None => malformed("fmt chunk missing"),
            Some(_) => malformed("data chunk missing"),
        })
    }

    /// Playback length in seconds.
    pub fn duration(&self) -> f64 {
        self.frame_count as f64 / f64::from(self.frame_rate)
    }

    pub fn to_attributes(&self) -> Attributes {
        let mut attrs = Attributes::new();
        attrs.insert("nchannels".into(), AttrValue::from(self.channels));
        attrs.insert("sampwidth".into(), AttrValue::from(self.sample_width));
        attrs.insert("framerate".into(), AttrValue::from(self.frame_rate));
        attrs.insert("nframes".into(), AttrValue::Int(self.frame_count as i64));
        attrs.insert("comptype".into(), AttrValue::from("NONE"));
        attrs.insert("compname".into(), AttrValue::from("not compressed"));
        attrs.insert(keys::DURATION.into(), AttrValue::Float(self.duration()));
        attrs
    }

    /// Render a PCM WAV file of silence with these parameters.
    pub fn silence(&self) -> Vec<u8> {
        let block_align = u32::from(self.channels) * u32::from(self.sample_width);
        let data_len = self.frame_count as usize * block_align as usize;
        let mut buf = Vec::with_capacity(44 + data_len);
        buf.extend_from_slice(b"RIFF");
        buf.extend_from_slice(&(36 + data_len as u32).to_le_bytes());
        buf.extend_from_slice(b"WAVE");
        buf.extend_from_slice(b"fmt ");
        buf.extend_from_slice(&16u32.to_le_bytes());
        buf.extend_from_slice(&WAVE_FORMAT_PCM.to_le_bytes());
        buf.extend_from_slice(&self.channels.to_le_bytes());
        buf.extend_from_slice(&self.frame_rate.to_le_bytes());
        buf.extend_from_slice(&(self.frame_rate * block_align).to_le_bytes());
        buf.extend_from_slice(&(block_align as u16).to_le_bytes());
        buf.extend_from_slice(&(self.sample_width * 8).to_le_bytes());
        buf.extend_from_slice(b"data");
        buf.extend_from_slice(&(data_len as u32).to_le_bytes());
        buf.resize(buf.len() + data_len, 0);
        buf
    }
}

#[derive(Clone, Copy, Debug)]
struct FmtChunk {
    channels: u16,
    sample_width: u16,
    frame_rate: u32,
}

impl FmtChunk {
    fn parse(body: &[u8]) -> MetaResult<Self> {
        let (Some(tag), Some(channels), Some(frame_rate), Some(bits)) = (
            u16_le(body, 0),
            u16_le(body, 2),
            u32_le(body, 4),
            u16_le(body, 14),
        ) else {
            return Err(malformed("fmt chunk too short"));
        };

        match tag {
            WAVE_FORMAT_PCM => {}
            WAVE_FORMAT_EXTENSIBLE => {
                if body.get(24..40) != Some(&PCM_SUBFORMAT[..]) {
                    return Err(malformed("unsupported extensible sub-format"));
                }
            }
            other => return Err(malformed(format!("unknown format: {other:#06x}"))),
        }
        if channels == 0 {
            return Err(malformed("bad # of channels"));
        }
        if bits == 0 {
            return Err(malformed("bad sample width"));
        }
        if frame_rate == 0 {
            return Err(malformed("bad frame rate"));
        }

        Ok(Self {
            channels,
            sample_width: bits.div_ceil(8),
            frame_rate,
        })
    }
}

fn malformed(reason: impl Into<String>) -> MetaError {
    MetaError::malformed(Format::Wav, reason)
}
