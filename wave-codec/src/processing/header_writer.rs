//! Header reconciliation and serialization.
//!
//! The writer always emits the fixed 44-byte layout:
//! ```text
//! [0-3]    "RIFF" (or "RIFX")
//! [4-7]    file byte count
//! [8-11]   "WAVE"
//! [12-15]  "fmt "
//! [16-19]  format chunk byte count
//! [20-21]  format code
//! [22-23]  channel count
//! [24-27]  sample rate
//! [28-31]  byte rate = sample rate * frame byte count
//! [32-33]  frame byte count = byte depth * channel count
//! [34-35]  bit depth = byte depth * 8
//! [36-39]  "data"
//! [40-43]  raw byte count
//! ```
//! followed by the samples, `byte_depth` bytes each.
use std::io::Write;

use crate::models::config::WaveConfig;
use crate::models::error::WaveError;
use crate::models::header::{
    FormatLayout, WaveHeader, PCM_FORMAT_CHUNK_SIZE, PCM_HEADER_SIZE, TAG_DATA, TAG_FMT, TAG_WAVE,
};
use crate::processing::sample_codec;
use crate::traits::sample::Sample;

/// Recompute every size-dependent header field for `sample_count` samples of
/// type `T`, encoded with the configuration's byte depth.
///
/// The result always describes the plain 44-byte layout: extension and fact
/// data from a previously read file are dropped.
pub fn flush<T: Sample>(header: &mut WaveHeader, config: &WaveConfig, sample_count: usize) -> Result<(), WaveError> {
    let byte_depth = config.byte_depth;

    let raw_byte_count = sample_count as u64 * byte_depth as u64;
    let file_byte_count = PCM_HEADER_SIZE as u64 + raw_byte_count;
    if file_byte_count > u32::MAX as u64 {
        return Err(WaveError::PayloadTooLarge { raw_byte_count });
    }

    let frame_byte_count = byte_depth
        .checked_mul(config.channel_count)
        .ok_or_else(|| WaveError::InvalidConfiguration("frame byte count overflows 16 bits".into()))?;
    let byte_rate = config
        .sample_rate
        .checked_mul(frame_byte_count as u32)
        .ok_or_else(|| WaveError::InvalidConfiguration("byte rate overflows 32 bits".into()))?;

    if header.layout.is_extensible() || header.fact.is_some() {
        log::debug!("flush drops extension and fact data, writing the 44-byte layout");
    }

    let format = &mut header.format;
    format.byte_count = PCM_FORMAT_CHUNK_SIZE;
    format.format_code = T::FORMAT_CODE;
    format.sample_rate = config.sample_rate;
    format.channel_count = config.channel_count;
    format.bit_depth = byte_depth * 8;
    format.frame_byte_count = frame_byte_count;
    format.byte_rate = byte_rate;

    header.layout = FormatLayout::Pcm;
    header.fact = None;
    header.raw_byte_count = raw_byte_count as u32;
    header.file_byte_count = file_byte_count as u32;
    Ok(())
}

/// Serialize the 44 header bytes, honoring the header's byte order.
pub fn encode_header(header: &WaveHeader) -> [u8; PCM_HEADER_SIZE] {
    let order = header.byte_order;
    let format = &header.format;
    let mut bytes = [0u8; PCM_HEADER_SIZE];

    // RIFF descriptor
    bytes[0..4].copy_from_slice(&header.riff_tag());
    bytes[4..8].copy_from_slice(&order.u32_bytes(header.file_byte_count));
    bytes[8..12].copy_from_slice(&TAG_WAVE);

    // fmt
    bytes[12..16].copy_from_slice(&TAG_FMT);
    // No room for an extension in this layout, whatever the header says.
    bytes[16..20].copy_from_slice(&order.u32_bytes(PCM_FORMAT_CHUNK_SIZE));
    bytes[20..22].copy_from_slice(&order.u16_bytes(format.format_code));
    bytes[22..24].copy_from_slice(&order.u16_bytes(format.channel_count));
    bytes[24..28].copy_from_slice(&order.u32_bytes(format.sample_rate));
    bytes[28..32].copy_from_slice(&order.u32_bytes(format.byte_rate));
    bytes[32..34].copy_from_slice(&order.u16_bytes(format.frame_byte_count));
    bytes[34..36].copy_from_slice(&order.u16_bytes(format.bit_depth));

    // data
    bytes[36..40].copy_from_slice(&TAG_DATA);
    bytes[40..44].copy_from_slice(&order.u32_bytes(header.raw_byte_count));

    bytes
}

/// Header followed by every sample encoded at `byte_depth` bytes.
pub fn encode_wave<T: Sample>(header: &WaveHeader, samples: &[T], byte_depth: u16) -> Vec<u8> {
    let payload = sample_codec::encode_samples(samples, byte_depth as usize, header.byte_order);
    let mut bytes = Vec::with_capacity(PCM_HEADER_SIZE + payload.len());
    bytes.extend_from_slice(&encode_header(header));
    bytes.extend_from_slice(&payload);
    bytes
}

/// Write the encoded stream to `destination`; returns the bytes written.
pub fn write_wave<T: Sample, W: Write>(
    header: &WaveHeader,
    samples: &[T],
    byte_depth: u16,
    mut destination: W,
) -> Result<usize, WaveError> {
    let bytes = encode_wave(header, samples, byte_depth);
    destination
        .write_all(&bytes)
        .map_err(|e| WaveError::WriteFailed(format!("write failed: {}", e)))?;
    destination
        .flush()
        .map_err(|e| WaveError::WriteFailed(format!("flush failed: {}", e)))?;
    Ok(bytes.len())
}
