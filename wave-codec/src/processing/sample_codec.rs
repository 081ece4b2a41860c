//! Explicit conversion between in-memory samples and on-disk sample bytes.
//!
//! The on-disk width (`byte_depth`) need not match the storage type's width:
//! - writing a wider type keeps only its low-order `byte_depth` bytes;
//! - writing a narrower type pads the high-order bytes with zeros;
//! - reading is the mirror image: low-order bytes land in the value, missing
//!   high-order bytes are zero (no sign extension).
use crate::models::header::ByteOrder;
use crate::traits::sample::{Sample, MAX_SAMPLE_WIDTH};

/// Append `sample` to `out` using exactly `byte_depth` bytes in `order`.
pub fn encode_sample<T: Sample>(sample: T, byte_depth: usize, order: ByteOrder, out: &mut Vec<u8>) {
    let word = sample.to_le_word();
    let start = out.len();
    out.extend((0..byte_depth).map(|i| if i < T::WIDTH { word[i] } else { 0 }));
    if order == ByteOrder::Big {
        out[start..].reverse();
    }
}

/// Decode one sample from `bytes`, whose length is the on-disk width.
pub fn decode_sample<T: Sample>(bytes: &[u8], order: ByteOrder) -> T {
    let mut word = [0u8; MAX_SAMPLE_WIDTH];
    let kept = bytes.len().min(T::WIDTH);
    match order {
        ByteOrder::Little => word[..kept].copy_from_slice(&bytes[..kept]),
        ByteOrder::Big => {
            for (i, slot) in word.iter_mut().take(kept).enumerate() {
                *slot = bytes[bytes.len() - 1 - i];
            }
        }
    }
    T::from_le_word(word)
}

/// Encode a whole buffer, `byte_depth` bytes per sample.
pub fn encode_samples<T: Sample>(samples: &[T], byte_depth: usize, order: ByteOrder) -> Vec<u8> {
    let mut out = Vec::with_capacity(samples.len() * byte_depth);
    for &sample in samples {
        encode_sample(sample, byte_depth, order, &mut out);
    }
    out
}

/// Decode a payload of `byte_depth`-wide samples. Trailing bytes that do not
/// fill a whole sample are ignored.
pub fn decode_samples<T: Sample>(payload: &[u8], byte_depth: usize, order: ByteOrder) -> Vec<T> {
    if byte_depth == 0 {
        return Vec::new();
    }
    payload
        .chunks_exact(byte_depth)
        .map(|bytes| decode_sample(bytes, order))
        .collect()
}
