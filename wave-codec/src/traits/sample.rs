use std::fmt::Debug;

use crate::models::header::{FORMAT_IEEE_FLOAT, FORMAT_PCM};

/// Largest in-memory sample width supported by the codec, in bytes.
pub const MAX_SAMPLE_WIDTH: usize = 4;

/// In-memory storage type of a sample buffer.
///
/// Implemented for `i16`, `i32` (integer PCM) and `f32` (IEEE float).
/// Conversion to and from an arbitrary on-disk byte width goes through
/// [`sample_codec`](crate::processing::sample_codec), which works on the
/// little-endian word returned here.
pub trait Sample: Copy + Default + PartialEq + Debug + Send + 'static {
    /// Format code stamped into the header by `flush` for this type.
    const FORMAT_CODE: u16;

    /// Natural width of the type in bytes (at most [`MAX_SAMPLE_WIDTH`]).
    const WIDTH: usize;

    /// Little-endian bytes of the value, zero-filled past `WIDTH`.
    fn to_le_word(self) -> [u8; MAX_SAMPLE_WIDTH];

    /// Rebuild a value from the first `WIDTH` bytes of a little-endian word.
    fn from_le_word(word: [u8; MAX_SAMPLE_WIDTH]) -> Self;
}

impl Sample for i16 {
    const FORMAT_CODE: u16 = FORMAT_PCM;
    const WIDTH: usize = 2;

    fn to_le_word(self) -> [u8; MAX_SAMPLE_WIDTH] {
        let [b0, b1] = self.to_le_bytes();
        [b0, b1, 0, 0]
    }

    fn from_le_word(word: [u8; MAX_SAMPLE_WIDTH]) -> Self {
        i16::from_le_bytes([word[0], word[1]])
    }
}

impl Sample for i32 {
    const FORMAT_CODE: u16 = FORMAT_PCM;
    const WIDTH: usize = 4;

    fn to_le_word(self) -> [u8; MAX_SAMPLE_WIDTH] {
        self.to_le_bytes()
    }

    fn from_le_word(word: [u8; MAX_SAMPLE_WIDTH]) -> Self {
        i32::from_le_bytes(word)
    }
}

impl Sample for f32 {
    const FORMAT_CODE: u16 = FORMAT_IEEE_FLOAT;
    const WIDTH: usize = 4;

    fn to_le_word(self) -> [u8; MAX_SAMPLE_WIDTH] {
        self.to_le_bytes()
    }

    fn from_le_word(word: [u8; MAX_SAMPLE_WIDTH]) -> Self {
        f32::from_le_bytes(word)
    }
}
