//! # wave-codec
//!
//! RIFF/WAVE chunk reader and header writer.
//!
//! Parses a WAVE stream chunk by chunk into a [`WaveHeader`] and a typed
//! [`SampleBuffer`], and writes a buffer back out behind a recomputed
//! 44-byte header. Unknown chunks are skipped; "RIFX" streams are read
//! big-endian.
//!
//! ## Architecture
//!
//! ```text
//! wave-codec (this crate)
//! ├── codec/       ← Wave<T> (read → flush → write lifecycle)
//! ├── models/      ← WaveError, WaveConfig, WaveHeader, HeaderReport
//! ├── processing/  ← ChunkReader, header writer, sample conversion, SampleBuffer, synthesis
//! ├── storage/     ← file source/destination, JSON report sidecar
//! └── traits/      ← Sample
//! ```
//!
//! ## Usage
//! ```no_run
//! use wave_codec::{Wave, WaveConfig};
//!
//! let mut wave = Wave::<i16>::new(WaveConfig::new(48000, 1, 2))?;
//! wave.read("in.wav")?;
//! wave.flush()?;
//! wave.write("out.wav")?;
//! # Ok::<(), wave_codec::WaveError>(())
//! ```

pub mod codec;
pub mod models;
pub mod processing;
pub mod storage;
pub mod traits;

// Re-export key types at crate root for convenience.
pub use codec::wave::Wave;
pub use models::config::WaveConfig;
pub use models::error::WaveError;
pub use models::header::{
    ByteOrder, ChunkRecord, ChunkTag, ExtensionFields, FactChunk, FormatChunk, FormatLayout, WaveHeader,
};
pub use models::report::{FactReport, HeaderReport};
pub use processing::chunk_reader::{read_wave, ChunkReader};
pub use processing::sample_buffer::SampleBuffer;
pub use storage::wave_file::WriteSummary;
pub use traits::sample::Sample;
