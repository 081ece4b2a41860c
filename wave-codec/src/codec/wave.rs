use std::io::{Read, Write};
use std::path::Path;

use crate::models::config::WaveConfig;
use crate::models::error::WaveError;
use crate::models::header::{WaveHeader, PCM_FORMAT_CHUNK_SIZE};
use crate::models::report::HeaderReport;
use crate::processing::chunk_reader;
use crate::processing::header_writer;
use crate::processing::sample_buffer::SampleBuffer;
use crate::storage::wave_file::{self, WaveFileWriter, WriteSummary};
use crate::traits::sample::Sample;

/// WAVE codec for samples stored as `T`.
///
/// Lifecycle:
/// ```text
/// new(config) → read()            → flush() → write()
///             → samples_mut() ... ↗
/// ```
///
/// `read` replaces the header and buffer only when the whole stream parses.
/// `flush` must run before `write` whenever the sample rate, channel count or
/// buffer contents changed since the last read or flush.
///
/// A `Wave` is not synchronized; share it across threads behind a lock.
#[derive(Debug, Clone)]
pub struct Wave<T: Sample> {
    sample_rate: u32,
    channel_count: u16,
    byte_depth: u16,
    header: WaveHeader,
    samples: SampleBuffer<T>,
}

impl<T: Sample> Wave<T> {
    pub fn new(config: WaveConfig) -> Result<Self, WaveError> {
        config.validate().map_err(WaveError::InvalidConfiguration)?;
        Ok(Self {
            sample_rate: config.sample_rate,
            channel_count: config.channel_count,
            byte_depth: config.byte_depth,
            header: WaveHeader::default(),
            samples: SampleBuffer::new(),
        })
    }

    /// Current encoding parameters.
    pub fn config(&self) -> WaveConfig {
        WaveConfig::new(self.sample_rate, self.channel_count, self.byte_depth)
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channel_count(&self) -> u16 {
        self.channel_count
    }

    pub fn byte_depth(&self) -> u16 {
        self.byte_depth
    }

    pub fn header(&self) -> &WaveHeader {
        &self.header
    }

    pub fn samples(&self) -> &SampleBuffer<T> {
        &self.samples
    }

    /// Mutable access for filling the buffer externally (e.g. from synthesis).
    pub fn samples_mut(&mut self) -> &mut SampleBuffer<T> {
        &mut self.samples
    }

    pub fn set_samples(&mut self, samples: impl Into<SampleBuffer<T>>) {
        self.samples = samples.into();
    }

    pub fn report(&self) -> HeaderReport {
        HeaderReport::from_header(&self.header)
    }

    /// Whether the header describes the current buffer in the 44-byte layout.
    pub fn is_flushed(&self) -> bool {
        let format = &self.header.format;
        self.header.raw_byte_count as u64 == self.samples.count() as u64 * self.byte_depth as u64
            && format.sample_rate == self.sample_rate
            && format.channel_count == self.channel_count
            && format.bit_depth == self.byte_depth * 8
            && format.byte_count == PCM_FORMAT_CHUNK_SIZE
            && format.format_code == T::FORMAT_CODE
            && !self.header.layout.is_extensible()
            && self.header.fact.is_none()
    }

    /// Read a WAVE file from disk.
    pub fn read(&mut self, path: impl AsRef<Path>) -> Result<(), WaveError> {
        let path = path.as_ref();
        log::debug!("reading {}", path.display());
        let bytes = wave_file::read_source(path)?;
        self.read_bytes(&bytes)
    }

    /// Read a WAVE stream from any byte source.
    pub fn read_from<R: Read>(&mut self, reader: R) -> Result<(), WaveError> {
        let bytes = wave_file::read_stream(reader)?;
        self.read_bytes(&bytes)
    }

    /// Parse an in-memory WAVE stream.
    ///
    /// On success the codec adopts the stream's sample rate and channel
    /// count; the byte depth used for writing does not change.
    pub fn read_bytes(&mut self, bytes: &[u8]) -> Result<(), WaveError> {
        let (header, samples) = chunk_reader::read_wave::<T>(bytes)?;

        if header.format.sample_rate != 0 {
            self.sample_rate = header.format.sample_rate;
        }
        if header.format.channel_count != 0 {
            self.channel_count = header.format.channel_count;
        }
        let file_depth = header.format.bytes_per_sample();
        if file_depth != 0 && file_depth != self.byte_depth {
            log::warn!(
                "stream stores {}-byte samples, codec writes {}-byte samples",
                file_depth,
                self.byte_depth
            );
        }

        log::info!(
            "read {} samples ({} Hz, {} ch, {} bit, format {})",
            samples.count(),
            header.format.sample_rate,
            header.format.channel_count,
            header.format.bit_depth,
            header.format.format_code
        );
        self.header = header;
        self.samples = samples;
        Ok(())
    }

    /// Reconcile the header with the buffer and encoding parameters.
    pub fn flush(&mut self) -> Result<(), WaveError> {
        let config = self.config();
        header_writer::flush::<T>(&mut self.header, &config, self.samples.count())
    }

    /// Write header and samples to a file.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<WriteSummary, WaveError> {
        self.warn_if_stale();
        let mut writer = WaveFileWriter::create(path.as_ref())?;
        header_writer::write_wave(&self.header, self.samples.as_slice(), self.byte_depth, &mut writer)?;
        let summary = writer.close()?;
        log::info!(
            "wrote {} bytes to {} (sha256 {})",
            summary.bytes_written,
            summary.file_path.display(),
            summary.checksum
        );
        Ok(summary)
    }

    /// Write header and samples to any byte sink; returns the bytes written.
    pub fn write_to<W: Write>(&self, destination: W) -> Result<usize, WaveError> {
        self.warn_if_stale();
        header_writer::write_wave(&self.header, self.samples.as_slice(), self.byte_depth, destination)
    }

    fn warn_if_stale(&self) {
        if !self.is_flushed() {
            log::warn!("writing a header that does not match the buffer; call flush() first");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::header::{FormatLayout, FORMAT_IEEE_FLOAT, FORMAT_PCM};
    use crate::processing::synth;
    use approx::assert_relative_eq;

    fn written<T: Sample>(wave: &Wave<T>) -> Vec<u8> {
        let mut out = Vec::new();
        wave.write_to(&mut out).unwrap();
        out
    }

    /// fmt of 18 bytes (IEEE float), fact, one 0.75 sample.
    fn float_extensible_stream() -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"RIFF");
        bytes.extend_from_slice(&0u32.to_le_bytes());
        bytes.extend_from_slice(b"WAVE");
        bytes.extend_from_slice(b"fmt ");
        bytes.extend_from_slice(&18u32.to_le_bytes());
        bytes.extend_from_slice(&FORMAT_IEEE_FLOAT.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes());
        bytes.extend_from_slice(&8000u32.to_le_bytes());
        bytes.extend_from_slice(&32000u32.to_le_bytes());
        bytes.extend_from_slice(&4u16.to_le_bytes());
        bytes.extend_from_slice(&32u16.to_le_bytes());
        bytes.extend_from_slice(&0u16.to_le_bytes());
        bytes.extend_from_slice(b"fact");
        bytes.extend_from_slice(&4u32.to_le_bytes());
        bytes.extend_from_slice(&1u32.to_le_bytes());
        bytes.extend_from_slice(b"data");
        bytes.extend_from_slice(&4u32.to_le_bytes());
        bytes.extend_from_slice(&0.75f32.to_le_bytes());
        bytes
    }

    #[test]
    fn rejects_invalid_config() {
        let err = Wave::<i16>::new(WaveConfig::new(48000, 1, 7)).unwrap_err();
        assert_eq!(err, WaveError::InvalidConfiguration("unsupported byte depth: 7".into()));
    }

    #[test]
    fn one_second_of_silence() {
        let mut wave = Wave::<i16>::new(WaveConfig::new(48000, 1, 2)).unwrap();
        wave.set_samples(vec![0i16; 48000]);
        wave.flush().unwrap();

        assert_eq!(wave.header().raw_byte_count, 96000);
        assert_eq!(wave.header().file_byte_count, 96044);
        assert_eq!(wave.header().sample_count(), 48000);
        assert!(wave.is_flushed());
        assert_eq!(written(&wave).len(), 96044);
    }

    #[test]
    fn round_trip_i16_at_both_depths() {
        let source: Vec<i16> = vec![0, 1, -1, i16::MAX, i16::MIN, 1234, -4321];
        for depth in [2u16, 4] {
            let mut wave = Wave::<i16>::new(WaveConfig::new(22050, 1, depth)).unwrap();
            wave.set_samples(source.clone());
            wave.flush().unwrap();
            let bytes = written(&wave);

            let mut back = Wave::<i16>::new(WaveConfig::new(8000, 2, depth)).unwrap();
            back.read_bytes(&bytes).unwrap();

            assert_eq!(back.header().format.sample_rate, 22050);
            assert_eq!(back.header().format.channel_count, 1);
            assert_eq!(back.header().format.bit_depth, depth * 8);
            assert_eq!(back.header().sample_count(), source.len() as u32);
            assert_eq!(back.samples().as_slice(), source.as_slice());
            assert_eq!(back.sample_rate(), 22050);
            assert_eq!(back.channel_count(), 1);
        }
    }

    #[test]
    fn round_trip_float_sine() {
        let sine = synth::sine(0.01, 440, 48000, 0.8);
        let mut wave = Wave::<f32>::new(WaveConfig::new(48000, 1, 4)).unwrap();
        wave.set_samples(sine.clone());
        wave.flush().unwrap();
        assert_eq!(wave.header().format.format_code, FORMAT_IEEE_FLOAT);

        let mut back = Wave::<f32>::new(WaveConfig::new(48000, 1, 4)).unwrap();
        back.read_bytes(&written(&wave)).unwrap();
        assert_eq!(back.samples().count(), sine.len());
        for (a, b) in back.samples().iter().zip(&sine) {
            assert_relative_eq!(*a, *b);
        }
    }

    #[test]
    fn failed_read_leaves_codec_untouched() {
        let mut wave = Wave::<i16>::new(WaveConfig::new(48000, 1, 2)).unwrap();
        wave.set_samples(vec![5, 6, 7]);
        wave.flush().unwrap();
        let mut bytes = written(&wave);
        bytes[8..12].copy_from_slice(b"WAVX");

        let mut fresh = Wave::<i16>::new(WaveConfig::default()).unwrap();
        assert!(matches!(
            fresh.read_bytes(&bytes),
            Err(WaveError::MalformedContainer { .. })
        ));
        assert!(fresh.samples().is_empty());
        assert_eq!(fresh.header(), &WaveHeader::default());
    }

    #[test]
    fn reading_float_extensible_then_flushing_downgrades() {
        let bytes = float_extensible_stream();

        let mut wave = Wave::<f32>::new(WaveConfig::new(48000, 2, 4)).unwrap();
        wave.read_bytes(&bytes).unwrap();
        assert!(wave.header().layout.is_extensible());
        assert!(wave.header().fact.is_some());
        assert_eq!(wave.sample_rate(), 8000);

        wave.flush().unwrap();
        assert_eq!(wave.header().layout, FormatLayout::Pcm);
        assert!(wave.header().fact.is_none());

        let out = written(&wave);
        assert_eq!(out.len(), 48);
        let mut back = Wave::<f32>::new(WaveConfig::new(48000, 1, 4)).unwrap();
        back.read_bytes(&out).unwrap();
        assert_eq!(back.samples().as_slice(), &[0.75]);
        assert_eq!(back.header().format.format_code, FORMAT_IEEE_FLOAT);
    }

    #[test]
    fn writing_extensible_read_without_flush_stays_readable() {
        let mut wave = Wave::<f32>::new(WaveConfig::new(8000, 1, 4)).unwrap();
        wave.read_bytes(&float_extensible_stream()).unwrap();
        assert!(!wave.is_flushed());

        let out = written(&wave);
        assert_eq!(u32::from_le_bytes([out[16], out[17], out[18], out[19]]), 16);

        let mut back = Wave::<f32>::new(WaveConfig::new(8000, 1, 4)).unwrap();
        back.read_bytes(&out).unwrap();
        assert_eq!(back.samples().as_slice(), &[0.75]);
        assert!(!back.header().layout.is_extensible());
    }

    #[test]
    fn plain_pcm_read_counts_as_flushed() {
        let mut wave = Wave::<i16>::new(WaveConfig::new(8000, 1, 2)).unwrap();
        wave.set_samples(vec![3, -3]);
        wave.flush().unwrap();

        let mut back = Wave::<i16>::new(WaveConfig::default()).unwrap();
        back.read_bytes(&written(&wave)).unwrap();
        assert!(back.is_flushed());
    }

    #[test]
    fn twelve_channel_stream_round_trips() {
        let mut wave = Wave::<i16>::new(WaveConfig::new(48000, 12, 2)).unwrap();
        wave.set_samples((0..24).collect::<Vec<i16>>());
        wave.flush().unwrap();

        let mut back = Wave::<i16>::new(WaveConfig::default()).unwrap();
        back.read_bytes(&written(&wave)).unwrap();
        assert_eq!(back.channel_count(), 12);
        assert_eq!(back.header().format.frame_byte_count, 24);
        assert_eq!(back.samples().count(), 24);
    }

    #[test]
    fn flush_tracks_buffer_changes() {
        let mut wave = Wave::<i16>::new(WaveConfig::new(44100, 2, 2)).unwrap();
        wave.samples_mut().write(&[1, 2, 3, 4]);
        assert!(!wave.is_flushed());
        wave.flush().unwrap();
        assert_eq!(wave.header().format.format_code, FORMAT_PCM);
        assert_eq!(wave.header().format.byte_rate, 44100 * 4);
        assert_eq!(wave.header().raw_byte_count, 8);

        wave.samples_mut().push(5);
        assert!(!wave.is_flushed());
        wave.flush().unwrap();
        assert_eq!(wave.header().raw_byte_count, 10);
    }

    #[test]
    fn report_reflects_header() {
        let mut wave = Wave::<i16>::new(WaveConfig::default()).unwrap();
        wave.set_samples(vec![0i16; 10]);
        wave.flush().unwrap();
        let report = wave.report();
        assert_eq!(report.sample_count, 10);
        assert_eq!(report.file_byte_count, 64);
    }
}
