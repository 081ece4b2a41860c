//! Chunk-by-chunk parser for RIFF/WAVE byte streams.
//!
//! Walks the stream tag by tag, dispatching on the exact four-byte tag:
//!
//! ```text
//! "RIFF"/"RIFX"  container: file byte count, "WAVE"   (first chunk only)
//! "fmt "         format body, plus extension for non-PCM formats over 16 bytes
//! "fact"         fact byte count (must be 4), frame rate
//! "data"         raw byte count, then the samples      (ends the read)
//! "PEAK"         fixed 20 bytes, skipped
//! \0...          end of stream
//! anything else  u32 length + payload, skipped
//! ```
//!
//! Every field read is bounds-checked against the remaining bytes.
use crate::models::error::WaveError;
use crate::models::header::{
    ByteOrder, ChunkRecord, ChunkTag, ExtensionFields, FactChunk, FormatChunk, FormatLayout, WaveHeader,
    PCM_FORMAT_CHUNK_SIZE, TAG_DATA, TAG_FACT, TAG_FMT, TAG_PEAK, TAG_RIFF, TAG_WAVE,
};
use crate::processing::sample_buffer::SampleBuffer;
use crate::processing::sample_codec;
use crate::traits::sample::Sample;

/// Bytes skipped for a "PEAK" chunk, size field included.
pub const PEAK_CHUNK_SKIP: usize = 20;

/// Required body size of a "fact" chunk.
pub const FACT_BYTE_COUNT: u32 = 4;

/// Parse a complete WAVE stream held in memory.
pub fn read_wave<T: Sample>(bytes: &[u8]) -> Result<(WaveHeader, SampleBuffer<T>), WaveError> {
    ChunkReader::new(bytes).read()
}

/// Cursor over an in-memory WAVE stream.
pub struct ChunkReader<'a> {
    bytes: &'a [u8],
    pos: usize,
    order: ByteOrder,
}

impl<'a> ChunkReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            pos: 0,
            order: ByteOrder::Little,
        }
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Read the container and every chunk up to and including the first
    /// "data" chunk.
    pub fn read<T: Sample>(&mut self) -> Result<(WaveHeader, SampleBuffer<T>), WaveError> {
        let mut header = WaveHeader::default();
        self.read_container(&mut header)?;

        let mut samples = SampleBuffer::new();
        loop {
            let offset = self.pos;
            if self.bytes.get(offset) == Some(&0) {
                log::debug!("zero chunk tag at offset {}, stopping", offset);
                break;
            }

            let tag = self.read_tag("chunk tag")?;
            match tag {
                TAG_FMT => self.read_fmt(&mut header, offset)?,
                TAG_FACT => self.read_fact(&mut header, offset)?,
                TAG_DATA => {
                    samples = self.read_data(&mut header, offset)?;
                    break;
                }
                TAG_PEAK => self.skip_peak(&mut header, tag, offset)?,
                _ => self.skip_unknown(&mut header, tag, offset)?,
            }
        }

        Ok((header, samples))
    }

    fn read_container(&mut self, header: &mut WaveHeader) -> Result<(), WaveError> {
        let tag = self.read_tag("container tag")?;
        let order = ByteOrder::from_container_tag(&tag).ok_or_else(|| WaveError::malformed(&TAG_RIFF, &tag))?;
        log::debug!("reading {} container", String::from_utf8_lossy(&tag));

        self.order = order;
        header.byte_order = order;
        header.file_byte_count = self.read_u32("file byte count")?;

        let wave = self.read_tag("wave tag")?;
        if wave != TAG_WAVE {
            return Err(WaveError::malformed(&TAG_WAVE, &wave));
        }

        header.chunks.push(ChunkRecord {
            tag,
            offset: 0,
            size: Some(header.file_byte_count),
        });
        Ok(())
    }

    fn read_fmt(&mut self, header: &mut WaveHeader, offset: usize) -> Result<(), WaveError> {
        log::debug!("reading fmt chunk at offset {}", offset);
        if header.chunks_tagged(&TAG_FMT).next().is_some() {
            log::warn!("repeated fmt chunk at offset {}, replacing earlier format", offset);
        }

        let format = FormatChunk {
            byte_count: self.read_u32("fmt chunk size")?,
            format_code: self.read_u16("format code")?,
            channel_count: self.read_u16("channel count")?,
            sample_rate: self.read_u32("sample rate")?,
            byte_rate: self.read_u32("byte rate")?,
            frame_byte_count: self.read_u16("frame byte count")?,
            bit_depth: self.read_u16("bit depth")?,
        };

        let layout = if format.has_extension() {
            let extension_byte_count = self.read_u16("extension size")?;
            if extension_byte_count != 0 {
                log::debug!("skipping {} extension bytes", extension_byte_count);
            }
            let extension = self.take("extension", extension_byte_count as usize)?.to_vec();
            FormatLayout::Extensible(ExtensionFields {
                extension_byte_count,
                extension,
            })
        } else {
            if format.byte_count > PCM_FORMAT_CHUNK_SIZE {
                let trailing = (format.byte_count - PCM_FORMAT_CHUNK_SIZE) as usize;
                log::debug!("skipping {} trailing fmt bytes", trailing);
                self.take("fmt trailing bytes", trailing)?;
            }
            FormatLayout::Pcm
        };

        header.chunks.push(ChunkRecord {
            tag: TAG_FMT,
            offset,
            size: Some(format.byte_count),
        });
        header.format = format;
        header.layout = layout;
        Ok(())
    }

    fn read_fact(&mut self, header: &mut WaveHeader, offset: usize) -> Result<(), WaveError> {
        log::debug!("reading fact chunk at offset {}", offset);
        let byte_count = self.read_u32("fact chunk size")?;
        let frame_rate = self.read_u32("frame rate")?;
        if byte_count != FACT_BYTE_COUNT {
            return Err(WaveError::UnsupportedFact { found: byte_count });
        }

        header.chunks.push(ChunkRecord {
            tag: TAG_FACT,
            offset,
            size: Some(byte_count),
        });
        header.fact = Some(FactChunk { byte_count, frame_rate });
        Ok(())
    }

    fn read_data<T: Sample>(&mut self, header: &mut WaveHeader, offset: usize) -> Result<SampleBuffer<T>, WaveError> {
        log::debug!("reading data chunk at offset {}", offset);
        let raw_byte_count = self.read_u32("data chunk size")?;

        let bytes_per_sample = header.format.bytes_per_sample();
        if bytes_per_sample == 0 {
            return Err(WaveError::MissingFormat {
                bit_depth: header.format.bit_depth,
            });
        }
        if raw_byte_count % bytes_per_sample as u32 != 0 {
            return Err(WaveError::MisalignedData {
                raw_byte_count,
                bytes_per_sample,
            });
        }

        let payload = self.take("sample data", raw_byte_count as usize)?;
        let samples = sample_codec::decode_samples::<T>(payload, bytes_per_sample as usize, self.order);

        header.chunks.push(ChunkRecord {
            tag: TAG_DATA,
            offset,
            size: Some(raw_byte_count),
        });
        header.raw_byte_count = raw_byte_count;
        Ok(SampleBuffer::from(samples))
    }

    fn skip_peak(&mut self, header: &mut WaveHeader, tag: ChunkTag, offset: usize) -> Result<(), WaveError> {
        log::debug!("skipping PEAK chunk at offset {}", offset);
        self.take("PEAK chunk", PEAK_CHUNK_SKIP)?;
        header.chunks.push(ChunkRecord { tag, offset, size: None });
        Ok(())
    }

    fn skip_unknown(&mut self, header: &mut WaveHeader, tag: ChunkTag, offset: usize) -> Result<(), WaveError> {
        let size = self.read_u32("chunk size")?;
        log::debug!(
            "skipping unknown chunk {:?} at offset {} ({} bytes)",
            String::from_utf8_lossy(&tag),
            offset,
            size
        );
        self.take("chunk payload", size as usize)?;
        header.chunks.push(ChunkRecord {
            tag,
            offset,
            size: Some(size),
        });
        Ok(())
    }

    fn take(&mut self, field: &'static str, count: usize) -> Result<&'a [u8], WaveError> {
        let available = self.bytes.len() - self.pos;
        if count > available {
            return Err(WaveError::TruncatedStream {
                field,
                needed: count,
                available,
            });
        }
        let bytes: &'a [u8] = self.bytes;
        let slice = &bytes[self.pos..self.pos + count];
        self.pos += count;
        Ok(slice)
    }

    fn read_tag(&mut self, field: &'static str) -> Result<ChunkTag, WaveError> {
        let bytes = self.take(field, 4)?;
        Ok([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    fn read_u16(&mut self, field: &'static str) -> Result<u16, WaveError> {
        let bytes = self.take(field, 2)?;
        Ok(self.order.u16_from([bytes[0], bytes[1]]))
    }

    fn read_u32(&mut self, field: &'static str) -> Result<u32, WaveError> {
        let bytes = self.take(field, 4)?;
        Ok(self.order.u32_from([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
}
