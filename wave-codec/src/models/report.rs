use std::fmt;

use serde::{Deserialize, Serialize};

use super::header::{FormatLayout, WaveHeader, TAG_DATA, TAG_FACT, TAG_FMT, TAG_WAVE};

/// Fact chunk fields as they appear in a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactReport {
    pub byte_count: u32,
    pub frame_rate: u32,
}

/// Human- and machine-readable snapshot of a [`WaveHeader`].
///
/// Purely observational: building or printing a report never touches the
/// header it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderReport {
    pub riff: String,
    pub file_byte_count: u32,
    pub wave: String,
    pub fmt: String,
    pub format_chunk_byte_count: u32,
    pub format_code: u16,
    pub channel_count: u16,
    pub sample_rate: u32,
    pub byte_rate: u32,
    pub frame_byte_count: u16,
    pub bit_depth: u16,
    pub extension_byte_count: Option<u16>,
    pub fact: Option<FactReport>,
    pub data: String,
    pub raw_byte_count: u32,
    pub sample_count: u32,
    /// Tags of every chunk consumed by the read, in order.
    pub chunks: Vec<String>,
}

/// One line of the field table: `[start, end], width, name: value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub start: usize,
    pub width: usize,
    pub name: &'static str,
    pub value: String,
}

impl HeaderReport {
    pub fn from_header(header: &WaveHeader) -> Self {
        let tag = |bytes: &[u8; 4]| String::from_utf8_lossy(bytes).into_owned();
        let extension_byte_count = match &header.layout {
            FormatLayout::Pcm => None,
            FormatLayout::Extensible(ext) => Some(ext.extension_byte_count),
        };

        Self {
            riff: tag(&header.riff_tag()),
            file_byte_count: header.file_byte_count,
            wave: tag(&TAG_WAVE),
            fmt: tag(&TAG_FMT),
            format_chunk_byte_count: header.format.byte_count,
            format_code: header.format.format_code,
            channel_count: header.format.channel_count,
            sample_rate: header.format.sample_rate,
            byte_rate: header.format.byte_rate,
            frame_byte_count: header.format.frame_byte_count,
            bit_depth: header.format.bit_depth,
            extension_byte_count,
            fact: header.fact.map(|fact| FactReport {
                byte_count: fact.byte_count,
                frame_rate: fact.frame_rate,
            }),
            data: tag(&TAG_DATA),
            raw_byte_count: header.raw_byte_count,
            sample_count: header.sample_count(),
            chunks: header.chunks.iter().map(|c| c.tag_str()).collect(),
        }
    }

    /// Field table in canonical layout order, with the offsets each field
    /// would occupy in a contiguous header.
    pub fn rows(&self) -> Vec<ReportRow> {
        let mut rows = Vec::new();
        let mut offset = 0;
        let mut push = |width: usize, name: &'static str, value: String| {
            rows.push(ReportRow {
                start: offset,
                width,
                name,
                value,
            });
            offset += width;
        };

        push(4, "ChunkID", self.riff.clone());
        push(4, "ChunkSize", self.file_byte_count.to_string());
        push(4, "Format", self.wave.clone());
        push(4, "Subchunk1ID", self.fmt.clone());
        push(4, "Subchunk1Size", self.format_chunk_byte_count.to_string());
        push(2, "AudioFormat", self.format_code.to_string());
        push(2, "NumChannels", self.channel_count.to_string());
        push(4, "SampleRate", self.sample_rate.to_string());
        push(4, "ByteRate", self.byte_rate.to_string());
        push(2, "BlockAlign", self.frame_byte_count.to_string());
        push(2, "BitsPerSample", self.bit_depth.to_string());
        if let Some(extension) = self.extension_byte_count {
            push(2, "ExtensionSize", extension.to_string());
        }
        if let Some(fact) = self.fact {
            push(4, "FactID", String::from_utf8_lossy(&TAG_FACT).into_owned());
            push(4, "FactSize", fact.byte_count.to_string());
            push(4, "FrameRate", fact.frame_rate.to_string());
        }
        push(4, "DataID", self.data.clone());
        push(4, "DataSize", self.raw_byte_count.to_string());

        rows
    }
}

impl fmt::Display for HeaderReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[start, end], byte, name: value")?;
        for row in self.rows() {
            writeln!(
                f,
                "[{}, {}], {}, {}: {}",
                row.start,
                row.start + row.width - 1,
                row.width,
                row.name,
                row.value
            )?;
        }
        writeln!(f, "samples: {}", self.sample_count)?;
        if !self.chunks.is_empty() {
            writeln!(f, "chunks: {}", self.chunks.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::header::{ExtensionFields, FactChunk, FORMAT_IEEE_FLOAT};

    fn pcm_header() -> WaveHeader {
        let mut header = WaveHeader::default();
        header.file_byte_count = 96044;
        header.format.byte_count = 16;
        header.format.format_code = 1;
        header.format.channel_count = 1;
        header.format.sample_rate = 48000;
        header.format.byte_rate = 96000;
        header.format.frame_byte_count = 2;
        header.format.bit_depth = 16;
        header.raw_byte_count = 96000;
        header
    }

    #[test]
    fn pcm_rows_match_44_byte_layout() {
        let report = HeaderReport::from_header(&pcm_header());
        let rows = report.rows();

        assert_eq!(rows.len(), 13);
        assert_eq!(rows[6].name, "NumChannels");
        assert_eq!(rows[6].start, 22);
        assert_eq!(rows[11].name, "DataID");
        assert_eq!(rows[11].start, 36);
        assert_eq!(rows[12].start + rows[12].width, 44);
        assert_eq!(report.sample_count, 48000);
    }

    #[test]
    fn extensible_rows_shift_data() {
        let mut header = pcm_header();
        header.format.format_code = FORMAT_IEEE_FLOAT;
        header.layout = FormatLayout::Extensible(ExtensionFields::default());
        header.fact = Some(FactChunk {
            byte_count: 4,
            frame_rate: 48000,
        });

        let rows = HeaderReport::from_header(&header).rows();
        let ext = rows.iter().find(|r| r.name == "ExtensionSize").unwrap();
        assert_eq!(ext.start, 36);
        let data = rows.iter().find(|r| r.name == "DataID").unwrap();
        assert_eq!(data.start, 50);
    }

    #[test]
    fn display_renders_table() {
        let text = HeaderReport::from_header(&pcm_header()).to_string();
        assert!(text.starts_with("[start, end], byte, name: value\n"));
        assert!(text.contains("[0, 3], 4, ChunkID: RIFF\n"));
        assert!(text.contains("[24, 27], 4, SampleRate: 48000\n"));
        assert!(text.contains("[40, 43], 4, DataSize: 96000\n"));
        assert!(text.contains("samples: 48000\n"));
    }

    #[test]
    fn serializes_to_json() {
        let report = HeaderReport::from_header(&pcm_header());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["sample_rate"], 48000);
        assert_eq!(json["riff"], "RIFF");
        assert!(json["fact"].is_null());
    }
}
