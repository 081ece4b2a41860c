/// A four-byte chunk identifier.
pub type ChunkTag = [u8; 4];

pub const TAG_RIFF: ChunkTag = *b"RIFF";
pub const TAG_RIFX: ChunkTag = *b"RIFX";
pub const TAG_WAVE: ChunkTag = *b"WAVE";
pub const TAG_FMT: ChunkTag = *b"fmt ";
pub const TAG_FACT: ChunkTag = *b"fact";
pub const TAG_DATA: ChunkTag = *b"data";
pub const TAG_PEAK: ChunkTag = *b"PEAK";

/// Integer PCM.
pub const FORMAT_PCM: u16 = 1;
/// IEEE 754 floating point.
pub const FORMAT_IEEE_FLOAT: u16 = 3;

/// Size in bytes of the fixed PCM header emitted by the writer.
pub const PCM_HEADER_SIZE: usize = 44;

/// Size of the fmt chunk body for the plain PCM layout.
pub const PCM_FORMAT_CHUNK_SIZE: u32 = 16;

/// Byte order of every multi-byte field, resolved once from the container tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteOrder {
    /// "RIFF"
    #[default]
    Little,
    /// "RIFX"
    Big,
}

impl ByteOrder {
    /// Resolve the byte order from a container tag, if it is one.
    pub fn from_container_tag(tag: &ChunkTag) -> Option<Self> {
        match *tag {
            TAG_RIFF => Some(Self::Little),
            TAG_RIFX => Some(Self::Big),
            _ => None,
        }
    }

    pub fn container_tag(self) -> ChunkTag {
        match self {
            Self::Little => TAG_RIFF,
            Self::Big => TAG_RIFX,
        }
    }

    pub fn u16_from(self, bytes: [u8; 2]) -> u16 {
        match self {
            Self::Little => u16::from_le_bytes(bytes),
            Self::Big => u16::from_be_bytes(bytes),
        }
    }

    pub fn u32_from(self, bytes: [u8; 4]) -> u32 {
        match self {
            Self::Little => u32::from_le_bytes(bytes),
            Self::Big => u32::from_be_bytes(bytes),
        }
    }

    pub fn u16_bytes(self, value: u16) -> [u8; 2] {
        match self {
            Self::Little => value.to_le_bytes(),
            Self::Big => value.to_be_bytes(),
        }
    }

    pub fn u32_bytes(self, value: u32) -> [u8; 4] {
        match self {
            Self::Little => value.to_le_bytes(),
            Self::Big => value.to_be_bytes(),
        }
    }
}

/// The common body of a "fmt " chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormatChunk {
    /// Declared body size: 16 for PCM, larger for extensible formats.
    pub byte_count: u32,
    /// 1 = integer PCM, 3 = IEEE float.
    pub format_code: u16,
    pub channel_count: u16,
    pub sample_rate: u32,
    /// sample_rate * frame_byte_count
    pub byte_rate: u32,
    /// bytes_per_sample * channel_count
    pub frame_byte_count: u16,
    /// bytes_per_sample * 8
    pub bit_depth: u16,
}

impl FormatChunk {
    pub fn is_pcm(&self) -> bool {
        self.format_code == FORMAT_PCM
    }

    pub fn bytes_per_sample(&self) -> u16 {
        self.bit_depth / 8
    }

    /// Whether the fmt body carries an extension-size field after bit depth.
    pub fn has_extension(&self) -> bool {
        !self.is_pcm() && self.byte_count > PCM_FORMAT_CHUNK_SIZE
    }
}

/// Trailing fmt fields of a non-PCM format.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtensionFields {
    pub extension_byte_count: u16,
    /// The extension body, kept verbatim but never interpreted.
    pub extension: Vec<u8>,
}

/// Layout of the fmt chunk, selected by format code and fmt size.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormatLayout {
    #[default]
    Pcm,
    Extensible(ExtensionFields),
}

impl FormatLayout {
    pub fn is_extensible(&self) -> bool {
        matches!(self, Self::Extensible(_))
    }
}

/// Body of a "fact" chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactChunk {
    /// Always 4 for a supported fact chunk.
    pub byte_count: u32,
    pub frame_rate: u32,
}

/// One chunk observed while reading, in stream order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkRecord {
    pub tag: ChunkTag,
    /// Offset of the tag from the start of the stream.
    pub offset: usize,
    /// Declared body size; `None` for chunks whose size is implied.
    pub size: Option<u32>,
}

impl ChunkRecord {
    pub fn tag_str(&self) -> String {
        String::from_utf8_lossy(&self.tag).into_owned()
    }
}

/// Every field found in a RIFF/WAVE stream.
///
/// Only the [`Wave`](crate::Wave) codec and the chunk reader produce or
/// modify a header; everything else gets a shared reference.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WaveHeader {
    pub byte_order: ByteOrder,
    /// Header plus data, as declared by the container (or recomputed by flush).
    pub file_byte_count: u32,
    pub format: FormatChunk,
    pub layout: FormatLayout,
    pub fact: Option<FactChunk>,
    /// Size of the sample payload in bytes.
    pub raw_byte_count: u32,
    /// Chunks consumed by the last read, in order.
    pub chunks: Vec<ChunkRecord>,
}

impl WaveHeader {
    pub fn riff_tag(&self) -> ChunkTag {
        self.byte_order.container_tag()
    }

    /// Number of samples in the payload, across all channels.
    pub fn sample_count(&self) -> u32 {
        match self.format.bytes_per_sample() {
            0 => 0,
            width => self.raw_byte_count / width as u32,
        }
    }

    /// Records for every chunk with the given tag, in stream order.
    pub fn chunks_tagged<'a>(&'a self, tag: &'a ChunkTag) -> impl Iterator<Item = &'a ChunkRecord> + 'a {
        self.chunks.iter().filter(move |record| &record.tag == tag)
    }
}
