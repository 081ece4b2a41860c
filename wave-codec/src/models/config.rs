/// Target encoding for a [`Wave`](crate::Wave) codec.
///
/// `byte_depth` is fixed for the codec's lifetime. `sample_rate` and
/// `channel_count` are the starting values; a successful read replaces them
/// with the file's own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveConfig {
    /// Samples per second per channel (default: 48000).
    pub sample_rate: u32,

    /// Number of interleaved channels (default: 1). Must be non-zero.
    pub channel_count: u16,

    /// Bytes used for each sample on write (default: 2). Valid values: 1, 2, 3, 4.
    pub byte_depth: u16,
}

impl WaveConfig {
    pub fn new(sample_rate: u32, channel_count: u16, byte_depth: u16) -> Self {
        Self {
            sample_rate,
            channel_count,
            byte_depth,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.sample_rate == 0 {
            return Err("sample rate must be positive".into());
        }
        if self.channel_count == 0 {
            return Err("channel count must be positive".into());
        }
        if ![1, 2, 3, 4].contains(&self.byte_depth) {
            return Err(format!("unsupported byte depth: {}", self.byte_depth));
        }
        Ok(())
    }
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48000,
            channel_count: 1,
            byte_depth: 2,
        }
    }
}
