//! Test-signal generation.
//!
//! Produces plain `Vec<f32>` buffers; the codec treats them as opaque input.
use std::f32::consts::PI;

/// Generate `secs` seconds of a sine at `frequency` Hz, scaled by `amplitude`.
///
/// Sample count is `floor(sample_rate * secs)`; phase starts at zero.
pub fn sine(secs: f32, frequency: u32, sample_rate: u32, amplitude: f32) -> Vec<f32> {
    if sample_rate == 0 || secs <= 0.0 {
        return Vec::new();
    }
    let total = (sample_rate as f32 * secs) as usize;
    let step = 2.0 * PI * frequency as f32 / sample_rate as f32;
    (0..total).map(|i| (i as f32 * step).sin() * amplitude).collect()
}

/// `secs` seconds of zero samples.
pub fn silence(secs: f32, sample_rate: u32) -> Vec<f32> {
    if secs <= 0.0 {
        return Vec::new();
    }
    vec![0.0; (sample_rate as f32 * secs) as usize]
}

/// Convert f32 samples `[-1.0, 1.0]` to 16-bit integers.
///
/// Clamps out-of-range values.
pub fn quantize_i16(samples: &[f32]) -> Vec<i16> {
    samples
        .iter()
        .map(|&sample| (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16)
        .collect()
}
