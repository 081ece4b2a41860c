use std::path::Path;

use anyhow::{Context, Result};
use wave_codec::models::header::FORMAT_IEEE_FLOAT;
use wave_codec::processing::synth;
use wave_codec::storage::report_sidecar;
use wave_codec::{Wave, WaveConfig};

/// Parameters of the `sine` subcommand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SineOptions {
    pub seconds: f32,
    pub frequency: u32,
    pub sample_rate: u32,
    pub amplitude: f32,
    pub float: bool,
}

/// Read `path` and print its header report.
pub fn info(path: &Path, json: bool, sidecar: bool) -> Result<()> {
    // The sample type only matters for decoding; the header is the same.
    let mut wave = Wave::<i32>::new(WaveConfig::new(48000, 1, 4))?;
    wave.read(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let report = wave.report();
    if json {
        println!("{}", report_sidecar::to_json(&report)?);
    } else {
        print!("{}", report);
    }

    if sidecar {
        let written = report_sidecar::write_report(&report, path)?;
        log::info!("wrote {}", written.display());
    }
    Ok(())
}

/// Synthesize a sine tone and write it to `out`.
pub fn sine(out: &Path, options: SineOptions) -> Result<()> {
    let tone = synth::sine(options.seconds, options.frequency, options.sample_rate, options.amplitude);
    log::debug!("synthesized {} samples", tone.len());

    let summary = if options.float {
        let mut wave = Wave::<f32>::new(WaveConfig::new(options.sample_rate, 1, 4))?;
        wave.set_samples(tone);
        wave.flush()?;
        wave.write(out)?
    } else {
        let mut wave = Wave::<i16>::new(WaveConfig::new(options.sample_rate, 1, 2))?;
        wave.set_samples(synth::quantize_i16(&tone));
        wave.flush()?;
        wave.write(out)?
    };

    println!("{} ({} bytes, sha256 {})", out.display(), summary.bytes_written, summary.checksum);
    Ok(())
}

/// Read `input`, recompute its header and write it to `output`.
///
/// Samples keep their stored width and bits; extension and fact chunks are
/// dropped.
pub fn copy(input: &Path, output: &Path) -> Result<()> {
    // i32 holds any stored width up to 4 bytes without loss.
    let mut source = Wave::<i32>::new(WaveConfig::new(48000, 1, 4))?;
    source
        .read(input)
        .with_context(|| format!("failed to read {}", input.display()))?;

    let format = source.header().format;
    let config = WaveConfig::new(source.sample_rate(), source.channel_count(), format.bytes_per_sample());

    let summary = if format.format_code == FORMAT_IEEE_FLOAT {
        let mut wave = Wave::<f32>::new(config)?;
        wave.set_samples(source.samples().iter().map(|&s| f32::from_bits(s as u32)).collect::<Vec<_>>());
        wave.flush()?;
        wave.write(output)?
    } else {
        let mut wave = Wave::<i32>::new(config)?;
        wave.set_samples(source.samples().clone());
        wave.flush()?;
        wave.write(output)?
    };

    println!("{} -> {} ({} bytes)", input.display(), output.display(), summary.bytes_written);
    Ok(())
}
