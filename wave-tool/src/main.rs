//! wave-tool: command-line front end for wave-codec.

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Work with RIFF/WAVE files from the command line.
#[derive(Parser, Debug)]
#[command(name = "wave-tool")]
#[command(about = "Work with RIFF/WAVE files from the command line")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Print the header fields of a WAVE file
    Info {
        /// File to inspect
        path: PathBuf,

        /// Print the report as JSON instead of a field table
        #[arg(long)]
        json: bool,

        /// Also write the report as a `.header.json` sidecar
        #[arg(long)]
        sidecar: bool,
    },

    /// Write a sine tone
    Sine {
        /// Output file
        out: PathBuf,

        /// Duration in seconds
        #[arg(long, default_value_t = 5.0)]
        seconds: f32,

        /// Tone frequency in Hz
        #[arg(long, default_value_t = 200)]
        frequency: u32,

        /// Sample rate in Hz
        #[arg(long, default_value_t = 48000)]
        sample_rate: u32,

        /// Peak amplitude, 0.0 to 1.0
        #[arg(long, default_value_t = 1.0)]
        amplitude: f32,

        /// Write 32-bit IEEE float instead of 16-bit PCM
        #[arg(long)]
        float: bool,
    },

    /// Read a file and write it back with a recomputed 44-byte header
    Copy {
        /// Source file
        input: PathBuf,

        /// Destination file
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    match args.command {
        Command::Info { path, json, sidecar } => commands::info(&path, json, sidecar),
        Command::Sine {
            out,
            seconds,
            frequency,
            sample_rate,
            amplitude,
            float,
        } => commands::sine(
            &out,
            commands::SineOptions {
                seconds,
                frequency,
                sample_rate,
                amplitude,
                float,
            },
        ),
        Command::Copy { input, output } => commands::copy(&input, &output),
    }
}
