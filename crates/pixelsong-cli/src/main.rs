//! Pixelsong CLI - turn images into music
//!
//! Each pixel of a resized image becomes a short sine tone whose pitch follows
//! its brightness and whose volume follows its alpha.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use pixelsong_cli::commands;
use pixelsong_cli::commands::render::{OutputFormat, RenderOptions, MAX_IMAGES};
use pixelsong_cli::config::ConfigOverrides;
use pixelsong_core::scale::DEFAULT_POOL_SIZE;

/// Pixelsong - Image Sonification
#[derive(Parser)]
#[command(name = "pixelsong")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one audio file per input image
    Render {
        /// Image files to sonify (PNG or JPEG)
        #[arg(required = true, num_args = 1..=MAX_IMAGES)]
        inputs: Vec<String>,

        /// Output directory (default: current directory)
        #[arg(short, long)]
        out_dir: Option<String>,

        /// Audio format to write
        #[arg(short, long, default_value = "wav", value_parser = ["wav", "raw"])]
        format: String,

        /// Base seed for scale pool and selection (random if omitted)
        #[arg(short, long)]
        seed: Option<u32>,

        /// JSON config file with sonification settings
        #[arg(short, long)]
        config: Option<String>,

        /// Output sample rate in Hz
        #[arg(long)]
        sample_rate: Option<u32>,

        /// Tone length per pixel in seconds
        #[arg(long)]
        note_duration: Option<f64>,

        /// Resize images to SIZE x SIZE before sonifying
        #[arg(long)]
        size: Option<u32>,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Print the scale pool built from a seed
    Scales {
        /// Base seed
        #[arg(short, long, default_value_t = 0)]
        seed: u32,

        /// Number of scales in the pool
        #[arg(long, default_value_t = DEFAULT_POOL_SIZE)]
        pool_size: usize,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Render {
            inputs,
            out_dir,
            format,
            seed,
            config,
            sample_rate,
            note_duration,
            size,
            json,
        } => {
            let format = OutputFormat::parse(&format).expect("clap should have validated format");
            let options = RenderOptions {
                inputs,
                out_dir,
                format,
                seed,
                config,
                overrides: ConfigOverrides {
                    sample_rate,
                    note_duration,
                    size,
                },
            };
            commands::render::run(&options, json)
        }
        Commands::Scales {
            seed,
            pool_size,
            json,
        } => commands::scales::run(seed, pool_size, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
