//! Render command implementation
//!
//! Decodes each image, resizes it to the configured resolution, sonifies it
//! and writes the audio next to the other outputs of the run.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use colored::Colorize;
use pixelsong_core::rng::create_image_rng;
use pixelsong_core::Sonifier;
use rand::Rng;

use super::json_output::{error_codes, JsonError, RenderOutput, RenderedFile};
use crate::config::{ConfigOverrides, RenderConfig};
use crate::input::{image_stem, load_image};

/// Most images accepted by one run.
pub const MAX_IMAGES: usize = 10;

/// Audio container written for each image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// 16-bit mono WAV.
    Wav,
    /// Headerless signed 16-bit little-endian PCM.
    Raw,
}

impl OutputFormat {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "wav" => Some(Self::Wav),
            "raw" => Some(Self::Raw),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Wav => "wav",
            Self::Raw => "raw",
        }
    }
}

/// Options for one `render` invocation.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub inputs: Vec<String>,
    pub out_dir: Option<String>,
    pub format: OutputFormat,
    pub seed: Option<u32>,
    pub config: Option<String>,
    pub overrides: ConfigOverrides,
}

/// Run the render command
///
/// # Returns
/// Exit code: 0 if every image was rendered, 1 otherwise
pub fn run(options: &RenderOptions, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(options)
    } else {
        run_human(options)
    }
}

/// Run render with human-readable (colored) output
fn run_human(options: &RenderOptions) -> Result<ExitCode> {
    let start = Instant::now();
    check_input_count(options.inputs.len())?;

    let config = RenderConfig::resolve(options.config.as_deref(), &options.overrides)?;
    let seed = options.seed.unwrap_or_else(|| rand::thread_rng().gen());
    let out_dir = prepare_out_dir(options.out_dir.as_deref())?;
    let sonifier = Sonifier::from_seed(seed, config.audio.clone())
        .context("Failed to build scale pool")?;

    println!("{} {}", "Seed:".cyan().bold(), seed);
    println!(
        "{} {}x{} @ {} Hz, {} s/pixel",
        "Settings:".dimmed(),
        config.width,
        config.height,
        config.audio.sample_rate,
        config.audio.note_duration_seconds
    );

    let mut failures = 0usize;
    let mut names = HashSet::new();
    for (index, input) in options.inputs.iter().enumerate() {
        println!("\n{} {}", "Rendering".cyan().bold(), input);
        match render_one(
            &sonifier,
            &config,
            seed,
            index,
            input,
            &out_dir,
            options.format,
            &mut names,
        ) {
            Ok(record) => {
                println!(
                    "  {} {} +{} ({})",
                    "Scale:".dimmed(),
                    record.scale,
                    record.transposition,
                    format_frequencies(&record.frequencies)
                );
                println!(
                    "  {} {:.3} Hz",
                    "Base frequency:".dimmed(),
                    record.base_frequency
                );
                println!(
                    "  {} {} samples, {:.1} s",
                    "Audio:".dimmed(),
                    record.num_samples,
                    record.duration_seconds
                );
                println!("  {} {}", "PCM hash:".dimmed(), &record.pcm_hash[..16]);
                println!("  {} {}", "->".green(), record.audio_file);
            }
            Err(error) => {
                failures += 1;
                eprintln!("  {} {}", "error:".red().bold(), error.message);
            }
        }
    }

    let elapsed = start.elapsed().as_millis();
    let total = options.inputs.len();
    if failures == 0 {
        println!(
            "\n{} {} file(s) in {} ms",
            "Done:".green().bold(),
            total,
            elapsed
        );
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "\n{} {} of {} file(s) failed",
            "Finished with errors:".red().bold(),
            failures,
            total
        );
        Ok(ExitCode::from(1))
    }
}

/// Run render with machine-readable JSON output
fn run_json(options: &RenderOptions) -> Result<ExitCode> {
    if let Err(e) = check_input_count(options.inputs.len()) {
        let error = JsonError::new(error_codes::TOO_MANY_INPUTS, e.to_string());
        return print_json(&RenderOutput::failure(vec![error]));
    }

    let config = match RenderConfig::resolve(options.config.as_deref(), &options.overrides) {
        Ok(config) => config,
        Err(e) => {
            let mut error = JsonError::new(error_codes::CONFIG, format!("{:#}", e));
            if let Some(path) = options.config.as_deref() {
                error = error.with_file(path);
            }
            return print_json(&RenderOutput::failure(vec![error]));
        }
    };

    let seed = options.seed.unwrap_or_else(|| rand::thread_rng().gen());
    let out_dir = match prepare_out_dir(options.out_dir.as_deref()) {
        Ok(dir) => dir,
        Err(e) => {
            let error = JsonError::new(error_codes::WRITE, format!("{:#}", e));
            return print_json(&RenderOutput::failure(vec![error]));
        }
    };
    let sonifier = match Sonifier::from_seed(seed, config.audio.clone()) {
        Ok(sonifier) => sonifier,
        Err(e) => {
            let error = JsonError::new(e.code(), e.to_string());
            return print_json(&RenderOutput::failure(vec![error]));
        }
    };

    let (results, errors) = render_all(&sonifier, &config, seed, options, &out_dir);
    print_json(&RenderOutput::new(seed, errors, results))
}

/// Renders every input, collecting successes and failures separately.
pub fn render_all(
    sonifier: &Sonifier,
    config: &RenderConfig,
    seed: u32,
    options: &RenderOptions,
    out_dir: &Path,
) -> (Vec<RenderedFile>, Vec<JsonError>) {
    let mut results = Vec::new();
    let mut errors = Vec::new();
    let mut names = HashSet::new();

    for (index, input) in options.inputs.iter().enumerate() {
        match render_one(
            sonifier,
            config,
            seed,
            index,
            input,
            out_dir,
            options.format,
            &mut names,
        ) {
            Ok(record) => results.push(record),
            Err(error) => errors.push(error),
        }
    }

    (results, errors)
}

#[allow(clippy::too_many_arguments)]
fn render_one(
    sonifier: &Sonifier,
    config: &RenderConfig,
    seed: u32,
    index: usize,
    input: &str,
    out_dir: &Path,
    format: OutputFormat,
    names: &mut HashSet<String>,
) -> Result<RenderedFile, JsonError> {
    let path = Path::new(input);
    let image = load_image(path, config.width, config.height).map_err(|e| {
        JsonError::new(error_codes::IMAGE_DECODE, format!("{:#}", e)).with_file(input)
    })?;

    let buffer = image
        .as_buffer()
        .map_err(|e| JsonError::new(e.code(), e.to_string()).with_file(input))?;
    let mut rng = create_image_rng(seed, index as u32);
    let out = sonifier
        .sonify(&buffer, &mut rng)
        .map_err(|e| JsonError::new(e.code(), e.to_string()).with_file(input))?;

    let out_path = out_dir.join(output_name(&image_stem(path), index, format, names));
    let bytes = match format {
        OutputFormat::Wav => out
            .to_wav()
            .map_err(|e| JsonError::new(e.code(), e.to_string()).with_file(input))?,
        OutputFormat::Raw => out.pcm_bytes(),
    };
    fs::write(&out_path, bytes).map_err(|e| {
        JsonError::new(
            error_codes::WRITE,
            format!("Failed to write {}: {}", out_path.display(), e),
        )
        .with_file(input)
    })?;

    Ok(RenderedFile::from_sonification(
        input,
        out_path.display().to_string(),
        format.extension(),
        &out,
    ))
}

/// `audio-<stem>.<ext>`, suffixed with the input index if the name is taken.
fn output_name(
    stem: &str,
    index: usize,
    format: OutputFormat,
    names: &mut HashSet<String>,
) -> String {
    let ext = format.extension();
    let mut name = format!("audio-{}.{}", stem, ext);
    let mut suffix = index;
    while names.contains(&name) {
        name = format!("audio-{}-{}.{}", stem, suffix, ext);
        suffix += 1;
    }
    names.insert(name.clone());
    name
}

fn check_input_count(count: usize) -> Result<()> {
    if count == 0 {
        anyhow::bail!("No images given");
    }
    if count > MAX_IMAGES {
        anyhow::bail!("At most {} images per run, got {}", MAX_IMAGES, count);
    }
    Ok(())
}

fn prepare_out_dir(out_dir: Option<&str>) -> Result<PathBuf> {
    let dir = PathBuf::from(out_dir.unwrap_or("."));
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
    Ok(dir)
}

fn format_frequencies(freqs: &[f64]) -> String {
    freqs
        .iter()
        .map(|f| format!("{:.1}", f))
        .collect::<Vec<_>>()
        .join(" ")
}

fn print_json(output: &RenderOutput) -> Result<ExitCode> {
    println!("{}", serde_json::to_string_pretty(output)?);
    Ok(if output.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}
