//! Output record types for `render` and `scales`.

use pixelsong_core::{Scale, Sonification};
use serde::{Deserialize, Serialize};

use super::JsonError;

/// JSON output for the `render` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderOutput {
    /// Whether every image was rendered
    pub success: bool,
    /// Base seed of the run (pass to `--seed` to reproduce)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
    /// Errors encountered
    pub errors: Vec<JsonError>,
    /// One entry per rendered image
    pub results: Vec<RenderedFile>,
}

impl RenderOutput {
    /// Creates an output for a run that got far enough to pick a seed.
    pub fn new(seed: u32, errors: Vec<JsonError>, results: Vec<RenderedFile>) -> Self {
        Self {
            success: errors.is_empty(),
            seed: Some(seed),
            errors,
            results,
        }
    }

    /// Creates a failed output before any image was processed.
    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            seed: None,
            errors,
            results: Vec::new(),
        }
    }
}

/// One image and the audio produced from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderedFile {
    /// Path of the source image
    pub original_image: String,
    /// Path of the written audio file
    pub audio_file: String,
    /// Output format ("wav" or "raw")
    pub format: String,
    /// Template name of the chosen scale
    pub scale: String,
    /// Transposition of the chosen scale in semitones
    pub transposition: u32,
    /// Base frequency in Hz
    pub base_frequency: f64,
    /// Scale frequencies in Hz
    pub frequencies: Vec<f64>,
    /// Total number of samples
    pub num_samples: usize,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Duration in seconds
    pub duration_seconds: f64,
    /// BLAKE3 hash of the PCM data
    pub pcm_hash: String,
}

impl RenderedFile {
    /// Builds a record from a finished sonification.
    pub fn from_sonification(
        original_image: impl Into<String>,
        audio_file: impl Into<String>,
        format: impl Into<String>,
        out: &Sonification,
    ) -> Self {
        Self {
            original_image: original_image.into(),
            audio_file: audio_file.into(),
            format: format.into(),
            scale: out.scale.template.to_string(),
            transposition: out.scale.offset,
            base_frequency: out.base_frequency(),
            frequencies: out.frequencies.as_slice().to_vec(),
            num_samples: out.samples.len(),
            sample_rate: out.sample_rate,
            duration_seconds: out.duration_seconds(),
            pcm_hash: out.pcm_hash(),
        }
    }
}

/// JSON output for the `scales` command.
#[derive(Debug, Clone, Serialize)]
pub struct ScalesOutput {
    /// Whether the pool was built
    pub success: bool,
    /// Seed the pool was built from
    pub seed: u32,
    /// Why the pool could not be built
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<JsonError>,
    /// Pool entries in construction order
    pub scales: Vec<Scale>,
}

impl ScalesOutput {
    /// Output listing a built pool.
    pub fn success(seed: u32, scales: Vec<Scale>) -> Self {
        Self {
            success: true,
            seed,
            errors: Vec::new(),
            scales,
        }
    }

    /// Output for a pool that could not be built.
    pub fn failure(seed: u32, error: JsonError) -> Self {
        Self {
            success: false,
            seed,
            errors: vec![error],
            scales: Vec::new(),
        }
    }
}
