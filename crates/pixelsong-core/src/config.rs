//! Sonification settings.

use serde::{Deserialize, Serialize};

use crate::error::{SonifyError, SonifyResult};
use crate::scale::DEFAULT_POOL_SIZE;
use crate::synth::{self, DEFAULT_NOTE_DURATION, DEFAULT_SAMPLE_RATE};

/// Tunable parameters of the pipeline.
///
/// Missing fields fall back to the defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SonifyConfig {
    /// Output sample rate in Hz.
    pub sample_rate: u32,
    /// Length of the tone rendered for each pixel.
    pub note_duration_seconds: f64,
    /// Number of scales in the pool.
    pub pool_size: usize,
}

impl Default for SonifyConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            note_duration_seconds: DEFAULT_NOTE_DURATION,
            pool_size: DEFAULT_POOL_SIZE,
        }
    }
}

impl SonifyConfig {
    /// Samples rendered per pixel.
    pub fn samples_per_note(&self) -> SonifyResult<usize> {
        synth::samples_per_note(self.note_duration_seconds, self.sample_rate)
    }

    /// Checks every field, returning the first problem found.
    pub fn validate(&self) -> SonifyResult<()> {
        self.samples_per_note()?;
        if self.pool_size == 0 {
            return Err(SonifyError::configuration("pool_size must be positive"));
        }
        Ok(())
    }
}
