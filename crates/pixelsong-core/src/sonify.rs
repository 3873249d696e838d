//! End-to-end sonification: scale selection, note mapping and synthesis.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use rand::Rng;

use crate::config::SonifyConfig;
use crate::error::SonifyResult;
use crate::mapping::{map_image_to_notes, FrequencyScale, Note};
use crate::pcm;
use crate::pixels::PixelBuffer;
use crate::scale::{Scale, ScalePool};
use crate::synth::{synthesize, synthesize_cancellable};
use crate::wav;

/// Runs the pipeline against a shared, immutable scale pool.
///
/// A `Sonifier` holds no mutable state; it can be cloned or shared across
/// threads, with each call bringing its own generator.
#[derive(Debug, Clone)]
pub struct Sonifier {
    pool: Arc<ScalePool>,
    config: SonifyConfig,
}

/// Output of one sonification call.
#[derive(Debug, Clone)]
pub struct Sonification {
    /// Scale picked from the pool for this image.
    pub scale: Scale,
    /// Realised frequencies of `scale`.
    pub frequencies: FrequencyScale,
    /// Mono PCM samples, one segment per pixel in raster order.
    pub samples: Vec<i16>,
    /// Sample rate of `samples` in Hz.
    pub sample_rate: u32,
    /// Length of each pixel's segment.
    pub samples_per_note: usize,
}

impl Sonification {
    /// Base frequency derived from the image's average brightness.
    pub fn base_frequency(&self) -> f64 {
        self.frequencies.base_frequency()
    }

    /// Number of pixel segments in the output.
    pub fn num_notes(&self) -> usize {
        self.samples.len() / self.samples_per_note
    }

    pub fn duration_seconds(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Raw signed 16-bit little-endian mono bytes.
    pub fn pcm_bytes(&self) -> Vec<u8> {
        pcm::to_le_bytes(&self.samples)
    }

    /// BLAKE3 hash of the PCM bytes.
    pub fn pcm_hash(&self) -> String {
        pcm::pcm_hash(&self.samples)
    }

    /// The samples wrapped in a mono 16-bit WAV container.
    pub fn to_wav(&self) -> SonifyResult<Vec<u8>> {
        wav::to_wav_bytes(self.sample_rate, &self.samples)
    }
}

impl Sonifier {
    /// Creates a sonifier over an existing pool.
    pub fn new(pool: Arc<ScalePool>, config: SonifyConfig) -> SonifyResult<Self> {
        config.validate()?;
        Ok(Self { pool, config })
    }

    /// Builds a fresh pool of `config.pool_size` scales from `seed`.
    pub fn from_seed(seed: u32, config: SonifyConfig) -> SonifyResult<Self> {
        config.validate()?;
        let pool = ScalePool::from_seed(seed, config.pool_size)?;
        Ok(Self {
            pool: Arc::new(pool),
            config,
        })
    }

    pub fn pool(&self) -> &ScalePool {
        &self.pool
    }

    pub fn config(&self) -> &SonifyConfig {
        &self.config
    }

    /// Picks a scale with `rng` and renders `buffer` with it.
    pub fn sonify<R: Rng + ?Sized>(
        &self,
        buffer: &PixelBuffer<'_>,
        rng: &mut R,
    ) -> SonifyResult<Sonification> {
        let scale = self.pool.choose(rng);
        self.sonify_with_scale(buffer, scale)
    }

    /// Renders `buffer` with a caller-chosen scale.
    pub fn sonify_with_scale(
        &self,
        buffer: &PixelBuffer<'_>,
        scale: &Scale,
    ) -> SonifyResult<Sonification> {
        let (frequencies, notes) = map_image_to_notes(buffer, scale)?;
        let samples = synthesize(
            &notes,
            self.config.sample_rate,
            self.config.note_duration_seconds,
        )?;
        self.finish(scale, frequencies, samples)
    }

    /// Like [`Sonifier::sonify`], aborting between pixels once `cancel` is set.
    pub fn sonify_cancellable<R: Rng + ?Sized>(
        &self,
        buffer: &PixelBuffer<'_>,
        rng: &mut R,
        cancel: &AtomicBool,
    ) -> SonifyResult<Sonification> {
        let scale = self.pool.choose(rng);
        let (frequencies, notes) = map_image_to_notes(buffer, scale)?;
        let samples = synthesize_cancellable(
            &notes,
            self.config.sample_rate,
            self.config.note_duration_seconds,
            cancel,
        )?;
        self.finish(scale, frequencies, samples)
    }

    /// Maps `buffer` to notes without rendering audio.
    pub fn notes<R: Rng + ?Sized>(
        &self,
        buffer: &PixelBuffer<'_>,
        rng: &mut R,
    ) -> SonifyResult<(FrequencyScale, Vec<Note>)> {
        map_image_to_notes(buffer, self.pool.choose(rng))
    }

    fn finish(
        &self,
        scale: &Scale,
        frequencies: FrequencyScale,
        samples: Vec<i16>,
    ) -> SonifyResult<Sonification> {
        Ok(Sonification {
            scale: scale.clone(),
            frequencies,
            samples,
            sample_rate: self.config.sample_rate,
            samples_per_note: self.config.samples_per_note()?,
        })
    }
}
