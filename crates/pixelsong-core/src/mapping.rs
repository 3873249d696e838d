//! Pixel-to-note mapping.
//!
//! The image's average brightness sets a base frequency between 200 and 400 Hz.
//! The chosen scale is realised at that base in equal temperament, and each
//! pixel picks a degree from its own brightness and a volume from its alpha.

use rayon::prelude::*;

use crate::brightness::{average_brightness, brightness_of};
use crate::error::{SonifyError, SonifyResult};
use crate::pixels::{Pixel, PixelBuffer};
use crate::scale::Scale;

/// Base frequency for a completely black image, in Hz.
pub const MIN_BASE_FREQ: f64 = 200.0;

/// Added to the base frequency for a completely white image, in Hz.
pub const BASE_FREQ_RANGE: f64 = 200.0;

/// Peak amplitude of a fully opaque pixel.
pub const MAX_VOLUME: f64 = 0.5;

/// A single tone: frequency in Hz and linear amplitude in `0.0..=MAX_VOLUME`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    /// Pitch in Hz, always a member of the image's frequency scale
    pub frequency: f64,
    /// Peak amplitude in `[0.0, 0.5]`, from the pixel's alpha
    pub volume: f64,
}

/// Maps average brightness `0..=255` linearly onto `200..=400` Hz.
pub fn base_frequency(avg_brightness: f64) -> f64 {
    MIN_BASE_FREQ + (avg_brightness / 255.0) * BASE_FREQ_RANGE
}

/// Converts a semitone offset to a frequency ratio (`2^(s/12)`).
pub fn semitone_ratio(semitones: f64) -> f64 {
    2.0_f64.powf(semitones / 12.0)
}

/// Concrete frequencies for one scale at one base frequency.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyScale {
    base: f64,
    frequencies: Vec<f64>,
}

impl FrequencyScale {
    /// Realises `scale` above `base_freq`.
    pub fn from_scale(scale: &Scale, base_freq: f64) -> Self {
        Self {
            base: base_freq,
            frequencies: scale
                .semitones
                .iter()
                .map(|&s| base_freq * semitone_ratio(s as f64))
                .collect(),
        }
    }

    /// Frequency the scale was realised above.
    pub fn base_frequency(&self) -> f64 {
        self.base
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.frequencies
    }

    /// Scale degree selected by a brightness in `0.0..=255.0`.
    ///
    /// Brightness 255 would land one past the last degree; the modulo folds it
    /// back onto the root.
    pub fn degree_for(&self, brightness: f64) -> usize {
        let len = self.frequencies.len();
        ((brightness / 255.0) * len as f64).floor() as usize % len
    }

    /// Produces the note for one pixel.
    pub fn note_for(&self, pixel: Pixel) -> Note {
        let degree = self.degree_for(brightness_of(pixel));
        Note {
            frequency: self.frequencies[degree],
            volume: (pixel.a as f64 / 255.0) * MAX_VOLUME,
        }
    }
}

/// Maps every pixel of `buffer` to a note, in raster order.
///
/// Returns the frequency scale used alongside the notes so callers can report
/// it. Fails with a configuration error if `scale` has no degrees.
pub fn map_image_to_notes(
    buffer: &PixelBuffer<'_>,
    scale: &Scale,
) -> SonifyResult<(FrequencyScale, Vec<Note>)> {
    if scale.is_empty() {
        return Err(SonifyError::configuration("selected scale has no degrees"));
    }

    let base = base_frequency(average_brightness(buffer));
    let freqs = FrequencyScale::from_scale(scale, base);

    let notes = buffer
        .data()
        .par_chunks_exact(buffer.channels() as usize)
        .map(|px| freqs.note_for(Pixel::from_channels(px)))
        .collect();

    Ok((freqs, notes))
}
