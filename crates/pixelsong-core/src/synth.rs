//! Sine tone rendering and PCM assembly.
//!
//! Every note becomes a fixed-length sine burst starting at phase zero. Bursts
//! are written into one preallocated buffer in note order; boundaries are hard
//! cuts with no crossfade.

use std::f64::consts::TAU;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use rayon::prelude::*;

use crate::error::{SonifyError, SonifyResult};
use crate::mapping::Note;

/// Default output sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Default tone length per pixel in seconds.
pub const DEFAULT_NOTE_DURATION: f64 = 0.1;

/// Full-scale value used when quantizing to 16 bits.
const PCM_SCALE: f64 = 32767.0;

/// Number of samples in one note: `floor(duration * sample_rate)`.
///
/// Rejects a zero sample rate, and durations that are non-finite,
/// non-positive, too short to produce a single sample, or too long to count
/// in a `usize`.
pub fn samples_per_note(note_duration: f64, sample_rate: u32) -> SonifyResult<usize> {
    if sample_rate == 0 {
        return Err(SonifyError::InvalidSampleRate { rate: sample_rate });
    }
    if !note_duration.is_finite() || note_duration <= 0.0 {
        return Err(SonifyError::InvalidDuration {
            duration: note_duration,
        });
    }
    let exact = (note_duration * sample_rate as f64).floor();
    if exact < 1.0 || exact >= usize::MAX as f64 {
        return Err(SonifyError::InvalidDuration {
            duration: note_duration,
        });
    }
    Ok(exact as usize)
}

/// Total samples for `num_notes` notes, or a configuration error if the
/// buffer could not be allocated.
pub fn buffer_len(num_notes: usize, per_note: usize) -> SonifyResult<usize> {
    num_notes
        .checked_mul(per_note)
        .filter(|&total| total <= isize::MAX as usize / std::mem::size_of::<i16>())
        .ok_or_else(|| {
            SonifyError::configuration(format!(
                "{} notes of {} samples do not fit in memory",
                num_notes, per_note
            ))
        })
}

/// Quantizes a sample in `-1.0..=1.0` to a signed 16-bit value.
pub fn quantize(sample: f64) -> i16 {
    (sample * PCM_SCALE).round().clamp(i16::MIN as f64, i16::MAX as f64) as i16
}

/// Writes one note into `out`, one sample per slot.
pub fn render_note(note: &Note, sample_rate: u32, out: &mut [i16]) {
    let rate = sample_rate as f64;
    for (s, slot) in out.iter_mut().enumerate() {
        let t = s as f64 / rate;
        *slot = quantize((TAU * note.frequency * t).sin() * note.volume);
    }
}

/// Renders all notes and concatenates them in order.
///
/// The output holds exactly `notes.len() * samples_per_note` samples.
pub fn synthesize(notes: &[Note], sample_rate: u32, note_duration: f64) -> SonifyResult<Vec<i16>> {
    let per_note = samples_per_note(note_duration, sample_rate)?;
    let mut buffer = vec![0i16; buffer_len(notes.len(), per_note)?];

    buffer
        .par_chunks_mut(per_note)
        .zip(notes.par_iter())
        .for_each(|(chunk, note)| render_note(note, sample_rate, chunk));

    Ok(buffer)
}

/// Like [`synthesize`], but checks `cancel` before every note.
///
/// Once the flag is observed the partially filled buffer is dropped and
/// `Cancelled` is returned with the number of notes that had been rendered.
pub fn synthesize_cancellable(
    notes: &[Note],
    sample_rate: u32,
    note_duration: f64,
    cancel: &AtomicBool,
) -> SonifyResult<Vec<i16>> {
    render_until(notes, sample_rate, note_duration, || {
        cancel.load(Ordering::Relaxed)
    })
}

/// Renders notes until `stop` returns true; `stop` is asked before each note.
fn render_until<S>(
    notes: &[Note],
    sample_rate: u32,
    note_duration: f64,
    stop: S,
) -> SonifyResult<Vec<i16>>
where
    S: Fn() -> bool + Sync,
{
    let per_note = samples_per_note(note_duration, sample_rate)?;
    let mut buffer = vec![0i16; buffer_len(notes.len(), per_note)?];
    let completed = AtomicUsize::new(0);

    let outcome = buffer
        .par_chunks_mut(per_note)
        .zip(notes.par_iter())
        .try_for_each(|(chunk, note)| {
            if stop() {
                return Err(());
            }
            render_note(note, sample_rate, chunk);
            completed.fetch_add(1, Ordering::Relaxed);
            Ok(())
        });

    match outcome {
        Ok(()) => Ok(buffer),
        Err(()) => Err(SonifyError::Cancelled {
            completed: completed.load(Ordering::Relaxed),
        }),
    }
}
