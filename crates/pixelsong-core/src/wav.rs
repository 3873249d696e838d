//! Mono 16-bit WAV output.
//!
//! The container is always a bare 44-byte RIFF/WAVE header followed by the
//! little-endian samples: no timestamps, no optional chunks, so identical
//! samples always give identical files.

use std::io::Write;

use crate::error::{SonifyError, SonifyResult};

/// Size of the RIFF, `fmt ` and `data` headers together.
pub const HEADER_LEN: usize = 44;

const BYTES_PER_SAMPLE: u32 = 2;
const BITS_PER_SAMPLE: u16 = 16;
const FORMAT_PCM: u16 = 1;
const MONO: u16 = 1;

/// Samples converted per write while streaming.
const WRITE_CHUNK: usize = 4096;

/// Builds the header for `num_samples` mono samples at `sample_rate`.
///
/// Fails with `WavTooLarge` when the RIFF size field cannot hold the data.
pub fn wav_header(sample_rate: u32, num_samples: usize) -> SonifyResult<[u8; HEADER_LEN]> {
    let data_bytes = (num_samples as u64).saturating_mul(BYTES_PER_SAMPLE as u64);
    let riff_size = data_bytes
        .checked_add(HEADER_LEN as u64 - 8)
        .filter(|&size| size <= u32::MAX as u64)
        .ok_or(SonifyError::WavTooLarge { data_bytes })?;

    let mut header = [0u8; HEADER_LEN];
    header[0..4].copy_from_slice(b"RIFF");
    header[4..8].copy_from_slice(&(riff_size as u32).to_le_bytes());
    header[8..12].copy_from_slice(b"WAVE");

    header[12..16].copy_from_slice(b"fmt ");
    header[16..20].copy_from_slice(&16u32.to_le_bytes());
    header[20..22].copy_from_slice(&FORMAT_PCM.to_le_bytes());
    header[22..24].copy_from_slice(&MONO.to_le_bytes());
    header[24..28].copy_from_slice(&sample_rate.to_le_bytes());
    header[28..32].copy_from_slice(&sample_rate.wrapping_mul(BYTES_PER_SAMPLE).to_le_bytes());
    header[32..34].copy_from_slice(&(BYTES_PER_SAMPLE as u16).to_le_bytes());
    header[34..36].copy_from_slice(&BITS_PER_SAMPLE.to_le_bytes());

    header[36..40].copy_from_slice(b"data");
    header[40..44].copy_from_slice(&(data_bytes as u32).to_le_bytes());
    Ok(header)
}

/// Writes a complete WAV file, streaming the samples in small batches.
pub fn write_wav<W: Write>(writer: &mut W, sample_rate: u32, samples: &[i16]) -> SonifyResult<()> {
    writer.write_all(&wav_header(sample_rate, samples.len())?)?;

    let mut scratch = Vec::with_capacity(WRITE_CHUNK * BYTES_PER_SAMPLE as usize);
    for batch in samples.chunks(WRITE_CHUNK) {
        scratch.clear();
        scratch.extend(batch.iter().flat_map(|s| s.to_le_bytes()));
        writer.write_all(&scratch)?;
    }
    Ok(())
}

/// Encodes a WAV file into memory.
pub fn to_wav_bytes(sample_rate: u32, samples: &[i16]) -> SonifyResult<Vec<u8>> {
    let mut out = Vec::with_capacity(HEADER_LEN + samples.len() * BYTES_PER_SAMPLE as usize);
    write_wav(&mut out, sample_rate, samples)?;
    Ok(out)
}

/// Returns the sample bytes of a file produced by [`write_wav`], or `None`
/// if the header is not a mono 16-bit PCM header or the data is truncated.
pub fn extract_pcm_data(wav: &[u8]) -> Option<&[u8]> {
    let header = wav.get(..HEADER_LEN)?;
    let u16_at = |at: usize| u16::from_le_bytes([header[at], header[at + 1]]);

    if &header[0..4] != b"RIFF" || &header[8..12] != b"WAVE" {
        return None;
    }
    if &header[12..16] != b"fmt " || &header[36..40] != b"data" {
        return None;
    }
    if u16_at(20) != FORMAT_PCM || u16_at(22) != MONO || u16_at(34) != BITS_PER_SAMPLE {
        return None;
    }

    let data_len = u32::from_le_bytes([header[40], header[41], header[42], header[43]]) as usize;
    wav.get(HEADER_LEN..HEADER_LEN.checked_add(data_len)?)
}
