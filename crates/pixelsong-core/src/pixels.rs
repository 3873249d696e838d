//! Borrowed, validated view over a decoded pixel buffer.

use crate::error::{SonifyError, SonifyResult};

/// Alpha used when the buffer carries no alpha channel.
pub const OPAQUE: u8 = 255;

/// One pixel with missing channels filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pixel {
    /// First channel byte
    pub r: u8,
    /// Second channel byte, 0 for single-channel input
    pub g: u8,
    /// Third channel byte, 0 for fewer than three channels
    pub b: u8,
    /// Alpha channel, [`OPAQUE`] when the input has none
    pub a: u8,
}

impl Pixel {
    /// Builds a pixel from one interleaved group of 1 to 4 channel bytes.
    pub fn from_channels(px: &[u8]) -> Self {
        let channels = px.len();
        Self {
            r: px.first().copied().unwrap_or(0),
            g: if channels > 1 { px[1] } else { 0 },
            b: if channels > 2 { px[2] } else { 0 },
            a: if channels == 4 { px[3] } else { OPAQUE },
        }
    }
}

/// Row-major, channel-interleaved pixel bytes with their declared geometry.
///
/// Construction checks that the byte length matches
/// `width * height * channels`, so every accessor can index without further
/// validation.
#[derive(Debug, Clone, Copy)]
pub struct PixelBuffer<'a> {
    width: u32,
    height: u32,
    channels: u8,
    data: &'a [u8],
}

impl<'a> PixelBuffer<'a> {
    /// Wraps raw bytes.
    ///
    /// Fails with `InvalidInput` if the image has zero area, the channel count
    /// is outside `1..=4`, or the byte length disagrees with the geometry.
    pub fn new(width: u32, height: u32, channels: u8, data: &'a [u8]) -> SonifyResult<Self> {
        if width == 0 || height == 0 {
            return Err(SonifyError::invalid_input(format!(
                "image has zero area ({}x{})",
                width, height
            )));
        }
        if !(1..=4).contains(&channels) {
            return Err(SonifyError::invalid_input(format!(
                "unsupported channel count {} (expected 1-4)",
                channels
            )));
        }
        let expected = width as usize * height as usize * channels as usize;
        if data.len() != expected {
            return Err(SonifyError::invalid_input(format!(
                "buffer is {} bytes, expected {} for {}x{}x{}",
                data.len(),
                expected,
                width,
                height,
                channels
            )));
        }

        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Raw bytes as supplied by the caller.
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Number of pixels (`width * height`), always positive.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns the pixel at raster `index`, or `None` if out of range.
    ///
    /// Green and blue default to 0 and alpha to 255 when the buffer does not
    /// carry them. Alpha is only read from 4-channel buffers.
    pub fn pixel(&self, index: usize) -> Option<Pixel> {
        let channels = self.channels as usize;
        let start = index.checked_mul(channels)?;
        let px = self.data.get(start..start.checked_add(channels)?)?;
        Some(Pixel::from_channels(px))
    }

    /// Iterates over all pixels in raster order.
    pub fn pixels(&self) -> impl Iterator<Item = Pixel> + 'a {
        self.data
            .chunks_exact(self.channels as usize)
            .map(Pixel::from_channels)
    }
}
