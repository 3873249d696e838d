//! Image decoding and resizing.
//!
//! Images are cropped to fill the target frame and resized with a Lanczos
//! filter. The native channel layout is kept where the core supports it:
//! gray, gray+alpha, RGB and RGBA stay 1, 2, 3 and 4 channels. Deeper formats
//! are reduced to 8 bits per channel.

use std::path::Path;

use anyhow::{Context, Result};
use image::imageops::FilterType;
use image::DynamicImage;
use pixelsong_core::{PixelBuffer, SonifyResult};

/// Decoded, resized pixel bytes owned by the CLI.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    pub channels: u8,
    pub data: Vec<u8>,
}

impl LoadedImage {
    /// Borrows the bytes as a validated core buffer.
    pub fn as_buffer(&self) -> SonifyResult<PixelBuffer<'_>> {
        PixelBuffer::new(self.width, self.height, self.channels, &self.data)
    }
}

/// Decodes `path` and resizes it to `width` x `height`.
pub fn load_image(path: &Path, width: u32, height: u32) -> Result<LoadedImage> {
    let image = image::open(path)
        .with_context(|| format!("Failed to decode image: {}", path.display()))?;
    Ok(prepare_image(image, width, height))
}

/// Resizes an already decoded image and extracts its 8-bit channel bytes.
pub fn prepare_image(image: DynamicImage, width: u32, height: u32) -> LoadedImage {
    let resized = image.resize_to_fill(width, height, FilterType::Lanczos3);
    let channels = resized.color().channel_count();
    let data = match channels {
        1 => resized.to_luma8().into_raw(),
        2 => resized.to_luma_alpha8().into_raw(),
        3 => resized.to_rgb8().into_raw(),
        _ => resized.to_rgba8().into_raw(),
    };

    LoadedImage {
        width: resized.width(),
        height: resized.height(),
        channels: channels.min(4),
        data,
    }
}

/// File stem used to name the audio produced from `path`.
pub fn image_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("image")
        .to_string()
}
