//! Per-pixel and whole-image brightness.
//!
//! Brightness is `(r + g + b) / 3` with absent channels counted as 0, so
//! grayscale and two-channel images come out darker than their red channel.
//! Input validation (zero area, length mismatch) happens in
//! [`PixelBuffer::new`], which makes both functions here total.

use crate::pixels::{Pixel, PixelBuffer};

/// Brightness of a single pixel in `0.0..=255.0`.
pub fn brightness_of(pixel: Pixel) -> f64 {
    (pixel.r as f64 + pixel.g as f64 + pixel.b as f64) / 3.0
}

/// Brightness of the pixel at raster `index`, or `None` past the end.
pub fn pixel_brightness(buffer: &PixelBuffer<'_>, index: usize) -> Option<f64> {
    buffer.pixel(index).map(brightness_of)
}

/// Mean brightness over every pixel of the image.
pub fn average_brightness(buffer: &PixelBuffer<'_>) -> f64 {
    let total: f64 = buffer.pixels().map(brightness_of).sum();
    total / buffer.pixel_count() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_gray_image() {
        let data = [128u8, 128, 128, 255].repeat(16);
        let buf = PixelBuffer::new(4, 4, 4, &data).unwrap();
        assert_eq!(average_brightness(&buf), 128.0);
        assert_eq!(pixel_brightness(&buf, 15), Some(128.0));
    }

    #[test]
    fn test_alpha_does_not_affect_brightness() {
        let data = [90u8, 90, 90, 0];
        let buf = PixelBuffer::new(1, 1, 4, &data).unwrap();
        assert_eq!(average_brightness(&buf), 90.0);
    }

    #[test]
    fn test_missing_channels_still_divide_by_three() {
        let data = [255u8];
        let buf = PixelBuffer::new(1, 1, 1, &data).unwrap();
        assert_eq!(average_brightness(&buf), 85.0);

        let data = [30u8, 60];
        let buf = PixelBuffer::new(1, 1, 2, &data).unwrap();
        assert_eq!(pixel_brightness(&buf, 0), Some(30.0));
    }

    #[test]
    fn test_average_of_black_and_white() {
        let data = [0u8, 0, 0, 255, 255, 255];
        let buf = PixelBuffer::new(2, 1, 3, &data).unwrap();
        assert_eq!(average_brightness(&buf), 127.5);
    }

    #[test]
    fn test_index_past_end() {
        let data = [1u8, 2, 3];
        let buf = PixelBuffer::new(1, 1, 3, &data).unwrap();
        assert_eq!(pixel_brightness(&buf, 1), None);
    }
}
