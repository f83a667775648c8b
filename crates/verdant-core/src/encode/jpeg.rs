//! JPEG encoding and storage normalization.
//!
//! User photos arrive at arbitrary sizes; before the persistence layer
//! writes one to disk it is normalized here: downscaled to fit a bounded
//! edge length, then lossy-encoded. Unlike the display path, failures on
//! this path are surfaced to the caller, because silently dropping a write
//! loses the user's photo.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;
use thiserror::Error;

use crate::decode::{resize_to_fit, DecodedImage, FilterType};

/// Default longest-edge bound for photos persisted to the on-device store.
pub const STORAGE_MAX_DIMENSION: u32 = 2000;

/// Default encode quality for persisted photos, on the 0.0-1.0 scale.
pub const STORAGE_QUALITY: f32 = 0.8;

/// Errors that can occur while encoding a photo for storage.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The downscale step before encoding failed
    #[error("Resize before encoding failed: {0}")]
    ResizeFailed(String),

    /// JPEG encoding failed
    #[error("JPEG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode RGB pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - JPEG quality (1-100, where 100 is highest quality)
///
/// # Returns
///
/// JPEG-encoded bytes on success, or an error if encoding fails.
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    // Validate dimensions
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    // Validate pixel data length
    let expected_len = (width as usize) * (height as usize) * 3;
    if pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: pixels.len(),
        });
    }

    // Clamp quality to valid range (1-100)
    let quality = quality.clamp(1, 100);

    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);

    encoder
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// Normalize a photo into compact bytes suitable for the persistent store.
///
/// If the longest side already fits within `max_dimension` the pixels are
/// encoded as-is; upscaling would only trade file size for invented
/// detail. Otherwise the photo is scaled uniformly so its longest side
/// equals `max_dimension`, then lossy-encoded.
///
/// `quality` is on the 0.0-1.0 scale (1.0 = best fidelity, largest file)
/// and is clamped, not rejected. See [`STORAGE_MAX_DIMENSION`] and
/// [`STORAGE_QUALITY`] for the defaults the persistence layer uses.
///
/// # Errors
///
/// Any failure here is surfaced: losing a photo write silently is not
/// acceptable.
pub fn normalize_for_storage(
    image: &DecodedImage,
    max_dimension: u32,
    quality: f32,
) -> Result<Vec<u8>, EncodeError> {
    if image.width == 0 || image.height == 0 {
        return Err(EncodeError::InvalidDimensions {
            width: image.width,
            height: image.height,
        });
    }

    let jpeg_quality = (quality * 100.0).round() as u8;

    if image.longest_side() <= max_dimension {
        return encode_jpeg(&image.pixels, image.width, image.height, jpeg_quality);
    }

    let scaled = resize_to_fit(image, max_dimension, FilterType::Lanczos3)
        .map_err(|e| EncodeError::ResizeFailed(e.to_string()))?;

    encode_jpeg(&scaled.pixels, scaled.width, scaled.height, jpeg_quality)
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for generating image dimensions (keep small for speed).
    fn dimensions_strategy() -> impl Strategy<Value = (u32, u32)> {
        (1u32..=50, 1u32..=50)
    }

    /// Strategy for generating quality values.
    fn quality_strategy() -> impl Strategy<Value = u8> {
        1u8..=100
    }

    proptest! {
        /// Property: Encoding always produces valid JPEG when given valid input.
        #[test]
        fn prop_valid_input_produces_valid_jpeg(
            (width, height) in dimensions_strategy(),
            quality in quality_strategy(),
        ) {
            let size = (width as usize) * (height as usize) * 3;
            let pixels = vec![128u8; size];

            let result = encode_jpeg(&pixels, width, height, quality);
            prop_assert!(result.is_ok(), "Valid input should produce valid output");

            let jpeg_bytes = result.unwrap();

            prop_assert_eq!(&jpeg_bytes[0..2], &[0xFF, 0xD8], "Should have SOI marker");

            let len = jpeg_bytes.len();
            prop_assert!(len >= 4, "JPEG should have at least 4 bytes");
            prop_assert_eq!(&jpeg_bytes[len - 2..], &[0xFF, 0xD9], "Should have EOI marker");
        }

        /// Property: Same input always produces same output (deterministic).
        #[test]
        fn prop_deterministic_output(
            (width, height) in (1u32..=20, 1u32..=20),
            quality in quality_strategy(),
        ) {
            let size = (width as usize) * (height as usize) * 3;
            let pixels = vec![100u8; size];

            let result1 = encode_jpeg(&pixels, width, height, quality);
            let result2 = encode_jpeg(&pixels, width, height, quality);

            prop_assert!(result1.is_ok() && result2.is_ok());
            prop_assert_eq!(result1.unwrap(), result2.unwrap(), "Same input should produce same output");
        }

        /// Property: Invalid pixel data length always returns error.
        #[test]
        fn prop_invalid_pixel_length_returns_error(
            (width, height) in dimensions_strategy(),
            quality in quality_strategy(),
            extra_or_missing in -10i32..=10,
        ) {
            prop_assume!(extra_or_missing != 0);

            let expected_size = (width as usize) * (height as usize) * 3;
            let actual_size = if extra_or_missing > 0 {
                expected_size + extra_or_missing as usize
            } else {
                expected_size.saturating_sub((-extra_or_missing) as usize)
            };

            prop_assume!(actual_size != expected_size);

            let pixels = vec![128u8; actual_size];
            let result = encode_jpeg(&pixels, width, height, quality);

            prop_assert!(
                matches!(result, Err(EncodeError::InvalidPixelData { .. })),
                "Mismatched pixel data should return InvalidPixelData error"
            );
        }

        /// Property: the whole 0.0-1.0 quality range (and beyond) normalizes
        /// without error after clamping.
        #[test]
        fn prop_normalize_accepts_any_quality(quality in -1.0f32..=2.0) {
            let img = DecodedImage::new(10, 10, vec![128u8; 10 * 10 * 3]);
            let result = normalize_for_storage(&img, 100, quality);
            prop_assert!(result.is_ok(), "Quality {} should work after clamping", quality);
        }

        /// Property: normalized output never exceeds the requested bound.
        #[test]
        fn prop_normalize_bounds_longest_side(
            (width, height) in (1u32..=120, 1u32..=120),
            max_dimension in 16u32..=64,
        ) {
            let size = (width as usize) * (height as usize) * 3;
            let img = DecodedImage::new(width, height, vec![90u8; size]);

            let bytes = normalize_for_storage(&img, max_dimension, 0.8).unwrap();
            let round_trip = crate::decode::decode_photo_unoriented(&bytes).unwrap();

            // Photos already inside the bound keep their dimensions;
            // everything else is scaled down to it
            if img.longest_side() <= max_dimension {
                prop_assert_eq!((round_trip.width, round_trip.height), (width, height));
            } else {
                prop_assert!(round_trip.longest_side() <= max_dimension);
            }
        }
    }
}
