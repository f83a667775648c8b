//! Aspect-ratio-preserving resize for thumbnails and storage normalization.
//!
//! All scaling here is uniform: a single scale factor is applied to both
//! axes, so output proportions always match the source.

use super::{DecodeError, DecodedImage, FilterType};

/// Guard against division blow-up for degenerate near-zero aspect ratios.
const ASPECT_EPSILON: f64 = 0.01;

/// Compute target dimensions that fit within `max_dimension` while
/// preserving the source aspect ratio.
///
/// Landscape and square sources are constrained by width, portrait sources
/// by height. The constrained side becomes exactly `max_dimension`; the
/// other side scales proportionally (never below 1 px, so extreme aspect
/// ratios stay renderable).
///
/// Degenerate sources (zero width, zero height, or a zero `max_dimension`)
/// return the source dimensions unscaled. Callers get their input back
/// rather than a garbage size.
pub fn fit_dimensions(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    if width == 0 || height == 0 || max_dimension == 0 {
        return (width, height);
    }

    let aspect = width as f64 / height as f64;

    if aspect >= 1.0 {
        // Landscape or square: constrain by width
        let new_height = (max_dimension as f64 / aspect.max(ASPECT_EPSILON)).round() as u32;
        (max_dimension, new_height.max(1))
    } else {
        // Portrait: constrain by height
        let new_width = (max_dimension as f64 * aspect).round() as u32;
        (new_width.max(1), max_dimension)
    }
}

/// Resize an image to exact dimensions.
///
/// # Errors
///
/// Returns `DecodeError::UnsupportedDimensions` for a zero-sized target,
/// `DecodeError::CorruptedFile` if the source pixel buffer is inconsistent.
pub fn resize(
    image: &DecodedImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::UnsupportedDimensions { width, height });
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let rgb_image = image
        .to_rgb_image()
        .ok_or_else(|| DecodeError::CorruptedFile("Failed to create RgbImage".to_string()))?;

    let resized = image::imageops::resize(&rgb_image, width, height, filter.to_image_filter());

    Ok(DecodedImage::from_rgb_image(resized))
}

/// Resize an image so its longest edge is at most `max_edge`, preserving
/// aspect ratio.
///
/// Images that already fit are returned unchanged: the storage path never
/// upscales, since that only trades file size for invented detail.
///
/// # Errors
///
/// Returns `DecodeError::UnsupportedDimensions` if `max_edge` is zero.
pub fn resize_to_fit(
    image: &DecodedImage,
    max_edge: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if max_edge == 0 {
        return Err(DecodeError::UnsupportedDimensions {
            width: max_edge,
            height: max_edge,
        });
    }

    // If already fits, just clone
    if image.width <= max_edge && image.height <= max_edge {
        return Ok(image.clone());
    }

    let (new_width, new_height) = fit_dimensions(image.width, image.height, max_edge);

    resize(image, new_width, new_height, filter)
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: the constrained side of a non-degenerate fit always
        /// equals the max dimension, and the other side never exceeds it
        /// (modulo the 1 px clamp for extreme ratios).
        #[test]
        fn prop_fit_dimensions_bounded(
            width in 1u32..=10_000,
            height in 1u32..=10_000,
            max_dimension in 1u32..=4_096,
        ) {
            let (w, h) = fit_dimensions(width, height, max_dimension);

            prop_assert!(w >= 1 && h >= 1);
            prop_assert!(w <= max_dimension && h <= max_dimension);
            if width >= height {
                prop_assert_eq!(w, max_dimension);
            } else {
                prop_assert_eq!(h, max_dimension);
            }
        }

        /// Property: scaling is uniform, so output proportions track the
        /// source within rounding tolerance. Ranges stay away from the
        /// 1 px clamp, which intentionally distorts extreme ratios.
        #[test]
        fn prop_fit_dimensions_preserves_aspect(
            width in 100u32..=4_000,
            height in 100u32..=4_000,
            max_dimension in 256u32..=2_048,
        ) {
            let (w, h) = fit_dimensions(width, height, max_dimension);

            let source_ratio = width as f64 / height as f64;
            let target_ratio = w as f64 / h as f64;

            // Rounding the short side perturbs the ratio by at most ~1 px
            let tolerance = 1.0 / h.min(w) as f64 + 0.01;
            prop_assert!(
                (source_ratio / target_ratio - 1.0).abs() <= tolerance,
                "ratio drifted: source {}, target {}", source_ratio, target_ratio
            );
        }

        /// Property: degenerate sources are returned unscaled.
        #[test]
        fn prop_fit_dimensions_degenerate_identity(
            side in 0u32..=10_000,
            max_dimension in 0u32..=4_096,
        ) {
            prop_assert_eq!(fit_dimensions(0, side, max_dimension), (0, side));
            prop_assert_eq!(fit_dimensions(side, 0, max_dimension), (side, 0));
        }
    }
}
