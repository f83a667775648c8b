//! Photo decoding pipeline for Verdant.
//!
//! This module provides functionality for:
//! - Decoding user photos (JPEG/PNG, format auto-detected)
//! - EXIF orientation correction
//! - Aspect-ratio-preserving resize for thumbnails and previews
//!
//! # Architecture
//!
//! Everything here is synchronous and allocation-owned: a decode returns a
//! standalone `DecodedImage` the caller may move into the thumbnail cache.
//! Offloading to a worker is the concern of the `verdant-cache` crate.
//!
//! # Examples
//!
//! ```ignore
//! use verdant_core::decode::{decode_photo, DecodedImage};
//!
//! let bytes = std::fs::read("monstera.jpg").unwrap();
//! let image = decode_photo(&bytes).unwrap();
//! println!("Decoded {}x{} photo", image.width, image.height);
//! ```

mod photo;
mod resize;
mod types;

pub use photo::{decode_photo, decode_photo_unoriented, photo_orientation};
pub use resize::{fit_dimensions, resize, resize_to_fit};
pub use types::{DecodeError, DecodedImage, FilterType, Orientation};
