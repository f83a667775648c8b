//! Verdant Core - Image engine
//!
//! This crate provides the pure image processing functionality for Verdant:
//! photo decoding with EXIF orientation correction, aspect-ratio-preserving
//! resize, and JPEG encoding/normalization for the persistent photo store.
//!
//! Everything here is synchronous; the concurrent thumbnail cache and the
//! background decode pipeline live in the `verdant-cache` crate.

pub mod decode;
pub mod encode;

pub use decode::{
    decode_photo, decode_photo_unoriented, fit_dimensions, photo_orientation, resize,
    resize_to_fit, DecodeError, DecodedImage, FilterType, Orientation,
};
pub use encode::{
    encode_jpeg, normalize_for_storage, EncodeError, STORAGE_MAX_DIMENSION, STORAGE_QUALITY,
};
