//! Photo encoding pipeline for Verdant.
//!
//! This module provides functionality for:
//! - Encoding images to JPEG format with configurable quality
//! - Normalizing user photos into compact, size-bounded artifacts before
//!   the persistence layer writes them to the on-device store
//!
//! # Examples
//!
//! ```ignore
//! use verdant_core::encode::{normalize_for_storage, STORAGE_MAX_DIMENSION, STORAGE_QUALITY};
//!
//! let bytes = normalize_for_storage(&photo, STORAGE_MAX_DIMENSION, STORAGE_QUALITY)?;
//! datastore.write_photo(id, &bytes)?;
//! ```

mod jpeg;

pub use jpeg::{
    encode_jpeg, normalize_for_storage, EncodeError, STORAGE_MAX_DIMENSION, STORAGE_QUALITY,
};
