//! Verdant Cache - Bounded thumbnail cache and decode pipeline
//!
//! This crate provides the concurrent layer of Verdant's imaging subsystem:
//!
//! - `cache` - a capacity-bounded, least-recently-used cache of decoded
//!   thumbnails, safe to share across tasks and threads
//! - `pipeline` - an asynchronous decode/resize pipeline that runs the
//!   CPU-bound pixel work on a background worker pool
//! - `id` - the opaque identifier callers mint per logical photo
//!
//! # Usage
//!
//! ```ignore
//! use verdant_cache::{decode_thumbnail, PhotoId, ThumbnailCache};
//!
//! let cache = ThumbnailCache::default();
//! let id = PhotoId::new();
//!
//! if cache.get(id).is_none() {
//!     if let Some(thumb) = decode_thumbnail(photo_bytes, 400).await {
//!         cache.insert(id, thumb);
//!     }
//! }
//! ```

mod cache;
mod id;
mod pipeline;

pub use cache::{ThumbnailCache, DEFAULT_CAPACITY, MIN_CAPACITY};
pub use id::PhotoId;
pub use pipeline::{decode_thumbnail, ThumbnailPipeline};

// Re-export the bitmap type callers get back from both the cache and the
// pipeline, so consumers don't need a direct verdant-core dependency.
pub use verdant_core::decode::DecodedImage;
