//! Background decode pipeline for thumbnails.
//!
//! Decoding and resizing are CPU-bound, so they run on the blocking worker
//! pool while the caller suspends. Failures on this path degrade instead of
//! propagating: undecodable bytes resolve to `None` (the caller shows a
//! placeholder), and a failed resize falls back to the unresized decode.
//!
//! Concurrent decode calls are fully independent and may complete in any
//! order. A decode that has started always runs to completion; there is no
//! cancellation.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task;
use tracing::{debug, warn};

use verdant_core::decode::{decode_photo, fit_dimensions, resize, DecodedImage, FilterType};

/// Decode photo bytes into a thumbnail bounded by `max_dimension`, off the
/// caller's execution context.
///
/// Returns `None` when the bytes cannot be decoded — a best-effort miss,
/// not an error. If the decode succeeds but the resize step fails, the
/// original decoded bitmap is returned instead; a resize failure must not
/// discard a good decode.
pub async fn decode_thumbnail(bytes: Vec<u8>, max_dimension: u32) -> Option<DecodedImage> {
    let joined = task::spawn_blocking(move || decode_and_fit(&bytes, max_dimension)).await;

    match joined {
        Ok(result) => result,
        Err(e) => {
            warn!(error = %e, "thumbnail decode worker did not complete");
            None
        }
    }
}

/// The synchronous decode + fit + resize step run on the worker pool.
fn decode_and_fit(bytes: &[u8], max_dimension: u32) -> Option<DecodedImage> {
    let decoded = match decode_photo(bytes) {
        Ok(image) => image,
        Err(e) => {
            debug!(error = %e, "photo bytes not decodable, caller falls back to placeholder");
            return None;
        }
    };

    let (width, height) = fit_dimensions(decoded.width, decoded.height, max_dimension);

    match resize(&decoded, width, height, FilterType::Bilinear) {
        Ok(thumbnail) => Some(thumbnail),
        Err(e) => {
            warn!(error = %e, "thumbnail resize failed, returning unresized decode");
            Some(decoded)
        }
    }
}

/// Decode pipeline with a configurable bound on in-flight work.
///
/// The reference behavior places no limit on simultaneous decodes; that is
/// [`ThumbnailPipeline::unbounded`]. [`ThumbnailPipeline::bounded`] caps
/// the number of decodes running at once, as a policy choice rather than a
/// hidden constant.
#[derive(Debug, Clone, Default)]
pub struct ThumbnailPipeline {
    permits: Option<Arc<Semaphore>>,
}

impl ThumbnailPipeline {
    /// Pipeline with no limit on concurrent decodes.
    pub fn unbounded() -> Self {
        Self { permits: None }
    }

    /// Pipeline allowing at most `max_in_flight` concurrent decodes.
    /// A zero bound is clamped to one so the pipeline can make progress.
    pub fn bounded(max_in_flight: usize) -> Self {
        Self {
            permits: Some(Arc::new(Semaphore::new(max_in_flight.max(1)))),
        }
    }

    /// Same contract as the free [`decode_thumbnail`], gated by this
    /// pipeline's concurrency bound.
    pub async fn decode_thumbnail(
        &self,
        bytes: Vec<u8>,
        max_dimension: u32,
    ) -> Option<DecodedImage> {
        let _permit = match &self.permits {
            // The semaphore is never closed, so acquire only fails if the
            // pipeline is torn down mid-call; treat that as a miss.
            Some(semaphore) => match semaphore.acquire().await {
                Ok(permit) => Some(permit),
                Err(_) => return None,
            },
            None => None,
        };

        decode_thumbnail(bytes, max_dimension).await
    }
}
