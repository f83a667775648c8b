//! Opaque photo identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier for one logical photo.
///
/// Minted by the caller (one per photo record) and used as the cache key.
/// The cache itself never interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhotoId(Uuid);

impl PhotoId {
    /// Mint a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for PhotoId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for PhotoId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for PhotoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
