//! Content fingerprints for uploaded images.
//!
//! Identical uploads map to the same fingerprint, which keys the analysis
//! cache and is stored alongside each persisted analysis.

use sha2::{Digest, Sha256};

/// Cache namespace for skin tone analysis results.
pub const SKIN_TONE_CACHE_NAMESPACE: &str = "skin_tone";

/// Compute a SHA-256 hex digest of the uploaded image bytes.
pub fn image_fingerprint(data: &[u8]) -> String {
    let hash = Sha256::digest(data);
    format!("{hash:x}")
}

/// Build the cache key for an analysis of the given image bytes.
pub fn analysis_cache_key(data: &[u8]) -> String {
    format!("{SKIN_TONE_CACHE_NAMESPACE}:{}", image_fingerprint(data))
}
