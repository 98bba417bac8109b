//! Refresh-gating fingerprints.
//!
//! A fingerprint is a content hash of the external id a refresh attempt was
//! keyed on. Comparing the stored fingerprint against a freshly computed one
//! answers "did the identity input change since the last check" without any
//! I/O, which is what makes the skip decision unit-testable on its own.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::item::RefreshRecord;

/// Deterministic hash of an external-id string.
///
/// The empty id maps to a fixed all-zero sentinel rather than the hash of
/// `""`, so "no id known" stays distinguishable from every real id while an
/// absent [`RefreshRecord`] still means "never checked". Id case is
/// significant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Sentinel for "no external id known".
    pub fn none() -> Self {
        Fingerprint("0".repeat(64))
    }

    /// Fingerprint `id`, mapping the empty string to [`Fingerprint::none`].
    pub fn of(id: &str) -> Self {
        if id.is_empty() {
            return Self::none();
        }
        Fingerprint(hex::encode(Sha256::digest(id.as_bytes())))
    }

    /// Hex form of the digest.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Pure refresh gate: should an attempt run, given the fingerprint of the
/// currently known id and the stored record?
///
/// Runs when no attempt ever completed, when the caller forces, when the
/// provider's logic version changed, or when the identity input changed.
pub fn needs_refresh(
    current: &Fingerprint,
    record: Option<&RefreshRecord>,
    force: bool,
    version: u32,
) -> bool {
    if force {
        return true;
    }
    match record {
        None => true,
        Some(record) => record.version != version || record.fingerprint != *current,
    }
}
