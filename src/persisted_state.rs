// SPDX-License-Identifier: MPL-2.0
//! View state persistence using CBOR format.
//!
//! A [`SavedView`] captures everything needed to reproduce the visible
//! content region across a destroy-recreate cycle (e.g. a device
//! rotation): the normalized zoom, the geometry it was measured against,
//! and the four live transform components. Hosts store the encoded bytes
//! as an opaque record alongside their own view state.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// View state that survives a destroy-recreate cycle.
///
/// Produced by [`TouchEngine::save_view`](crate::TouchEngine::save_view)
/// and consumed by
/// [`TouchEngine::restore_view`](crate::TouchEngine::restore_view).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SavedView {
    /// Zoom level relative to the fit scale.
    pub normalized_scale: f32,
    /// Fit width at save time.
    pub match_width: f32,
    /// Fit height at save time.
    pub match_height: f32,
    /// View width at save time.
    pub view_width: f32,
    /// View height at save time.
    pub view_height: f32,
    /// The four live transform components, as
    /// [`Transform::values`](crate::Transform::values) lays them out.
    pub transform: [f32; 4],
}

impl SavedView {
    /// Encodes the record as CBOR bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        ciborium::into_writer(self, &mut bytes)
            .map_err(|e| Error::State(e.to_string()))?;
        Ok(bytes)
    }

    /// Decodes a record previously produced by
    /// [`to_bytes`](Self::to_bytes).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        ciborium::from_reader(bytes).map_err(|e: ciborium::de::Error<std::io::Error>| {
            Error::State(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SavedView {
        SavedView {
            normalized_scale: 2.0,
            match_width: 1000.0,
            match_height: 500.0,
            view_width: 1000.0,
            view_height: 1000.0,
            transform: [1.0, 1.0, -500.0, 0.0],
        }
    }

    #[test]
    fn cbor_round_trip_preserves_the_record() {
        let original = sample();
        let bytes = original.to_bytes().expect("encode");
        let decoded = SavedView::from_bytes(&bytes).expect("decode");
        assert_eq!(decoded, original);
    }

    #[test]
    fn decoding_garbage_fails_with_a_state_error() {
        let result = SavedView::from_bytes(b"not a cbor record");
        assert!(matches!(result, Err(Error::State(_))));
    }

    #[test]
    fn decoding_an_empty_record_fails() {
        assert!(SavedView::from_bytes(&[]).is_err());
    }
}
