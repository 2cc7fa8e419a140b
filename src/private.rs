//! Private state threaded across planning cycles.
//!
//! An opaque key/value store of byte blobs that modifiers use to remember
//! information not expressible in the visible attribute tree. The engine
//! threads it by value through every modifier call of one pass and hands
//! the final version back to the caller, who persists it alongside the
//! resource and supplies it again on the next cycle.
//!
//! Keys beginning with `.` are reserved for the framework; provider-supplied
//! modifiers may only write to the unreserved namespace. This is a
//! convention gate, not a security boundary.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::PrivateStateError;

/// Prefix of the framework-reserved key namespace.
pub const RESERVED_PREFIX: &str = ".";

/// Opaque, namespaced key/value store of byte blobs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateState {
    entries: BTreeMap<String, Vec<u8>>,
}

impl PrivateState {
    /// Creates an empty private state, as on the first-ever plan.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Decodes private state from its wire form.
    ///
    /// Empty bytes decode to an empty state.
    ///
    /// # Errors
    ///
    /// Returns [`PrivateStateError::Malformed`] if the bytes are not a valid
    /// encoding.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrivateStateError> {
        if bytes.is_empty() {
            return Ok(Self::new());
        }
        serde_json::from_slice(bytes).map_err(|err| PrivateStateError::Malformed {
            message: err.to_string(),
        })
    }

    /// Encodes private state to its wire form.
    ///
    /// # Errors
    ///
    /// Returns [`PrivateStateError::Malformed`] if encoding fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>, PrivateStateError> {
        serde_json::to_vec(self).map_err(|err| PrivateStateError::Malformed {
            message: err.to_string(),
        })
    }

    /// Reads the blob stored under a key, from any namespace.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[u8]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Writes a blob under a provider-namespace key.
    ///
    /// # Errors
    ///
    /// Returns [`PrivateStateError::ReservedKey`] if the key is in the
    /// framework-reserved namespace, or [`PrivateStateError::EmptyKey`] if
    /// the key is empty.
    pub fn set(&mut self, key: impl Into<String>, value: Vec<u8>) -> Result<(), PrivateStateError> {
        let key = key.into();
        if key.is_empty() {
            return Err(PrivateStateError::EmptyKey);
        }
        if key.starts_with(RESERVED_PREFIX) {
            return Err(PrivateStateError::ReservedKey { key });
        }
        self.entries.insert(key, value);
        Ok(())
    }

    /// Removes the blob stored under a provider-namespace key.
    ///
    /// # Errors
    ///
    /// Returns [`PrivateStateError::ReservedKey`] if the key is reserved.
    pub fn remove(&mut self, key: &str) -> Result<(), PrivateStateError> {
        if key.starts_with(RESERVED_PREFIX) {
            return Err(PrivateStateError::ReservedKey {
                key: key.to_string(),
            });
        }
        self.entries.remove(key);
        Ok(())
    }

    /// Writes a blob under a framework-reserved key.
    ///
    /// For the host embedding the engine, not for modifiers; the
    /// provider-facing [`PrivateState::set`] rejects this namespace.
    pub fn set_framework_key(&mut self, key: impl Into<String>, value: Vec<u8>) {
        self.entries.insert(key.into(), value);
    }

    /// Number of stored entries across both namespaces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no entry is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over all entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut state = PrivateState::new();
        state.set("etag", b"abc".to_vec()).unwrap();
        assert_eq!(state.get("etag"), Some(b"abc".as_slice()));
        assert_eq!(state.get("missing"), None);
    }

    #[test]
    fn test_reserved_namespace_rejected() {
        let mut state = PrivateState::new();
        let err = state.set(".framework", b"x".to_vec()).unwrap_err();
        assert!(matches!(err, PrivateStateError::ReservedKey { .. }));
        assert!(state.remove(".framework").is_err());
    }

    #[test]
    fn test_empty_key_rejected() {
        let mut state = PrivateState::new();
        assert!(matches!(
            state.set("", b"x".to_vec()),
            Err(PrivateStateError::EmptyKey)
        ));
    }

    #[test]
    fn test_framework_key_internal_write() {
        let mut state = PrivateState::new();
        state.set_framework_key(".refresh", b"1".to_vec());
        assert_eq!(state.get(".refresh"), Some(b"1".as_slice()));
    }

    #[test]
    fn test_wire_round_trip() {
        let mut state = PrivateState::new();
        state.set("k", b"bytes".to_vec()).unwrap();
        state.set_framework_key(".f", b"v".to_vec());
        let bytes = state.to_bytes().unwrap();
        let decoded = PrivateState::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, state);
    }

    #[test]
    fn test_empty_bytes_decode_to_empty_state() {
        let state = PrivateState::from_bytes(&[]).unwrap();
        assert!(state.is_empty());
    }

    #[test]
    fn test_malformed_bytes_rejected() {
        assert!(matches!(
            PrivateState::from_bytes(b"not json"),
            Err(PrivateStateError::Malformed { .. })
        ));
    }
}
