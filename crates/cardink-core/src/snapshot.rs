//! Snapshot payload and share-token storage.
//!
//! A finished card is persisted as `{ version, design, blocks }` keyed
//! by an opaque share token. The engine itself only needs to produce a
//! serializable block list; backends beyond in-memory storage live
//! outside this crate.

use crate::blocks::Block;
use crate::design::DesignKey;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use thiserror::Error;
use uuid::Uuid;

/// Current snapshot wire format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable card state for sharing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotPayload {
    pub version: u32,
    pub design: DesignKey,
    pub blocks: Vec<Block>,
}

impl SnapshotPayload {
    /// Snapshot the given design + block list at the current version.
    pub fn new(design: DesignKey, blocks: Vec<Block>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            design,
            blocks,
        }
    }
}

/// Snapshot storage errors.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Snapshot not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for snapshot operations.
pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Trait for snapshot storage backends.
pub trait SnapshotStore {
    /// Store a payload, returning the opaque share token it is now
    /// retrievable under.
    fn save(&self, payload: &SnapshotPayload) -> SnapshotResult<String>;

    /// Retrieve a payload by share token.
    fn load(&self, token: &str) -> SnapshotResult<SnapshotPayload>;
}

/// Generate an opaque share token.
fn new_token() -> String {
    Uuid::new_v4().simple().to_string()[..16].to_string()
}

/// In-memory snapshot storage for testing and ephemeral use. Payloads
/// round-trip through JSON so serialization errors surface here, not in
/// a real backend.
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    snapshots: RwLock<HashMap<String, String>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn save(&self, payload: &SnapshotPayload) -> SnapshotResult<String> {
        let json = serde_json::to_string(payload)?;
        let token = new_token();
        let mut snapshots = self
            .snapshots
            .write()
            .map_err(|e| SnapshotError::Other(format!("Lock error: {e}")))?;
        snapshots.insert(token.clone(), json);
        log::debug!("saved snapshot under token {token}");
        Ok(token)
    }

    fn load(&self, token: &str) -> SnapshotResult<SnapshotPayload> {
        let snapshots = self
            .snapshots
            .read()
            .map_err(|e| SnapshotError::Other(format!("Lock error: {e}")))?;
        let json = snapshots
            .get(token)
            .ok_or_else(|| SnapshotError::NotFound(token.to_string()))?;
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::TextBlock;
    use kurbo::Point;

    fn payload() -> SnapshotPayload {
        SnapshotPayload::new(
            DesignKey::Plain,
            vec![TextBlock::new(Point::new(100.0, 120.0), "山田 太郎").into()],
        )
    }

    #[test]
    fn test_save_load_roundtrip() {
        let store = MemorySnapshotStore::new();
        let saved = payload();
        let token = store.save(&saved).unwrap();
        let loaded = store.load(&token).unwrap();
        assert_eq!(loaded, saved);
    }

    #[test]
    fn test_unknown_token_is_not_found() {
        let store = MemorySnapshotStore::new();
        assert!(matches!(
            store.load("nope"),
            Err(SnapshotError::NotFound(_))
        ));
    }

    #[test]
    fn test_tokens_are_unique() {
        let store = MemorySnapshotStore::new();
        let a = store.save(&payload()).unwrap();
        let b = store.save(&payload()).unwrap();
        assert_ne!(a, b);
        assert_eq!(a.len(), 16);
    }

    #[test]
    fn test_payload_wire_format() {
        let json = serde_json::to_string(&payload()).unwrap();
        assert!(json.contains("\"version\":1"));
        assert!(json.contains("\"design\":\"plain\""));
        let back: SnapshotPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(back.version, SNAPSHOT_VERSION);
    }
}
