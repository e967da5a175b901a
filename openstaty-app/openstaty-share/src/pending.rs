use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

/// A materialized share waiting for the UI to pick it up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedPayload {
    pub local_path: PathBuf,
}

impl SharedPayload {
    pub fn new(local_path: impl Into<PathBuf>) -> Self {
        Self {
            local_path: local_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.local_path
    }

    /// Path as sent over the bridge.
    pub fn to_bridge_string(&self) -> String {
        self.local_path.to_string_lossy().into_owned()
    }
}

/// Single-slot holder for the unconsumed share. Last write wins, reads clear.
#[derive(Debug, Default)]
pub struct PendingShare {
    slot: Mutex<Option<SharedPayload>>,
}

impl PendingShare {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `payload`, returning whatever unconsumed payload it replaced.
    pub fn set(&self, payload: SharedPayload) -> Option<SharedPayload> {
        self.lock().replace(payload)
    }

    /// Returns the pending payload and empties the slot.
    pub fn take(&self) -> Option<SharedPayload> {
        self.lock().take()
    }

    pub fn peek(&self) -> Option<SharedPayload> {
        self.lock().clone()
    }

    pub fn is_pending(&self) -> bool {
        self.lock().is_some()
    }

    // A panic while holding the lock can't leave an Option half-written.
    fn lock(&self) -> MutexGuard<'_, Option<SharedPayload>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_empty() {
        let pending = PendingShare::new();
        assert!(!pending.is_pending());
        assert_eq!(pending.take(), None);
    }

    #[test]
    fn test_take_clears() {
        let pending = PendingShare::new();
        pending.set(SharedPayload::new("/cache/a.txt"));

        assert_eq!(pending.take(), Some(SharedPayload::new("/cache/a.txt")));
        assert_eq!(pending.take(), None);
    }

    #[test]
    fn test_last_write_wins() {
        let pending = PendingShare::new();
        assert_eq!(pending.set(SharedPayload::new("/cache/a.txt")), None);
        let replaced = pending.set(SharedPayload::new("/cache/b.txt"));

        assert_eq!(replaced, Some(SharedPayload::new("/cache/a.txt")));
        assert_eq!(pending.peek(), Some(SharedPayload::new("/cache/b.txt")));
        assert!(pending.is_pending());
    }

    #[test]
    fn test_payload_serializes_camel_case() {
        let json = serde_json::to_string(&SharedPayload::new("/cache/a.txt")).unwrap();
        assert_eq!(json, r#"{"localPath":"/cache/a.txt"}"#);
    }
}
