//! The named channel between the share shim and the UI runtime.

use serde::Serialize;

use crate::error::Result;

/// Channel name shared with the UI side.
pub const CHANNEL: &str = "tech.sallytion.openstaty/share";

/// UI → shim: take the pending shared file path.
pub const METHOD_GET_SHARED_FILE: &str = "getSharedFile";

/// Shim → UI: a new shared file path is ready.
pub const EVENT_ON_SHARED_FILE: &str = "onSharedFile";

/// Result of a UI → shim method call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "camelCase")]
pub enum MethodResponse {
    Success(Option<String>),
    NotImplemented,
}

/// Push side of the channel. Implemented by whatever can reach the UI
/// runtime while it's alive (a webview emitter, a test recorder, ...).
pub trait SharedFileNotifier: Send + Sync {
    fn notify(&self, event: &str, path: &str) -> Result<()>;
}
