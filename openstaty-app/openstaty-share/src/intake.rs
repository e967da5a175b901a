use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, error, info, warn};

use crate::bridge::{MethodResponse, SharedFileNotifier, EVENT_ON_SHARED_FILE, METHOD_GET_SHARED_FILE};
use crate::error::Result;
use crate::intent::ShareIntent;
use crate::materialize::Materializer;
use crate::pending::{PendingShare, SharedPayload};
use crate::resolver::ContentResolver;

/// Receives share intents, materializes their content and hands the
/// resulting path to the UI, by push when a listener is attached and by
/// pull otherwise.
pub struct ShareIntake {
    materializer: Materializer,
    resolver: Box<dyn ContentResolver>,
    pending: PendingShare,
    listener: RwLock<Option<Arc<dyn SharedFileNotifier>>>,
}

impl ShareIntake {
    pub fn new(materializer: Materializer, resolver: impl ContentResolver + 'static) -> Self {
        Self {
            materializer,
            resolver: Box::new(resolver),
            pending: PendingShare::new(),
            listener: RwLock::new(None),
        }
    }

    pub fn materializer(&self) -> &Materializer {
        &self.materializer
    }

    /// The intent the app was started with.
    pub fn on_launch(&self, intent: &ShareIntent) {
        debug!("Launch intent: {:?}", intent.action);
        self.handle_share_intent(intent);
    }

    /// An intent delivered while the app was already running.
    pub fn on_redeliver(&self, intent: &ShareIntent) {
        debug!("Redelivered intent: {:?}", intent.action);
        self.handle_share_intent(intent);
    }

    /// Materializes whatever `intent` carries and publishes the path.
    ///
    /// Never fails: anything that goes wrong is logged and the pending state
    /// is left as it was.
    pub fn handle_share_intent(&self, intent: &ShareIntent) -> Option<SharedPayload> {
        let path = match self.materialize_intent(intent)? {
            Ok(path) => path,
            Err(e) => {
                error!("Failed to materialize shared content: {}", e);
                return None;
            }
        };

        let payload = SharedPayload::new(path);
        info!("Shared file ready at {:?}", payload.path());
        if self.pending.set(payload.clone()).is_some() {
            debug!("Replaced an unconsumed shared file");
        }
        self.push(&payload);
        Some(payload)
    }

    /// Returns the pending path, if any, and forgets it.
    pub fn resolve_shared_file(&self) -> Option<String> {
        self.pending.take().map(|p| p.to_bridge_string())
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_pending()
    }

    /// Dispatches a UI → shim call on the share channel.
    pub fn handle_method_call(&self, method: &str) -> MethodResponse {
        match method {
            METHOD_GET_SHARED_FILE => MethodResponse::Success(self.resolve_shared_file()),
            other => {
                warn!("Unsupported share channel method: {}", other);
                MethodResponse::NotImplemented
            }
        }
    }

    pub fn attach_listener(&self, notifier: Arc<dyn SharedFileNotifier>) {
        *self.listener.write().unwrap_or_else(PoisonError::into_inner) = Some(notifier);
        debug!("Share listener attached");
    }

    pub fn detach_listener(&self) {
        *self.listener.write().unwrap_or_else(PoisonError::into_inner) = None;
        debug!("Share listener detached");
    }

    pub fn has_listener(&self) -> bool {
        self.listener
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// `None` when the intent carries nothing shareable.
    fn materialize_intent(&self, intent: &ShareIntent) -> Option<Result<PathBuf>> {
        if intent.is_send() {
            if let Some(content) = &intent.stream {
                return Some(self.materializer.materialize(self.resolver.as_ref(), content));
            }
        }
        let text = intent.text.as_deref()?;
        Some(self.materializer.write_text(text))
    }

    fn push(&self, payload: &SharedPayload) {
        let listener = self
            .listener
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        let Some(listener) = listener else {
            debug!("No share listener attached, waiting for pull");
            return;
        };
        if let Err(e) = listener.notify(EVENT_ON_SHARED_FILE, &payload.to_bridge_string()) {
            warn!("Failed to push shared file to UI: {}", e);
        }
    }
}
