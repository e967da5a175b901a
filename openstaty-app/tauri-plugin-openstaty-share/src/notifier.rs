use openstaty_share::{SharedFileNotifier, ShareError};
use tauri::{AppHandle, Emitter, Runtime};

/// Pushes share events to every webview of the app.
pub struct WebviewNotifier<R: Runtime>(AppHandle<R>);

impl<R: Runtime> WebviewNotifier<R> {
    pub fn new(app: AppHandle<R>) -> Self {
        Self(app)
    }
}

impl<R: Runtime> SharedFileNotifier for WebviewNotifier<R> {
    fn notify(&self, event: &str, path: &str) -> openstaty_share::Result<()> {
        self.0
            .emit(event, path)
            .map_err(|e| ShareError::Notify(e.to_string()))
    }
}
