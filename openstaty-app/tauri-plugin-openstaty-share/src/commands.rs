use std::sync::Arc;

use openstaty_share::MethodResponse;
use tauri::{command, AppHandle, Runtime};

use crate::notifier::WebviewNotifier;
use crate::OpenstatyShareExt;
use crate::{Error, Result};

/// Take the pending shared file path.
///
/// Called by the frontend once it is up, to pick up a file that was shared
/// before it could listen. The pending path is cleared by this call.
#[command]
pub(crate) async fn get_shared_file<R: Runtime>(app: AppHandle<R>) -> Result<Option<String>> {
    Ok(app.openstaty_share().intake().resolve_shared_file())
}

/// Generic entry point for calls on the share channel.
#[command]
pub(crate) async fn invoke_method<R: Runtime>(
    app: AppHandle<R>,
    method: String,
) -> Result<Option<String>> {
    match app.openstaty_share().intake().handle_method_call(&method) {
        MethodResponse::Success(value) => Ok(value),
        MethodResponse::NotImplemented => Err(Error::NotImplemented(method)),
    }
}

/// The frontend is listening for `onSharedFile`; push new shares from now on.
#[command]
pub(crate) async fn attach_listener<R: Runtime>(app: AppHandle<R>) -> Result<()> {
    let notifier = Arc::new(WebviewNotifier::new(app.clone()));
    app.openstaty_share().intake().attach_listener(notifier);
    Ok(())
}

/// Stop pushing; shares wait for the next `get_shared_file`.
#[command]
pub(crate) async fn detach_listener<R: Runtime>(app: AppHandle<R>) -> Result<()> {
    app.openstaty_share().intake().detach_listener();
    Ok(())
}
