use std::fs::File;
use std::io::Read;
use std::os::fd::FromRawFd;
use std::sync::Arc;

use openstaty_share::{
    ContentRef, ContentResolver, Materializer, ShareConfig, ShareError, ShareIntake, ShareIntent,
};
use tauri::{
    plugin::{PluginApi, PluginHandle},
    AppHandle, Manager, Runtime,
};
use tracing::{debug, info, warn};

use crate::models::*;

#[cfg(target_os = "ios")]
tauri::ios_plugin_binding!(init_plugin_openstaty_share);

/// Initialize the mobile plugin by registering with the native layer, then
/// pull the intent the activity was launched with.
pub fn init<R: Runtime>(
    app: &AppHandle<R>,
    api: PluginApi<R, Option<ShareConfig>>,
) -> crate::Result<OpenstatyShare<R>> {
    let config = api.config().clone().unwrap_or_default();

    #[cfg(target_os = "android")]
    let handle = api.register_android_plugin("tech.sallytion.openstaty.share", "SharePlugin")?;
    #[cfg(target_os = "ios")]
    let handle = api.register_ios_plugin(init_plugin_openstaty_share)?;
    let handle = Arc::new(handle);

    let cache_dir = app.path().app_cache_dir()?;
    let intake = ShareIntake::new(
        Materializer::new(cache_dir, &config),
        NativeResolver(handle.clone()),
    );
    info!(
        "share intake ready, cache dir {:?}",
        intake.materializer().cache_dir()
    );

    let share = OpenstatyShare { handle, intake };
    share.take_intent("takeLaunchIntent", |intake, intent| intake.on_launch(intent));
    Ok(share)
}

/// Access to the share intake on mobile.
pub struct OpenstatyShare<R: Runtime> {
    handle: Arc<PluginHandle<R>>,
    intake: ShareIntake,
}

impl<R: Runtime> OpenstatyShare<R> {
    pub fn intake(&self) -> &ShareIntake {
        &self.intake
    }

    /// Pulls an intent delivered through `onNewIntent` while the app was
    /// already running. Called when the app resumes.
    pub fn poll_new_intent(&self) {
        self.take_intent("takeNewIntent", |intake, intent| intake.on_redeliver(intent));
    }

    fn take_intent(&self, command: &str, deliver: impl FnOnce(&ShareIntake, &ShareIntent)) {
        match self.handle.run_mobile_plugin::<IntentResponse>(command, ()) {
            Ok(IntentResponse { intent: Some(intent) }) => deliver(&self.intake, &intent),
            Ok(IntentResponse { intent: None }) => debug!("{}: no intent pending", command),
            Err(e) => warn!("{} failed: {}", command, e),
        }
    }
}

/// Resolves `content://` references through the platform content resolver.
struct NativeResolver<R: Runtime>(Arc<PluginHandle<R>>);

impl<R: Runtime> ContentResolver for NativeResolver<R> {
    fn display_name(&self, content: &ContentRef) -> openstaty_share::Result<Option<String>> {
        self.0
            .run_mobile_plugin::<DisplayNameResponse>(
                "queryDisplayName",
                ContentRequest {
                    uri: content.as_str(),
                },
            )
            .map(|r| r.display_name)
            .map_err(|e| ShareError::metadata(content.as_str(), e))
    }

    fn open(&self, content: &ContentRef) -> openstaty_share::Result<Box<dyn Read + Send>> {
        let response = self
            .0
            .run_mobile_plugin::<OpenContentResponse>(
                "openContent",
                ContentRequest {
                    uri: content.as_str(),
                },
            )
            .map_err(|e| ShareError::open(content.as_str(), e))?;

        if let Some(fd) = response.adoptable_fd() {
            // SAFETY: per the `OpenContentResponse::fd` contract the
            // descriptor was detached and handed over; nothing else closes
            // it, and the File does on drop.
            let file = unsafe { File::from_raw_fd(fd) };
            return Ok(Box::new(file));
        }

        match response {
            OpenContentResponse {
                path: Some(path), ..
            } => {
                let file = File::open(&path).map_err(|e| ShareError::open(content.as_str(), e))?;
                Ok(Box::new(file))
            }
            OpenContentResponse { fd: Some(fd), .. } => Err(ShareError::open(
                content.as_str(),
                format!("refusing to adopt descriptor {}", fd),
            )),
            _ => Err(ShareError::open(content.as_str(), "provider returned no stream")),
        }
    }
}
