use std::marker::PhantomData;

use openstaty_share::{FileResolver, Materializer, ShareConfig, ShareIntake, ShareIntent};
use tauri::{plugin::PluginApi, AppHandle, Manager, Runtime};
use tracing::{debug, info};

/// Initialize the desktop plugin.
///
/// Desktop has no share sheet; "Open with" hands files over as command-line
/// arguments instead, so those are treated as the launch intent.
pub fn init<R: Runtime>(
    app: &AppHandle<R>,
    api: PluginApi<R, Option<ShareConfig>>,
) -> crate::Result<OpenstatyShare<R>> {
    let config = api.config().clone().unwrap_or_default();
    let cache_dir = app.path().app_cache_dir()?;
    let intake = ShareIntake::new(Materializer::new(cache_dir, &config), FileResolver);
    info!(
        "share intake ready, cache dir {:?}",
        intake.materializer().cache_dir()
    );

    if config.desktop_launch_args {
        let args = std::env::args_os().map(|a| a.to_string_lossy().into_owned());
        match ShareIntent::from_args(args) {
            Some(intent) => intake.on_launch(&intent),
            None => debug!("No shared file on the command line"),
        }
    }

    Ok(OpenstatyShare {
        intake,
        _runtime: PhantomData,
    })
}

/// Access to the share intake on desktop.
pub struct OpenstatyShare<R: Runtime> {
    intake: ShareIntake,
    _runtime: PhantomData<fn() -> R>,
}

impl<R: Runtime> OpenstatyShare<R> {
    pub fn intake(&self) -> &ShareIntake {
        &self.intake
    }

    /// Feeds the argv of a second app instance (from the single-instance
    /// plugin callback) through the redelivery path.
    pub fn on_redeliver_args(&self, args: Vec<String>) {
        match ShareIntent::from_args(args) {
            Some(intent) => self.intake.on_redeliver(&intent),
            None => debug!("Second instance carried no shared file"),
        }
    }
}
