use openstaty_share::ShareConfig;
use tauri::{
    plugin::{Builder, TauriPlugin},
    Manager, Runtime,
};

pub use models::*;
pub use openstaty_share::{
    ContentRef, IntentAction, ShareIntake, ShareIntent, SharedPayload, CHANNEL,
    EVENT_ON_SHARED_FILE, METHOD_GET_SHARED_FILE,
};

#[cfg(desktop)]
mod desktop;
#[cfg(mobile)]
mod mobile;

mod commands;
mod error;
mod models;
mod notifier;

pub use error::{Error, Result};
pub use notifier::WebviewNotifier;

#[cfg(desktop)]
pub use desktop::OpenstatyShare;
#[cfg(mobile)]
pub use mobile::OpenstatyShare;

const PLUGIN_NAME: &str = "openstaty-share";

/// Extensions to [`tauri::App`], [`tauri::AppHandle`] and [`tauri::Window`] to access the share intake.
pub trait OpenstatyShareExt<R: Runtime> {
    fn openstaty_share(&self) -> &OpenstatyShare<R>;
}

impl<R: Runtime, T: Manager<R>> crate::OpenstatyShareExt<R> for T {
    fn openstaty_share(&self) -> &OpenstatyShare<R> {
        self.state::<OpenstatyShare<R>>().inner()
    }
}

/// Initializes the openstaty-share plugin.
///
/// - Materializes the intent the app was launched with into the cache dir
/// - Picks up intents redelivered while running (pulled on resume on mobile;
///   on desktop the host forwards second-instance argv to `on_redeliver_args`)
/// - Serves `getSharedFile` to the frontend and pushes `onSharedFile` once
///   the frontend has attached a listener
pub fn init<R: Runtime>() -> TauriPlugin<R, Option<ShareConfig>> {
    Builder::<R, Option<ShareConfig>>::new(PLUGIN_NAME)
        .invoke_handler(tauri::generate_handler![
            commands::get_shared_file,
            commands::invoke_method,
            commands::attach_listener,
            commands::detach_listener,
        ])
        .setup(|app, api| {
            #[cfg(mobile)]
            let share = mobile::init(app, api)?;
            #[cfg(desktop)]
            let share = desktop::init(app, api)?;
            app.manage(share);
            Ok(())
        })
        .on_event(|app, event| {
            if let tauri::RunEvent::Resumed = event {
                tracing::debug!("{}: app resumed", PLUGIN_NAME);
                #[cfg(mobile)]
                app.openstaty_share().poll_new_intent();
                #[cfg(desktop)]
                let _ = app;
            }
        })
        .build()
}
