//! Error types for the openstaty-share plugin.

use serde::{Serialize, Serializer};

/// Result type alias for plugin operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Share(#[from] openstaty_share::ShareError),

    #[error(transparent)]
    Tauri(#[from] tauri::Error),

    /// The UI called a method the share channel doesn't know.
    #[error("Method not implemented: {0}")]
    NotImplemented(String),

    /// Mobile plugin invocation error.
    #[cfg(mobile)]
    #[error("Plugin invoke error: {0}")]
    PluginInvoke(String),
}

#[cfg(mobile)]
impl From<tauri::plugin::mobile::PluginInvokeError> for Error {
    fn from(err: tauri::plugin::mobile::PluginInvokeError) -> Self {
        Error::PluginInvoke(err.to_string())
    }
}

impl Serialize for Error {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.to_string().as_ref())
    }
}
