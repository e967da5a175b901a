use serde::{Deserialize, Serialize};

/// Name used when the content's display name can't be resolved.
pub const DEFAULT_FALLBACK_FILE_NAME: &str = "shared_file";

/// Fixed cache file that inline text shares are written to.
pub const DEFAULT_TEXT_FILE_NAME: &str = "shared_chat.txt";

/// Share intake settings, read from the `plugins.openstaty-share` config block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShareConfig {
    /// Optional subdirectory of the app cache dir to write shares into.
    pub cache_subdir: Option<String>,
    pub fallback_file_name: String,
    pub text_file_name: String,
    /// Treat files passed on the desktop command line as a launch share.
    pub desktop_launch_args: bool,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            cache_subdir: None,
            fallback_file_name: DEFAULT_FALLBACK_FILE_NAME.to_string(),
            text_file_name: DEFAULT_TEXT_FILE_NAME.to_string(),
            desktop_launch_args: true,
        }
    }
}
