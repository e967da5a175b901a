//! Share intake for OpenStaty.
//!
//! Another app shares a chat export (a content reference or plain text) with
//! OpenStaty; this crate copies it into the cache directory and hands the
//! resulting path to the UI over the `tech.sallytion.openstaty/share`
//! channel. It knows nothing about the host runtime: the Tauri plugin feeds
//! it intents and supplies a [`SharedFileNotifier`] for the push side.

pub mod bridge;
mod config;
mod error;
mod intake;
mod intent;
mod materialize;
mod pending;
mod resolver;

pub use bridge::{MethodResponse, SharedFileNotifier, CHANNEL, EVENT_ON_SHARED_FILE, METHOD_GET_SHARED_FILE};
pub use config::{ShareConfig, DEFAULT_FALLBACK_FILE_NAME, DEFAULT_TEXT_FILE_NAME};
pub use error::{Result, ShareError};
pub use intake::ShareIntake;
pub use intent::{ContentRef, IntentAction, ShareIntent, ACTION_SEND};
pub use materialize::{sanitize_file_name, Materializer};
pub use pending::{PendingShare, SharedPayload};
pub use resolver::{ContentResolver, FileResolver};
