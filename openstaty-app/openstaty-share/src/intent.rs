use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Action string Android attaches to a "share with" intent.
pub const ACTION_SEND: &str = "android.intent.action.SEND";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum IntentAction {
    Send,
    #[default]
    Main,
    Other(String),
}

impl IntentAction {
    pub fn parse(action: &str) -> Self {
        match action {
            ACTION_SEND | "send" => IntentAction::Send,
            "android.intent.action.MAIN" | "main" => IntentAction::Main,
            other => IntentAction::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            IntentAction::Send => ACTION_SEND,
            IntentAction::Main => "android.intent.action.MAIN",
            IntentAction::Other(s) => s,
        }
    }
}

impl Serialize for IntentAction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for IntentAction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(IntentAction::parse(&s))
    }
}

/// Opaque handle to shared bytes: a `content://` URI, a `file://` URI, or a
/// bare path on desktop.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentRef(String);

impl ContentRef {
    pub fn new(uri: impl Into<String>) -> Self {
        ContentRef(uri.into())
    }

    pub fn from_path(path: &Path) -> Self {
        ContentRef(path.to_string_lossy().into_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Local filesystem path this reference points at, if it has one.
    pub fn to_file_path(&self) -> Option<PathBuf> {
        if self.0.starts_with("file:") {
            return url::Url::parse(&self.0).ok()?.to_file_path().ok();
        }
        if self.0.contains("://") || self.0.is_empty() {
            return None;
        }
        Some(PathBuf::from(&self.0))
    }
}

impl fmt::Display for ContentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A share request delivered by the OS, already lifted out of the native
/// intent object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareIntent {
    #[serde(default)]
    pub action: IntentAction,
    /// `EXTRA_STREAM`
    #[serde(default)]
    pub stream: Option<ContentRef>,
    /// `EXTRA_TEXT`
    #[serde(default)]
    pub text: Option<String>,
}

impl ShareIntent {
    pub fn send_stream(content: ContentRef) -> Self {
        Self {
            action: IntentAction::Send,
            stream: Some(content),
            text: None,
        }
    }

    pub fn send_text(text: impl Into<String>) -> Self {
        Self {
            action: IntentAction::Send,
            stream: None,
            text: Some(text.into()),
        }
    }

    pub fn is_send(&self) -> bool {
        self.action == IntentAction::Send
    }

    /// Builds a launch intent from desktop command-line arguments. The first
    /// argument after the program name that names an existing file wins.
    pub fn from_args<I, S>(args: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        args.into_iter()
            .skip(1)
            .map(|arg| ContentRef::new(arg.as_ref()))
            .find(|content| {
                content
                    .to_file_path()
                    .map(|p| p.is_file())
                    .unwrap_or(false)
            })
            .map(ShareIntent::send_stream)
    }
}
