use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShareError {
    #[error("Could not open shared content {uri}: {reason}")]
    Open { uri: String, reason: String },

    #[error("Metadata query failed for {uri}: {reason}")]
    Metadata { uri: String, reason: String },

    #[error("Failed to notify UI: {0}")]
    Notify(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cache directory unavailable: {0}")]
    NoCacheDir(String),

    #[error("Method not implemented: {0}")]
    NotImplemented(String),
}

impl ShareError {
    pub fn open(uri: impl Into<String>, reason: impl ToString) -> Self {
        ShareError::Open {
            uri: uri.into(),
            reason: reason.to_string(),
        }
    }

    pub fn metadata(uri: impl Into<String>, reason: impl ToString) -> Self {
        ShareError::Metadata {
            uri: uri.into(),
            reason: reason.to_string(),
        }
    }
}

impl serde::Serialize for ShareError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ShareError>;
