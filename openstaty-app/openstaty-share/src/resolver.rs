//! Content resolution: turning a [`ContentRef`] into a name and a byte stream.

use std::fs::File;
use std::io::Read;

use crate::error::{Result, ShareError};
use crate::intent::ContentRef;

/// Resolves content references handed over by the OS.
///
/// On Android this is backed by the platform content resolver; on desktop
/// references are plain files.
pub trait ContentResolver: Send + Sync {
    /// Human-readable name for the content, if the provider exposes one.
    fn display_name(&self, content: &ContentRef) -> Result<Option<String>>;

    /// Opens the content for reading.
    fn open(&self, content: &ContentRef) -> Result<Box<dyn Read + Send>>;
}

/// Resolver for `file://` URIs and bare filesystem paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileResolver;

impl ContentResolver for FileResolver {
    fn display_name(&self, content: &ContentRef) -> Result<Option<String>> {
        let path = content
            .to_file_path()
            .ok_or_else(|| ShareError::metadata(content.as_str(), "not a file reference"))?;
        Ok(path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned()))
    }

    fn open(&self, content: &ContentRef) -> Result<Box<dyn Read + Send>> {
        let path = content
            .to_file_path()
            .ok_or_else(|| ShareError::open(content.as_str(), "not a file reference"))?;
        let file = File::open(&path).map_err(|e| ShareError::open(content.as_str(), e))?;
        Ok(Box::new(file))
    }
}
