use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Component, Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::config::ShareConfig;
use crate::error::{Result, ShareError};
use crate::intent::ContentRef;
use crate::resolver::ContentResolver;

/// Copies shared content into the cache directory.
#[derive(Debug, Clone)]
pub struct Materializer {
    cache_dir: PathBuf,
    fallback_file_name: String,
    text_file_name: String,
}

impl Materializer {
    pub fn new(cache_dir: impl Into<PathBuf>, config: &ShareConfig) -> Self {
        let mut cache_dir = cache_dir.into();
        if let Some(subdir) = config.cache_subdir.as_deref() {
            cache_dir = cache_dir.join(subdir);
        }
        Self {
            cache_dir,
            fallback_file_name: config.fallback_file_name.clone(),
            text_file_name: config.text_file_name.clone(),
        }
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Streams `content` into `<cache>/<display name>` and returns that path.
    ///
    /// Equal display names overwrite each other, but only once the copy has
    /// completed; a failed read leaves any existing file untouched.
    pub fn materialize(
        &self,
        resolver: &dyn ContentResolver,
        content: &ContentRef,
    ) -> Result<PathBuf> {
        let file_name = self.resolve_file_name(resolver, content);

        let mut reader = resolver.open(content)?;

        let dest = self.ensure_cache_dir()?.join(&file_name);
        let copied = self.replace_file(&dest, |writer| io::copy(&mut reader, writer))?;

        debug!("Copied {} bytes from {} to {:?}", copied, content, dest);
        Ok(dest)
    }

    /// Writes `text` verbatim to the fixed text share file.
    pub fn write_text(&self, text: &str) -> Result<PathBuf> {
        let dest = self.ensure_cache_dir()?.join(&self.text_file_name);
        self.replace_file(&dest, |writer| writer.write_all(text.as_bytes()))?;
        debug!("Wrote {} bytes of shared text to {:?}", text.len(), dest);
        Ok(dest)
    }

    fn resolve_file_name(&self, resolver: &dyn ContentResolver, content: &ContentRef) -> String {
        match resolver.display_name(content) {
            Ok(Some(name)) => match sanitize_file_name(&name) {
                Some(safe) => safe,
                None => {
                    warn!("Rejected display name {:?} for {}", name, content);
                    self.fallback_file_name.clone()
                }
            },
            Ok(None) => self.fallback_file_name.clone(),
            Err(e) => {
                debug!("Display name lookup failed, using fallback: {}", e);
                self.fallback_file_name.clone()
            }
        }
    }

    /// Writes into a temp file next to `dest` and renames it over `dest`
    /// after `fill` succeeds. On error the temp file is removed on drop.
    fn replace_file<T>(
        &self,
        dest: &Path,
        fill: impl FnOnce(&mut BufWriter<&mut fs::File>) -> io::Result<T>,
    ) -> Result<T> {
        let mut tmp = NamedTempFile::new_in(&self.cache_dir)?;
        let value = {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            let value = fill(&mut writer)?;
            writer.flush()?;
            value
        };
        tmp.persist(dest).map_err(|e| ShareError::Io(e.error))?;
        Ok(value)
    }

    fn ensure_cache_dir(&self) -> Result<&Path> {
        fs::create_dir_all(&self.cache_dir).map_err(|e| {
            ShareError::NoCacheDir(format!("{}: {}", self.cache_dir.display(), e))
        })?;
        Ok(&self.cache_dir)
    }
}

/// Reduces a provider-supplied display name to a single safe path component.
///
/// Both `/` and `\` count as separators since providers aren't consistent.
/// Whitespace is kept as-is.
pub fn sanitize_file_name(name: &str) -> Option<String> {
    if name.contains('\0') {
        return None;
    }
    let last = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let mut components = Path::new(last).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(c)), None) => Some(c.to_string_lossy().into_owned()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    struct StaticResolver {
        name: Option<&'static str>,
        bytes: &'static [u8],
    }

    impl ContentResolver for StaticResolver {
        fn display_name(&self, _content: &ContentRef) -> Result<Option<String>> {
            Ok(self.name.map(str::to_string))
        }

        fn open(&self, _content: &ContentRef) -> Result<Box<dyn Read + Send>> {
            Ok(Box::new(self.bytes))
        }
    }

    struct BrokenMetadata;

    impl ContentResolver for BrokenMetadata {
        fn display_name(&self, content: &ContentRef) -> Result<Option<String>> {
            Err(ShareError::metadata(content.as_str(), "cursor closed"))
        }

        fn open(&self, _content: &ContentRef) -> Result<Box<dyn Read + Send>> {
            Ok(Box::new(&b"payload"[..]))
        }
    }

    /// Yields `head`, then fails like a provider whose stream dies mid-copy.
    struct TruncatingReader {
        head: Option<&'static [u8]>,
    }

    impl Read for TruncatingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.head.take() {
                Some(head) => {
                    buf[..head.len()].copy_from_slice(head);
                    Ok(head.len())
                }
                None => Err(io::Error::other("provider died")),
            }
        }
    }

    struct TruncatingResolver;

    impl ContentResolver for TruncatingResolver {
        fn display_name(&self, _content: &ContentRef) -> Result<Option<String>> {
            Ok(Some("shared_chat.txt".into()))
        }

        fn open(&self, _content: &ContentRef) -> Result<Box<dyn Read + Send>> {
            Ok(Box::new(TruncatingReader { head: Some(b"PAR") }))
        }
    }

    fn materializer(dir: &Path) -> Materializer {
        Materializer::new(dir, &ShareConfig::default())
    }

    #[test]
    fn test_materialize_uses_display_name() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = StaticResolver {
            name: Some("WhatsApp Chat.txt"),
            bytes: b"[12/01] hello",
        };

        let path = materializer(dir.path())
            .materialize(&resolver, &ContentRef::new("content://x/1"))
            .unwrap();

        assert_eq!(path, dir.path().join("WhatsApp Chat.txt"));
        assert_eq!(fs::read(&path).unwrap(), b"[12/01] hello");
    }

    #[test]
    fn test_materialize_falls_back_when_name_missing_or_broken() {
        let dir = tempfile::tempdir().unwrap();
        let m = materializer(dir.path());
        let content = ContentRef::new("content://x/2");

        let path = m
            .materialize(&StaticResolver { name: None, bytes: b"a" }, &content)
            .unwrap();
        assert_eq!(path, dir.path().join("shared_file"));

        let path = m.materialize(&BrokenMetadata, &content).unwrap();
        assert_eq!(path, dir.path().join("shared_file"));
        assert_eq!(fs::read(&path).unwrap(), b"payload");
    }

    #[test]
    fn test_materialize_traversal_name_stays_in_cache() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = StaticResolver {
            name: Some("../../etc/passwd"),
            bytes: b"x",
        };

        let path = materializer(dir.path())
            .materialize(&resolver, &ContentRef::new("content://x/3"))
            .unwrap();
        assert_eq!(path, dir.path().join("passwd"));
    }

    #[test]
    fn test_read_error_keeps_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let m = materializer(dir.path());
        let existing = m.write_text("the full chat export").unwrap();

        let result = m.materialize(&TruncatingResolver, &ContentRef::new("content://x/4"));

        assert!(matches!(result, Err(ShareError::Io(_))));
        assert_eq!(fs::read_to_string(&existing).unwrap(), "the full chat export");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_text_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let m = materializer(dir.path());

        m.write_text("first, and longer").unwrap();
        let path = m.write_text("second").unwrap();

        assert_eq!(path, dir.path().join("shared_chat.txt"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn test_cache_subdir_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let config = ShareConfig {
            cache_subdir: Some("incoming".into()),
            ..ShareConfig::default()
        };
        let path = Materializer::new(dir.path(), &config)
            .write_text("hi")
            .unwrap();
        assert_eq!(path, dir.path().join("incoming").join("shared_chat.txt"));
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("photo.jpg").as_deref(), Some("photo.jpg"));
        assert_eq!(sanitize_file_name("a/b/c.pdf").as_deref(), Some("c.pdf"));
        assert_eq!(sanitize_file_name("..\\x.txt").as_deref(), Some("x.txt"));
        assert_eq!(sanitize_file_name(".."), None);
        assert_eq!(sanitize_file_name("."), None);
        assert_eq!(sanitize_file_name(""), None);
        assert_eq!(sanitize_file_name("dir/"), None);
        assert_eq!(sanitize_file_name("bad\0name"), None);
        assert_eq!(sanitize_file_name(" padded.txt ").as_deref(), Some(" padded.txt "));
    }
}
