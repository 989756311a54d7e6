//! Blob Store
//!
//! Uploaded images and videos as plain files under a root directory.
//! URLs carry a short content hash so a re-upload to the same path gets a
//! fresh URL.

use std::path::{Component, Path, PathBuf};

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::domain::{DomainError, DomainResult};

/// Characters escaped in the path part of a `file://` URL
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Result of writing a blob
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    pub url: String,
    pub content_type: String,
    pub size: usize,
}

pub struct FileBlobStore {
    root: PathBuf,
}

impl FileBlobStore {
    /// Create the root directory if needed
    pub fn open(root: impl AsRef<Path>) -> DomainResult<Self> {
        std::fs::create_dir_all(root.as_ref())?;
        let root = root.as_ref().canonicalize()?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location of `path` inside the root; rejects anything that could escape it
    pub fn resolve(&self, path: &str) -> DomainResult<PathBuf> {
        let relative = Path::new(path);
        if path.trim().is_empty() || path.contains('\\') {
            return Err(DomainError::InvalidInput(format!("Invalid blob path: {:?}", path)));
        }
        let mut target = self.root.clone();
        for component in relative.components() {
            match component {
                Component::Normal(part) => target.push(part),
                Component::CurDir => {}
                _ => {
                    return Err(DomainError::InvalidInput(format!(
                        "Invalid blob path: {:?}",
                        path
                    )))
                }
            }
        }
        if target == self.root {
            return Err(DomainError::InvalidInput(format!("Invalid blob path: {:?}", path)));
        }
        Ok(target)
    }

    pub async fn write(&self, data: &[u8], path: &str) -> DomainResult<StoredBlob> {
        let target = self.resolve(path)?;
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, data).await?;

        let content_hash = blake3::hash(data).to_hex().to_string();
        let content_type = mime_guess::from_path(&target)
            .first_or_octet_stream()
            .to_string();
        let url = format!(
            "file://{}?v={}",
            utf8_percent_encode(&target.to_string_lossy(), PATH_SEGMENT),
            &content_hash[..12]
        );

        Ok(StoredBlob {
            url,
            content_type,
            size: data.len(),
        })
    }

    /// Remove the blob at `path`; a missing file is not an error
    pub async fn delete(&self, path: &str) -> DomainResult<()> {
        let target = self.resolve(path)?;
        match tokio::fs::remove_file(&target).await {
            Ok(()) => {
                log::info!("Deleted blob {}", path);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileBlobStore::open(dir.path().join("blobs")).unwrap();

        let stored = store.write(b"png bytes", "images/banner 1.png").await.unwrap();
        assert_eq!(stored.content_type, "image/png");
        assert_eq!(stored.size, 9);
        assert!(stored.url.starts_with("file://"));
        assert!(stored.url.contains("banner%201.png?v="));
        let on_disk = tokio::fs::read(store.resolve("images/banner 1.png").unwrap())
            .await
            .unwrap();
        assert_eq!(on_disk, b"png bytes");
    }

    #[tokio::test]
    async fn test_new_content_new_url() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileBlobStore::open(dir.path()).unwrap();
        let first = store.write(b"one", "a.jpg").await.unwrap();
        let second = store.write(b"two", "a.jpg").await.unwrap();
        assert_ne!(first.url, second.url);
    }

    #[test]
    fn test_rejects_escaping_paths() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileBlobStore::open(dir.path()).unwrap();
        for bad in ["../x.png", "/etc/passwd", "", "images/../../x", "a\\b.png", "."] {
            assert!(
                matches!(store.resolve(bad), Err(DomainError::InvalidInput(_))),
                "accepted {:?}",
                bad
            );
        }
        assert!(store.resolve("./images/ok.png").unwrap().starts_with(store.root()));
    }

    #[tokio::test]
    async fn test_delete_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileBlobStore::open(dir.path()).unwrap();
        store.write(b"x", "videos/clip.mp4").await.unwrap();
        let target = store.resolve("videos/clip.mp4").unwrap();
        assert!(target.exists());

        store.delete("videos/clip.mp4").await.unwrap();
        assert!(!target.exists());
        store.delete("videos/clip.mp4").await.unwrap();
        assert!(matches!(
            store.delete("../x").await,
            Err(DomainError::InvalidInput(_))
        ));
    }
}
