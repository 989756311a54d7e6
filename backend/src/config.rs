//! Channel Configuration
//!
//! Settings live in `channel.json` inside the data directory. A missing file
//! means defaults; unknown keys are ignored and missing keys take defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};

pub const CONFIG_FILE: &str = "channel.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    /// Database file, relative to the data directory unless absolute
    pub db_file: PathBuf,
    /// Blob root, relative to the data directory unless absolute
    pub blob_dir: PathBuf,
    /// Log directory, relative to the data directory unless absolute
    pub log_dir: PathBuf,
    /// Handle stamped on new posts
    pub handle: String,
    /// Upper bound on images per post
    pub max_images: usize,
    /// Upper bound on post text length, in characters
    pub max_content_chars: usize,
    #[serde(skip)]
    data_dir: PathBuf,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            db_file: PathBuf::from("channel.db"),
            blob_dir: PathBuf::from("blobs"),
            log_dir: PathBuf::from("logs"),
            handle: "@channel".to_string(),
            max_images: 10,
            max_content_chars: 1000,
            data_dir: PathBuf::from("."),
        }
    }
}

impl ChannelConfig {
    /// Load `channel.json` from `data_dir`, falling back to defaults
    pub fn load(data_dir: &Path) -> DomainResult<Self> {
        let path = data_dir.join(CONFIG_FILE);
        let mut config = match std::fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str::<ChannelConfig>(&text).map_err(|e| {
                DomainError::InvalidInput(format!("{}: {}", path.display(), e))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No {} in {}, using defaults", CONFIG_FILE, data_dir.display());
                ChannelConfig::default()
            }
            Err(e) => return Err(e.into()),
        };
        config.data_dir = data_dir.to_path_buf();
        Ok(config)
    }

    /// Write the current settings to `channel.json` in the data directory
    pub fn save(&self) -> DomainResult<()> {
        std::fs::create_dir_all(&self.data_dir)?;
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(self.data_dir.join(CONFIG_FILE), json)?;
        Ok(())
    }

    /// In-memory settings rooted at `data_dir`, without touching disk
    pub fn for_data_dir(data_dir: &Path) -> Self {
        Self {
            data_dir: data_dir.to_path_buf(),
            ..Self::default()
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(&self.db_file)
    }

    pub fn blob_root(&self) -> PathBuf {
        self.data_dir.join(&self.blob_dir)
    }

    pub fn log_root(&self) -> PathBuf {
        self.data_dir.join(&self.log_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ChannelConfig::load(dir.path()).unwrap();
        assert_eq!(config.max_images, 10);
        assert_eq!(config.db_path(), dir.path().join("channel.db"));
    }

    #[test]
    fn test_partial_file_merges_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            r#"{"handle":"@cg","blob_dir":"/srv/blobs","extra":true}"#,
        )
        .unwrap();
        let config = ChannelConfig::load(dir.path()).unwrap();
        assert_eq!(config.handle, "@cg");
        assert_eq!(config.blob_root(), PathBuf::from("/srv/blobs"));
        assert_eq!(config.max_content_chars, 1000);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ChannelConfig::for_data_dir(dir.path());
        config.handle = "@saved".to_string();
        config.save().unwrap();
        assert_eq!(ChannelConfig::load(dir.path()).unwrap(), config);
    }

    #[test]
    fn test_malformed_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{ nope").unwrap();
        assert!(matches!(
            ChannelConfig::load(dir.path()),
            Err(DomainError::InvalidInput(_))
        ));
    }
}
