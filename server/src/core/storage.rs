//! Platform-aware data storage directory management
//!
//! ## Platform Paths
//!
//! | Type | Windows | macOS | Linux |
//! |------|---------|-------|-------|
//! | Data | `%APPDATA%\Libris\` | `~/Library/Application Support/Libris/` | `$XDG_DATA_HOME/libris/` |
//!
//! `LIBRIS_DATA_DIR` overrides the platform path.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;

use super::constants::{APP_DOT_FOLDER, APP_NAME, ENV_DATA_DIR};
use crate::utils::file::expand_path;

/// Data subdirectories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSubdir {
    Sqlite,
}

impl DataSubdir {
    pub const fn as_str(&self) -> &'static str {
        match self {
            DataSubdir::Sqlite => "sqlite",
        }
    }

    /// Subdirectories created at startup
    pub const fn all() -> &'static [DataSubdir] {
        &[DataSubdir::Sqlite]
    }
}

/// Application storage manager
#[derive(Debug, Clone)]
pub struct AppStorage {
    data_dir: PathBuf,
}

impl AppStorage {
    /// Initialize storage with platform-appropriate data directory
    pub async fn init() -> Result<Self> {
        let storage = Self::at(Self::resolve_data_dir()).await?;
        tracing::debug!(data_dir = %storage.data_dir.display(), "Storage initialized");
        Ok(storage)
    }

    /// Use `data_dir` as the storage root, creating it and all subdirectories
    pub async fn at(data_dir: PathBuf) -> Result<Self> {
        Self::ensure_directories(&data_dir).await?;

        // Canonicalize only after creation, it requires the path to exist
        let data_dir = data_dir.canonicalize().unwrap_or(data_dir);
        Ok(Self { data_dir })
    }

    /// Resolve data directory from env var or platform default
    pub fn resolve_data_dir() -> PathBuf {
        if let Ok(dir) = std::env::var(ENV_DATA_DIR) {
            return expand_path(&dir);
        }

        if let Some(proj_dirs) = ProjectDirs::from("", "", APP_NAME) {
            return proj_dirs.data_dir().to_path_buf();
        }

        // Fallback to local .libris
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        cwd.join(APP_DOT_FOLDER)
    }

    async fn ensure_directories(data_dir: &Path) -> Result<()> {
        tokio::fs::create_dir_all(data_dir)
            .await
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;

        for subdir in DataSubdir::all() {
            let path = data_dir.join(subdir.as_str());
            tokio::fs::create_dir_all(&path).await.with_context(|| {
                format!(
                    "Failed to create {} directory: {}",
                    subdir.as_str(),
                    path.display()
                )
            })?;
        }

        Ok(())
    }

    /// Get the data directory path
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Get path to a subdirectory
    pub fn subdir(&self, subdir: DataSubdir) -> PathBuf {
        self.data_dir.join(subdir.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_subdir_as_str() {
        assert_eq!(DataSubdir::Sqlite.as_str(), "sqlite");
        assert_eq!(DataSubdir::all(), &[DataSubdir::Sqlite]);
    }

    #[tokio::test]
    async fn test_at_creates_subdirectories() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path().join("nested").join("data");

        let storage = AppStorage::at(root.clone()).await.unwrap();
        assert!(storage.data_dir().is_absolute());
        assert!(storage.subdir(DataSubdir::Sqlite).is_dir());
        assert!(root.join("sqlite").is_dir());
    }

    #[tokio::test]
    async fn test_at_is_idempotent() {
        let temp = tempfile::tempdir().unwrap();
        AppStorage::at(temp.path().to_path_buf()).await.unwrap();
        let storage = AppStorage::at(temp.path().to_path_buf()).await.unwrap();
        assert!(storage.subdir(DataSubdir::Sqlite).is_dir());
    }

    #[test]
    fn test_resolve_data_dir_is_not_empty() {
        let path = AppStorage::resolve_data_dir();
        assert!(!path.as_os_str().is_empty());
    }
}
