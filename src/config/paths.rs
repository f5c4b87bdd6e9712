//! Path management for tallybook
//!
//! Provides XDG-compliant path resolution for the backing data file.
//!
//! ## Path Resolution Order
//!
//! 1. `TALLYBOOK_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/tallybook` or `~/.config/tallybook`
//! 3. Windows: `%APPDATA%\tallybook`

use std::path::PathBuf;

use crate::error::TallybookError;

/// Manages all paths used by tallybook
#[derive(Debug, Clone)]
pub struct TallybookPaths {
    /// Base directory for all tallybook data
    base_dir: PathBuf,
}

impl TallybookPaths {
    /// Create a new TallybookPaths instance
    ///
    /// Path resolution:
    /// 1. `TALLYBOOK_DATA_DIR` env var (explicit override)
    /// 2. Unix: `$XDG_CONFIG_HOME/tallybook` or `~/.config/tallybook`
    /// 3. Windows: `%APPDATA%\tallybook`
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, TallybookError> {
        let base_dir = if let Ok(custom) = std::env::var("TALLYBOOK_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create TallybookPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/tallybook/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (~/.config/tallybook/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the single backing data file
    pub fn data_file(&self) -> PathBuf {
        self.data_dir().join("tallybook.json")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), TallybookError> {
        std::fs::create_dir_all(&self.base_dir).map_err(|e| {
            TallybookError::Storage(format!("Failed to create base directory: {}", e))
        })?;

        std::fs::create_dir_all(self.data_dir()).map_err(|e| {
            TallybookError::Storage(format!("Failed to create data directory: {}", e))
        })?;

        Ok(())
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, TallybookError> {
    // Unix (Linux/macOS): Use XDG_CONFIG_HOME if set, otherwise ~/.config
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) => PathBuf::from(xdg),
        Err(_) => {
            let home = std::env::var("HOME").map_err(|_| {
                TallybookError::Storage("Could not determine home directory".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("tallybook"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, TallybookError> {
    // Windows: Use APPDATA
    let appdata = std::env::var("APPDATA")
        .map_err(|_| TallybookError::Storage("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("tallybook"))
}
