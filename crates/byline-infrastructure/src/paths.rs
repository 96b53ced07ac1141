//! Unified path management for byline configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/byline/            # Config directory (XDG on Linux/macOS)
//! └── session.json             # Persisted session mirror
//! ```

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Could not determine config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for byline.
pub struct BylinePaths;

impl BylinePaths {
    /// Returns the byline configuration directory.
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("byline"))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to the persisted session file.
    pub fn session_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("session.json"))
    }
}
