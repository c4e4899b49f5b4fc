//! JSON file helpers and the platform data directory.

use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::core::constants::SAVE_FILE_NAME;

/// Platform data directory for bramble, created if needed.
pub fn data_dir() -> io::Result<PathBuf> {
    let project_dirs = ProjectDirs::from("", "", "bramble").ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine data directory",
        )
    })?;
    let dir = project_dirs.data_dir().to_path_buf();
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

pub fn default_save_path() -> io::Result<PathBuf> {
    Ok(data_dir()?.join(SAVE_FILE_NAME))
}

/// Reads and deserializes a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> io::Result<T> {
    let json = fs::read_to_string(path)?;
    serde_json::from_str(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Writes a value as pretty-printed JSON, creating parent directories.
pub fn write_json<T: Serialize>(path: &Path, data: &T) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)
}
