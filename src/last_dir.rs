use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::dialog::OpenMode;

pub const SINGLE_CLICK_FILE_NAME: &str = "openfiledialog_lastdir.txt";
pub const DOUBLE_CLICK_FILE_NAME: &str = "openfiledialog_dblclick_lastdir.txt";

/// Plain-text record of the most recently confirmed directory.
///
/// The file holds the path and nothing else. Writes are not atomic and the
/// stored path is not validated on load; see [`resolve_start_dir`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastDirStore {
    file: PathBuf,
}

impl LastDirStore {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self { file: file.into() }
    }

    /// Default store in the system temp directory, one file per open mode.
    pub fn for_mode(mode: OpenMode) -> Self {
        let name = match mode {
            OpenMode::SingleClick => SINGLE_CLICK_FILE_NAME,
            OpenMode::DoubleClick => DOUBLE_CLICK_FILE_NAME,
        };
        Self::new(std::env::temp_dir().join(name))
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn save(&self, dir: &Path) -> Result<()> {
        fs::write(&self.file, path_to_bytes(dir))
            .with_context(|| format!("failed to write {}", self.file.display()))
    }

    pub fn load(&self) -> Option<PathBuf> {
        let bytes = fs::read(&self.file).ok()?;
        let trimmed = bytes.trim_ascii();
        if trimmed.is_empty() {
            return None;
        }
        Some(path_from_bytes(trimmed))
    }
}

#[cfg(unix)]
fn path_to_bytes(path: &Path) -> Vec<u8> {
    use std::os::unix::ffi::OsStrExt;
    path.as_os_str().as_bytes().to_vec()
}

#[cfg(not(unix))]
fn path_to_bytes(path: &Path) -> Vec<u8> {
    path.to_string_lossy().as_bytes().to_vec()
}

#[cfg(unix)]
fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    use std::os::unix::ffi::OsStrExt;
    PathBuf::from(std::ffi::OsStr::from_bytes(bytes))
}

#[cfg(not(unix))]
fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(bytes).as_ref())
}

pub fn home_dir() -> Option<PathBuf> {
    #[cfg(windows)]
    {
        if let Some(base) = std::env::var_os("USERPROFILE") {
            return Some(PathBuf::from(base));
        }
    }
    #[cfg(not(windows))]
    {
        if let Some(base) = std::env::var_os("HOME") {
            return Some(PathBuf::from(base));
        }
    }
    None
}

/// Picks where a dialog opens: the stored directory when it still exists,
/// otherwise the home directory, otherwise the working directory.
pub fn resolve_start_dir(loaded: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = loaded.filter(|d| d.is_dir()) {
        return dir;
    }
    if let Some(home) = home_dir().filter(|d| d.is_dir()) {
        return home;
    }
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}
