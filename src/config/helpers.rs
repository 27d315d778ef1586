use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// On-disk document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Format {
    Json,
    Yaml,
}

impl Format {
    pub(super) fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("json") => Ok(Format::Json),
            Some("yaml") | Some("yml") => Ok(Format::Yaml),
            _ => Err(ConfigError::UnknownFormat {
                path: path.to_string_lossy().to_string(),
            }),
        }
    }
}

/// Expand a leading `~/` to the home directory.
pub(super) fn expand_home(path: &Path) -> Result<PathBuf> {
    let raw = path.to_string_lossy();
    match raw.strip_prefix("~/") {
        Some(rest) => {
            let home = dirs::home_dir().ok_or_else(|| ConfigError::Io {
                path: raw.to_string(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "could not determine home directory for ~ expansion",
                ),
            })?;
            Ok(home.join(rest))
        }
        None => Ok(path.to_path_buf()),
    }
}

pub(super) fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_string_lossy().to_string(),
        source,
    })
}
