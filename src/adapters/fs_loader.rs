// SPDX-License-Identifier: MIT OR Apache-2.0

//! Filesystem loader for configuration files.

use crate::domain::{ConfigError, Result};
use crate::ports::FileLoader;
use std::fs;
use std::io;
use std::path::Path;

/// Maximum allowed file size for configuration files (10MB)
pub const MAX_CONFIG_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Reads configuration files from the local filesystem.
///
/// # Examples
///
/// ```rust,no_run
/// use cfgpool::adapters::FsLoader;
/// use cfgpool::ports::FileLoader;
/// use std::path::Path;
///
/// let loader = FsLoader::new();
/// let bytes = loader.load(Path::new("/etc/myapp/config.toml")).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct FsLoader {
    max_size: u64,
}

impl FsLoader {
    /// Creates a loader with the default size limit.
    pub fn new() -> Self {
        Self {
            max_size: MAX_CONFIG_FILE_SIZE,
        }
    }

    /// Creates a loader that rejects files larger than `max_size` bytes.
    pub fn with_max_size(max_size: u64) -> Self {
        Self { max_size }
    }

    /// Returns the size limit in bytes.
    pub fn max_size(&self) -> u64 {
        self.max_size
    }
}

impl Default for FsLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl FileLoader for FsLoader {
    fn load(&self, path: &Path) -> Result<Vec<u8>> {
        let unreadable = |source: io::Error| ConfigError::FileUnreadable {
            path: path.to_path_buf(),
            source,
        };

        // Check file size before reading
        let metadata = fs::metadata(path).map_err(unreadable)?;
        if metadata.len() > self.max_size {
            return Err(unreadable(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "configuration file too large: {} bytes (max {} bytes)",
                    metadata.len(),
                    self.max_size
                ),
            )));
        }

        let bytes = fs::read(path).map_err(unreadable)?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "read configuration file");
        Ok(bytes)
    }
}
