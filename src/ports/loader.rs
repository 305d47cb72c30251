// SPDX-License-Identifier: MIT OR Apache-2.0

//! File loader trait definition.
//!
//! The cache never touches the filesystem itself; it asks a [`FileLoader`] for
//! the bytes at the configured absolute path.

use crate::domain::Result;
use std::path::Path;

/// A trait for reading a configuration file into memory.
///
/// # Examples
///
/// ```rust
/// use cfgpool::ports::FileLoader;
/// use cfgpool::domain::Result;
/// use std::path::Path;
///
/// struct StaticLoader(&'static str);
///
/// impl FileLoader for StaticLoader {
///     fn load(&self, _path: &Path) -> Result<Vec<u8>> {
///         Ok(self.0.as_bytes().to_vec())
///     }
/// }
///
/// let loader = StaticLoader("key = 1");
/// assert_eq!(loader.load(Path::new("/any")).unwrap(), b"key = 1");
/// ```
pub trait FileLoader: Send + Sync {
    /// Returns the complete contents of the file at `path`.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<u8>)` - The file contents
    /// * `Err(ConfigError)` - The file could not be read; the error kind is
    ///   [`ErrorKind::FileUnreadable`](crate::domain::ErrorKind::FileUnreadable)
    fn load(&self, path: &Path) -> Result<Vec<u8>>;
}
