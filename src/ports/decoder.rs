// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration decoder trait definition.
//!
//! This module defines the `ConfigDecoder` trait, which turns the cached bytes of
//! a configuration file into a [`Document`] that destinations can be filled from.

use crate::domain::{Document, Result};

/// A trait for decoding raw configuration bytes.
///
/// # Examples
///
/// ```rust
/// use cfgpool::ports::ConfigDecoder;
/// use cfgpool::domain::{Document, Result};
///
/// struct EmptyDecoder;
///
/// impl ConfigDecoder for EmptyDecoder {
///     fn decode(&self, _bytes: &[u8]) -> Result<Document> {
///         Ok(Document::default())
///     }
/// }
///
/// let doc = EmptyDecoder.decode(b"ignored").unwrap();
/// assert!(doc.table().is_empty());
/// ```
pub trait ConfigDecoder: Send + Sync {
    /// Decodes the complete contents of a configuration file.
    ///
    /// # Returns
    ///
    /// * `Ok(Document)` - The parsed document
    /// * `Err(ConfigError)` - The bytes are not a valid document; the error kind is
    ///   [`ErrorKind::DecodeInvalid`](crate::domain::ErrorKind::DecodeInvalid)
    fn decode(&self, bytes: &[u8]) -> Result<Document>;
}
