// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the configuration pool.
//!
//! Every failure the pool can run into maps onto one of a handful of kinds, see
//! [`ErrorKind`]. All errors use `thiserror` so the underlying I/O or decoder
//! diagnostic stays reachable through [`std::error::Error::source`].

use std::path::PathBuf;
use thiserror::Error;

/// The broad category of a [`ConfigError`].
///
/// Callers that only care about what went wrong, not the details, can match on
/// this instead of the individual error variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No configuration path was given on the command line.
    Unconfigured,
    /// The configuration path could not be turned into an absolute path.
    PathInvalid,
    /// The configuration file could not be read.
    FileUnreadable,
    /// The configuration file is not valid TOML or does not fit a destination.
    DecodeInvalid,
    /// The reload signal handler could not be installed.
    SignalBinding,
}

/// The main error type for configuration operations.
///
/// It is marked as `#[non_exhaustive]` to allow for future additions without
/// breaking backwards compatibility.
///
/// # Examples
///
/// ```
/// use cfgpool::domain::{ConfigError, ErrorKind};
///
/// let err = ConfigError::Unconfigured;
/// assert_eq!(err.kind(), ErrorKind::Unconfigured);
/// assert_eq!(
///     err.to_string(),
///     "configuration not loaded, set '-c /my/path/config.toml'"
/// );
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// No `-c` flag was found on the command line.
    #[error("configuration not loaded, set '-c /my/path/config.toml'")]
    Unconfigured,

    /// The configured path could not be resolved to an absolute path.
    #[error("could not decode config path: {source}")]
    PathInvalid {
        /// The path as it was given
        path: PathBuf,
        /// The underlying resolution error
        #[source]
        source: std::io::Error,
    },

    /// The configuration file could not be read.
    #[error("configuration not loaded: {}: {source}", path.display())]
    FileUnreadable {
        /// The absolute path that was read
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The document is not syntactically valid TOML.
    #[error("line {line}: invalid TOML syntax")]
    InvalidSyntax {
        /// The line the decoder stopped on (1-based)
        line: usize,
        /// The decoder's diagnostic, including line and column
        #[source]
        source: toml::de::Error,
    },

    /// The document could not be mapped onto a destination.
    #[error("{message}")]
    DecodeInvalid {
        /// The error message
        message: String,
        /// The underlying decoder error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The reload signal could not be bound.
    #[error("could not bind reload signal: {message}")]
    SignalBinding {
        /// The error message
        message: String,
        /// The underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl ConfigError {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConfigError::Unconfigured => ErrorKind::Unconfigured,
            ConfigError::PathInvalid { .. } => ErrorKind::PathInvalid,
            ConfigError::FileUnreadable { .. } => ErrorKind::FileUnreadable,
            ConfigError::InvalidSyntax { .. } | ConfigError::DecodeInvalid { .. } => {
                ErrorKind::DecodeInvalid
            }
            ConfigError::SignalBinding { .. } => ErrorKind::SignalBinding,
        }
    }

    /// Renders the error followed by every error in its source chain.
    ///
    /// The top-level message is kept short; this is what gets logged so the
    /// decoder's line and column report is not lost.
    pub fn report(&self) -> String {
        let mut report = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(err) = source {
            report.push_str("\n  caused by: ");
            report.push_str(&err.to_string());
            source = std::error::Error::source(err);
        }
        report
    }
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
