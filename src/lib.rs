// SPDX-License-Identifier: MIT OR Apache-2.0

//! A process-wide pool of TOML configuration destinations.
//!
//! Components register their own configuration structs ("destinations") with a
//! shared cache. The cache reads the TOML file named by the `-c` command-line
//! flag once, fills every destination from it, and fills them all again whenever
//! the process receives `SIGUSR1` or [`reload`] is called.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: Core types (`Destination`, `Document`, `DecoderSettings`, errors)
//! - **Ports**: Trait definitions for the cache's collaborators (`FileLoader`,
//!   `ConfigDecoder`, `ReloadTrap`)
//! - **Adapters**: The `-c` scanner, filesystem loader, TOML decoder and signal trap
//! - **Service**: The cache and its process-wide instance
//!
//! # Feature Flags
//!
//! - `signal`: Reload on `SIGUSR1` (default, unix only)
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use cfgpool::prelude::*;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Default, Serialize, Deserialize)]
//! struct Http {
//!     #[serde(default)]
//!     port: u16,
//! }
//!
//! #[derive(Debug, Default, Serialize, Deserialize)]
//! struct HttpConfig {
//!     #[serde(default)]
//!     http: Http,
//! }
//!
//! // Run as `myapp -c /etc/myapp/config.toml`
//! let config: Destination<HttpConfig> = Destination::default();
//! cfgpool::add(&config);
//!
//! // `kill -USR1 <pid>` refills `config` from the file
//! println!("port {}", config.read().http.port);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use service::{add, global, is_reload_bound, reload};

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::domain::{
        ConfigError, DecoderSettings, Destination, ErrorKind, KeyCase, Result,
    };
    pub use crate::ports::{ConfigDecoder, FileLoader, ReloadTrap};
    pub use crate::service::{CacheBuilder, ConfigCache};

    #[cfg(all(unix, feature = "signal"))]
    pub use crate::adapters::SignalTrap;
}
