// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core types.
//!
//! This module contains the core domain types of the configuration pool. It is
//! independent of where configuration bytes come from and of how reloads are
//! triggered.

pub mod destination;
pub mod document;
pub mod errors;
mod in_place;
pub mod settings;

// Re-export commonly used types
pub use destination::{Commit, Decodable, Destination};
pub use document::Document;
pub use errors::{ConfigError, ErrorKind, Result};
pub use settings::{DecoderSettings, KeyCase};
