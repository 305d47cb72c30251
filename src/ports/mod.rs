// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! This module contains the trait definitions (ports) that define the interfaces
//! the cache depends on: reading the file, decoding it, and being told when to
//! reload. They are implemented by adapters in the adapters layer.

pub mod decoder;
pub mod loader;
pub mod trap;

// Re-export commonly used types
pub use decoder::ConfigDecoder;
pub use loader::FileLoader;
pub use trap::{ReloadCallback, ReloadTrap};
