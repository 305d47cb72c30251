// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing the concrete collaborators of the cache.
//!
//! This module contains implementations of the traits defined in the ports
//! layer, plus the command-line scanner that locates the configuration file.

pub mod cli;
pub mod fs_loader;
pub mod toml_decoder;
pub mod traps;

pub use cli::{config_file_arg, config_file_arg_from_env};
pub use fs_loader::FsLoader;
pub use toml_decoder::TomlDecoder;

#[cfg(all(unix, feature = "signal"))]
pub use traps::SignalTrap;
