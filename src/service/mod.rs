// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer containing the configuration cache.
//!
//! This module contains the cache that ties the ports together, and the
//! process-wide instance most programs use.

pub mod cache;
pub mod global;

// Re-export commonly used types
pub use cache::{CacheBuilder, ConfigCache, PathResolver};
pub use global::{add, global, is_reload_bound, reload};
