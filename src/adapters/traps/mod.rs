// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trap implementations that request configuration reloads.
//!
//! This module contains implementations of the `ReloadTrap` trait.

#[cfg(all(unix, feature = "signal"))]
pub mod signal_trap;

#[cfg(all(unix, feature = "signal"))]
pub use signal_trap::SignalTrap;
