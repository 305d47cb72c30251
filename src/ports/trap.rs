// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reload trap trait definition.
//!
//! This module defines the `ReloadTrap` trait: something outside the cache that
//! decides when a reload should happen and calls back into it.

use crate::domain::Result;
use std::sync::Arc;

/// Type alias for reload callbacks.
///
/// The callback runs on the trap's own thread, never inside a raw signal
/// handler, so it may take locks and do I/O.
pub type ReloadCallback = Arc<dyn Fn() + Send + Sync>;

/// A trait for triggers that request configuration reloads.
///
/// # Examples
///
/// ```rust
/// use cfgpool::ports::{ReloadCallback, ReloadTrap};
/// use cfgpool::domain::Result;
/// use std::sync::Arc;
///
/// struct ManualTrap {
///     callback: Option<ReloadCallback>,
/// }
///
/// impl ReloadTrap for ManualTrap {
///     fn watch(&mut self, callback: ReloadCallback) -> Result<()> {
///         self.callback = Some(callback);
///         Ok(())
///     }
///
///     fn stop(&mut self) -> Result<()> {
///         self.callback = None;
///         Ok(())
///     }
/// }
///
/// let mut trap = ManualTrap { callback: None };
/// trap.watch(Arc::new(|| println!("reload"))).unwrap();
/// trap.stop().unwrap();
/// ```
pub trait ReloadTrap: Send + Sync {
    /// Starts delivering reload requests to `callback`.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The trap is armed
    /// * `Err(ConfigError)` - The trap could not be armed or is already running
    fn watch(&mut self, callback: ReloadCallback) -> Result<()>;

    /// Stops delivering reload requests.
    ///
    /// After this returns the callback is not invoked again.
    fn stop(&mut self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingTrap {
        callback: Option<ReloadCallback>,
    }

    impl CountingTrap {
        fn fire(&self) {
            if let Some(callback) = &self.callback {
                callback();
            }
        }
    }

    impl ReloadTrap for CountingTrap {
        fn watch(&mut self, callback: ReloadCallback) -> Result<()> {
            self.callback = Some(callback);
            Ok(())
        }

        fn stop(&mut self) -> Result<()> {
            self.callback = None;
            Ok(())
        }
    }

    #[test]
    fn test_trap_invokes_callback_until_stopped() {
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = Arc::clone(&count);
        let mut trap = CountingTrap { callback: None };

        trap.watch(Arc::new(move || {
            count_clone.fetch_add(1, Ordering::SeqCst);
        }))
        .unwrap();

        trap.fire();
        trap.fire();
        assert_eq!(count.load(Ordering::SeqCst), 2);

        trap.stop().unwrap();
        trap.fire();
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_trap_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Box<dyn ReloadTrap>>();
    }
}
