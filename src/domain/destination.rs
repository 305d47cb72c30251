// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration destinations.
//!
//! A [`Destination`] is a shared handle to a consumer's configuration struct. The
//! consumer keeps its handle and reads through it; the cache keeps a type-erased
//! [`Decodable`] reference to the same value and refills it on every reload.

use crate::domain::{Document, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

/// A staged write produced by [`Decodable::prepare`].
///
/// Running it stores the already decoded value into the destination.
pub type Commit<'a> = Box<dyn FnOnce() + 'a>;

/// Something the cache can refill from a [`Document`].
///
/// Decoding is split in two so that a reload can decode every destination
/// first and only write them once all of them succeeded.
pub trait Decodable: Send + Sync {
    /// Decodes the document over a copy of the current value without touching
    /// the current one.
    fn prepare<'a>(&'a self, document: &Document) -> Result<Commit<'a>>;

    /// Name of the decoded type, for diagnostics.
    fn type_name(&self) -> &'static str;
}

impl<T> Decodable for RwLock<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    fn prepare<'a>(&'a self, document: &Document) -> Result<Commit<'a>> {
        let value: T = {
            let current = self.read().unwrap_or_else(PoisonError::into_inner);
            document.decode_over(&*current)?
        };
        Ok(Box::new(move || {
            *self.write().unwrap_or_else(PoisonError::into_inner) = value;
        }))
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// A shared, reloadable configuration value.
///
/// Cloning a destination clones the handle, not the value: all clones observe
/// the same reloads. Every decode starts from the value the destination holds,
/// so fields the configuration file leaves out keep their values, including
/// the ones given to [`Destination::new`].
///
/// # Examples
///
/// ```
/// use cfgpool::domain::Destination;
///
/// #[derive(Default)]
/// struct Limits {
///     max_conns: u32,
/// }
///
/// let limits: Destination<Limits> = Destination::default();
/// assert_eq!(limits.read().max_conns, 0);
/// ```
pub struct Destination<T> {
    slot: Arc<RwLock<T>>,
}

impl<T> Destination<T> {
    /// Creates a destination holding `value` until the first decode.
    pub fn new(value: T) -> Self {
        Self {
            slot: Arc::new(RwLock::new(value)),
        }
    }

    /// Locks the value for reading.
    ///
    /// A reload never leaves the value half written: the guard sees either the
    /// previous or the next decoded value in full.
    ///
    /// Release the guard before calling into the cache. The cache takes its own
    /// lock before the destination locks, so waiting on
    /// [`ConfigCache::with_read_lock`](crate::service::ConfigCache::with_read_lock),
    /// `add` or `reload` while holding this guard can deadlock against a reload
    /// that is waiting to store its result.
    pub fn read(&self) -> RwLockReadGuard<'_, T> {
        self.slot.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a copy of the current value.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.read().clone()
    }

    /// Returns `true` if both handles point at the same value.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.slot, &other.slot)
    }
}

impl<T> Destination<T>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    /// Returns the type-erased reference the cache keeps in its registry.
    pub(crate) fn target(&self) -> Arc<dyn Decodable> {
        self.slot.clone()
    }
}

impl<T> Clone for Destination<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T: Default> Default for Destination<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Destination<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Destination").field(&*self.read()).finish()
    }
}
