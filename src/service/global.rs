// SPDX-License-Identifier: MIT OR Apache-2.0

//! The process-wide configuration cache.
//!
//! The cache is created on first access and lives until the process exits. The
//! first access also binds `SIGUSR1` to a reload of that cache, exactly once.

use crate::domain::{Destination, Result};
use crate::service::ConfigCache;
use once_cell::sync::OnceCell;
use serde::de::DeserializeOwned;
use serde::Serialize;

#[cfg(all(unix, feature = "signal"))]
use crate::adapters::SignalTrap;

static CACHE: OnceCell<ConfigCache> = OnceCell::new();

#[cfg(all(unix, feature = "signal"))]
static RELOAD_TRAP: OnceCell<SignalTrap> = OnceCell::new();

/// Returns the process-wide cache, creating it on first use.
///
/// The cache reads its path from the process arguments (`-c`). On unix with the
/// `signal` feature, the first call also starts listening for `SIGUSR1`.
///
/// # Panics
///
/// Panics if the reload signal cannot be bound.
pub fn global() -> &'static ConfigCache {
    let cache = CACHE.get_or_init(ConfigCache::new);

    #[cfg(all(unix, feature = "signal"))]
    RELOAD_TRAP.get_or_init(|| match ConfigCache::bind_reload_signal(cache) {
        Ok(trap) => trap,
        Err(e) => {
            tracing::error!("{}", e.report());
            panic!("{}", e);
        }
    });

    cache
}

/// Returns `true` once the process-wide cache reloads on `SIGUSR1`.
pub fn is_reload_bound() -> bool {
    #[cfg(all(unix, feature = "signal"))]
    {
        RELOAD_TRAP.get().is_some()
    }

    #[cfg(not(all(unix, feature = "signal")))]
    {
        false
    }
}

/// Registers a destination with the process-wide cache and fills it.
///
/// Every failure is fatal here.
///
/// # Panics
///
/// Panics with the error message when no `-c` flag was given, the file cannot
/// be read, or the document does not decode into `T`.
///
/// # Examples
///
/// ```rust,no_run
/// use cfgpool::domain::Destination;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Default, Serialize, Deserialize)]
/// struct Database {
///     #[serde(default)]
///     url: String,
/// }
///
/// // Run as `myapp -c /etc/myapp/config.toml`
/// let database: Destination<Database> = Destination::default();
/// cfgpool::add(&database);
/// println!("connecting to {}", database.read().url);
/// ```
pub fn add<T>(destination: &Destination<T>)
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    if let Err(e) = global().add(destination) {
        tracing::error!(kind = ?e.kind(), "{}", e.report());
        panic!("{}", e);
    }
}

/// Re-reads the configuration file and refills every destination of the
/// process-wide cache.
///
/// On failure every destination keeps its previous contents and the error is
/// returned to the caller.
pub fn reload() -> Result<()> {
    global().reload()
}
