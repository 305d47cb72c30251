// SPDX-License-Identifier: MIT OR Apache-2.0

//! The configuration cache.
//!
//! The cache owns the configuration path, the raw bytes of the last file read and
//! the registry of destinations. A single reader/writer lock protects all three:
//! `add` and `reload` take it exclusively for the whole read-decode-store cycle,
//! so they are serialized with each other and no destination is ever observed
//! half decoded.

use crate::adapters::{config_file_arg, FsLoader, TomlDecoder};
use crate::domain::{ConfigError, Decodable, DecoderSettings, Destination, Document, Result};
use crate::ports::{ConfigDecoder, FileLoader};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[cfg(all(unix, feature = "signal"))]
use crate::adapters::SignalTrap;
#[cfg(all(unix, feature = "signal"))]
use crate::ports::ReloadTrap;
#[cfg(all(unix, feature = "signal"))]
use std::ops::Deref;

/// Turns a possibly relative path into an absolute one.
pub type PathResolver = fn(&Path) -> io::Result<PathBuf>;

/// Produces the argument vector (program name first) scanned for `-c`.
type ArgSource = Box<dyn Fn() -> Vec<String> + Send + Sync>;

fn absolute_path(path: &Path) -> io::Result<PathBuf> {
    std::path::absolute(path)
}

#[derive(Default)]
struct CacheState {
    /// Absolute path of the configuration file, once known
    path: Option<PathBuf>,
    /// Contents of the last successful read
    buffer: Option<Vec<u8>>,
    /// Destinations in registration order, duplicates included
    registry: Vec<Arc<dyn Decodable>>,
}

/// A cache of one TOML configuration file and the destinations filled from it.
///
/// Most programs use the process-wide instance through [`crate::global`]; a
/// private cache is useful for tests and for embedding.
///
/// # Examples
///
/// ```rust,no_run
/// use cfgpool::domain::Destination;
/// use cfgpool::service::ConfigCache;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Default, Serialize, Deserialize)]
/// struct Server {
///     #[serde(default)]
///     port: u16,
/// }
///
/// # fn main() -> cfgpool::domain::Result<()> {
/// let cache = ConfigCache::builder()
///     .with_path("/etc/myapp/config.toml")
///     .build()?;
///
/// let server: Destination<Server> = Destination::default();
/// cache.add(&server)?;
/// println!("listening on {}", server.read().port);
///
/// // Later, after the file changed
/// cache.reload()?;
/// # Ok(())
/// # }
/// ```
pub struct ConfigCache {
    state: RwLock<CacheState>,
    args: ArgSource,
    resolve: PathResolver,
    loader: Box<dyn FileLoader>,
    decoder: Box<dyn ConfigDecoder>,
}

impl ConfigCache {
    /// Creates a cache that finds its path in the process arguments.
    ///
    /// Nothing is read until the first [`add`](Self::add) or
    /// [`reload`](Self::reload).
    pub fn new() -> Self {
        CacheBuilder::new().into_cache(None)
    }

    /// Creates a new cache builder.
    pub fn builder() -> CacheBuilder {
        CacheBuilder::new()
    }

    /// Registers a destination and fills it from the cached document.
    ///
    /// The file is read on the first call only; later calls decode the cached
    /// bytes. The destination stays registered even when decoding into it
    /// fails, so it is retried on every reload.
    ///
    /// # Errors
    ///
    /// Fails when no path is configured, the path cannot be resolved, the file
    /// cannot be read, or the document does not decode into `T`.
    pub fn add<T>(&self, destination: &Destination<T>) -> Result<()>
    where
        T: Serialize + DeserializeOwned + Send + Sync + 'static,
    {
        let mut state = self.write_state();

        let target = destination.target();
        state.registry.push(Arc::clone(&target));
        let index = state.registry.len() - 1;

        self.ensure_loaded(&mut state)?;
        let document = self.decode_buffer(&state)?;
        let commit = target.prepare(&document)?;
        commit();

        tracing::debug!(
            index,
            destination = target.type_name(),
            "registered configuration destination"
        );
        Ok(())
    }

    /// Re-reads the configuration file and refills every destination.
    ///
    /// Destinations are decoded in registration order. Nothing is stored until
    /// every destination decoded successfully: on failure the cached bytes and
    /// all destinations keep their previous contents.
    ///
    /// # Errors
    ///
    /// Fails when no path is configured, the file cannot be read, or the new
    /// document does not decode into one of the destinations.
    pub fn reload(&self) -> Result<()> {
        let mut state = self.write_state();

        let path = self.ensure_path(&mut state)?;
        tracing::info!(
            path = %path.display(),
            destinations = state.registry.len(),
            "reloading configuration"
        );

        let bytes = self.loader.load(&path)?;
        let document = self.decoder.decode(&bytes)?;

        let commits = state
            .registry
            .iter()
            .enumerate()
            .map(|(index, target)| {
                tracing::debug!(
                    index,
                    destination = target.type_name(),
                    "decoding configuration destination"
                );
                target.prepare(&document)
            })
            .collect::<Result<Vec<_>>>()?;

        for commit in commits {
            commit();
        }
        state.buffer = Some(bytes);

        tracing::info!("configuration reloaded");
        Ok(())
    }

    /// Points the cache at another configuration file.
    ///
    /// The path is resolved to an absolute path immediately; the file itself is
    /// read on the next reload.
    pub fn set_path(&self, path: impl AsRef<Path>) -> Result<()> {
        let resolved = self.resolve_path(path.as_ref())?;
        tracing::info!(path = %resolved.display(), "configuration path set");
        self.write_state().path = Some(resolved);
        Ok(())
    }

    /// Returns the absolute configuration path, if it is known yet.
    pub fn path(&self) -> Option<PathBuf> {
        self.read_state().path.clone()
    }

    /// Returns a copy of the cached file contents, if the file was read.
    pub fn cached_bytes(&self) -> Option<Vec<u8>> {
        self.read_state().buffer.clone()
    }

    /// Returns the number of registrations, duplicates included.
    pub fn registered(&self) -> usize {
        self.read_state().registry.len()
    }

    /// Runs `f` while holding the shared side of the cache lock.
    ///
    /// No add or reload can run while `f` does, so several destinations read
    /// inside `f` all come from the same document. `f` must not call back into
    /// [`add`](Self::add), [`reload`](Self::reload) or
    /// [`set_path`](Self::set_path) on this cache, and the caller must not hold
    /// a [`Destination::read`] guard when calling this.
    pub fn with_read_lock<R>(&self, f: impl FnOnce() -> R) -> R {
        let _state = self.read_state();
        f()
    }

    /// Reloads `cache` every time the process receives `SIGUSR1`.
    ///
    /// Reload failures are logged and the previous configuration is kept. The
    /// returned trap stops listening when it is dropped.
    #[cfg(all(unix, feature = "signal"))]
    pub fn bind_reload_signal<C>(cache: C) -> Result<SignalTrap>
    where
        C: Deref<Target = ConfigCache> + Send + Sync + 'static,
    {
        let mut trap = SignalTrap::new();
        trap.watch(Arc::new(move || cache.reload_on_signal()))?;
        Ok(trap)
    }

    #[cfg(all(unix, feature = "signal"))]
    fn reload_on_signal(&self) {
        if let Err(e) = self.reload() {
            tracing::error!(
                kind = ?e.kind(),
                "configuration reload failed, keeping previous configuration: {}",
                e.report()
            );
        }
    }

    /// Makes sure the path is known, consulting the arguments if it is not.
    fn ensure_path(&self, state: &mut CacheState) -> Result<PathBuf> {
        if state.path.is_none() {
            let arg = config_file_arg(&(self.args)());
            if !arg.is_empty() {
                state.path = Some(self.resolve_path(Path::new(&arg))?);
            }
        }

        state.path.clone().ok_or(ConfigError::Unconfigured)
    }

    /// Makes sure the path is known and the file has been read at least once.
    fn ensure_loaded(&self, state: &mut CacheState) -> Result<()> {
        let path = self.ensure_path(state)?;
        if state.buffer.is_none() {
            state.buffer = Some(self.loader.load(&path)?);
        }
        Ok(())
    }

    fn decode_buffer(&self, state: &CacheState) -> Result<Document> {
        self.decoder
            .decode(state.buffer.as_deref().unwrap_or_default())
    }

    fn resolve_path(&self, path: &Path) -> Result<PathBuf> {
        (self.resolve)(path).map_err(|source| ConfigError::PathInvalid {
            path: path.to_path_buf(),
            source,
        })
    }

    fn read_state(&self) -> RwLockReadGuard<'_, CacheState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, CacheState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ConfigCache {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ConfigCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.read_state();
        f.debug_struct("ConfigCache")
            .field("path", &state.path)
            .field("cached_bytes", &state.buffer.as_ref().map(Vec::len))
            .field("registered", &state.registry.len())
            .finish()
    }
}

/// Builder for constructing a `ConfigCache`.
///
/// # Examples
///
/// ```rust
/// use cfgpool::domain::{DecoderSettings, KeyCase};
/// use cfgpool::service::CacheBuilder;
///
/// # fn main() -> cfgpool::domain::Result<()> {
/// let cache = CacheBuilder::new()
///     .with_args(["myapp", "-c", "config.toml"])
///     .with_settings(DecoderSettings::new(KeyCase::Verbatim))
///     .build()?;
/// assert!(cache.path().is_none());
/// # Ok(())
/// # }
/// ```
pub struct CacheBuilder {
    args: Option<Vec<String>>,
    path: Option<PathBuf>,
    resolve: PathResolver,
    loader: Box<dyn FileLoader>,
    decoder: Box<dyn ConfigDecoder>,
}

impl CacheBuilder {
    /// Creates a builder with the filesystem loader and the TOML decoder.
    pub fn new() -> Self {
        Self {
            args: None,
            path: None,
            resolve: absolute_path,
            loader: Box::new(FsLoader::new()),
            decoder: Box::new(TomlDecoder::new()),
        }
    }

    /// Scans `args` (program name first) for `-c` instead of the process
    /// arguments.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = Some(args.into_iter().map(Into::into).collect());
        self
    }

    /// Uses `path` as the configuration file; the arguments are not scanned.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Replaces the function that makes paths absolute.
    pub fn with_path_resolver(mut self, resolve: PathResolver) -> Self {
        self.resolve = resolve;
        self
    }

    /// Replaces the file loader.
    pub fn with_loader(mut self, loader: Box<dyn FileLoader>) -> Self {
        self.loader = loader;
        self
    }

    /// Replaces the decoder.
    pub fn with_decoder(mut self, decoder: Box<dyn ConfigDecoder>) -> Self {
        self.decoder = decoder;
        self
    }

    /// Uses the TOML decoder with the given settings.
    pub fn with_settings(self, settings: DecoderSettings) -> Self {
        self.with_decoder(Box::new(TomlDecoder::with_settings(settings)))
    }

    /// Builds the cache.
    ///
    /// # Errors
    ///
    /// Fails with [`ConfigError::PathInvalid`] when a path given with
    /// [`with_path`](Self::with_path) cannot be made absolute.
    pub fn build(self) -> Result<ConfigCache> {
        let path = match &self.path {
            Some(path) => Some((self.resolve)(path.as_path()).map_err(|source| {
                ConfigError::PathInvalid {
                    path: path.clone(),
                    source,
                }
            })?),
            None => None,
        };

        Ok(self.into_cache(path))
    }

    fn into_cache(self, path: Option<PathBuf>) -> ConfigCache {
        let args: ArgSource = match self.args {
            Some(args) => Box::new(move || args.clone()),
            None => Box::new(|| std::env::args().collect()),
        };

        ConfigCache {
            state: RwLock::new(CacheState {
                path,
                ..CacheState::default()
            }),
            args,
            resolve: self.resolve,
            loader: self.loader,
            decoder: self.decoder,
        }
    }
}

impl Default for CacheBuilder {
    fn default() -> Self {
        Self::new()
    }
}
