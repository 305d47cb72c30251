// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reload trap driven by the user-reload signal (`SIGUSR1`).
//!
//! The OS signal is received by tokio's signal driver on a dedicated thread.
//! The reload callback runs on that thread, so it is free to take locks and
//! read files; nothing runs inside the raw signal handler.

use crate::domain::{ConfigError, Result};
use crate::ports::{ReloadCallback, ReloadTrap};
use std::io;
use std::sync::mpsc;
use std::thread::{self, JoinHandle};
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::oneshot;

/// Name of the thread that delivers reload callbacks.
const TRAP_THREAD_NAME: &str = "cfgpool-reload";

/// Invokes a callback every time the process receives `SIGUSR1`.
///
/// # Examples
///
/// ```rust,no_run
/// use cfgpool::adapters::SignalTrap;
/// use cfgpool::ports::ReloadTrap;
/// use std::sync::Arc;
///
/// # fn main() -> cfgpool::domain::Result<()> {
/// let mut trap = SignalTrap::new();
///
/// trap.watch(Arc::new(|| {
///     println!("SIGUSR1 received");
/// }))?;
///
/// // Later, stop listening
/// trap.stop()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct SignalTrap {
    /// Thread handle for the signal thread
    trap_thread: Option<JoinHandle<()>>,
    /// Stop signal sender
    stop_tx: Option<oneshot::Sender<()>>,
}

impl SignalTrap {
    /// Creates a trap that is not listening yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` while the signal thread is running.
    pub fn is_running(&self) -> bool {
        self.trap_thread.is_some()
    }
}

impl ReloadTrap for SignalTrap {
    fn watch(&mut self, callback: ReloadCallback) -> Result<()> {
        if self.is_running() {
            return Err(ConfigError::SignalBinding {
                message: "Signal trap is already running".to_string(),
                source: None,
            });
        }

        let (ready_tx, ready_rx) = mpsc::channel::<io::Result<()>>();
        let (stop_tx, stop_rx) = oneshot::channel::<()>();

        let trap_thread = thread::Builder::new()
            .name(TRAP_THREAD_NAME.to_string())
            .spawn(move || run_trap(callback, ready_tx, stop_rx))
            .map_err(|e| ConfigError::SignalBinding {
                message: format!("Failed to spawn signal thread: {}", e),
                source: Some(Box::new(e)),
            })?;

        // The handler must be installed before we return, otherwise a signal sent
        // right away would hit the default action and terminate the process.
        match ready_rx.recv() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                let _ = trap_thread.join();
                return Err(ConfigError::SignalBinding {
                    message: format!("Failed to install SIGUSR1 handler: {}", e),
                    source: Some(Box::new(e)),
                });
            }
            Err(_) => {
                let _ = trap_thread.join();
                return Err(ConfigError::SignalBinding {
                    message: "Signal thread exited before installing the handler".to_string(),
                    source: None,
                });
            }
        }

        tracing::debug!("listening for SIGUSR1 to reload configuration");
        self.trap_thread = Some(trap_thread);
        self.stop_tx = Some(stop_tx);

        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        // Send stop signal
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }

        // Wait for the thread to finish
        if let Some(handle) = self.trap_thread.take() {
            handle.join().map_err(|_| ConfigError::SignalBinding {
                message: "Failed to join signal thread".to_string(),
                source: None,
            })?;
        }

        Ok(())
    }
}

impl Drop for SignalTrap {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

fn run_trap(
    callback: ReloadCallback,
    ready_tx: mpsc::Sender<io::Result<()>>,
    mut stop_rx: oneshot::Receiver<()>,
) {
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            let _ = ready_tx.send(Err(e));
            return;
        }
    };

    runtime.block_on(async move {
        let mut reloads = match signal(SignalKind::user_defined1()) {
            Ok(stream) => stream,
            Err(e) => {
                let _ = ready_tx.send(Err(e));
                return;
            }
        };
        let _ = ready_tx.send(Ok(()));

        loop {
            tokio::select! {
                received = reloads.recv() => {
                    if received.is_none() {
                        tracing::warn!("SIGUSR1 stream closed, no further reloads");
                        break;
                    }
                    tracing::debug!("SIGUSR1 received");
                    callback();
                }
                _ = &mut stop_rx => break,
            }
        }
    });
}
