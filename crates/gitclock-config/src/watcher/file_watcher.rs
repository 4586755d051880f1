//! Debounced single-file watcher.
//!
//! Contains the [`FileWatcher`] struct that monitors one file for changes
//! using the `notify` crate. The config reload manager and the layout
//! store's external-change reload both sit on top of it.

use gitclock_common::ConfigError;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

/// Default coalescing window for bursts of filesystem events.
pub const DEBOUNCE: Duration = Duration::from_millis(500);

/// Watches a file for changes and sends notifications.
pub struct FileWatcher {
    path: PathBuf,
    debounce: Duration,
}

impl FileWatcher {
    /// Create a new watcher for the given file path.
    pub fn new(path: PathBuf) -> Result<Self, ConfigError> {
        if !path.exists() {
            warn!(
                "{} does not exist yet, will watch for creation",
                path.display()
            );
        }

        Ok(Self {
            path,
            debounce: DEBOUNCE,
        })
    }

    /// Override the debounce window.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Watch the file for changes, sending a signal on the broadcast channel.
    ///
    /// Runs until the notify backend goes away. Changes are debounced so an
    /// atomic save (write `.tmp` + rename) produces one signal.
    pub async fn watch(&self, tx: broadcast::Sender<()>) -> Result<(), ConfigError> {
        let watch_path = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();

        info!("starting file watcher for {}", self.path.display());

        // Bridge the sync notify callback into async
        let (notify_tx, mut notify_rx) = tokio::sync::mpsc::channel::<()>(16);

        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| match result {
                Ok(event) => {
                    let relevant = matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_));
                    if !relevant {
                        return;
                    }

                    let is_our_file = event
                        .paths
                        .iter()
                        .any(|p| p.file_name().map(|n| n == file_name).unwrap_or(false));

                    if is_our_file {
                        debug!("watched file change detected");
                        let _ = notify_tx.try_send(());
                    }
                }
                Err(e) => {
                    error!("file watcher error: {e}");
                }
            },
            notify::Config::default(),
        )
        .map_err(|e| ConfigError::WatchError(format!("failed to create watcher: {e}")))?;

        watcher
            .watch(&watch_path, RecursiveMode::NonRecursive)
            .map_err(|e| {
                ConfigError::WatchError(format!("failed to watch {}: {e}", watch_path.display()))
            })?;

        loop {
            if notify_rx.recv().await.is_none() {
                break;
            }

            // Drain further signals until the window passes quietly
            let debounce = tokio::time::sleep(self.debounce);
            tokio::pin!(debounce);

            loop {
                tokio::select! {
                    _ = &mut debounce => break,
                    msg = notify_rx.recv() => {
                        if msg.is_none() {
                            return Ok(());
                        }
                    }
                }
            }

            info!("{} changed, sending reload signal", self.path.display());
            if tx.send(()).is_err() {
                debug!("no receivers for reload signal");
            }
        }

        drop(watcher);
        Ok(())
    }
}
