//! `gitclock serve`: the long-running device process.

use std::io::BufRead;
use std::net::SocketAddr;
use std::ops::ControlFlow;
use std::path::PathBuf;

use gitclock_bridge::{BridgeHandle, BridgeServer};
use gitclock_common::{Event, GitClockError};
use gitclock_config::schema::ServerConfig;
use gitclock_config::{FileWatcher, GitClockConfig, ReloadManager};
use gitclock_layout::{LayoutMap, ScreenGeometry};
use tokio::sync::{broadcast, mpsc, watch};
use tracing::{debug, error, info, warn};

use crate::device::{self, Device};

/// The bridge plus the address it was asked to bind.
struct RunningBridge {
    requested: SocketAddr,
    handle: BridgeHandle,
}

pub async fn run(
    device: Device,
    config_path: PathBuf,
    force_server: bool,
) -> Result<(), GitClockError> {
    let (config, mut config_rx) = ReloadManager::start(config_path).await;
    device.resize(config.screen.width, config.screen.height);

    tokio::spawn(render_loop(device.store.subscribe(), device.geometry.subscribe()));
    tokio::spawn(log_events(device.events.subscribe()));
    let (prefs_tx, mut prefs_rx) = broadcast::channel::<()>(16);
    if let Some(path) = device.prefs_path.clone() {
        spawn_prefs_watcher(path, prefs_tx);
    }

    let mut bridge = None;
    sync_bridge(&device, &server_config(&config, force_server), &mut bridge).await;

    // The native gesture editor shares the bridge's store.
    let mut editor = device.editor();
    let (line_tx, mut line_rx) = mpsc::channel::<String>(32);
    spawn_stdin_reader(line_tx);
    let mut editor_live = true;

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    let mut config_live = true;
    info!("gitclock running, press Ctrl-C to stop");
    loop {
        tokio::select! {
            result = &mut shutdown => {
                if let Err(e) = result {
                    error!("failed to listen for Ctrl-C: {e}");
                }
                break;
            }
            changed = config_rx.changed(), if config_live => {
                if changed.is_err() {
                    warn!("config reload stopped");
                    config_live = false;
                    continue;
                }
                let config = config_rx.borrow_and_update().clone();
                info!("config reloaded");
                device.events.publish(Event::ConfigReloaded);
                device.resize(config.screen.width, config.screen.height);
                sync_bridge(&device, &server_config(&config, force_server), &mut bridge).await;
            }
            line = line_rx.recv(), if editor_live => {
                let flow = match line {
                    Some(line) => tokio::task::block_in_place(|| editor.handle_line(&line)),
                    None => ControlFlow::Break(()),
                };
                match flow {
                    ControlFlow::Continue(text) => print!("{text}"),
                    ControlFlow::Break(()) => {
                        if let Some(text) = tokio::task::block_in_place(|| editor.finish()) {
                            print!("{text}");
                        }
                        info!("gesture editor input closed");
                        editor_live = false;
                    }
                }
            }
            Ok(()) = prefs_rx.recv() => {
                let store = device.store.clone();
                match tokio::task::spawn_blocking(move || store.reload_if_changed()).await {
                    Ok(true) => info!("layout reloaded after external change"),
                    Ok(false) => {}
                    Err(e) => warn!("layout reload task failed: {e}"),
                }
            }
        }
    }

    info!("shutting down");
    if let Some(text) = editor.finish() {
        print!("{text}");
    }
    if let Some(running) = bridge.take() {
        running.handle.stop().await;
    }
    device.events.publish(Event::Shutdown);
    Ok(())
}

fn server_config(config: &GitClockConfig, force: bool) -> ServerConfig {
    let mut server = config.server.clone();
    server.enabled |= force;
    server
}

/// Start, stop, or rebind the bridge so it matches `server`.
async fn sync_bridge(device: &Device, server: &ServerConfig, bridge: &mut Option<RunningBridge>) {
    let wanted = if server.enabled {
        match server.socket_addr() {
            Some(addr) => Some(addr),
            None => {
                warn!("invalid server bind address {:?}", server.bind);
                None
            }
        }
    } else {
        None
    };

    let current = bridge.as_ref().map(|running| running.requested);
    if current == wanted {
        return;
    }

    if let Some(running) = bridge.take() {
        info!("stopping remote editor endpoint");
        running.handle.stop().await;
    }

    if let Some(addr) = wanted {
        match BridgeServer::start(addr, device.bridge_state()).await {
            Ok(handle) => {
                info!("remote editor available at {}", handle.url());
                *bridge = Some(RunningBridge {
                    requested: addr,
                    handle,
                });
            }
            Err(e) => error!("failed to start remote editor endpoint: {e}"),
        }
    }
}

/// Forward stdin lines to the editor. A plain thread, so a blocked read
/// never holds up runtime shutdown.
fn spawn_stdin_reader(tx: mpsc::Sender<String>) {
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.blocking_send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("failed to read editor input: {e}");
                    break;
                }
            }
        }
    });
}

fn spawn_prefs_watcher(path: PathBuf, tx: broadcast::Sender<()>) {
    tokio::spawn(async move {
        let watcher = match FileWatcher::new(path) {
            Ok(watcher) => watcher,
            Err(e) => {
                error!("failed to create preference watcher: {e}");
                return;
            }
        };
        if let Err(e) = watcher.watch(tx).await {
            error!("preference watcher error: {e}");
        }
    });
}

async fn log_events(mut rx: broadcast::Receiver<Event>) {
    loop {
        match rx.recv().await {
            Ok(event) => debug!(?event, "event"),
            Err(broadcast::error::RecvError::Lagged(n)) => warn!("event log lagged by {n} events"),
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

/// Re-run the render pass whenever the committed layout or the screen changes.
async fn render_loop(
    mut layout_rx: watch::Receiver<LayoutMap>,
    mut geometry_rx: watch::Receiver<ScreenGeometry>,
) {
    loop {
        let layout = layout_rx.borrow_and_update().clone();
        let screen = *geometry_rx.borrow_and_update();
        for (id, p) in device::render(&layout, screen) {
            debug!(
                widget = %id,
                left = p.left,
                top = p.top,
                scale = p.scale,
                "placed"
            );
        }

        tokio::select! {
            changed = layout_rx.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            changed = geometry_rx.changed() => {
                if changed.is_err() {
                    break;
                }
            }
        }
    }
}
