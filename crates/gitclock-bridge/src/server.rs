//! Bridge lifecycle: bind, serve, and graceful shutdown.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::Arc;

use gitclock_common::{Event, EventBus};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::error::BridgeError;
use crate::routes::{router, BridgeState};

/// Starts the HTTP endpoint for remote editors.
pub struct BridgeServer;

impl BridgeServer {
    /// Bind `addr` and serve in the background until the handle is stopped.
    ///
    /// Port `0` picks a free port; the bound address is on the handle.
    pub async fn start(addr: SocketAddr, state: BridgeState) -> Result<BridgeHandle, BridgeError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| BridgeError::Bind { addr, source })?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| BridgeError::Bind { addr, source })?;

        let cancel = CancellationToken::new();
        let events = state.events.clone();
        let app = router(state);
        let shutdown = cancel.clone();
        let task = tokio::spawn(async move {
            let served = axum::serve(listener, app)
                .with_graceful_shutdown(shutdown.cancelled_owned())
                .await;
            if let Err(e) = served {
                warn!("bridge server error: {e}");
            }
        });

        info!("bridge listening on http://{local_addr}");
        if let Some(events) = &events {
            events.publish(Event::BridgeStarted {
                addr: local_addr.to_string(),
            });
        }

        Ok(BridgeHandle {
            local_addr,
            cancel,
            task,
            events,
        })
    }
}

/// A running bridge. Dropping the handle leaves the server running.
pub struct BridgeHandle {
    local_addr: SocketAddr,
    cancel: CancellationToken,
    task: JoinHandle<()>,
    events: Option<Arc<EventBus>>,
}

impl BridgeHandle {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Base URL a [`RemoteEditor`](crate::RemoteEditor) on this host can use.
    pub fn url(&self) -> String {
        let mut addr = self.local_addr;
        if addr.ip().is_unspecified() {
            let loopback: IpAddr = if addr.is_ipv4() {
                Ipv4Addr::LOCALHOST.into()
            } else {
                Ipv6Addr::LOCALHOST.into()
            };
            addr.set_ip(loopback);
        }
        format!("http://{addr}")
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stop accepting connections and wait for in-flight requests to finish.
    pub async fn stop(self) {
        self.cancel.cancel();
        if let Err(e) = self.task.await {
            warn!("bridge task ended abnormally: {e}");
        }
        info!(addr = %self.local_addr, "bridge stopped");
        if let Some(events) = &self.events {
            events.publish(Event::BridgeStopped);
        }
    }
}
