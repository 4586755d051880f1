use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use gitclock_layout::{Layout, LayoutMap, ScreenGeometry, WidgetId};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::BridgeError;
use crate::protocol::{Ack, StateResponse};

/// What a poll did with the fetched snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// The local view now mirrors the device.
    Applied,
    /// A drag was in progress, so the layout was left alone.
    Suppressed,
}

/// The client's local picture of the device.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RemoteView {
    pub geometry: ScreenGeometry,
    pub layout: LayoutMap,
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    id: WidgetId,
    current: Layout,
}

#[derive(Default)]
struct Shared {
    view: RemoteView,
    drag: Option<Drag>,
    /// Bumped by every local layout edit. A poll issued under an older
    /// value may carry a snapshot taken before that edit.
    generation: u64,
}

/// Client for a device's bridge endpoint.
///
/// Cloning shares the local view, so a polling task and the code driving
/// drags observe the same state.
#[derive(Clone)]
pub struct RemoteEditor {
    http: reqwest::Client,
    base_url: String,
    shared: Arc<Mutex<Shared>>,
}

impl RemoteEditor {
    pub fn new(base_url: impl Into<String>) -> Result<Self, BridgeError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            shared: Arc::default(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Copy of the local view.
    pub fn view(&self) -> RemoteView {
        self.lock().view.clone()
    }

    pub fn is_dragging(&self) -> bool {
        self.lock().drag.is_some()
    }

    // -- Requests --

    pub async fn fetch_state(&self) -> Result<StateResponse, BridgeError> {
        let response = self.http.get(self.url("/state")).send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(BridgeError::Api(format!("HTTP {status}: {text}")));
        }
        response
            .json()
            .await
            .map_err(|e| BridgeError::Parse(e.to_string()))
    }

    /// Send a whole or partial map; the device commits it at once.
    pub async fn submit(&self, entries: &LayoutMap) -> Result<(), BridgeError> {
        let response = self
            .http
            .post(self.url("/layout"))
            .header("content-type", "application/json")
            .body(entries.to_json())
            .send()
            .await?;
        read_ack(response).await
    }

    pub async fn reset(&self) -> Result<(), BridgeError> {
        let response = self.http.post(self.url("/reset")).send().await?;
        read_ack(response).await?;
        let mut shared = self.lock();
        shared.view.layout.clear();
        shared.generation += 1;
        Ok(())
    }

    /// Fetch the device state and apply it unless a drag is in progress.
    ///
    /// Geometry is always taken; only the layout is held back while dragging
    /// or when a local edit happened while the request was in flight.
    pub async fn poll_once(&self) -> Result<PollOutcome, BridgeError> {
        let issued = self.lock().generation;
        let state = self.fetch_state().await?;
        Ok(self.apply_poll(issued, state))
    }

    /// Apply a snapshot fetched while the local edit generation was `issued`.
    pub(crate) fn apply_poll(&self, issued: u64, state: StateResponse) -> PollOutcome {
        let mut shared = self.lock();
        shared.view.geometry = state.geometry();
        if shared.drag.is_some() {
            debug!("drag in progress, holding back polled layout");
            return PollOutcome::Suppressed;
        }
        if shared.generation != issued {
            debug!("local edit since the poll was issued, holding back polled layout");
            return PollOutcome::Suppressed;
        }
        shared.view.layout = state.layout;
        PollOutcome::Applied
    }

    pub(crate) fn generation(&self) -> u64 {
        self.lock().generation
    }

    // -- Drags --

    /// Start dragging `id` from its current local layout.
    pub fn begin_drag(&self, id: WidgetId) -> Layout {
        let mut shared = self.lock();
        let current = shared.view.layout.resolve(id);
        shared.drag = Some(Drag { id, current });
        shared.generation += 1;
        current
    }

    /// Move the dragged widget locally. Returns `None` when not dragging.
    pub fn drag_by(&self, dx: f64, dy: f64) -> Option<Layout> {
        let mut shared = self.lock();
        let drag = shared.drag.as_mut()?;
        drag.current.x += dx;
        drag.current.y += dy;
        Some(drag.current)
    }

    /// Finish the drag and submit the dragged widget alone.
    pub async fn end_drag(&self) -> Result<Option<Layout>, BridgeError> {
        let drag = {
            let mut shared = self.lock();
            let Some(drag) = shared.drag.take() else {
                return Ok(None);
            };
            shared.view.layout.insert(drag.id, drag.current);
            shared.generation += 1;
            drag
        };
        self.submit(&single(drag.id, drag.current)).await?;
        Ok(Some(drag.current))
    }

    /// Change one widget's scale and submit it.
    pub async fn set_scale(&self, id: WidgetId, scale: f64) -> Result<Layout, BridgeError> {
        let layout = {
            let mut shared = self.lock();
            let mut layout = shared.view.layout.resolve(id);
            layout.scale = scale;
            shared.view.layout.insert(id, layout);
            shared.generation += 1;
            if let Some(drag) = shared.drag.as_mut().filter(|d| d.id == id) {
                drag.current.scale = scale;
            }
            layout
        };
        self.submit(&single(id, layout)).await?;
        Ok(layout)
    }

    /// Poll every `interval` until `cancel` fires. Failed polls are logged
    /// and retried on the next tick.
    pub fn spawn_polling(&self, interval: Duration, cancel: CancellationToken) -> JoinHandle<()> {
        let editor = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = ticker.tick() => {
                        if let Err(e) = editor.poll_once().await {
                            warn!("poll of {} failed: {e}", editor.base_url);
                        }
                    }
                }
            }
            debug!("remote polling stopped");
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn single(id: WidgetId, layout: Layout) -> LayoutMap {
    [(id, layout)].into_iter().collect()
}

async fn read_ack(response: reqwest::Response) -> Result<(), BridgeError> {
    let status = response.status();
    let text = response.text().await?;
    let ack: Ack = serde_json::from_str(&text)
        .map_err(|_| BridgeError::Api(format!("HTTP {status}: {text}")))?;
    if ack.ok {
        Ok(())
    } else {
        Err(BridgeError::Rejected(
            ack.error.unwrap_or_else(|| format!("HTTP {status}")),
        ))
    }
}
