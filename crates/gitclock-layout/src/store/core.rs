//! [`LayoutStore`]: one in-memory working map, one durable blob.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use gitclock_common::{CommitOrigin, Event, EventBus};
use gitclock_platform::PreferenceStore;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::LayoutError;
use crate::model::{DecodedLayout, Layout, LayoutMap};
use crate::widget::WidgetId;

/// Preference key holding the JSON-encoded [`LayoutMap`].
pub const LAYOUT_KEY: &str = "layout_config";

/// Last state known to be on disk.
#[derive(Default)]
struct Durable {
    map: LayoutMap,
    /// Raw stored blob, used to tell our own writes from external ones.
    blob: Option<String>,
}

/// Single source of truth for widget layouts on this device.
///
/// The working map is what the device renders: committed entries plus any
/// native edits not yet committed. The durable side is guarded by its own
/// mutex, held for the whole of every commit and reload, so storage is
/// never written or read by two operations at once. Lock order is always
/// durable before working.
pub struct LayoutStore {
    prefs: Arc<dyn PreferenceStore>,
    working: RwLock<LayoutMap>,
    durable: Mutex<Durable>,
    committed_tx: watch::Sender<LayoutMap>,
    events: Option<Arc<EventBus>>,
}

impl LayoutStore {
    /// Open the store and load whatever is currently persisted.
    pub fn open(prefs: Arc<dyn PreferenceStore>) -> Self {
        let (committed_tx, _rx) = watch::channel(LayoutMap::new());
        let store = Self {
            prefs,
            working: RwLock::new(LayoutMap::new()),
            durable: Mutex::new(Durable::default()),
            committed_tx,
            events: None,
        };
        store.reload();
        store
    }

    /// Publish commit/reload/reset events on `events`.
    pub fn with_events(mut self, events: Arc<EventBus>) -> Self {
        self.events = Some(events);
        self
    }

    /// The preference store backing this layout store.
    pub fn preferences(&self) -> &Arc<dyn PreferenceStore> {
        &self.prefs
    }

    // -- Reads --

    /// Stored layout for `id`, or its built-in default. Never fails.
    pub fn get(&self, id: WidgetId) -> Layout {
        self.read_working().resolve(id)
    }

    /// Copy of the working map, including uncommitted native edits.
    pub fn snapshot(&self) -> LayoutMap {
        self.read_working().clone()
    }

    /// Copy of the last committed map.
    pub fn committed(&self) -> LayoutMap {
        self.committed_tx.borrow().clone()
    }

    /// Watch the committed map. Every subscriber eventually sees the latest commit.
    pub fn subscribe(&self) -> watch::Receiver<LayoutMap> {
        self.committed_tx.subscribe()
    }

    // -- In-memory edits --

    /// Replace position and scale for `id`, keeping its rotation. Not durable.
    pub fn upsert(&self, id: WidgetId, x: f64, y: f64, scale: f64) {
        let mut working = self.write_working();
        let rotation = working.resolve(id).rotation;
        working.insert(
            id,
            Layout {
                x,
                y,
                scale,
                rotation,
            },
        );
    }

    /// Replace the whole entry for `id`. Not durable.
    pub fn put(&self, id: WidgetId, layout: Layout) {
        self.write_working().insert(id, layout);
    }

    // -- Durable operations --

    /// Write the working map through to storage.
    ///
    /// Native edits are applied on top of what storage holds right now, so
    /// entries another writer committed since this store last looked are
    /// kept rather than overwritten with stale values.
    pub fn commit(&self) -> Result<(), LayoutError> {
        let mut durable = self.lock_durable();
        let mut working = self.write_working();
        let edits = native_edits(&working, &durable.map);
        let mut next = self.stored_base(&durable);
        next.merge(&edits);
        self.write_locked(&mut durable, next.clone())?;
        *working = next;
        drop(working);
        info!(
            edited = edits.len(),
            entries = durable.map.len(),
            "layout committed"
        );
        self.emit(Event::LayoutCommitted {
            origin: CommitOrigin::Native,
        });
        Ok(())
    }

    /// Apply `entries` and commit them at once.
    ///
    /// Only `entries` are written on top of what storage holds, so
    /// uncommitted native edits to other widgets stay local to the device.
    pub fn commit_entries(&self, entries: &LayoutMap) -> Result<(), LayoutError> {
        let mut durable = self.lock_durable();
        let mut working = self.write_working();
        let edits = native_edits(&working, &durable.map);
        let mut next = self.stored_base(&durable);
        next.merge(entries);
        self.write_locked(&mut durable, next.clone())?;
        *working = next;
        for (id, layout) in edits.iter() {
            if entries.entry(id).is_none() {
                working.insert(id, *layout);
            }
        }
        drop(working);
        info!(
            updated = entries.len(),
            entries = durable.map.len(),
            "remote layout committed"
        );
        self.emit(Event::LayoutCommitted {
            origin: CommitOrigin::Remote,
        });
        Ok(())
    }

    /// Drop every entry so all widgets use their defaults, and commit.
    pub fn reset(&self) -> Result<(), LayoutError> {
        let mut durable = self.lock_durable();
        self.write_locked(&mut durable, LayoutMap::new())?;
        self.write_working().clear();
        info!("layout reset to defaults");
        self.emit(Event::LayoutReset);
        Ok(())
    }

    /// Replace the in-memory state with what storage holds.
    ///
    /// Unreadable or invalid stored data is treated as absent: the map
    /// becomes empty and every widget falls back to its default.
    pub fn reload(&self) {
        let mut durable = self.lock_durable();
        let blob = self.read_blob();
        let map = self.load_locked(&mut durable, blob);
        *self.write_working() = map;
        self.emit(Event::LayoutReloaded);
    }

    /// Reload only if storage differs from what this store last wrote or read.
    ///
    /// Returns `true` when a reload happened. Used on filesystem change
    /// notifications, which also fire for this store's own commits.
    /// Uncommitted native edits survive and stay on top of the new state.
    pub fn reload_if_changed(&self) -> bool {
        let mut durable = self.lock_durable();
        let blob = self.read_blob();
        if blob == durable.blob {
            debug!("storage unchanged, skipping reload");
            return false;
        }
        info!("layout changed externally, reloading");
        let mut working = self.write_working();
        let edits = native_edits(&working, &durable.map);
        *working = self.load_locked(&mut durable, blob);
        if !edits.is_empty() {
            debug!(kept = edits.len(), "kept uncommitted native edits");
            working.merge(&edits);
        }
        drop(working);
        self.emit(Event::LayoutReloaded);
        true
    }

    // -- Internals --

    /// The committed map as storage holds it now.
    ///
    /// Falls back to the last known map when storage cannot be read or
    /// decoded; the following write reports any real storage fault.
    fn stored_base(&self, durable: &Durable) -> LayoutMap {
        let blob = match self.prefs.get(LAYOUT_KEY) {
            Ok(blob) => blob,
            Err(e) => {
                warn!("failed to read stored layout before commit: {e}");
                return durable.map.clone();
            }
        };
        if blob == durable.blob {
            return durable.map.clone();
        }
        match blob.as_deref() {
            None => {
                info!("stored layout was cleared externally");
                LayoutMap::new()
            }
            Some(raw) => match DecodedLayout::from_json(raw) {
                Ok(decoded) => {
                    info!("stored layout changed externally, merging");
                    decoded.map
                }
                Err(e) => {
                    warn!("stored layout unusable ({e}), keeping last known");
                    durable.map.clone()
                }
            },
        }
    }

    fn write_locked(&self, durable: &mut Durable, map: LayoutMap) -> Result<(), LayoutError> {
        let blob = map.to_json();
        self.prefs.put(LAYOUT_KEY, &blob)?;
        durable.blob = Some(blob);
        durable.map = map.clone();
        self.committed_tx.send_replace(map);
        Ok(())
    }

    /// Adopt `blob` as the committed state and return the decoded map.
    fn load_locked(&self, durable: &mut Durable, blob: Option<String>) -> LayoutMap {
        let map = match blob.as_deref() {
            None => LayoutMap::new(),
            Some(raw) => match DecodedLayout::from_json(raw) {
                Ok(decoded) => decoded.map,
                Err(e) => {
                    warn!("stored layout unusable ({e}), falling back to defaults");
                    LayoutMap::new()
                }
            },
        };
        debug!(entries = map.len(), "layout loaded from storage");
        durable.map = map.clone();
        durable.blob = blob;
        self.committed_tx.send_replace(map.clone());
        map
    }

    fn read_blob(&self) -> Option<String> {
        match self.prefs.get(LAYOUT_KEY) {
            Ok(blob) => blob,
            Err(e) => {
                warn!("failed to read stored layout: {e}");
                None
            }
        }
    }

    fn emit(&self, event: Event) {
        if let Some(events) = &self.events {
            events.publish(event);
        }
    }

    fn lock_durable(&self) -> MutexGuard<'_, Durable> {
        self.durable.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_working(&self) -> std::sync::RwLockReadGuard<'_, LayoutMap> {
        self.working.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_working(&self) -> std::sync::RwLockWriteGuard<'_, LayoutMap> {
        self.working.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Entries of `working` that differ from the `committed` map.
fn native_edits(working: &LayoutMap, committed: &LayoutMap) -> LayoutMap {
    working
        .iter()
        .filter(|(id, layout)| committed.entry(*id) != Some(*layout))
        .map(|(id, layout)| (id, *layout))
        .collect()
}
