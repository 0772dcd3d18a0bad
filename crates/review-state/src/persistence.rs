//! Selection Persistence
//!
//! Keeps the selection in sync with the backend (source of truth when
//! reachable) and the local cache (fallback and offline buffer).
//!
//! Hydration runs once per session: remote first, local cache second.
//! Only after it settles is persist-on-change armed, so an empty initial
//! selection never overwrites stored state. Every later change is written
//! to the local cache synchronously and pushed to the backend as a
//! best-effort [`PendingSync`] task.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ReviewResult;
use crate::selection::Selection;
use crate::storage::{KeyValueStorage, SelectionCache};
use crate::store::SelectionState;

/// Body of `POST /api/state/save`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistenceRecord {
    pub selected: Vec<String>,
    /// ISO-8601, UTC, millisecond precision
    pub timestamp: String,
}

impl PersistenceRecord {
    pub fn now(selected: Vec<String>) -> Self {
        Self {
            selected,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Backend selection endpoints
#[async_trait(?Send)]
pub trait SelectionRemote {
    /// `GET /api/state`, raw JSON body
    async fn fetch_state(&self) -> ReviewResult<Value>;
    /// `POST /api/state/save`
    async fn save_state(&self, record: &PersistenceRecord) -> ReviewResult<()>;
    /// `POST /api/state/clear`
    async fn clear_state(&self) -> ReviewResult<()>;
}

/// The selection owner the coordinator reads from and writes into
pub trait SelectionHost {
    /// Counter of user-driven selection changes
    fn revision(&self) -> u64;
    fn selected_ids(&self) -> Vec<String>;
    fn adopt_hydrated(&self, ids: Vec<String>);
    fn clear_selection(&self);
}

impl SelectionHost for RefCell<SelectionState> {
    fn revision(&self) -> u64 {
        self.borrow().revision()
    }

    fn selected_ids(&self) -> Vec<String> {
        self.borrow().selected_ids()
    }

    fn adopt_hydrated(&self, ids: Vec<String>) {
        self.borrow_mut().adopt_hydrated(ids);
    }

    fn clear_selection(&self) {
        self.borrow_mut().clear();
    }
}

/// Extract the selection from a `GET /api/state` body.
///
/// Priority: top-level `selected`, then `state.selected`. A candidate only
/// counts when it is an array of strings.
pub fn normalize_state_payload(payload: &Value) -> Option<Vec<String>> {
    string_array(payload.get("selected"))
        .or_else(|| string_array(payload.get("state").and_then(|state| state.get("selected"))))
}

fn string_array(value: Option<&Value>) -> Option<Vec<String>> {
    value?
        .as_array()?
        .iter()
        .map(|entry| entry.as_str().map(String::from))
        .collect()
}

/// Shared cancellation flag, set on teardown
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HydrationSource {
    Remote,
    Local,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HydrationOutcome {
    /// Initial selection adopted from `source`
    Restored { source: HydrationSource, count: usize },
    /// Neither source had a selection
    Empty,
    /// The user changed the selection while hydration was in flight; the
    /// stored state was discarded in favor of the live one
    Diverged,
    /// Teardown happened before hydration settled; nothing was applied
    Cancelled,
    /// Hydration already ran this session
    AlreadyHydrated,
}

enum SyncOp {
    Save(Vec<String>),
    Clear,
}

/// A queued best-effort backend write.
///
/// Failures are logged and dropped, never retried. If the coordinator was
/// cancelled before the task runs, nothing is sent.
pub struct PendingSync<R> {
    remote: Rc<R>,
    op: SyncOp,
    token: CancelToken,
}

impl<R: SelectionRemote> PendingSync<R> {
    /// True for a clear notification, false for a save
    pub fn is_clear(&self) -> bool {
        matches!(self.op, SyncOp::Clear)
    }

    pub async fn run(self) {
        if self.token.is_cancelled() {
            debug!("[PERSIST] Skipping backend sync after teardown");
            return;
        }
        match self.op {
            SyncOp::Save(selected) => {
                let count = selected.len();
                let record = PersistenceRecord::now(selected);
                match self.remote.save_state(&record).await {
                    Ok(()) => debug!("[PERSIST] Saved {} selected ids to backend", count),
                    Err(e) => warn!("[PERSIST] Failed to persist selection to backend: {}", e),
                }
            }
            SyncOp::Clear => match self.remote.clear_state().await {
                Ok(()) => debug!("[PERSIST] Backend selection cleared"),
                Err(e) => warn!("[PERSIST] Failed to notify backend about cleared selection: {}", e),
            },
        }
    }
}

/// Coordinates hydration and persist-on-change for one session.
///
/// Cheap to clone; clones share all state.
pub struct PersistenceCoordinator<R, S> {
    remote: Rc<R>,
    cache: Rc<SelectionCache<S>>,
    armed: Rc<Cell<bool>>,
    /// Bumped by an explicit clear so in-flight hydration treats it as divergence
    clears: Rc<Cell<u64>>,
    last_synced: Rc<RefCell<Option<Vec<String>>>>,
    token: CancelToken,
}

impl<R, S> Clone for PersistenceCoordinator<R, S> {
    fn clone(&self) -> Self {
        Self {
            remote: Rc::clone(&self.remote),
            cache: Rc::clone(&self.cache),
            armed: Rc::clone(&self.armed),
            clears: Rc::clone(&self.clears),
            last_synced: Rc::clone(&self.last_synced),
            token: self.token.clone(),
        }
    }
}

impl<R: SelectionRemote, S: KeyValueStorage> PersistenceCoordinator<R, S> {
    pub fn new(remote: R, storage: S) -> Self {
        Self {
            remote: Rc::new(remote),
            cache: Rc::new(SelectionCache::new(storage)),
            armed: Rc::new(Cell::new(false)),
            clears: Rc::new(Cell::new(0)),
            last_synced: Rc::new(RefCell::new(None)),
            token: CancelToken::new(),
        }
    }

    pub fn cache(&self) -> &SelectionCache<S> {
        &self.cache
    }

    /// Whether hydration settled and persist-on-change is active
    pub fn is_armed(&self) -> bool {
        self.armed.get()
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.token.clone()
    }

    /// Teardown: stale hydration results and queued syncs are dropped
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Load the initial selection into `host`, remote first, cache second.
    ///
    /// When the selection that ends up live differs from what the backend
    /// holds (cache restore, divergence), it is pushed once before returning.
    pub async fn hydrate<H: SelectionHost + ?Sized>(&self, host: &H) -> HydrationOutcome {
        if self.armed.get() {
            return HydrationOutcome::AlreadyHydrated;
        }

        let revision = host.revision();
        let clears = self.clears.get();

        let fetched = self.remote.fetch_state().await;
        if self.token.is_cancelled() {
            debug!("[HYDRATE] Cancelled before the backend answered");
            return HydrationOutcome::Cancelled;
        }

        // read on every path so legacy keys are migrated even when unused
        let cached = self.cache.read();

        let remote_ids = match fetched {
            Ok(payload) => match normalize_state_payload(&payload) {
                Some(ids) if !ids.is_empty() => Some(ids),
                Some(_) => {
                    debug!("[HYDRATE] Backend holds no selection");
                    None
                }
                None => {
                    warn!("[HYDRATE] Unexpected state payload from backend, ignoring it");
                    None
                }
            },
            Err(e) => {
                warn!("[HYDRATE] Backend unavailable, falling back to local storage: {}", e);
                None
            }
        };

        let outcome = if host.revision() != revision || self.clears.get() != clears {
            info!("[HYDRATE] Selection changed while hydrating, keeping the live selection");
            HydrationOutcome::Diverged
        } else if let Some(ids) = remote_ids {
            let ids = dedupe(ids);
            self.cache.write(&ids);
            *self.last_synced.borrow_mut() = Some(ids.clone());
            info!("[HYDRATE] Restored {} selected ids from backend", ids.len());
            let count = ids.len();
            host.adopt_hydrated(ids);
            HydrationOutcome::Restored { source: HydrationSource::Remote, count }
        } else if let Some(ids) = cached {
            let ids = dedupe(ids);
            info!("[HYDRATE] Restored {} selected ids from local storage", ids.len());
            let count = ids.len();
            host.adopt_hydrated(ids);
            HydrationOutcome::Restored { source: HydrationSource::Local, count }
        } else {
            *self.last_synced.borrow_mut() = Some(Vec::new());
            HydrationOutcome::Empty
        };

        self.armed.set(true);

        if let Some(task) = self.persist(&host.selected_ids()) {
            task.run().await;
        }
        outcome
    }

    /// Mirror a selection change.
    ///
    /// The local cache is written before returning; the backend write is
    /// returned for the caller to spawn. `None` while hydration is pending or
    /// when `selected` is what was last synchronized.
    pub fn persist(&self, selected: &[String]) -> Option<PendingSync<R>> {
        if !self.armed.get() {
            debug!("[PERSIST] Hydration pending, not persisting yet");
            return None;
        }
        if self.last_synced.borrow().as_deref() == Some(selected) {
            return None;
        }
        *self.last_synced.borrow_mut() = Some(selected.to_vec());

        self.cache.write(selected);

        let op = if selected.is_empty() {
            SyncOp::Clear
        } else {
            SyncOp::Save(selected.to_vec())
        };
        Some(self.pending(op))
    }

    /// Drop every persisted trace of the selection and empty it.
    ///
    /// Works regardless of backend reachability; the returned clear
    /// notification is best-effort like every other sync.
    pub fn clear_persistence<H: SelectionHost + ?Sized>(&self, host: &H) -> PendingSync<R> {
        self.cache.remove();
        self.clears.set(self.clears.get() + 1);
        *self.last_synced.borrow_mut() = Some(Vec::new());
        host.clear_selection();
        info!("[PERSIST] Selection persistence cleared");
        self.pending(SyncOp::Clear)
    }

    fn pending(&self, op: SyncOp) -> PendingSync<R> {
        PendingSync {
            remote: Rc::clone(&self.remote),
            op,
            token: self.token.clone(),
        }
    }
}

fn dedupe(ids: Vec<String>) -> Vec<String> {
    ids.into_iter().collect::<Selection>().into_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReviewError;
    use crate::storage::{MemoryStorage, SELECTION_KEY};
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq)]
    enum RemoteCall {
        Fetch,
        Save(PersistenceRecord),
        Clear,
    }

    #[derive(Default)]
    struct FakeRemote {
        response: RefCell<Option<ReviewResult<Value>>>,
        fail_writes: bool,
        on_fetch: RefCell<Option<Box<dyn FnOnce()>>>,
        calls: Rc<RefCell<Vec<RemoteCall>>>,
    }

    impl FakeRemote {
        fn answering(response: ReviewResult<Value>) -> Self {
            Self {
                response: RefCell::new(Some(response)),
                ..Default::default()
            }
        }
    }

    #[async_trait(?Send)]
    impl SelectionRemote for FakeRemote {
        async fn fetch_state(&self) -> ReviewResult<Value> {
            self.calls.borrow_mut().push(RemoteCall::Fetch);
            let hook = self.on_fetch.borrow_mut().take();
            if let Some(hook) = hook {
                hook();
            }
            self.response
                .borrow_mut()
                .take()
                .unwrap_or_else(|| Ok(json!({ "selected": [] })))
        }

        async fn save_state(&self, record: &PersistenceRecord) -> ReviewResult<()> {
            self.calls.borrow_mut().push(RemoteCall::Save(record.clone()));
            if self.fail_writes {
                return Err(ReviewError::Network("connection refused".to_string()));
            }
            Ok(())
        }

        async fn clear_state(&self) -> ReviewResult<()> {
            self.calls.borrow_mut().push(RemoteCall::Clear);
            if self.fail_writes {
                return Err(ReviewError::Network("connection refused".to_string()));
            }
            Ok(())
        }
    }

    struct Harness {
        coordinator: PersistenceCoordinator<FakeRemote, Rc<MemoryStorage>>,
        storage: Rc<MemoryStorage>,
        calls: Rc<RefCell<Vec<RemoteCall>>>,
        host: Rc<RefCell<SelectionState>>,
    }

    fn harness(remote: FakeRemote, cached: Option<&str>) -> Harness {
        let storage = Rc::new(MemoryStorage::new());
        if let Some(raw) = cached {
            storage.set_item(SELECTION_KEY, raw).unwrap();
        }
        let calls = remote.calls.clone();
        Harness {
            coordinator: PersistenceCoordinator::new(remote, storage.clone()),
            storage,
            calls,
            host: Rc::new(RefCell::new(SelectionState::default())),
        }
    }

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn saved(calls: &[RemoteCall]) -> Vec<Vec<String>> {
        calls
            .iter()
            .filter_map(|call| match call {
                RemoteCall::Save(record) => Some(record.selected.clone()),
                _ => None,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_remote_selection_wins_over_cache() {
        let h = harness(
            FakeRemote::answering(Ok(json!({ "selected": ["a", "b"] }))),
            Some(r#"["x"]"#),
        );

        let outcome = h.coordinator.hydrate(h.host.as_ref()).await;

        assert_eq!(
            outcome,
            HydrationOutcome::Restored { source: HydrationSource::Remote, count: 2 }
        );
        assert_eq!(h.host.borrow().selected_ids(), ids(&["a", "b"]));
        assert_eq!(h.coordinator.cache().read(), Some(ids(&["a", "b"])));
        assert_eq!(*h.calls.borrow(), vec![RemoteCall::Fetch]);
        assert!(h.coordinator.is_armed());
    }

    #[tokio::test]
    async fn test_nested_state_shape_is_accepted() {
        let h = harness(
            FakeRemote::answering(Ok(json!({ "state": { "selected": ["n1"] } }))),
            None,
        );
        h.coordinator.hydrate(h.host.as_ref()).await;
        assert_eq!(h.host.borrow().selected_ids(), ids(&["n1"]));
    }

    #[tokio::test]
    async fn test_network_failure_falls_back_to_cache() {
        let h = harness(
            FakeRemote::answering(Err(ReviewError::Network("offline".to_string()))),
            Some(r#"["x"]"#),
        );

        let outcome = h.coordinator.hydrate(h.host.as_ref()).await;

        assert_eq!(
            outcome,
            HydrationOutcome::Restored { source: HydrationSource::Local, count: 1 }
        );
        assert_eq!(h.host.borrow().selected_ids(), ids(&["x"]));
        // the cached selection is pushed back to the backend once
        assert_eq!(saved(&h.calls.borrow()), vec![ids(&["x"])]);
    }

    #[tokio::test]
    async fn test_timeout_and_empty_remote_fall_back_to_cache() {
        for response in [
            Err(ReviewError::Timeout(5000)),
            Ok(json!({ "selected": [] })),
            Ok(json!({ "selected": "a,b" })),
        ] {
            let h = harness(FakeRemote::answering(response), Some(r#"["c1","c2"]"#));
            h.coordinator.hydrate(h.host.as_ref()).await;
            assert_eq!(h.host.borrow().selected_ids(), ids(&["c1", "c2"]));
        }
    }

    #[tokio::test]
    async fn test_nothing_stored_hydrates_empty_without_writes() {
        let h = harness(FakeRemote::default(), None);

        let outcome = h.coordinator.hydrate(h.host.as_ref()).await;

        assert_eq!(outcome, HydrationOutcome::Empty);
        assert!(h.host.borrow().selected().is_empty());
        assert_eq!(*h.calls.borrow(), vec![RemoteCall::Fetch]);
        assert!(!h.storage.contains_key(SELECTION_KEY));
        assert!(h.coordinator.is_armed());
    }

    #[tokio::test]
    async fn test_hydration_runs_once() {
        let h = harness(FakeRemote::default(), None);
        h.coordinator.hydrate(h.host.as_ref()).await;
        let again = h.coordinator.hydrate(h.host.as_ref()).await;
        assert_eq!(again, HydrationOutcome::AlreadyHydrated);
        assert_eq!(*h.calls.borrow(), vec![RemoteCall::Fetch]);
    }

    #[tokio::test]
    async fn test_persist_is_disarmed_until_hydrated() {
        let h = harness(FakeRemote::default(), Some(r#"["kept"]"#));

        assert!(h.coordinator.persist(&[]).is_none());
        assert_eq!(h.coordinator.cache().read(), Some(ids(&["kept"])));

        h.coordinator.hydrate(h.host.as_ref()).await;
        assert!(h.coordinator.persist(&ids(&["next"])).is_some());
    }

    #[tokio::test]
    async fn test_persist_writes_cache_before_remote() {
        let h = harness(FakeRemote::default(), None);
        h.coordinator.hydrate(h.host.as_ref()).await;

        let task = h.coordinator.persist(&ids(&["a", "b"])).unwrap();
        assert!(!task.is_clear());
        assert_eq!(h.coordinator.cache().read(), Some(ids(&["a", "b"])));
        assert_eq!(*h.calls.borrow(), vec![RemoteCall::Fetch]);

        task.run().await;
        let calls = h.calls.borrow();
        match calls.last() {
            Some(RemoteCall::Save(record)) => {
                assert_eq!(record.selected, ids(&["a", "b"]));
                assert!(record.timestamp.ends_with('Z'));
                assert!(chrono::DateTime::parse_from_rfc3339(&record.timestamp).is_ok());
            }
            other => panic!("expected a save, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_selection_deletes_cache_and_notifies_clear() {
        let h = harness(FakeRemote::answering(Ok(json!({ "selected": ["a"] }))), None);
        h.coordinator.hydrate(h.host.as_ref()).await;

        let task = h.coordinator.persist(&[]).unwrap();
        assert!(task.is_clear());
        assert!(!h.storage.contains_key(SELECTION_KEY));

        task.run().await;
        assert_eq!(h.calls.borrow().last(), Some(&RemoteCall::Clear));
    }

    #[tokio::test]
    async fn test_unchanged_selection_is_not_resent() {
        let h = harness(FakeRemote::default(), None);
        h.coordinator.hydrate(h.host.as_ref()).await;

        h.coordinator.persist(&ids(&["a"])).unwrap().run().await;
        assert!(h.coordinator.persist(&ids(&["a"])).is_none());
        assert!(h.coordinator.persist(&ids(&["a", "b"])).is_some());
    }

    #[tokio::test]
    async fn test_backend_write_failures_are_swallowed() {
        let remote = FakeRemote {
            fail_writes: true,
            ..Default::default()
        };
        let h = harness(remote, None);
        h.coordinator.hydrate(h.host.as_ref()).await;

        h.coordinator.persist(&ids(&["a"])).unwrap().run().await;
        h.coordinator.persist(&[]).unwrap().run().await;

        let calls = h.calls.borrow();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls.last(), Some(&RemoteCall::Clear));
    }

    #[tokio::test]
    async fn test_clear_persistence() {
        let h = harness(FakeRemote::answering(Ok(json!({ "selected": ["a", "b"] }))), None);
        h.coordinator.hydrate(h.host.as_ref()).await;
        assert!(h.storage.contains_key(SELECTION_KEY));

        let task = h.coordinator.clear_persistence(h.host.as_ref());
        assert!(h.host.borrow().selected().is_empty());
        assert!(!h.storage.contains_key(SELECTION_KEY));

        task.run().await;
        assert_eq!(h.calls.borrow().last(), Some(&RemoteCall::Clear));

        // the store-driven persist that follows is a no-op
        assert!(h.coordinator.persist(&[]).is_none());
    }

    #[tokio::test]
    async fn test_clear_persistence_with_unreachable_backend() {
        let remote = FakeRemote {
            fail_writes: true,
            ..Default::default()
        };
        let h = harness(remote, Some(r#"["a"]"#));
        h.host.borrow_mut().replace(ids(&["a"]));

        h.coordinator.clear_persistence(h.host.as_ref()).run().await;

        assert!(h.host.borrow().selected().is_empty());
        assert!(!h.storage.contains_key(SELECTION_KEY));
        assert_eq!(h.calls.borrow().last(), Some(&RemoteCall::Clear));
    }

    #[tokio::test]
    async fn test_interaction_during_hydration_wins() {
        let remote = FakeRemote::answering(Ok(json!({ "selected": ["stale"] })));
        let h = harness(remote, None);
        let host = h.host.clone();
        // the user clicks while the fetch is in flight
        let remote_hook: Box<dyn FnOnce()> = Box::new(move || host.borrow_mut().toggle("fresh"));
        h.coordinator.remote.on_fetch.replace(Some(remote_hook));

        let outcome = h.coordinator.hydrate(h.host.as_ref()).await;

        assert_eq!(outcome, HydrationOutcome::Diverged);
        assert_eq!(h.host.borrow().selected_ids(), ids(&["fresh"]));
        assert_eq!(h.coordinator.cache().read(), Some(ids(&["fresh"])));
        assert_eq!(saved(&h.calls.borrow()), vec![ids(&["fresh"])]);
    }

    #[tokio::test]
    async fn test_legacy_key_is_migrated_when_live_selection_wins() {
        let remote = FakeRemote::answering(Ok(json!({ "selected": ["stale"] })));
        let h = harness(remote, None);
        h.storage.set_item("selection", r#"["old"]"#).unwrap();
        let host = h.host.clone();
        let remote_hook: Box<dyn FnOnce()> = Box::new(move || host.borrow_mut().toggle("fresh"));
        h.coordinator.remote.on_fetch.replace(Some(remote_hook));

        let outcome = h.coordinator.hydrate(h.host.as_ref()).await;

        assert_eq!(outcome, HydrationOutcome::Diverged);
        assert!(!h.storage.contains_key("selection"));
        assert_eq!(h.coordinator.cache().read(), Some(ids(&["fresh"])));
    }

    #[tokio::test]
    async fn test_legacy_key_is_dropped_when_backend_wins() {
        let h = harness(FakeRemote::answering(Ok(json!({ "selected": ["a"] }))), None);
        h.storage.set_item("selection", r#"["old"]"#).unwrap();

        h.coordinator.hydrate(h.host.as_ref()).await;

        assert!(!h.storage.contains_key("selection"));
        assert_eq!(h.coordinator.cache().read(), Some(ids(&["a"])));
    }

    #[tokio::test]
    async fn test_explicit_clear_during_hydration_is_not_undone() {
        let remote = FakeRemote::answering(Ok(json!({ "selected": ["stale"] })));
        let h = harness(remote, None);
        let coordinator = h.coordinator.clone();
        let host = h.host.clone();
        h.storage.set_item("selection", r#"["legacy"]"#).unwrap();
        let hook: Box<dyn FnOnce()> = Box::new(move || {
            // dropped without running: only the local effects matter here
            let _ = coordinator.clear_persistence(host.as_ref());
        });
        h.coordinator.remote.on_fetch.replace(Some(hook));

        let outcome = h.coordinator.hydrate(h.host.as_ref()).await;

        assert_eq!(outcome, HydrationOutcome::Diverged);
        assert!(h.host.borrow().selected().is_empty());
        assert!(!h.storage.contains_key("selection"));
        assert!(!h.storage.contains_key(SELECTION_KEY));
    }

    #[tokio::test]
    async fn test_cancelled_hydration_applies_nothing() {
        let remote = FakeRemote::answering(Ok(json!({ "selected": ["late"] })));
        let h = harness(remote, Some(r#"["cached"]"#));
        let token = h.coordinator.cancel_token();
        let hook: Box<dyn FnOnce()> = Box::new(move || token.cancel());
        h.coordinator.remote.on_fetch.replace(Some(hook));

        let outcome = h.coordinator.hydrate(h.host.as_ref()).await;

        assert_eq!(outcome, HydrationOutcome::Cancelled);
        assert!(h.host.borrow().selected().is_empty());
        assert!(!h.coordinator.is_armed());
        assert_eq!(h.coordinator.cache().read(), Some(ids(&["cached"])));
    }

    #[tokio::test]
    async fn test_cancelled_sync_is_not_sent() {
        let h = harness(FakeRemote::default(), None);
        h.coordinator.hydrate(h.host.as_ref()).await;

        let task = h.coordinator.persist(&ids(&["a"])).unwrap();
        h.coordinator.cancel();
        task.run().await;

        assert_eq!(*h.calls.borrow(), vec![RemoteCall::Fetch]);
        // the local mirror still happened synchronously
        assert_eq!(h.coordinator.cache().read(), Some(ids(&["a"])));
    }

    #[test]
    fn test_normalize_state_payload() {
        assert_eq!(
            normalize_state_payload(&json!({ "selected": ["a"] })),
            Some(ids(&["a"]))
        );
        assert_eq!(
            normalize_state_payload(&json!({ "state": { "selected": ["b"] } })),
            Some(ids(&["b"]))
        );
        // top-level wins when both are present
        assert_eq!(
            normalize_state_payload(&json!({ "selected": ["a"], "state": { "selected": ["b"] } })),
            Some(ids(&["a"]))
        );
        // malformed top-level falls through to the nested shape
        assert_eq!(
            normalize_state_payload(&json!({ "selected": 3, "state": { "selected": ["b"] } })),
            Some(ids(&["b"]))
        );
        assert_eq!(normalize_state_payload(&json!({ "selected": ["a", 1] })), None);
        assert_eq!(normalize_state_payload(&json!(["a"])), None);
        assert_eq!(normalize_state_payload(&Value::Null), None);
    }

    #[test]
    fn test_duplicate_ids_are_collapsed() {
        assert_eq!(dedupe(ids(&["a", "b", "a"])), ids(&["a", "b"]));
    }
}
