//! Local Durable Storage
//!
//! Key-value storage seam (browser `localStorage` in the app, in-memory in
//! tests) and the selection cache stored on top of it.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use log::{debug, info, warn};

use crate::error::{ReviewError, ReviewResult};

/// Canonical cache key holding the JSON-encoded selection
pub const SELECTION_KEY: &str = "screenshot-selection";

/// Keys used by earlier versions of the reviewer, migrated on first read
pub const LEGACY_SELECTION_KEYS: &[&str] = &["selection"];

/// Synchronous string key-value storage
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> ReviewResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> ReviewResult<()>;
    fn remove_item(&self, key: &str) -> ReviewResult<()>;
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for Rc<T> {
    fn get_item(&self, key: &str) -> ReviewResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> ReviewResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> ReviewResult<()> {
        (**self).remove_item(key)
    }
}

/// In-memory storage.
///
/// `set_unavailable(true)` makes every call fail the way a disabled or
/// full browser storage does.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
    unavailable: Cell<bool>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.set(unavailable);
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.items.borrow().contains_key(key)
    }

    fn check(&self) -> ReviewResult<()> {
        if self.unavailable.get() {
            return Err(ReviewError::Storage("storage disabled".to_string()));
        }
        Ok(())
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> ReviewResult<Option<String>> {
        self.check()?;
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> ReviewResult<()> {
        self.check()?;
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> ReviewResult<()> {
        self.check()?;
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// Selection mirror in local storage.
///
/// Storage failures are logged and swallowed; the in-memory selection stays
/// authoritative for the session.
pub struct SelectionCache<S> {
    storage: S,
    legacy_checked: Cell<bool>,
}

impl<S: KeyValueStorage> SelectionCache<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            legacy_checked: Cell::new(false),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Cached selection, `None` when absent, empty, malformed or unreadable
    pub fn read(&self) -> Option<Vec<String>> {
        match self.storage.get_item(SELECTION_KEY) {
            Ok(Some(raw)) => {
                self.legacy_checked.set(true);
                parse_ids(SELECTION_KEY, &raw)
            }
            Ok(None) if !self.legacy_checked.replace(true) => self.migrate_legacy(),
            Ok(None) => None,
            Err(e) => {
                warn!("[CACHE] Failed to read selection from local storage: {}", e);
                None
            }
        }
    }

    /// Store `ids`, or delete the entry when empty
    pub fn write(&self, ids: &[String]) {
        if ids.is_empty() {
            self.remove();
            return;
        }
        let result = serde_json::to_string(ids)
            .map_err(ReviewError::from)
            .and_then(|json| self.storage.set_item(SELECTION_KEY, &json));
        match result {
            Ok(()) => debug!("[CACHE] Stored {} selected ids", ids.len()),
            Err(e) => warn!("[CACHE] Failed to persist selection to local storage: {}", e),
        }
    }

    /// Delete the cached selection along with any legacy entry
    pub fn remove(&self) {
        self.legacy_checked.set(true);
        for key in std::iter::once(SELECTION_KEY).chain(LEGACY_SELECTION_KEYS.iter().copied()) {
            if let Err(e) = self.storage.remove_item(key) {
                warn!("[CACHE] Failed to clear persisted selection under {}: {}", key, e);
            }
        }
    }

    /// Move the first usable legacy entry under the canonical key and drop
    /// every legacy key.
    fn migrate_legacy(&self) -> Option<Vec<String>> {
        let mut migrated = None;
        for key in LEGACY_SELECTION_KEYS {
            let raw = match self.storage.get_item(key) {
                Ok(Some(raw)) => raw,
                Ok(None) => continue,
                Err(e) => {
                    warn!("[CACHE] Failed to read legacy key {}: {}", key, e);
                    continue;
                }
            };
            if migrated.is_none() {
                migrated = parse_ids(key, &raw);
            }
            if let Err(e) = self.storage.remove_item(key) {
                warn!("[CACHE] Failed to remove legacy key {}: {}", key, e);
            }
        }

        if let Some(ids) = &migrated {
            info!("[CACHE] Migrated {} selected ids from legacy storage", ids.len());
            self.write(ids);
        }
        migrated
    }
}

fn parse_ids(key: &str, raw: &str) -> Option<Vec<String>> {
    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(ids) if ids.is_empty() => None,
        Ok(ids) => Some(ids),
        Err(e) => {
            warn!("[CACHE] Ignoring malformed selection under {}: {}", key, e);
            None
        }
    }
}
