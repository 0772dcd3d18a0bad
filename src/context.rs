//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;
use review_state::{PendingSync, PersistenceCoordinator};

use crate::api::HttpSelectionRemote;
use crate::browser::BrowserStorage;
use crate::models::Screenshot;

pub type Coordinator = PersistenceCoordinator<HttpSelectionRemote, BrowserStorage>;

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Trigger to reload screenshots and categories - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to reload screenshots and categories - write
    set_reload_trigger: WriteSignal<u32>,
    /// Bumped by the save shortcut; the open editor listens to it
    pub save_trigger: ReadSignal<u32>,
    set_save_trigger: WriteSignal<u32>,
    /// Screenshot open in the detail modal
    pub active_screenshot: RwSignal<Option<Screenshot>>,
    pub show_settings: RwSignal<bool>,
    /// Selection persistence (not Send, so kept in local storage)
    coordinator: StoredValue<Coordinator, LocalStorage>,
}

impl AppContext {
    pub fn new(coordinator: Coordinator) -> Self {
        let (reload_trigger, set_reload_trigger) = signal(0u32);
        let (save_trigger, set_save_trigger) = signal(0u32);
        Self {
            reload_trigger,
            set_reload_trigger,
            save_trigger,
            set_save_trigger,
            active_screenshot: RwSignal::new(None),
            show_settings: RwSignal::new(false),
            coordinator: StoredValue::new_local(coordinator),
        }
    }

    /// Trigger a reload of screenshots and categories
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    /// Ask the open editor to save
    pub fn request_save(&self) {
        self.set_save_trigger.update(|v| *v += 1);
    }

    /// A handle sharing state with the app's coordinator
    pub fn coordinator(&self) -> Option<Coordinator> {
        self.coordinator.try_with_value(Clone::clone)
    }

    /// Queue the remote write for `ids` if they differ from the last sync
    pub fn persist(&self, ids: &[String]) -> Option<PendingSync<HttpSelectionRemote>> {
        self.coordinator.try_with_value(|c| c.persist(ids)).flatten()
    }

    pub fn cancel_persistence(&self) {
        let _ = self.coordinator.try_with_value(|c| c.cancel());
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
