//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;
use review_state::{
    click, select_all, AppSettings, CategoryColors, ClickModifier, SelectionHost, SelectionState,
    ViewController,
};

use crate::models::{Category, GroupMeta, Progress, Screenshot, ScreenshotPage};

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Selected ids, anchor, page and totals
    pub selection: SelectionState,
    /// Filter, search, category, group and grid parameters
    pub view: ViewController,
    pub colors: CategoryColors,
    pub settings: AppSettings,
    /// Screenshots of the current page, in display order
    pub screenshots: Vec<Screenshot>,
    pub categories: Vec<Category>,
    pub progress: Progress,
    pub groups: GroupMeta,
}

impl AppState {
    pub fn new(settings: AppSettings, colors: CategoryColors) -> Self {
        let grid = settings.grid();
        Self {
            selection: SelectionState::new(grid.page_size()),
            view: ViewController::new(grid),
            colors,
            settings,
            ..Default::default()
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Ids of the visible screenshots, in display order
pub fn visible_ids(store: &AppStore) -> Vec<String> {
    store
        .screenshots()
        .with_untracked(|items| items.iter().map(|item| item.id.clone()).collect())
}

/// Apply a grid click through the selection algebra
pub fn store_click(store: &AppStore, id: &str, modifier: ClickModifier) {
    let visible = visible_ids(store);
    let change = store
        .selection()
        .with_untracked(|selection| click(&visible, selection.selected(), selection.anchor(), id, modifier));
    if let Some(change) = change {
        store.selection().write().apply(change);
    }
}

pub fn store_select_page(store: &AppStore) {
    let change = select_all(&visible_ids(store));
    store.selection().write().apply(change);
}

pub fn store_clear_selection(store: &AppStore) {
    if store.selection().with_untracked(|selection| selection.selected().is_empty()) {
        return;
    }
    store.selection().write().clear();
}

/// Run a view change that may reset the page and selection.
///
/// The selection is only written back when the view reports a change.
pub fn store_update_view(
    store: &AppStore,
    f: impl FnOnce(&mut ViewController, &mut SelectionState) -> bool,
) -> bool {
    let mut selection = store.selection().get_untracked();
    let mut changed = false;
    store.view().maybe_update(|view| {
        changed = f(view, &mut selection);
        changed
    });
    if changed {
        store.selection().set(selection);
    }
    changed
}

/// Page navigation; clears the selection when the page moved
pub fn store_go_to_page(store: &AppStore, page: u32) -> bool {
    let mut selection = store.selection().get_untracked();
    let moved = store
        .view()
        .with_untracked(|view| view.go_to_page(page, &mut selection));
    if moved {
        store.selection().set(selection);
    }
    moved
}

pub fn store_next_page(store: &AppStore) -> bool {
    let page = store.selection().with_untracked(|selection| selection.page());
    store_go_to_page(store, page.saturating_add(1))
}

pub fn store_prev_page(store: &AppStore) -> bool {
    let page = store.selection().with_untracked(|selection| selection.page());
    store_go_to_page(store, page.saturating_sub(1))
}

/// Write a loaded page into the store
pub fn store_apply_page(store: &AppStore, page: ScreenshotPage) {
    store.selection().maybe_update(|selection| {
        let unchanged = selection.total() == page.total && selection.total_pages() == page.total_pages;
        selection.set_totals(page.total, page.total_pages);
        !unchanged
    });
    store.screenshots().set(page.items);
    store.progress().set(page.progress);
    store.groups().set(page.groups);

    // the current page vanished (e.g. after a batch delete)
    if page.total_pages > 0 && page.page > page.total_pages {
        store_go_to_page(store, page.total_pages);
    }
}

/// Replace the category list and give every category a color
pub fn store_set_categories(store: &AppStore, categories: Vec<Category>) {
    store
        .colors()
        .update(|colors| colors.ensure_all(categories.iter().map(|category| category.name.as_str())));
    store.categories().set(categories);
}

/// Replace one screenshot after an edit
pub fn store_update_screenshot(store: &AppStore, updated: Screenshot) {
    store
        .screenshots()
        .write()
        .iter_mut()
        .find(|item| item.id == updated.id)
        .map(|item| *item = updated);
}

// ========================
// Persistence Host
// ========================

/// The store as seen by the persistence coordinator
#[derive(Clone, Copy)]
pub struct StoreHost(pub AppStore);

impl SelectionHost for StoreHost {
    fn revision(&self) -> u64 {
        self.0.selection().with_untracked(|selection| selection.revision())
    }

    fn selected_ids(&self) -> Vec<String> {
        self.0.selection().with_untracked(|selection| selection.selected_ids())
    }

    fn adopt_hydrated(&self, ids: Vec<String>) {
        self.0.selection().write().adopt_hydrated(ids);
    }

    fn clear_selection(&self) {
        self.0.selection().write().clear();
    }
}
