//! Screenshot Reviewer App
//!
//! Main application component: sidebar, toolbar, batch bar and grid.

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{info, warn};
use reactive_stores::Store;
use review_state::{AppSettings, CategoryColors, PersistenceCoordinator, StatusFilter};

use crate::api::{self, HttpSelectionRemote};
use crate::browser::{apply_highlight, BrowserStorage};
use crate::components::{BatchBar, ScreenshotGrid, ScreenshotModal, SettingsModal, Sidebar, Toolbar};
use crate::context::AppContext;
use crate::keyboard::use_keyboard_shortcuts;
use crate::store::{
    store_apply_page, store_set_categories, AppState, AppStateStoreFields, AppStore, StoreHost,
};

#[component]
pub fn App() -> impl IntoView {
    let storage = BrowserStorage;
    let store: AppStore = Store::new(AppState::new(
        AppSettings::load(&storage),
        CategoryColors::load(&storage),
    ));
    let ctx = AppContext::new(PersistenceCoordinator::new(HttpSelectionRemote::new(), storage));

    // Provide context to all children
    provide_context(store);
    provide_context(ctx);

    // Restore the previous selection once, remote first
    if let Some(coordinator) = ctx.coordinator() {
        spawn_local(async move {
            let outcome = coordinator.hydrate(&StoreHost(store)).await;
            info!("[APP] Selection hydration finished: {:?}", outcome);
        });
    }
    on_cleanup(move || ctx.cancel_persistence());

    // Persist every selection change once hydration has armed the coordinator
    Effect::new(move |_| {
        let ids = store.selection().with(|selection| selection.selected_ids());
        if let Some(task) = ctx.persist(&ids) {
            spawn_local(task.run());
        }
    });

    // Only re-query when the parameters change, not on every selection click
    let query = Memo::new(move |_| {
        store
            .view()
            .with(|view| store.selection().with(|selection| view.query(selection)))
    });

    // Load screenshots when the query or trigger changes
    Effect::new(move |_| {
        let trigger = ctx.reload_trigger.get();
        let requested = query.get();
        info!("[APP] Loading page {} (trigger={})", requested.page, trigger);
        spawn_local(async move {
            match api::fetch_screenshots(&requested).await {
                // a newer query superseded this one
                Ok(_) if query.get_untracked() != requested => {}
                Ok(page) => {
                    info!("[APP] Loaded {} screenshots of {}", page.items.len(), page.total);
                    store_apply_page(&store, page);
                }
                Err(e) => warn!("[APP] Failed to load screenshots: {}", e),
            }
        });
    });

    // Load categories
    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        spawn_local(async move {
            match api::fetch_categories().await {
                Ok(categories) => store_set_categories(&store, categories),
                Err(e) => warn!("[APP] Failed to load categories: {}", e),
            }
        });
    });

    // Keep category colors in localStorage
    Effect::new(move |_| {
        if let Err(e) = store.colors().with(|colors| colors.save(&BrowserStorage)) {
            warn!("[APP] Failed to store category colors: {}", e);
        }
    });

    // Keep settings in localStorage and apply the highlight color
    Effect::new(move |_| {
        store.settings().with(|settings| {
            apply_highlight(&settings.highlight_color);
            if let Err(e) = settings.save(&BrowserStorage) {
                warn!("[APP] Failed to store settings: {}", e);
            }
        });
    });

    use_keyboard_shortcuts(store, ctx);

    let empty_message = move || {
        if store.view().with(|view| view.effective_status() == StatusFilter::Pending) {
            "All screenshots are categorized!"
        } else {
            "No screenshots match the current filters."
        }
    };

    view! {
        <div class="app-layout">
            // Left: Category sidebar
            <Sidebar />

            // Center: Main Content
            <main class="main-content">
                <Toolbar />
                <BatchBar />
                <ScreenshotGrid />
                <Show when=move || store.screenshots().with(Vec::is_empty)>
                    <p class="empty-message">{empty_message}</p>
                </Show>
            </main>

            <ScreenshotModal />
            <SettingsModal />
        </div>
    }
}
