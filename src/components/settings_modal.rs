//! Settings Modal Component
//!
//! Highlight color, grid size, category colors and saved-selection reset.

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::info;
use review_state::{fallback_color, MAX_GRID_DIMENSION, MIN_GRID_DIMENSION};

use crate::context::use_app_context;
use crate::store::{store_update_view, use_app_store, AppStateStoreFields, StoreHost};

/// Grid dimension input value, clamped; `None` when not a number
fn parse_dimension(value: &str) -> Option<u32> {
    value
        .trim()
        .parse::<u32>()
        .ok()
        .map(|n| n.clamp(MIN_GRID_DIMENSION, MAX_GRID_DIMENSION))
}

#[component]
pub fn SettingsModal() -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();

    let close = move || ctx.show_settings.set(false);

    let set_grid = move |columns: Option<u32>, rows: Option<u32>| {
        let (columns, rows) = store.settings().with_untracked(|settings| {
            (columns.unwrap_or(settings.grid_columns), rows.unwrap_or(settings.grid_rows))
        });
        store.settings().update(|settings| {
            settings.grid_columns = columns;
            settings.grid_rows = rows;
        });
        store_update_view(&store, |view, selection| view.set_grid(columns, rows, selection));
    };

    let clear_saved_selection = move |_| {
        let Some(coordinator) = ctx.coordinator() else {
            return;
        };
        info!("[APP] Clearing saved selection");
        let task = coordinator.clear_persistence(&StoreHost(store));
        spawn_local(task.run());
    };

    let category_color = move |name: &str| {
        store
            .colors()
            .with(|colors| colors.color_for(name).map(String::from))
            .unwrap_or_else(|| fallback_color(name).to_string())
    };

    view! {
        <Show when=move || ctx.show_settings.get()>
            <div class="modal-backdrop">
                <div class="modal settings-modal">
                    <h2>"Settings"</h2>

                    <div class="settings-section">
                        <label for="highlight">"Selection highlight"</label>
                        <input
                            id="highlight"
                            type="color"
                            prop:value=move || store.settings().with(|s| s.highlight_color.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                store.settings().update(|s| s.highlight_color = value);
                            }
                        />
                    </div>

                    <div class="settings-section grid-size">
                        <label>
                            "Columns"
                            <input
                                type="number"
                                min=MIN_GRID_DIMENSION.to_string()
                                max=MAX_GRID_DIMENSION.to_string()
                                prop:value=move || store.settings().with(|s| s.grid_columns.to_string())
                                on:change=move |ev| set_grid(parse_dimension(&event_target_value(&ev)), None)
                            />
                        </label>
                        <label>
                            "Rows"
                            <input
                                type="number"
                                min=MIN_GRID_DIMENSION.to_string()
                                max=MAX_GRID_DIMENSION.to_string()
                                prop:value=move || store.settings().with(|s| s.grid_rows.to_string())
                                on:change=move |ev| set_grid(None, parse_dimension(&event_target_value(&ev)))
                            />
                        </label>
                    </div>

                    <Show when=move || store.categories().with(|cats| !cats.is_empty())>
                        <div class="settings-section">
                            <div class="settings-section-header">
                                <h3>"Category colors"</h3>
                                <button class="link-btn" on:click=move |_| store.colors().update(|c| c.reset())>
                                    "Reset colors"
                                </button>
                            </div>
                            <div class="category-color-list">
                                <For
                                    each=move || store.categories().get()
                                    key=|category| category.id.clone()
                                    children=move |category| {
                                        let name = category.name.clone();
                                        let value_name = name.clone();
                                        view! {
                                            <label class="category-color-row">
                                                <span>{name.clone()}</span>
                                                <input
                                                    type="color"
                                                    prop:value=move || category_color(&value_name)
                                                    on:input=move |ev| {
                                                        let color = event_target_value(&ev);
                                                        store.colors().update(|c| c.set_color(&name, &color));
                                                    }
                                                />
                                            </label>
                                        }
                                    }
                                />
                            </div>
                        </div>
                    </Show>

                    <div class="settings-actions">
                        <button class="danger-btn" on:click=clear_saved_selection>
                            "Clear saved selection"
                        </button>
                        <button on:click=move |_| close()>"Close"</button>
                        <p class="version">"Version: " {env!("CARGO_PKG_VERSION")}</p>
                    </div>
                </div>
            </div>
        </Show>
    }
}
