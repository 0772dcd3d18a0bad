//! Toolbar Component
//!
//! Status filter, search, group navigation and review progress.

use leptos::prelude::*;
use review_state::StatusFilter;

use crate::context::use_app_context;
use crate::store::{store_update_view, use_app_store, AppStateStoreFields};

#[component]
pub fn Toolbar() -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();

    let on_status = move |ev: leptos::ev::Event| {
        let Some(status) = StatusFilter::parse(&event_target_value(&ev)) else {
            return;
        };
        store_update_view(&store, |view, selection| view.set_status(status, selection));
    };

    let on_search = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        store_update_view(&store, |view, selection| view.set_search(&value, selection));
    };

    let navigate_group = move |offset: i32| {
        let (group_ids, current_index) = store
            .groups()
            .with_untracked(|groups| (groups.group_ids(), groups.current_index));
        store_update_view(&store, |view, selection| {
            view.navigate_group(offset, &group_ids, current_index, selection)
        });
    };

    let group_label = move || {
        store.groups().with(|groups| {
            let total = groups.items.len().max(1);
            let current = if groups.items.is_empty() { 1 } else { groups.current_index + 1 };
            format!("Group {} / {}", current, total)
        })
    };

    view! {
        <div class="toolbar">
            <div class="toolbar-left">
                <select
                    class="status-filter"
                    prop:value=move || store.view().with(|view| view.status().as_str())
                    on:change=on_status
                >
                    {StatusFilter::ALL
                        .into_iter()
                        .map(|filter| view! { <option value=filter.as_str()>{filter.label()}</option> })
                        .collect_view()}
                </select>
                <div class="group-nav">
                    <button class="group-btn" on:click=move |_| navigate_group(-1)>"Group ◀"</button>
                    <span class="group-label">{group_label}</span>
                    <button class="group-btn" on:click=move |_| navigate_group(1)>"▶"</button>
                </div>
            </div>

            <input
                class="search-input"
                type="search"
                placeholder="Search by tag, summary, or OCR text"
                prop:value=move || store.view().with(|view| view.search().to_string())
                on:input=on_search
            />

            <div class="toolbar-right">
                <span class="progress-item">
                    "Reviewed " <strong class="reviewed">{move || store.progress().with(|p| p.reviewed)}</strong>
                </span>
                <span class="progress-item">
                    "Deferred " <strong class="deferred">{move || store.progress().with(|p| p.deferred)}</strong>
                </span>
                <span class="progress-item">
                    "Remaining " <strong>{move || store.progress().with(|p| p.remaining)}</strong>
                </span>
                <button class="settings-btn" on:click=move |_| ctx.show_settings.set(true)>
                    "⚙ Settings"
                </button>
            </div>
        </div>
    }
}
