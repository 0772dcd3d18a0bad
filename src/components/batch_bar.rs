//! Batch Bar Component
//!
//! Bulk actions on the current selection.

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::warn;

use crate::api::{self, PENDING_CATEGORY};
use crate::browser::confirm;
use crate::context::use_app_context;
use crate::models::BatchPayload;
use crate::store::{store_clear_selection, use_app_store, AppStateStoreFields};

const NO_CATEGORY: &str = "none";

#[component]
pub fn BatchBar() -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();
    let (batch_category, set_batch_category) = signal(NO_CATEGORY.to_string());
    let (busy, set_busy) = signal(false);

    let selected_count = move || store.selection().with(|selection| selection.selected().len());
    let nothing_selected = move || selected_count() == 0;

    // Run one bulk request; the selection is cleared only on success
    let run_batch = move |label: &'static str, request: BatchRequest| {
        let ids = store.selection().with_untracked(|selection| selection.selected_ids());
        if ids.is_empty() || busy.get_untracked() {
            return;
        }
        set_busy.set(true);
        spawn_local(async move {
            let result = match &request {
                BatchRequest::Update(payload) => api::batch_update(&ids, payload).await,
                BatchRequest::MarkPending => api::reclassify(&ids, PENDING_CATEGORY).await,
            };
            set_busy.set(false);
            match result {
                Ok(()) => {
                    store_clear_selection(&store);
                    ctx.reload();
                }
                Err(e) => warn!("[APP] {} failed for {} screenshots: {}", label, ids.len(), e),
            }
        });
    };

    let on_assign = move |_| {
        let category = batch_category.get_untracked();
        if category == NO_CATEGORY {
            return;
        }
        run_batch("Assign category", BatchRequest::Update(BatchPayload::assign(&category)));
    };

    let on_delete = move |_| run_batch("Mark for deletion", BatchRequest::Update(BatchPayload::delete()));

    let on_mark_pending = move |_| {
        if nothing_selected() || !confirm("Move selected screenshots back to Pending?") {
            return;
        }
        run_batch("Mark as pending", BatchRequest::MarkPending);
    };

    view! {
        <div class="batch-bar">
            <div class="batch-actions">
                <select
                    prop:value=move || batch_category.get()
                    on:change=move |ev| set_batch_category.set(event_target_value(&ev))
                >
                    <option value=NO_CATEGORY>"Assign to…"</option>
                    <For
                        each=move || store.categories().get()
                        key=|category| category.id.clone()
                        children=move |category| {
                            view! { <option value=category.id.clone()>{category.name.clone()}</option> }
                        }
                    />
                </select>
                <button
                    class="primary-btn"
                    disabled=move || nothing_selected() || busy.get() || batch_category.get() == NO_CATEGORY
                    on:click=on_assign
                >
                    "Apply category"
                </button>
                <button
                    class="danger-btn"
                    disabled=move || nothing_selected() || busy.get()
                    on:click=on_delete
                >
                    "Mark for deletion"
                </button>
                <button
                    class="warning-btn"
                    disabled=move || nothing_selected() || busy.get()
                    on:click=on_mark_pending
                >
                    "Mark as Pending"
                </button>
            </div>
            <span class="selected-count">{move || format!("{} selected", selected_count())}</span>
        </div>
    }
}

enum BatchRequest {
    Update(BatchPayload),
    MarkPending,
}
