//! Screenshot Grid Component
//!
//! Paged card grid with click / toggle / range selection.

use leptos::prelude::*;
use review_state::ClickModifier;

use crate::context::use_app_context;
use crate::models::{Screenshot, ScreenshotStatus};
use crate::store::{
    store_click, store_go_to_page, store_select_page, use_app_store, AppStateStoreFields,
};

/// One screenshot card
#[component]
fn ScreenshotCard(screenshot: Screenshot) -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();
    let id = screenshot.id.clone();

    let is_selected = {
        let id = id.clone();
        move || store.selection().with(|selection| selection.selected().contains(&id))
    };

    let on_click = {
        let id = id.clone();
        move |ev: web_sys::MouseEvent| {
            let modifier = ClickModifier::from_keys(ev.ctrl_key(), ev.meta_key(), ev.shift_key());
            if modifier == ClickModifier::Range {
                // keep the browser from extending a text selection
                ev.prevent_default();
            }
            store_click(&store, &id, modifier);
        }
    };

    // Category badge: name and color of the assigned category
    let badge = screenshot.primary_category.clone().map(|category| {
        let label = {
            let category = category.clone();
            move || {
                store.categories().with(|categories| {
                    categories
                        .iter()
                        .find(|c| c.id == category || c.name == category)
                        .map(|c| c.name.clone())
                        .unwrap_or_else(|| category.clone())
                })
            }
        };
        let style = {
            let label = label.clone();
            move || {
                let name = label();
                let color = store
                    .colors()
                    .with(|colors| colors.color_for(&name).map(String::from))
                    .unwrap_or_else(|| "rgba(0, 0, 0, 0.4)".to_string());
                format!("background-color: {};", color)
            }
        };
        view! { <span class="card-badge" style=style>{label}</span> }
    });

    let status_badge = match screenshot.status {
        ScreenshotStatus::ReReview => Some(view! { <span class="card-badge re-review">"Re-review"</span> }),
        ScreenshotStatus::Deleted => Some(view! { <span class="card-badge deleted">"Deleted"</span> }),
        _ => None,
    };

    let missing = screenshot.url.is_none();
    let confidence = screenshot
        .confidence
        .map(|c| format!("Confidence {:.2}", c))
        .unwrap_or_default();
    let title = screenshot.title().to_string();
    let src = screenshot.image_src();
    let details_target = screenshot.clone();

    view! {
        <div
            class=move || if is_selected() { "screenshot-card selected" } else { "screenshot-card" }
            role="button"
            tabindex="0"
            on:click=on_click
        >
            <img src=src alt=title.clone() />
            <Show when=move || missing>
                <div class="card-missing">"Missing file"</div>
            </Show>
            <div class="card-badges">
                {badge}
                {status_badge}
            </div>
            <div class="card-footer">
                <p class="card-title">{title}</p>
                <p class="card-confidence">{confidence}</p>
            </div>
            <button
                class="card-details-btn"
                on:click=move |ev| {
                    ev.stop_propagation();
                    ctx.active_screenshot.set(Some(details_target.clone()));
                }
            >
                "Details"
            </button>
        </div>
    }
}

/// Screenshot grid with paging controls
#[component]
pub fn ScreenshotGrid() -> impl IntoView {
    let store = use_app_store();

    let page = move || store.selection().with(|selection| selection.page());
    let total_pages = move || store.selection().with(|selection| selection.total_pages().max(1));
    let selected_count = move || store.selection().with(|selection| selection.selected().len());
    let grid_style = move || {
        store
            .view()
            .with(|view| format!("grid-template-columns: repeat({}, minmax(0, 1fr));", view.grid().columns()))
    };

    view! {
        <section class="screenshot-section">
            <div class="grid-header">
                <div class="grid-header-left">
                    <button class="select-page-btn" on:click=move |_| store_select_page(&store)>
                        "Select page"
                    </button>
                    <span class="selected-count">{move || format!("{} selected", selected_count())}</span>
                </div>
                <div class="pager">
                    <button
                        class="pager-btn"
                        disabled=move || page() <= 1
                        on:click=move |_| {
                            store_go_to_page(&store, page().saturating_sub(1));
                        }
                    >
                        "Prev"
                    </button>
                    <span class="pager-label">{move || format!("Page {} / {}", page(), total_pages())}</span>
                    <button
                        class="pager-btn"
                        disabled=move || page() >= total_pages()
                        on:click=move |_| {
                            store_go_to_page(&store, page() + 1);
                        }
                    >
                        "Next"
                    </button>
                </div>
            </div>

            <div class="screenshot-grid" style=grid_style>
                <For
                    each=move || store.screenshots().get()
                    key=|screenshot| {
                        (
                            screenshot.id.clone(),
                            screenshot.updated_at.clone(),
                            screenshot.primary_category.clone(),
                            screenshot.status,
                        )
                    }
                    children=move |screenshot| view! { <ScreenshotCard screenshot=screenshot /> }
                />
            </div>
        </section>
    }
}
