//! Screenshot Modal Component
//!
//! Detail editor for one screenshot: summary, tags, category and status.

use chrono::{DateTime, Local, NaiveDateTime};
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{info, warn};

use crate::api;
use crate::context::use_app_context;
use crate::models::{Screenshot, ScreenshotStatus, ScreenshotUpdate};
use crate::store::{store_update_screenshot, use_app_store, AppStateStoreFields};

/// "Tag1, Tag2" -> ["Tag1", "Tag2"]
fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .collect()
}

fn format_captured(created_at: Option<&str>) -> String {
    let Some(raw) = created_at else {
        return "Unknown".to_string();
    };
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string();
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|parsed| parsed.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

#[component]
fn ModalBody(screenshot: Screenshot) -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();
    let draft = RwSignal::new(screenshot.clone());
    let (tag_input, set_tag_input) = signal(screenshot.tags.join(", "));
    let (saving, set_saving) = signal(false);

    let close = move || ctx.active_screenshot.set(None);

    let save = move || {
        if saving.get_untracked() {
            return;
        }
        // pick up tags typed but not yet blurred
        draft.update(|d| d.tags = parse_tags(&tag_input.get_untracked()));
        let current = draft.get_untracked();
        set_saving.set(true);
        spawn_local(async move {
            let update = ScreenshotUpdate::from(&current);
            match api::update_screenshot(&current.id, &update).await {
                Ok(updated) => {
                    info!("[APP] Saved screenshot {}", updated.id);
                    store_update_screenshot(&store, updated);
                    ctx.active_screenshot.set(None);
                    ctx.reload();
                }
                Err(e) => {
                    warn!("[APP] Failed to save screenshot {}: {}", current.id, e);
                    set_saving.set(false);
                }
            }
        });
    };

    // Ctrl/Cmd+S while the modal is open
    Effect::watch(move || ctx.save_trigger.get(), move |_, _, _| save(), false);

    let toggle_suggestion = move |tag: String| {
        draft.update(|d| {
            if let Some(pos) = d.tags.iter().position(|t| *t == tag) {
                d.tags.remove(pos);
            } else {
                d.tags.push(tag);
            }
        });
        set_tag_input.set(draft.with_untracked(|d| d.tags.join(", ")));
    };

    let set_status_flag = move |status: ScreenshotStatus, on: bool| {
        draft.update(|d| d.status = if on { status } else { ScreenshotStatus::Reviewed });
    };

    let suggestions = screenshot.suggestions.clone();
    let path = screenshot.path.clone();
    let captured = format_captured(screenshot.created_at.as_deref());
    let group = screenshot.group_id.clone().unwrap_or_else(|| "-".to_string());

    view! {
        <div class="modal-backdrop">
            <div class="modal screenshot-modal">
                <div class="modal-image">
                    <img src=screenshot.image_src() alt=screenshot.title().to_string() />
                </div>
                <form
                    class="modal-form"
                    on:submit=move |ev: web_sys::SubmitEvent| {
                        ev.prevent_default();
                        save();
                    }
                >
                    <header class="modal-header">
                        <h2>"Screenshot details"</h2>
                        <button type="button" class="link-btn" on:click=move |_| close()>"Close"</button>
                    </header>
                    <div class="modal-meta">
                        <p class="modal-path">{path}</p>
                        <p>"Captured: " {captured}</p>
                        <p>"Group: " {group}</p>
                    </div>

                    <label>
                        "Summary"
                        <textarea
                            rows="3"
                            prop:value=move || draft.with(|d| d.summary.clone().unwrap_or_default())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                draft.update(|d| d.summary = Some(value).filter(|s| !s.is_empty()));
                            }
                        ></textarea>
                    </label>

                    <label>
                        "Tags"
                        <input
                            type="text"
                            placeholder="Tag1, Tag2, ..."
                            prop:value=move || tag_input.get()
                            on:input=move |ev| set_tag_input.set(event_target_value(&ev))
                            on:blur=move |_| draft.update(|d| d.tags = parse_tags(&tag_input.get_untracked()))
                        />
                    </label>

                    <Show when={
                        let empty = suggestions.is_empty();
                        move || !empty
                    }>
                        <div class="suggestions">
                            <p>"Suggested tags"</p>
                            {suggestions
                                .iter()
                                .cloned()
                                .map(|tag| {
                                    let is_on = {
                                        let tag = tag.clone();
                                        move || draft.with(|d| d.tags.contains(&tag))
                                    };
                                    let label = tag.clone();
                                    view! {
                                        <button
                                            type="button"
                                            class=move || if is_on() { "suggestion active" } else { "suggestion" }
                                            on:click=move |_| toggle_suggestion(tag.clone())
                                        >
                                            {label}
                                        </button>
                                    }
                                })
                                .collect_view()}
                        </div>
                    </Show>

                    <label>
                        "Category"
                        <select
                            prop:value=move || draft.with(|d| d.primary_category.clone().unwrap_or_default())
                            on:change=move |ev| {
                                let value = event_target_value(&ev);
                                draft.update(|d| d.primary_category = Some(value).filter(|v| !v.is_empty()));
                            }
                        >
                            <option value="">"Uncategorized"</option>
                            <For
                                each=move || store.categories().get()
                                key=|category| category.id.clone()
                                children=move |category| {
                                    view! { <option value=category.id.clone()>{category.name.clone()}</option> }
                                }
                            />
                        </select>
                    </label>

                    <div class="status-flags">
                        <label>
                            <input
                                type="checkbox"
                                prop:checked=move || draft.with(|d| d.status == ScreenshotStatus::ReReview)
                                on:change=move |ev| set_status_flag(ScreenshotStatus::ReReview, event_target_checked(&ev))
                            />
                            "Mark for re-review"
                        </label>
                        <label class="danger">
                            <input
                                type="checkbox"
                                prop:checked=move || draft.with(|d| d.status == ScreenshotStatus::Deleted)
                                on:change=move |ev| set_status_flag(ScreenshotStatus::Deleted, event_target_checked(&ev))
                            />
                            "Mark for deletion"
                        </label>
                    </div>

                    <div class="modal-actions">
                        <button type="button" on:click=move |_| close()>"Cancel"</button>
                        <button type="submit" class="primary-btn" disabled=move || saving.get()>
                            "Save changes (Ctrl+S)"
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}

/// Detail modal, shown while a screenshot is active
#[component]
pub fn ScreenshotModal() -> impl IntoView {
    let ctx = use_app_context();

    move || {
        ctx.active_screenshot
            .get()
            .map(|screenshot| view! { <ModalBody screenshot=screenshot /> })
    }
}
