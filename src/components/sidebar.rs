//! Sidebar Component
//!
//! Category filter list with color dots, counts and category management.

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::warn;
use review_state::{fallback_color, CategoryFilter};

use crate::api;
use crate::components::DeleteConfirmButton;
use crate::context::use_app_context;
use crate::models::Category;
use crate::store::{store_update_view, use_app_store, AppStateStoreFields};

/// One clickable filter row
#[component]
fn CategoryRow(
    #[prop(into)] name: Signal<String>,
    #[prop(into)] count: Signal<u64>,
    #[prop(into)] color: Signal<String>,
    #[prop(into)] active: Signal<bool>,
    #[prop(into)] on_select: Callback<()>,
) -> impl IntoView {
    view! {
        <button
            class=move || if active.get() { "category-row active" } else { "category-row" }
            on:click=move |_| on_select.run(())
        >
            <span class="category-label">
                <span class="category-color-dot" style=move || format!("background-color: {};", color.get())></span>
                {move || name.get()}
            </span>
            <span class="category-count">{move || count.get()}</span>
        </button>
    }
}

/// Add-category form
#[component]
fn CategoryAddForm(set_open: WriteSignal<bool>) -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();
    let (name, set_name) = signal(String::new());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let value = name.get().trim().to_string();
        if value.is_empty() {
            return;
        }
        spawn_local(async move {
            match api::create_category(&value).await {
                Ok(created) => {
                    store.colors().update(|colors| {
                        colors.ensure_color(&created.name);
                    });
                    set_name.set(String::new());
                    set_open.set(false);
                    ctx.reload();
                }
                Err(e) => warn!("[APP] Failed to create category {}: {}", value, e),
            }
        });
    };

    view! {
        <form class="category-form" on:submit=on_submit>
            <label>
                "New category"
                <input
                    type="text"
                    placeholder="e.g. Research"
                    prop:value=move || name.get()
                    on:input=move |ev| set_name.set(event_target_value(&ev))
                />
            </label>
            <button type="submit">"Save"</button>
        </form>
    }
}

/// Rename form for one category
#[component]
fn CategoryRenameForm(category: Category, set_renaming: WriteSignal<Option<String>>) -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();
    let (name, set_name) = signal(category.name.clone());
    let id = category.id.clone();
    let previous = category.name.clone();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let value = name.get().trim().to_string();
        if value.is_empty() {
            return;
        }
        let id = id.clone();
        let previous = previous.clone();
        spawn_local(async move {
            match api::rename_category(&id, &value).await {
                Ok(renamed) => {
                    store.colors().update(|colors| colors.rename(&previous, &renamed.name));
                    set_renaming.set(None);
                    ctx.reload();
                }
                Err(e) => warn!("[APP] Failed to rename category {}: {}", previous, e),
            }
        });
    };

    view! {
        <form class="category-form" on:submit=on_submit>
            <label>
                "Rename category"
                <input
                    type="text"
                    prop:value=move || name.get()
                    on:input=move |ev| set_name.set(event_target_value(&ev))
                />
            </label>
            <div class="form-actions">
                <button type="button" on:click=move |_| set_renaming.set(None)>"Cancel"</button>
                <button type="submit">"Update"</button>
            </div>
        </form>
    }
}

/// Category sidebar
#[component]
pub fn Sidebar() -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();
    let (adding, set_adding) = signal(false);
    let (renaming, set_renaming) = signal::<Option<String>>(None);

    let active = move |filter: &CategoryFilter| store.view().with(|view| view.category() == filter);
    let select = move |filter: CategoryFilter| {
        store_update_view(&store, |view, selection| view.set_category(filter, selection));
    };
    let color_of = move |name: &str| {
        store
            .colors()
            .with(|colors| colors.color_for(name).map(String::from))
            .unwrap_or_else(|| fallback_color(name).to_string())
    };

    let delete = move |category: Category| {
        spawn_local(async move {
            match api::delete_category(&category.id).await {
                Ok(()) => {
                    store.colors().update(|colors| colors.remove(&category.name));
                    if store.view().with_untracked(|view| view.category_param() == Some(category.id.as_str())) {
                        store_update_view(&store, |view, selection| {
                            view.set_category(CategoryFilter::All, selection)
                        });
                    }
                    ctx.reload();
                }
                Err(e) => warn!("[APP] Failed to delete category {}: {}", category.name, e),
            }
        });
    };

    view! {
        <aside class="sidebar">
            <div class="sidebar-header">
                <h2>"Categories"</h2>
                <button class="add-btn" on:click=move |_| set_adding.update(|v| *v = !*v)>
                    {move || if adding.get() { "Cancel" } else { "Add" }}
                </button>
            </div>

            <div class="category-list">
                <CategoryRow
                    name="All".to_string()
                    count=Signal::derive(move || store.categories().with(|cats| cats.iter().map(|c| c.count).sum::<u64>()))
                    color=Signal::derive(move || color_of("All"))
                    active=Signal::derive(move || active(&CategoryFilter::All))
                    on_select=move |_: ()| select(CategoryFilter::All)
                />
                <CategoryRow
                    name="Pending".to_string()
                    count=Signal::derive(move || store.categories().with(|cats| cats.iter().map(|c| c.pending).sum::<u64>()))
                    color=Signal::derive(move || color_of("Pending"))
                    active=Signal::derive(move || active(&CategoryFilter::Pending))
                    on_select=move |_: ()| select(CategoryFilter::Pending)
                />
                <For
                    each=move || store.categories().get()
                    key=|category| (category.id.clone(), category.name.clone(), category.count)
                    children=move |category| {
                        let id = category.id.clone();
                        let name = category.name.clone();
                        let is_renaming = {
                            let id = id.clone();
                            move || renaming.get().as_deref() == Some(id.as_str())
                        };
                        let rename_target = category.clone();
                        let delete_target = category.clone();
                        view! {
                            <div class="category-item">
                                <CategoryRow
                                    name=name.clone()
                                    count=category.count
                                    color=Signal::derive({
                                        let name = name.clone();
                                        move || color_of(&name)
                                    })
                                    active=Signal::derive({
                                        let filter = CategoryFilter::Category(id.clone());
                                        move || active(&filter)
                                    })
                                    on_select={
                                        let filter = CategoryFilter::Category(id.clone());
                                        move |_: ()| select(filter.clone())
                                    }
                                />
                                <div class="category-actions">
                                    <button
                                        class="link-btn"
                                        on:click={
                                            let id = id.clone();
                                            move |_| set_renaming.set(Some(id.clone()))
                                        }
                                    >
                                        "Rename"
                                    </button>
                                    <DeleteConfirmButton
                                        label="Delete"
                                        on_confirm=move |_: ()| delete(delete_target.clone())
                                    />
                                </div>
                                <Show when=is_renaming.clone()>
                                    <CategoryRenameForm category=rename_target.clone() set_renaming=set_renaming />
                                </Show>
                            </div>
                        }
                    }
                />
            </div>

            <Show when=move || adding.get()>
                <CategoryAddForm set_open=set_adding />
            </Show>
        </aside>
    }
}
