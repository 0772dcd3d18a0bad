//! Keyboard Shortcuts
//!
//! Window-level key bindings for paging, selection and saving.

use leptos::ev;
use leptos::prelude::*;
use log::debug;
use review_state::{shortcut_for, KeyModifiers, Shortcut};

use crate::browser::is_form_field;
use crate::context::AppContext;
use crate::store::{store_clear_selection, store_next_page, store_prev_page, store_select_page, AppStore};

/// Bind the grid shortcuts on `window` for the lifetime of the caller
pub fn use_keyboard_shortcuts(store: AppStore, ctx: AppContext) {
    let handle = window_event_listener(ev::keydown, move |ev: web_sys::KeyboardEvent| {
        let modifiers = KeyModifiers {
            ctrl: ev.ctrl_key(),
            meta: ev.meta_key(),
            shift: ev.shift_key(),
        };
        let Some(shortcut) = shortcut_for(&ev.key(), modifiers, is_form_field(ev.target())) else {
            return;
        };

        // paging and selection stay put while an editor is open
        let modal_open = ctx.active_screenshot.with_untracked(Option::is_some)
            || ctx.show_settings.get_untracked();
        if modal_open && shortcut != Shortcut::Save {
            return;
        }

        debug!("[APP] Shortcut {:?}", shortcut);
        match shortcut {
            Shortcut::PrevPage => {
                store_prev_page(&store);
            }
            Shortcut::NextPage => {
                store_next_page(&store);
            }
            Shortcut::SelectAll => {
                ev.prevent_default();
                store_select_page(&store);
            }
            Shortcut::ClearSelection => store_clear_selection(&store),
            Shortcut::Save => {
                ev.prevent_default();
                ctx.request_save();
            }
        }
    });
    on_cleanup(move || handle.remove());
}
