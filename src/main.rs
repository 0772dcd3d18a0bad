#![allow(warnings)]
//! Screenshot Reviewer Frontend Entry Point

mod models;
mod api;
mod browser;
mod context;
mod store;
mod keyboard;
mod components;
mod app;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) { log::Level::Debug } else { log::Level::Info };
    if console_log::init_with_level(level).is_err() {
        web_sys::console::warn_1(&"[APP] Logger already initialized".into());
    }
    mount_to_body(App);
}
