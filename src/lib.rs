//! Submit-time guard for country picker autocompletes.
//!
//! Each picker is a free-text input standing in for a native `<select>`. When a
//! user clears the input the select keeps its last choice, so on submit the
//! guard resets the select of every empty input to its first (placeholder)
//! option.
//!
//! Loading the wasm module installs the guard on the page's first form. The
//! crate also ships the [`CountryPicker`](components::CountryPicker) Leptos
//! component that renders guard-compatible markup, and a demo page.

mod app;
pub mod components;
pub mod config;
pub mod guard;
pub mod models;

pub use app::App;
pub use config::{GuardConfig, MissingSelectPolicy, ResolveMode};
pub use guard::{install_on_page, AutocompleteWidget, FormSubmitGuard, GuardError, GuardErrorKind};

use leptos::prelude::*;
use wasm_bindgen::prelude::wasm_bindgen;

/// Mount the demo page into `<body>` and guard its form.
///
/// If the start function already guarded a form on the host page, that guard
/// stays and no second one is installed.
#[wasm_bindgen]
pub fn mount_demo() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
    install_on_page();
}

// Only register the WASM start function for normal builds (not for tests),
// otherwise wasm-bindgen-test will end up with multiple entry symbols.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();
    install_on_page();
}
