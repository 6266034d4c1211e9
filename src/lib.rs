mod api;
mod app;
mod components;
mod debounce;
mod filters;
mod loader;
mod scroll;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    web_sys::console::log_1(
        &format!(
            "gameshelf {} (build {} {})",
            env!("CARGO_PKG_VERSION"),
            env!("BUILD_HASH"),
            env!("BUILD_TIMESTAMP")
        )
        .into(),
    );
    leptos::mount::mount_to_body(app::App);
}
