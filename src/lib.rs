//! # storefront-client
//!
//! Leptos + WASM frontend glue for the server-rendered storefront: the live
//! channel socket client, a navigation progress indicator, and the hosted
//! card payment widget with its confirmation protocol.
//!
//! The widget's mount/validate/confirm state machine lives in
//! [`state::payment`] as pure, natively testable code; browser integration
//! (hosted element bindings, WebSocket, DOM reads) is gated behind the
//! `hydrate` feature.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod pay;
pub mod state;
pub mod util;

/// Browser entry point: attach to the server-rendered page.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
