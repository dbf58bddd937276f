//! # portal
//!
//! Leptos + WASM frontend for the sports-competition registration portal.
//!
//! This crate contains pages, components, the reactive stores (session,
//! notices, team applications, competitions), the HTTP transport seam, and
//! the route table with its authentication guard. The session/auth core
//! (`state::session`, `net::auth`, `routes`) has no browser dependency so
//! the `cli` crate can drive it natively.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod routes;
pub mod state;
pub mod util;

/// Browser entry point: installs the panic hook and console logger, then
/// mounts the application.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
