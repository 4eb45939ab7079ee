//! PatentVault Frontend Entry Point

mod ai;
mod alerts;
mod app;
mod components;
mod context;
mod dedup;
mod download;
mod filter;
mod markdown;
mod models;
mod spreadsheet;
mod store;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
