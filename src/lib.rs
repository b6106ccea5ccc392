//! Tab Organizer - Chrome Extension that groups tabs by topic
//! Built with Rust + WASM + Yew

pub mod assignment;
pub mod categorize;
pub mod config;
pub mod error;
pub mod operations;
pub mod organizer;
pub mod remote;
pub mod rules;
pub mod storage;
pub mod tab_data;
pub mod ui;

use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}
