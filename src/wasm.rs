//! WASM bindings for in-browser message formatting.
//!
//! This module exposes the formatting entry points to JavaScript via
//! wasm-bindgen, so the SPA's message-receive handler can format bubbles
//! without shipping the pipeline in JS.

use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Format an AI reply as a safe HTML message bubble.
#[wasm_bindgen]
pub fn format_ai_message(message: &str) -> String {
    crate::render::format_ai_message(message)
}

/// Escape a user-authored message for direct insertion into a bubble.
#[wasm_bindgen]
pub fn format_user_message(message: &str) -> String {
    crate::render::format_user_message(message)
}

/// Escape arbitrary text with the pipeline's HTML escaper.
#[wasm_bindgen]
pub fn escape_html(text: &str) -> String {
    crate::escape::escape_html(text)
}
