//! Browser bindings: the `AIBackdrop` canvas backdrop plus the question,
//! storage and request helpers used by the interview pages.

mod backdrop;
mod canvas;
mod host;
mod http;
mod questions;
mod storage;

use wasm_bindgen::prelude::*;

pub use backdrop::{init, JsBackdrop};
pub use http::{generate_questions, post_json};
pub use storage::LocalStore;

#[wasm_bindgen(start)]
pub fn main_js() {
    console_error_panic_hook::set_once();
    // `init({ logLevel })` can raise this later.
    console_log::init_with_level(log::Level::Warn).ok();
}
