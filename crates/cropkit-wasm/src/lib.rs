//! Cropkit WASM - WebAssembly bindings for the crop editor
//!
//! This crate exposes the cropkit-core editor to the page that hosts the
//! crop overlay. The page forwards pointer input here and redraws from the
//! views it gets back.
//!
//! # Module Structure
//!
//! - `editor` - `JsCropEditor` session object, presets and descriptor parsing
//! - `input` - Mouse and touch event mapping onto gestures
//! - `logger` - Console logger for the `log` facade
//! - `types` - Conversions between core types and JavaScript values
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsCropEditor } from '@cropkit/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const editor = new JsCropEditor();
//! editor.on_change((view) => { cropInput.value = view.descriptor; });
//! editor.load_image(previewImage);
//!
//! handleEl.addEventListener('mousedown', (e) =>
//!   editor.mouse_down(e, previewImage, handleEl.dataset.handle));
//! document.addEventListener('mousemove', (e) => editor.mouse_move(e, previewImage));
//! document.addEventListener('mouseup', () => editor.pointer_up());
//! ```

use wasm_bindgen::prelude::*;

mod editor;
mod input;
mod logger;
mod types;

// Re-export public types
pub use editor::{aspect_presets, parse_crop_descriptor, JsCropEditor};
pub use logger::set_log_level;
pub use types::JsPreset;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logger::init(log::LevelFilter::Info);
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
