//! Conversions between core types and JavaScript values.

use cropkit_core::{AspectPreset, CropError, CropView, EditorConfig};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Preset entry for building the preset buttons.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsPreset {
    pub id: &'static str,
    pub label: &'static str,
}

impl From<AspectPreset> for JsPreset {
    fn from(preset: AspectPreset) -> Self {
        Self {
            id: preset.id(),
            label: preset.label(),
        }
    }
}

/// Convert a core error into a JS error string.
pub(crate) fn to_js_error(err: CropError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Serialize a value for JavaScript.
pub(crate) fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization failed: {}", e)))
}

/// Serialize an optional view; `None` becomes `undefined`.
pub(crate) fn view_to_js(view: Option<CropView>) -> Result<JsValue, JsValue> {
    match view {
        Some(v) => to_js(&v),
        None => Ok(JsValue::UNDEFINED),
    }
}

/// Read editor options from JavaScript. `undefined` and `null` mean defaults.
pub(crate) fn config_from_js(options: JsValue) -> Result<EditorConfig, JsValue> {
    if options.is_undefined() || options.is_null() {
        return Ok(EditorConfig::default());
    }
    serde_wasm_bindgen::from_value(options)
        .map_err(|e| JsValue::from_str(&format!("Invalid editor options: {}", e)))
}
