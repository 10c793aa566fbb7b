//! Crop editor bindings.
//!
//! `JsCropEditor` is the handle the page keeps for one image-editing
//! session. Create a new one per image (or call `load_image` again, which
//! resets the session) rather than sharing a global.

use crate::types::{config_from_js, to_js, to_js_error, view_to_js, JsPreset};
use cropkit_core::{AspectPreset, CropEditor, CropObserver, CropView, Handle, Point, Pointer};
use wasm_bindgen::prelude::*;
use web_sys::HtmlImageElement;

/// Calls a JavaScript function with the serialized view on every change.
struct JsObserver {
    callback: js_sys::Function,
}

impl CropObserver for JsObserver {
    fn crop_changed(&mut self, view: &CropView) {
        let value = match to_js(view) {
            Ok(v) => v,
            Err(e) => {
                log::warn!("crop observer skipped: {:?}", e);
                return;
            }
        };
        if let Err(e) = self.callback.call1(&JsValue::NULL, &value) {
            log::warn!("crop observer threw: {:?}", e);
        }
    }
}

/// Crop editor session for one image.
///
/// # Example (TypeScript)
/// ```typescript
/// const editor = new JsCropEditor({ min_size: 30 });
/// editor.on_change((view) => {
///   cropInput.value = view.descriptor;       // "40,40,720,520"
///   cropInfo.textContent = view.size_label;  // "720 × 520"
///   Object.assign(cropBox.style, {
///     left: `${view.container.x}px`,
///     top: `${view.container.y}px`,
///     width: `${view.container.width}px`,
///     height: `${view.container.height}px`,
///   });
/// });
///
/// // After two animation frames so layout has settled
/// editor.load_image(previewImage);
/// cropOverlay.style.display = editor.is_visible ? 'block' : 'none';
/// ```
#[wasm_bindgen]
pub struct JsCropEditor {
    pub(crate) inner: CropEditor,
}

#[wasm_bindgen]
impl JsCropEditor {
    /// Create an editor.
    ///
    /// # Arguments
    /// * `options` - Optional `EditorConfig` object; missing fields use defaults
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<JsCropEditor, JsValue> {
        let config = config_from_js(options)?;
        Ok(JsCropEditor {
            inner: CropEditor::new(config),
        })
    }

    /// Register a callback invoked with the view after every change.
    ///
    /// Callbacks run in registration order.
    pub fn on_change(&mut self, callback: js_sys::Function) {
        self.inner.add_observer(Box::new(JsObserver { callback }));
    }

    /// Measure a loaded `<img>` and start a session on it.
    ///
    /// Call once layout has settled. Returns the initial view, or an error
    /// (with the overlay state reset) if the element has no size yet.
    pub fn load_image(&mut self, image: &HtmlImageElement) -> Result<JsValue, JsValue> {
        let natural_width = image.natural_width() as f64;
        let natural_height = image.natural_height() as f64;
        let rendered = image.get_bounding_client_rect();

        log::info!("Image dimensions: {} x {}", natural_width, natural_height);
        log::info!(
            "Container dimensions: {} x {}",
            rendered.width(),
            rendered.height()
        );

        self.load_measurement(
            natural_width,
            natural_height,
            rendered.width(),
            rendered.height(),
        )
    }

    /// Start a session from explicit measurements.
    pub fn load_measurement(
        &mut self,
        natural_width: f64,
        natural_height: f64,
        container_width: f64,
        container_height: f64,
    ) -> Result<JsValue, JsValue> {
        let view = self
            .inner
            .load_measurement(
                natural_width,
                natural_height,
                container_width,
                container_height,
            )
            .map_err(|e| {
                log::warn!("Invalid container dimensions for crop: {}", e);
                to_js_error(e)
            })?;
        if let Some(frame) = self.inner.frame() {
            log::info!("Scale: {}", frame.scale());
        }
        view_to_js(view)
    }

    /// Start a gesture at container position (`x`, `y`) on `handle`.
    ///
    /// `handle` is `move` or one of `n`, `s`, `e`, `w`, `ne`, `nw`, `se`,
    /// `sw`. An unknown id leaves the rectangle alone and ends any gesture
    /// still marked active. Returns whether a gesture is now active.
    pub fn begin_gesture(&mut self, x: f64, y: f64, handle: &str) -> bool {
        self.begin_with(Pointer::mouse(), Point::new(x, y), handle)
    }

    /// Pointer moved to container position (`x`, `y`).
    ///
    /// Returns the new view, or `undefined` when no gesture is active.
    pub fn continue_gesture(&mut self, x: f64, y: f64) -> Result<JsValue, JsValue> {
        view_to_js(self.inner.continue_gesture(Point::new(x, y)))
    }

    /// Release or lost capture. Always safe to call.
    pub fn end_gesture(&mut self) {
        self.inner.end_gesture();
    }

    /// Select a preset by id (`free`, `original`, `1:1`, `4:3`, `16:9`, `3:2`).
    ///
    /// Returns the reshaped view, or `undefined` when nothing changed.
    pub fn apply_preset(&mut self, preset: &str) -> Result<JsValue, JsValue> {
        let preset: AspectPreset = preset.parse().map_err(to_js_error)?;
        view_to_js(self.inner.apply_preset(preset))
    }

    /// Re-place the default padded rectangle.
    pub fn init_crop_area(&mut self) -> Result<JsValue, JsValue> {
        view_to_js(self.inner.init_crop_area())
    }

    /// Drop the session (image removed, tool closed).
    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// Current view, or `undefined` before an image is loaded.
    pub fn view(&self) -> Result<JsValue, JsValue> {
        view_to_js(self.inner.view())
    }

    /// Current `"x,y,width,height"` descriptor in source pixels.
    #[wasm_bindgen(getter)]
    pub fn descriptor(&self) -> Option<String> {
        self.inner.descriptor()
    }

    #[wasm_bindgen(getter)]
    pub fn is_visible(&self) -> bool {
        self.inner.is_visible()
    }

    #[wasm_bindgen(getter)]
    pub fn is_dragging(&self) -> bool {
        self.inner.is_dragging()
    }

    /// CSS cursor for the crop box.
    #[wasm_bindgen(getter)]
    pub fn cursor(&self) -> String {
        self.inner.cursor().to_string()
    }

    /// Id of the selected preset.
    #[wasm_bindgen(getter)]
    pub fn preset(&self) -> String {
        self.inner.preset().id().to_string()
    }

    /// Locked width/height ratio, or `undefined` when free.
    #[wasm_bindgen(getter)]
    pub fn aspect_ratio(&self) -> Option<f64> {
        self.inner.aspect().ratio()
    }
}

impl JsCropEditor {
    /// Shared press path for mouse, touch and coordinate-level callers.
    pub(crate) fn begin_with(&mut self, pointer: Pointer, pos: Point, handle_id: &str) -> bool {
        let handle: Handle = match handle_id.parse() {
            Ok(h) => h,
            Err(e) => {
                log::warn!("{}", e);
                self.inner.end_gesture();
                return false;
            }
        };
        if let Err(e) = self.inner.begin_gesture(pointer, pos, handle) {
            log::debug!("press ignored: {}", e);
        }
        self.inner.is_dragging()
    }
}

/// List the aspect ratio presets in display order.
///
/// # Example (TypeScript)
/// ```typescript
/// for (const { id, label } of aspect_presets()) {
///   addPresetButton(id, label);
/// }
/// ```
#[wasm_bindgen]
pub fn aspect_presets() -> Result<JsValue, JsValue> {
    let presets: Vec<JsPreset> = AspectPreset::ALL.into_iter().map(JsPreset::from).collect();
    to_js(&presets)
}

/// Parse a `"x,y,width,height"` descriptor and clamp it into an image.
///
/// Mirrors what the receiving side does with the crop text.
#[wasm_bindgen]
pub fn parse_crop_descriptor(
    text: &str,
    image_width: u32,
    image_height: u32,
) -> Result<JsValue, JsValue> {
    let crop: cropkit_core::SourceCrop = text.parse().map_err(to_js_error)?;
    let width = i32::try_from(image_width).unwrap_or(i32::MAX);
    let height = i32::try_from(image_height).unwrap_or(i32::MAX);
    to_js(&crop.clamp_to(width, height))
}


/// WASM-specific tests that require JsValue.
///
/// These tests build or read `JsValue`s and can only run on wasm32 targets.
/// Use `wasm-pack test` to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use cropkit_core::SourceCrop;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn loaded() -> JsCropEditor {
        let mut editor = JsCropEditor::new(JsValue::UNDEFINED).unwrap();
        editor.load_measurement(800.0, 600.0, 400.0, 300.0).unwrap();
        editor
    }

    #[wasm_bindgen_test]
    fn test_load_measurement_returns_view() {
        let mut editor = JsCropEditor::new(JsValue::NULL).unwrap();
        let value = editor.load_measurement(800.0, 600.0, 400.0, 300.0).unwrap();
        let view: CropView = serde_wasm_bindgen::from_value(value).unwrap();
        assert_eq!(view.descriptor, "40,40,720,520");
    }

    #[wasm_bindgen_test]
    fn test_degenerate_measurement_errors() {
        let mut editor = loaded();
        assert!(editor.load_measurement(800.0, 600.0, 0.0, 300.0).is_err());
        assert!(!editor.is_visible());
    }

    #[wasm_bindgen_test]
    fn test_drag_east() {
        let mut editor = loaded();
        assert!(editor.begin_gesture(380.0, 150.0, "e"));
        let value = editor.continue_gesture(330.0, 150.0).unwrap();
        let view: CropView = serde_wasm_bindgen::from_value(value).unwrap();
        assert_eq!(view.container.width, 310.0);
        editor.end_gesture();
        assert!(editor.continue_gesture(0.0, 0.0).unwrap().is_undefined());
    }

    #[wasm_bindgen_test]
    fn test_apply_preset_by_id() {
        let mut editor = loaded();
        let value = editor.apply_preset("1:1").unwrap();
        let view: CropView = serde_wasm_bindgen::from_value(value).unwrap();
        assert_eq!(view.container.x, 70.0);
        assert_eq!(view.container.width, 260.0);

        assert!(editor.apply_preset("free").unwrap().is_undefined());
        assert!(editor.apply_preset("5:4").is_err());
    }

    #[wasm_bindgen_test]
    fn test_options_override_min_size() {
        let options = js_sys::Object::new();
        js_sys::Reflect::set(&options, &"min_size".into(), &JsValue::from_f64(80.0)).unwrap();
        let mut editor = JsCropEditor::new(options.into()).unwrap();
        editor.load_measurement(800.0, 600.0, 400.0, 300.0).unwrap();
        editor.begin_gesture(0.0, 0.0, "se");
        let value = editor.continue_gesture(-1000.0, -1000.0).unwrap();
        let view: CropView = serde_wasm_bindgen::from_value(value).unwrap();
        assert_eq!(view.container.width, 80.0);
    }

    #[wasm_bindgen_test]
    fn test_observer_receives_views() {
        let seen = js_sys::Array::new();
        let sink = seen.clone();
        let callback = Closure::<dyn FnMut(JsValue)>::new(move |v: JsValue| {
            sink.push(&v);
        });
        let mut editor = JsCropEditor::new(JsValue::UNDEFINED).unwrap();
        editor.on_change(callback.as_ref().unchecked_ref::<js_sys::Function>().clone());
        callback.forget();

        editor.load_measurement(800.0, 600.0, 400.0, 300.0).unwrap();
        editor.apply_preset("4:3").unwrap();
        assert_eq!(seen.length(), 2);
    }

    #[wasm_bindgen_test]
    fn test_parse_crop_descriptor_clamps() {
        let value = parse_crop_descriptor("700,-10,200,100", 800, 600).unwrap();
        let crop: SourceCrop = serde_wasm_bindgen::from_value(value).unwrap();
        assert_eq!(crop, SourceCrop::new(700, 0, 100, 90));
        assert!(parse_crop_descriptor("1,2,3", 800, 600).is_err());
    }

    #[wasm_bindgen_test]
    fn test_aspect_presets_list() {
        let value = aspect_presets().unwrap();
        let list = js_sys::Array::from(&value);
        assert_eq!(list.length(), 6);
    }
}
