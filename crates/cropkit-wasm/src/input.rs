//! Mouse and touch event mapping.
//!
//! Positions are taken relative to the top-left of the image element's
//! bounding box, which is the container space the editor works in. Only the
//! first touch point is tracked.

use crate::editor::JsCropEditor;
use cropkit_core::{Point, Pointer};
use wasm_bindgen::prelude::*;
use web_sys::{Element, MouseEvent, Touch, TouchEvent};

/// Convert client coordinates into a position inside `surface`.
pub(crate) fn relative_position(client_x: f64, client_y: f64, left: f64, top: f64) -> Point {
    Point::new(client_x - left, client_y - top)
}

fn surface_position(surface: &Element, client_x: f64, client_y: f64) -> Point {
    let bounds = surface.get_bounding_client_rect();
    relative_position(client_x, client_y, bounds.left(), bounds.top())
}

fn touch_position(surface: &Element, touch: &Touch) -> Point {
    surface_position(surface, touch.client_x() as f64, touch.client_y() as f64)
}

#[wasm_bindgen]
impl JsCropEditor {
    /// Press on the crop box or one of its handles.
    ///
    /// Returns whether a gesture is now active.
    pub fn mouse_down(&mut self, event: &MouseEvent, surface: &Element, handle: &str) -> bool {
        event.prevent_default();
        let pos = surface_position(surface, event.client_x() as f64, event.client_y() as f64);
        self.begin_with(Pointer::mouse(), pos, handle)
    }

    /// Touch start on the crop box or one of its handles.
    pub fn touch_start(&mut self, event: &TouchEvent, surface: &Element, handle: &str) -> bool {
        let touches = event.touches();
        let Some(touch) = touches.get(0) else {
            return false;
        };
        event.prevent_default();
        let pointer = Pointer::touch(touch.identifier(), touches.length() == 1);
        self.begin_with(pointer, touch_position(surface, &touch), handle)
    }

    /// Mouse moved anywhere on the page.
    ///
    /// Returns the new view, or `undefined` when no gesture is active.
    pub fn mouse_move(&mut self, event: &MouseEvent, surface: &Element) -> Result<JsValue, JsValue> {
        if !self.is_dragging() {
            return Ok(JsValue::UNDEFINED);
        }
        event.prevent_default();
        let pos = surface_position(surface, event.client_x() as f64, event.client_y() as f64);
        self.continue_gesture(pos.x, pos.y)
    }

    /// Touch moved anywhere on the page.
    pub fn touch_move(&mut self, event: &TouchEvent, surface: &Element) -> Result<JsValue, JsValue> {
        if !self.is_dragging() {
            return Ok(JsValue::UNDEFINED);
        }
        let Some(touch) = event.touches().get(0) else {
            return Ok(JsValue::UNDEFINED);
        };
        event.prevent_default();
        let pos = touch_position(surface, &touch);
        self.continue_gesture(pos.x, pos.y)
    }

    /// `mouseup`, `touchend` or `touchcancel`.
    pub fn pointer_up(&mut self) {
        self.end_gesture();
    }
}
