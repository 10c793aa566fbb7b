//! Crop editor session.
//!
//! One [`CropEditor`] owns the crop state for one image-editing session:
//! the measured [`ImageFrame`], the current rectangle, the aspect lock and
//! the active gesture. Create a fresh editor (or call [`CropEditor::load_frame`])
//! for every new image instead of sharing one across tools.
//!
//! # Flow
//!
//! 1. `load_frame` once the image is laid out: sets up the padded default
//!    rectangle and clears the aspect lock
//! 2. `begin_gesture` on press, `continue_gesture` on every move,
//!    `end_gesture` on release or lost capture
//! 3. `apply_preset` whenever the user picks a ratio
//!
//! Every accepted change is pushed through the registered observers in
//! registration order.

use crate::aspect::{AspectConstraint, AspectPreset};
use crate::config::EditorConfig;
use crate::error::CropError;
use crate::frame::ImageFrame;
use crate::geometry::{CropRect, Point};
use crate::gesture::{GestureTracker, Pointer};
use crate::handle::Handle;
use crate::solver::{self, Constraints};
use crate::sync::CropView;
use std::fmt;

/// Receives the projected view after every accepted change.
pub trait CropObserver {
    fn crop_changed(&mut self, view: &CropView);
}

impl<F> CropObserver for F
where
    F: FnMut(&CropView),
{
    fn crop_changed(&mut self, view: &CropView) {
        self(view)
    }
}

/// State for a single crop editing session.
pub struct CropEditor {
    config: EditorConfig,
    frame: Option<ImageFrame>,
    rect: Option<CropRect>,
    aspect: AspectConstraint,
    preset: AspectPreset,
    gestures: GestureTracker,
    observers: Vec<Box<dyn CropObserver>>,
}

impl fmt::Debug for CropEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CropEditor")
            .field("config", &self.config)
            .field("frame", &self.frame)
            .field("rect", &self.rect)
            .field("aspect", &self.aspect)
            .field("preset", &self.preset)
            .field("gestures", &self.gestures)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Default for CropEditor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl CropEditor {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            config: config.sanitized(),
            frame: None,
            rect: None,
            aspect: AspectConstraint::Free,
            preset: AspectPreset::Free,
            gestures: GestureTracker::new(),
            observers: Vec::new(),
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Register an observer. Observers run in registration order.
    pub fn add_observer(&mut self, observer: Box<dyn CropObserver>) {
        self.observers.push(observer);
    }

    pub fn frame(&self) -> Option<&ImageFrame> {
        self.frame.as_ref()
    }

    /// Current rectangle in container pixels, if the overlay is set up.
    pub fn rect(&self) -> Option<CropRect> {
        self.rect
    }

    pub fn aspect(&self) -> AspectConstraint {
        self.aspect
    }

    pub fn preset(&self) -> AspectPreset {
        self.preset
    }

    /// Whether the crop overlay should be shown.
    pub fn is_visible(&self) -> bool {
        self.frame.is_some() && self.rect.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.gestures.is_active()
    }

    /// Cursor for the crop box: the active handle's while dragging, `move` otherwise.
    pub fn cursor(&self) -> &'static str {
        match self.gestures.active() {
            Some(g) => g.handle.cursor_name(true),
            None => Handle::Move.cursor_name(false),
        }
    }

    /// Project the current rectangle, if any.
    pub fn view(&self) -> Option<CropView> {
        let frame = self.frame.as_ref()?;
        let rect = self.rect.as_ref()?;
        Some(CropView::project(rect, &frame.transform()))
    }

    /// The `"x,y,width,height"` source-pixel descriptor.
    pub fn descriptor(&self) -> Option<String> {
        self.view().map(|v| v.descriptor)
    }

    /// Start a session on a newly measured image.
    ///
    /// Replaces any previous frame, ends any gesture, clears the aspect lock
    /// and places the default padded rectangle.
    pub fn load_frame(&mut self, frame: ImageFrame) -> Option<CropView> {
        self.gestures.end();
        self.aspect = AspectConstraint::Free;
        self.preset = AspectPreset::Free;
        self.frame = Some(frame);
        self.init_crop_area()
    }

    /// Build a frame from raw measurements and load it.
    ///
    /// # Errors
    ///
    /// [`CropError::DegenerateFrame`] when the image is not laid out yet.
    /// The session is reset in that case so the overlay stays hidden until
    /// a valid measurement arrives.
    pub fn load_measurement(
        &mut self,
        natural_width: f64,
        natural_height: f64,
        container_width: f64,
        container_height: f64,
    ) -> Result<Option<CropView>, CropError> {
        match ImageFrame::new(
            natural_width,
            natural_height,
            container_width,
            container_height,
        ) {
            Ok(frame) => Ok(self.load_frame(frame)),
            Err(e) => {
                log::debug!("skipping crop setup: {}", e);
                self.reset();
                Err(e)
            }
        }
    }

    /// Place the default padded rectangle inside the current frame.
    pub fn init_crop_area(&mut self) -> Option<CropView> {
        let Some(frame) = self.frame else {
            log::debug!("init_crop_area without a frame");
            return None;
        };
        let Some(rect) = solver::initial_rect(frame.container(), &self.config) else {
            self.rect = None;
            return None;
        };
        Some(self.commit(rect, &frame))
    }

    /// Drop all session state: frame, rectangle, aspect lock and gesture.
    pub fn reset(&mut self) {
        self.gestures.end();
        self.frame = None;
        self.rect = None;
        self.aspect = AspectConstraint::Free;
        self.preset = AspectPreset::Free;
    }

    /// Press on `handle` at `pos` (container pixels).
    ///
    /// A no-op when no frame is loaded.
    ///
    /// # Errors
    ///
    /// [`CropError::GestureInProgress`] when another contact owns the gesture.
    pub fn begin_gesture(
        &mut self,
        pointer: Pointer,
        pos: Point,
        handle: Handle,
    ) -> Result<(), CropError> {
        let (Some(_), Some(rect)) = (self.frame, self.rect) else {
            log::debug!("ignoring {} press: no image frame", handle);
            return Ok(());
        };
        self.gestures.begin(pointer, pos, handle, rect)?;
        Ok(())
    }

    /// Pointer moved to `pos`. Returns the new view if a gesture is active.
    pub fn continue_gesture(&mut self, pos: Point) -> Option<CropView> {
        let snapshot = *self.gestures.active()?;
        let frame = self.frame?;

        let constraints = Constraints::new(frame.container(), self.config.min_size, self.aspect);
        let rect = solver::solve(
            snapshot.handle,
            &snapshot.start_rect,
            snapshot.delta(pos),
            &constraints,
        );
        Some(self.commit(rect, &frame))
    }

    /// Release. Safe to call at any time.
    pub fn end_gesture(&mut self) {
        self.gestures.end();
    }

    /// Select an aspect ratio preset.
    ///
    /// `Free` only clears the lock. A ratio reshapes the rectangle around its
    /// center, ends any active gesture and locks subsequent resizes. Without
    /// a frame nothing happens.
    pub fn apply_preset(&mut self, preset: AspectPreset) -> Option<CropView> {
        let frame = self.frame?;

        let constraint = preset.constraint(Some(&frame))?;
        self.preset = preset;
        self.aspect = constraint;

        let ratio = constraint.ratio()?;
        let rect = self.rect?;
        if let Some(stale) = self.gestures.end() {
            log::debug!("{} gesture ended by preset {}", stale.handle, preset);
        }
        let fitted = solver::fit_to_ratio(
            &rect,
            ratio,
            frame.container(),
            self.config.min_size,
            self.config.preset_margin,
        );
        Some(self.commit(fitted, &frame))
    }

    /// Store a solved rectangle and notify observers.
    fn commit(&mut self, rect: CropRect, frame: &ImageFrame) -> CropView {
        self.rect = Some(rect);
        let view = CropView::project(&rect, &frame.transform());
        for observer in self.observers.iter_mut() {
            observer.crop_changed(&view);
        }
        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::PointerId;
    use std::cell::RefCell;
    use std::rc::Rc;

    const EPS: f64 = 1e-9;

    fn loaded() -> CropEditor {
        let mut editor = CropEditor::default();
        editor.load_measurement(800.0, 600.0, 400.0, 300.0).unwrap();
        editor
    }

    fn assert_rect(actual: CropRect, x: f64, y: f64, w: f64, h: f64) {
        assert!(
            (actual.x - x).abs() < EPS
                && (actual.y - y).abs() < EPS
                && (actual.width - w).abs() < EPS
                && (actual.height - h).abs() < EPS,
            "expected ({x}, {y}, {w}, {h}), got {:?}",
            actual
        );
    }

    #[test]
    fn test_initial_area_and_descriptor() {
        let editor = loaded();
        assert_rect(editor.rect().unwrap(), 20.0, 20.0, 360.0, 260.0);
        assert_eq!(editor.descriptor().unwrap(), "40,40,720,520");
        assert!(editor.is_visible());
    }

    #[test]
    fn test_degenerate_measurement_hides_overlay() {
        let mut editor = loaded();
        let err = editor.load_measurement(800.0, 600.0, 0.0, 0.0).unwrap_err();
        assert!(matches!(err, CropError::DegenerateFrame { .. }));
        assert!(!editor.is_visible());
        assert!(editor.rect().is_none());
        assert!(editor.descriptor().is_none());
    }

    #[test]
    fn test_no_frame_operations_are_noops() {
        let mut editor = CropEditor::default();
        editor
            .begin_gesture(Pointer::mouse(), Point::new(10.0, 10.0), Handle::Se)
            .unwrap();
        assert!(!editor.is_dragging());
        assert!(editor.continue_gesture(Point::new(50.0, 50.0)).is_none());
        assert!(editor.apply_preset(AspectPreset::Square).is_none());
        assert_eq!(editor.aspect(), AspectConstraint::Free);
        assert!(editor.init_crop_area().is_none());
        editor.end_gesture();
        assert!(editor.rect().is_none());
    }

    #[test]
    fn test_move_gesture() {
        let mut editor = loaded();
        editor
            .begin_gesture(Pointer::mouse(), Point::new(100.0, 100.0), Handle::Move)
            .unwrap();
        assert_eq!(editor.cursor(), "grabbing");

        let view = editor.continue_gesture(Point::new(90.0, 95.0)).unwrap();
        assert_rect(view.container, 10.0, 15.0, 360.0, 260.0);

        // Past the edge: clamped, size untouched
        let view = editor.continue_gesture(Point::new(0.0, 0.0)).unwrap();
        assert_rect(view.container, 0.0, 0.0, 360.0, 260.0);

        editor.end_gesture();
        assert!(!editor.is_dragging());
        assert_eq!(editor.cursor(), "move");
        assert!(editor.continue_gesture(Point::new(200.0, 200.0)).is_none());
    }

    #[test]
    fn test_continue_without_gesture_is_noop() {
        let mut editor = loaded();
        assert!(editor.continue_gesture(Point::new(5.0, 5.0)).is_none());
        assert_rect(editor.rect().unwrap(), 20.0, 20.0, 360.0, 260.0);
    }

    #[test]
    fn test_resize_uses_gesture_start_not_last_move() {
        let mut editor = loaded();
        editor
            .begin_gesture(Pointer::mouse(), Point::new(380.0, 150.0), Handle::E)
            .unwrap();
        editor.continue_gesture(Point::new(300.0, 150.0));
        let view = editor.continue_gesture(Point::new(370.0, 150.0)).unwrap();
        assert_rect(view.container, 20.0, 20.0, 350.0, 260.0);
        assert_eq!(editor.cursor(), "e-resize");
    }

    #[test]
    fn test_preset_square_scenario() {
        let mut editor = loaded();
        let view = editor.apply_preset(AspectPreset::Square).unwrap();
        assert_rect(view.container, 70.0, 20.0, 260.0, 260.0);
        assert_eq!(editor.preset(), AspectPreset::Square);
        assert_eq!(editor.aspect(), AspectConstraint::Locked(1.0));
    }

    #[test]
    fn test_preset_reapply_is_idempotent() {
        let mut editor = loaded();
        let once = editor.apply_preset(AspectPreset::R16to9).unwrap().container;
        let twice = editor.apply_preset(AspectPreset::R16to9).unwrap().container;
        assert_rect(twice, once.x, once.y, once.width, once.height);
    }

    #[test]
    fn test_preset_during_gesture_ends_it() {
        let mut editor = loaded();
        editor
            .begin_gesture(Pointer::mouse(), Point::new(380.0, 280.0), Handle::Se)
            .unwrap();
        editor.continue_gesture(Point::new(350.0, 250.0));

        let fitted = editor.apply_preset(AspectPreset::Square).unwrap().container;
        assert!(!editor.is_dragging());
        assert!(editor.continue_gesture(Point::new(300.0, 200.0)).is_none());
        assert_eq!(editor.rect().unwrap(), fitted);
    }

    #[test]
    fn test_oversized_padding_option_falls_back() {
        let mut config = EditorConfig::default();
        config.max_padding = 1000.0;
        config.padding_fraction = 2.0;
        let mut editor = CropEditor::new(config);
        let view = editor
            .load_measurement(800.0, 600.0, 400.0, 300.0)
            .unwrap()
            .unwrap();
        assert_rect(view.container, 30.0, 30.0, 340.0, 240.0);
    }

    #[test]
    fn test_free_preset_keeps_rect() {
        let mut editor = loaded();
        editor.apply_preset(AspectPreset::R4to3);
        let before = editor.rect().unwrap();
        assert!(editor.apply_preset(AspectPreset::Free).is_none());
        assert_eq!(editor.rect().unwrap(), before);
        assert_eq!(editor.aspect(), AspectConstraint::Free);
    }

    #[test]
    fn test_locked_drag_keeps_ratio_until_free() {
        let mut editor = loaded();
        editor.apply_preset(AspectPreset::R3to2);
        let start = editor.rect().unwrap();

        editor
            .begin_gesture(Pointer::mouse(), Point::new(0.0, 0.0), Handle::Se)
            .unwrap();
        let view = editor.continue_gesture(Point::new(-60.0, 33.0)).unwrap();
        editor.end_gesture();
        assert!((view.container.aspect() - 1.5).abs() < 1e-6);
        assert_eq!(view.container.x, start.x);
        assert_eq!(view.container.y, start.y);

        // Free again: a pure south drag only changes the height
        editor.apply_preset(AspectPreset::Free);
        let before = editor.rect().unwrap();
        editor
            .begin_gesture(Pointer::mouse(), Point::new(0.0, 0.0), Handle::S)
            .unwrap();
        let view = editor.continue_gesture(Point::new(0.0, 17.0)).unwrap();
        assert_rect(view.container, before.x, before.y, before.width, before.height + 17.0);
    }

    #[test]
    fn test_original_preset_uses_image_ratio() {
        let mut editor = CropEditor::default();
        editor.load_measurement(1600.0, 900.0, 800.0, 450.0).unwrap();
        let view = editor.apply_preset(AspectPreset::Original).unwrap();
        assert!((view.container.aspect() - 16.0 / 9.0).abs() < 1e-6);
    }

    #[test]
    fn test_new_frame_resets_aspect() {
        let mut editor = loaded();
        editor.apply_preset(AspectPreset::Square);
        editor
            .begin_gesture(Pointer::mouse(), Point::default(), Handle::Nw)
            .unwrap();

        editor.load_measurement(1000.0, 1000.0, 500.0, 500.0).unwrap();
        assert_eq!(editor.aspect(), AspectConstraint::Free);
        assert_eq!(editor.preset(), AspectPreset::Free);
        assert!(!editor.is_dragging());
        assert_rect(editor.rect().unwrap(), 20.0, 20.0, 460.0, 460.0);
    }

    #[test]
    fn test_gesture_arbitration() {
        let mut editor = loaded();
        editor
            .begin_gesture(Pointer::touch(3, true), Point::new(100.0, 100.0), Handle::Move)
            .unwrap();
        let err = editor
            .begin_gesture(Pointer::touch(4, false), Point::new(0.0, 0.0), Handle::Se)
            .unwrap_err();
        assert_eq!(err, CropError::GestureInProgress);

        // Missed release: a fresh primary press takes over
        editor
            .begin_gesture(Pointer::touch(5, true), Point::new(0.0, 0.0), Handle::Se)
            .unwrap();
        assert_eq!(editor.cursor(), "se-resize");
        assert_eq!(
            editor.gestures.active().map(|g| g.pointer),
            Some(PointerId::Touch(5))
        );
    }

    #[test]
    fn test_new_gesture_starts_from_settled_rect() {
        let mut editor = loaded();
        editor
            .begin_gesture(Pointer::mouse(), Point::new(0.0, 0.0), Handle::Se)
            .unwrap();
        editor.continue_gesture(Point::new(-100.0, -100.0));
        let settled = editor.rect().unwrap();

        // Release missed, new press
        editor
            .begin_gesture(Pointer::mouse(), Point::new(0.0, 0.0), Handle::Move)
            .unwrap();
        assert_eq!(editor.gestures.active().unwrap().start_rect, settled);
    }

    #[test]
    fn test_observers_run_in_order() {
        let log: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
        let mut editor = CropEditor::default();

        let first = Rc::clone(&log);
        editor.add_observer(Box::new(move |v: &CropView| {
            first.borrow_mut().push(format!("a:{}", v.descriptor))
        }));
        let second = Rc::clone(&log);
        editor.add_observer(Box::new(move |v: &CropView| {
            second.borrow_mut().push(format!("b:{}", v.size_label))
        }));

        editor.load_measurement(800.0, 600.0, 400.0, 300.0).unwrap();
        assert_eq!(
            log.borrow().as_slice(),
            ["a:40,40,720,520".to_string(), "b:720 × 520".to_string()]
        );

        editor.apply_preset(AspectPreset::Free);
        assert_eq!(log.borrow().len(), 2);

        editor.apply_preset(AspectPreset::Square);
        assert_eq!(log.borrow().len(), 4);
    }

    #[test]
    fn test_reset_discards_state() {
        let mut editor = loaded();
        editor.apply_preset(AspectPreset::Square);
        editor.reset();
        assert!(editor.frame().is_none());
        assert!(editor.rect().is_none());
        assert!(editor.aspect().is_free());
        assert!(!editor.is_visible());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
