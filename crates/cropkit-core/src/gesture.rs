//! Gesture state for pointer-driven edits.
//!
//! A gesture starts on pointer press, captures the rectangle and pointer
//! position at that moment, and ends on release. Mouse and touch input map
//! to the same calls; only one contact owns the gesture at a time.

use crate::error::CropError;
use crate::geometry::{CropRect, Point};
use crate::handle::Handle;
use serde::{Deserialize, Serialize};

/// Which physical contact produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerId {
    Mouse,
    /// Touch identifier as reported by the platform.
    Touch(i32),
}

/// A contact plus whether it is the only one currently down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pointer {
    pub id: PointerId,
    /// True when no other contact is down. A primary press means any
    /// gesture still marked active lost its release event.
    pub primary: bool,
}

impl Pointer {
    pub fn mouse() -> Self {
        Self {
            id: PointerId::Mouse,
            primary: true,
        }
    }

    pub fn touch(identifier: i32, primary: bool) -> Self {
        Self {
            id: PointerId::Touch(identifier),
            primary,
        }
    }
}

/// State captured when a gesture begins. Immutable until the gesture ends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureSnapshot {
    pub start_rect: CropRect,
    pub start_pointer: Point,
    pub handle: Handle,
    pub pointer: PointerId,
}

impl GestureSnapshot {
    /// Cumulative pointer offset since the gesture began.
    pub fn delta(&self, pos: Point) -> Point {
        Point::new(pos.x - self.start_pointer.x, pos.y - self.start_pointer.y)
    }
}

/// Tracks the single active gesture, if any.
#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    active: Option<GestureSnapshot>,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a gesture from the settled rectangle `rect`.
    ///
    /// Accepted when nothing is active, when the same contact presses again,
    /// or when `pointer` is primary. The last two replace a gesture whose
    /// release was missed.
    ///
    /// # Errors
    ///
    /// [`CropError::GestureInProgress`] when a different, non-primary contact
    /// tries to start while another one owns the gesture. State is unchanged.
    pub fn begin(
        &mut self,
        pointer: Pointer,
        pos: Point,
        handle: Handle,
        rect: CropRect,
    ) -> Result<&GestureSnapshot, CropError> {
        if let Some(current) = &self.active {
            if current.pointer != pointer.id && !pointer.primary {
                return Err(CropError::GestureInProgress);
            }
            log::debug!(
                "replacing stale {} gesture owned by {:?}",
                current.handle,
                current.pointer
            );
        }

        Ok(&*self.active.insert(GestureSnapshot {
            start_rect: rect,
            start_pointer: pos,
            handle,
            pointer: pointer.id,
        }))
    }

    pub fn active(&self) -> Option<&GestureSnapshot> {
        self.active.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// End the gesture. Safe to call when nothing is active.
    pub fn end(&mut self) -> Option<GestureSnapshot> {
        self.active.take()
    }
}
