//! Cropkit Core - Crop rectangle editing library
//!
//! This crate implements the geometry behind an interactive crop box: a
//! rectangle over a displayed image that the user moves and resizes with a
//! pointer, optionally locked to an aspect ratio, always kept inside the
//! image, and reported in source-image pixels as `"x,y,width,height"`.
//!
//! # Module Structure
//!
//! - `geometry` - Point, Size and CropRect value types
//! - `frame` - Image frame and container/source coordinate transform
//! - `handle` - Move and resize grips
//! - `aspect` - Aspect ratio presets and the active lock
//! - `solver` - Pure constraint solver for moves, resizes and presets
//! - `gesture` - Pointer arbitration and gesture snapshots
//! - `sync` - Projection to the overlay box and the source descriptor
//! - `editor` - Session object tying everything together
//!
//! All geometry runs synchronously on the caller's thread; there is no
//! internal locking.

pub mod aspect;
pub mod config;
pub mod editor;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod gesture;
pub mod handle;
pub mod solver;
pub mod sync;

pub use aspect::{AspectConstraint, AspectPreset};
pub use config::EditorConfig;
pub use editor::{CropEditor, CropObserver};
pub use error::CropError;
pub use frame::{CoordinateTransform, ImageFrame};
pub use geometry::{CropRect, Point, Size};
pub use gesture::{GestureSnapshot, GestureTracker, Pointer, PointerId};
pub use handle::Handle;
pub use sync::{CropView, SourceCrop};
