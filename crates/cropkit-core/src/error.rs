//! Error types for the crop editor.
//!
//! Geometry never fails: out-of-range input is clamped. Errors only come
//! from the boundaries where untyped input enters the editor (handle and
//! preset ids, layout measurements, descriptor text, pointer arbitration).

use thiserror::Error;

/// Errors produced when converting external input into editor types.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CropError {
    /// The image or its rendered element has no usable size yet.
    #[error("Degenerate image frame: natural {natural_width}x{natural_height}, container {container_width}x{container_height}")]
    DegenerateFrame {
        natural_width: f64,
        natural_height: f64,
        container_width: f64,
        container_height: f64,
    },

    /// A handle id outside `move`, `n`, `s`, `e`, `w`, `ne`, `nw`, `se`, `sw`.
    #[error("Unknown crop handle: {0}")]
    UnknownHandle(String),

    /// A preset id outside the closed preset set.
    #[error("Unknown aspect ratio preset: {0}")]
    UnknownPreset(String),

    /// Crop descriptor text that is not `x,y,width,height`.
    #[error("Invalid crop area '{0}'. Use format: x,y,width,height")]
    InvalidDescriptor(String),

    /// Another pointer already owns the active gesture.
    #[error("A gesture is already in progress for another pointer")]
    GestureInProgress,
}
