//! Presentation sync: projects the editor rectangle for display and output.
//!
//! Two projections are produced after every accepted change:
//!
//! - the container-space box the overlay is drawn with
//! - the source-space descriptor `"x,y,width,height"` consumed downstream
//!
//! # Rounding
//!
//! Each descriptor field is rounded on its own: `round(v / scale)`. The
//! emitted width can therefore differ by one pixel from
//! `round(right / scale) - round(x / scale)`. Callers rely on this exact
//! policy, so it is kept as is.

use crate::error::CropError;
use crate::frame::CoordinateTransform;
use crate::geometry::CropRect;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Crop region in integer source pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceCrop {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl SourceCrop {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Project a container-space rectangle, rounding every field separately.
    pub fn from_container(rect: &CropRect, transform: &CoordinateTransform) -> Self {
        let source = transform.to_source(rect);
        Self {
            x: source.x.round() as i32,
            y: source.y.round() as i32,
            width: source.width.round() as i32,
            height: source.height.round() as i32,
        }
    }

    /// Clamp into an image of `image_width` x `image_height` pixels.
    ///
    /// The origin is clamped into the image and the far edges are cut at the
    /// image border, so the result may be smaller than requested (or empty).
    pub fn clamp_to(&self, image_width: i32, image_height: i32) -> Self {
        let x = self.x.clamp(0, image_width.max(0));
        let y = self.y.clamp(0, image_height.max(0));
        let right = self.x.saturating_add(self.width).min(image_width);
        let bottom = self.y.saturating_add(self.height).min(image_height);
        Self {
            x,
            y,
            width: (right - x).max(0),
            height: (bottom - y).max(0),
        }
    }

    /// Size badge text, e.g. `"720 × 520"`.
    pub fn size_label(&self) -> String {
        format!("{} × {}", self.width, self.height)
    }
}

impl fmt::Display for SourceCrop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.x, self.y, self.width, self.height)
    }
}

impl FromStr for SourceCrop {
    type Err = CropError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CropError::InvalidDescriptor(s.to_string());

        let parts = s
            .split(',')
            .map(|p| p.trim().parse::<i32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| invalid())?;

        match parts.as_slice() {
            &[x, y, width, height] => Ok(Self::new(x, y, width, height)),
            _ => Err(invalid()),
        }
    }
}

/// Everything the UI needs to redraw after a change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropView {
    /// Overlay box in container pixels.
    pub container: CropRect,
    /// Crop region in source pixels.
    pub source: SourceCrop,
    /// Canonical `"x,y,width,height"` text.
    pub descriptor: String,
    /// Size badge text.
    pub size_label: String,
}

impl CropView {
    pub fn project(rect: &CropRect, transform: &CoordinateTransform) -> Self {
        let source = SourceCrop::from_container(rect, transform);
        Self {
            container: *rect,
            source,
            descriptor: source.to_string(),
            size_label: source.size_label(),
        }
    }
}
