//! Image frame and coordinate transforms.
//!
//! # Coordinate Spaces
//!
//! - **Source space**: pixels of the original, full-resolution image
//! - **Container space**: pixels of the rendered image element on screen
//!
//! The image is displayed with a uniform scale, so a single factor
//! `scale = container_width / natural_width` maps source to container.
//! The editor works in container space; everything handed to the outside
//! world is converted through [`CoordinateTransform`].

use crate::error::CropError;
use crate::geometry::{CropRect, Point, Size};
use serde::{Deserialize, Serialize};

/// Uniform scale between source and container space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateTransform {
    scale: f64,
}

impl CoordinateTransform {
    /// Create a transform from a source-to-container scale factor.
    ///
    /// Returns `None` for zero, negative or non-finite factors.
    pub fn new(scale: f64) -> Option<Self> {
        (scale.is_finite() && scale > 0.0).then_some(Self { scale })
    }

    /// Container pixels per source pixel.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Convert a container-space length to source space.
    #[inline]
    pub fn length_to_source(&self, value: f64) -> f64 {
        value / self.scale
    }

    /// Convert a source-space length to container space.
    #[inline]
    pub fn length_to_container(&self, value: f64) -> f64 {
        value * self.scale
    }

    pub fn point_to_source(&self, p: Point) -> Point {
        Point::new(self.length_to_source(p.x), self.length_to_source(p.y))
    }

    pub fn point_to_container(&self, p: Point) -> Point {
        Point::new(self.length_to_container(p.x), self.length_to_container(p.y))
    }

    /// Convert a container-space rectangle to source space (unrounded).
    pub fn to_source(&self, rect: &CropRect) -> CropRect {
        CropRect::new(
            self.length_to_source(rect.x),
            self.length_to_source(rect.y),
            self.length_to_source(rect.width),
            self.length_to_source(rect.height),
        )
    }

    /// Convert a source-space rectangle to container space.
    pub fn to_container(&self, rect: &CropRect) -> CropRect {
        CropRect::new(
            self.length_to_container(rect.x),
            self.length_to_container(rect.y),
            self.length_to_container(rect.width),
            self.length_to_container(rect.height),
        )
    }
}

/// Natural and rendered size of the image being cropped.
///
/// Built once the image has loaded and layout has settled. A frame is never
/// mutated; loading a new image replaces it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageFrame {
    natural: Size,
    container: Size,
    transform: CoordinateTransform,
}

impl ImageFrame {
    /// Build a frame from measured sizes.
    ///
    /// # Errors
    ///
    /// Returns [`CropError::DegenerateFrame`] when any side is zero, negative
    /// or not finite, e.g. when measured before layout settled.
    pub fn new(
        natural_width: f64,
        natural_height: f64,
        container_width: f64,
        container_height: f64,
    ) -> Result<Self, CropError> {
        let natural = Size::new(natural_width, natural_height);
        let container = Size::new(container_width, container_height);
        let degenerate = || CropError::DegenerateFrame {
            natural_width,
            natural_height,
            container_width,
            container_height,
        };

        if !natural.is_valid() || !container.is_valid() {
            return Err(degenerate());
        }
        let transform =
            CoordinateTransform::new(container_width / natural_width).ok_or_else(degenerate)?;

        Ok(Self {
            natural,
            container,
            transform,
        })
    }

    /// Size of the original image in source pixels.
    pub fn natural(&self) -> Size {
        self.natural
    }

    /// Size of the rendered image in container pixels.
    pub fn container(&self) -> Size {
        self.container
    }

    pub fn transform(&self) -> CoordinateTransform {
        self.transform
    }

    pub fn scale(&self) -> f64 {
        self.transform.scale()
    }

    /// Aspect ratio of the source image.
    pub fn natural_aspect(&self) -> f64 {
        self.natural.width / self.natural.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_scale() {
        let frame = ImageFrame::new(800.0, 600.0, 400.0, 300.0).unwrap();
        assert_eq!(frame.scale(), 0.5);
        assert_eq!(frame.container(), Size::new(400.0, 300.0));
        assert_eq!(frame.natural(), Size::new(800.0, 600.0));
        assert!((frame.natural_aspect() - 4.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_frame_rejects_zero_container() {
        let err = ImageFrame::new(800.0, 600.0, 0.0, 300.0).unwrap_err();
        assert!(matches!(err, CropError::DegenerateFrame { .. }));
    }

    #[test]
    fn test_frame_rejects_negative_and_nan() {
        assert!(ImageFrame::new(800.0, 600.0, 400.0, -1.0).is_err());
        assert!(ImageFrame::new(0.0, 600.0, 400.0, 300.0).is_err());
        assert!(ImageFrame::new(f64::NAN, 600.0, 400.0, 300.0).is_err());
    }

    #[test]
    fn test_transform_rejects_bad_scale() {
        assert!(CoordinateTransform::new(0.0).is_none());
        assert!(CoordinateTransform::new(-2.0).is_none());
        assert!(CoordinateTransform::new(f64::INFINITY).is_none());
        assert!(CoordinateTransform::new(0.25).is_some());
    }

    #[test]
    fn test_to_source_and_back() {
        let t = CoordinateTransform::new(0.5).unwrap();
        let rect = CropRect::new(20.0, 20.0, 360.0, 260.0);
        let source = t.to_source(&rect);
        assert_eq!(source, CropRect::new(40.0, 40.0, 720.0, 520.0));
        assert_eq!(t.to_container(&source), rect);
    }

    #[test]
    fn test_point_conversion() {
        let t = CoordinateTransform::new(2.0).unwrap();
        assert_eq!(t.point_to_source(Point::new(10.0, 4.0)), Point::new(5.0, 2.0));
        assert_eq!(t.point_to_container(Point::new(5.0, 2.0)), Point::new(10.0, 4.0));
    }

    #[test]
    fn test_upscaled_frame() {
        // Small image rendered larger than its natural size
        let frame = ImageFrame::new(100.0, 50.0, 400.0, 200.0).unwrap();
        assert_eq!(frame.scale(), 4.0);
        assert_eq!(frame.transform().length_to_source(400.0), 100.0);
    }
}
