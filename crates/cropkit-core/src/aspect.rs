//! Aspect ratio presets and the active constraint.

use crate::error::CropError;
use crate::frame::ImageFrame;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Preset buttons offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AspectPreset {
    /// No constraint.
    #[default]
    Free,
    /// Ratio of the loaded image.
    Original,
    Square,
    R4to3,
    R16to9,
    R3to2,
}

impl AspectPreset {
    pub const ALL: [AspectPreset; 6] = [
        AspectPreset::Free,
        AspectPreset::Original,
        AspectPreset::Square,
        AspectPreset::R4to3,
        AspectPreset::R16to9,
        AspectPreset::R3to2,
    ];

    /// The id used in markup (`data-preset`).
    pub fn id(self) -> &'static str {
        match self {
            AspectPreset::Free => "free",
            AspectPreset::Original => "original",
            AspectPreset::Square => "1:1",
            AspectPreset::R4to3 => "4:3",
            AspectPreset::R16to9 => "16:9",
            AspectPreset::R3to2 => "3:2",
        }
    }

    /// Button label.
    pub fn label(self) -> &'static str {
        match self {
            AspectPreset::Free => "Free",
            AspectPreset::Original => "Original",
            other => other.id(),
        }
    }

    /// Width and height terms of a fixed ratio.
    pub fn fraction(self) -> Option<(u32, u32)> {
        match self {
            AspectPreset::Free | AspectPreset::Original => None,
            AspectPreset::Square => Some((1, 1)),
            AspectPreset::R4to3 => Some((4, 3)),
            AspectPreset::R16to9 => Some((16, 9)),
            AspectPreset::R3to2 => Some((3, 2)),
        }
    }

    /// Resolve the preset into a constraint.
    ///
    /// `Original` needs the frame; without one it resolves to `None`.
    pub fn constraint(self, frame: Option<&ImageFrame>) -> Option<AspectConstraint> {
        match self {
            AspectPreset::Free => Some(AspectConstraint::Free),
            AspectPreset::Original => {
                frame.and_then(|f| AspectConstraint::locked(f.natural_aspect()))
            }
            fixed => {
                let (w, h) = fixed.fraction()?;
                AspectConstraint::locked(w as f64 / h as f64)
            }
        }
    }
}

impl fmt::Display for AspectPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for AspectPreset {
    type Err = CropError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AspectPreset::ALL
            .into_iter()
            .find(|p| p.id() == s)
            .ok_or_else(|| CropError::UnknownPreset(s.to_string()))
    }
}

/// Width-to-height lock applied by the solver.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum AspectConstraint {
    #[default]
    Free,
    /// `width / height`, always finite and positive.
    Locked(f64),
}

impl AspectConstraint {
    /// Lock to `ratio`, or `None` if it is not a finite positive number.
    pub fn locked(ratio: f64) -> Option<Self> {
        (ratio.is_finite() && ratio > 0.0).then_some(AspectConstraint::Locked(ratio))
    }

    pub fn ratio(self) -> Option<f64> {
        match self {
            AspectConstraint::Free => None,
            AspectConstraint::Locked(r) => Some(r),
        }
    }

    pub fn is_free(self) -> bool {
        matches!(self, AspectConstraint::Free)
    }
}
