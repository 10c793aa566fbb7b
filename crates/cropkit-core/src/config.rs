//! Editor tuning knobs.

use serde::Deserialize;

/// Sizes used by the solver and initial layout, in container pixels.
///
/// Every field has a serde default so callers can pass a partial object.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct EditorConfig {
    /// Smallest width or height a resize may produce.
    #[serde(default = "default_min_size")]
    pub min_size: f64,
    /// Upper bound for the gap around the initial rectangle.
    #[serde(default = "default_max_padding")]
    pub max_padding: f64,
    /// Initial gap as a fraction of each container side, below one half.
    #[serde(default = "default_padding_fraction")]
    pub padding_fraction: f64,
    /// Smallest side of the initial rectangle, room permitting.
    #[serde(default = "default_min_initial_size")]
    pub min_initial_size: f64,
    /// Gap left to the container when a preset would overflow it.
    #[serde(default = "default_preset_margin")]
    pub preset_margin: f64,
}

fn default_min_size() -> f64 {
    30.0
}

fn default_max_padding() -> f64 {
    20.0
}

fn default_padding_fraction() -> f64 {
    0.1
}

fn default_min_initial_size() -> f64 {
    50.0
}

fn default_preset_margin() -> f64 {
    20.0
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            min_size: default_min_size(),
            max_padding: default_max_padding(),
            padding_fraction: default_padding_fraction(),
            min_initial_size: default_min_initial_size(),
            preset_margin: default_preset_margin(),
        }
    }
}

impl EditorConfig {
    /// Replace negative or non-finite values with their defaults.
    ///
    /// A `padding_fraction` of one half or more would leave no room for the
    /// initial rectangle and falls back to the default as well.
    pub fn sanitized(self) -> Self {
        let pick = |v: f64, d: fn() -> f64| if v.is_finite() && v >= 0.0 { v } else { d() };
        let padding_fraction = if self.padding_fraction < 0.5 {
            pick(self.padding_fraction, default_padding_fraction)
        } else {
            default_padding_fraction()
        };
        Self {
            min_size: pick(self.min_size, default_min_size),
            max_padding: pick(self.max_padding, default_max_padding),
            padding_fraction,
            min_initial_size: pick(self.min_initial_size, default_min_initial_size),
            preset_margin: pick(self.preset_margin, default_preset_margin),
        }
    }
}
