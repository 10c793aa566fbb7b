//! Crop handles.
//!
//! A handle names what a drag affects: the whole rectangle (`move`) or one
//! of eight resize grips. Each resize grip decomposes into an optional
//! horizontal edge and an optional vertical edge.

use crate::error::CropError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Horizontal edge moved by a resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HEdge {
    Left,
    Right,
}

/// Vertical edge moved by a resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VEdge {
    Top,
    Bottom,
}

/// Grab point for a crop gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handle {
    Move,
    N,
    S,
    E,
    W,
    Ne,
    Nw,
    Se,
    Sw,
}

impl Handle {
    /// Every handle, move first.
    pub const ALL: [Handle; 9] = [
        Handle::Move,
        Handle::N,
        Handle::S,
        Handle::E,
        Handle::W,
        Handle::Ne,
        Handle::Nw,
        Handle::Se,
        Handle::Sw,
    ];

    /// The id used in markup (`data-handle`).
    pub fn id(self) -> &'static str {
        match self {
            Handle::Move => "move",
            Handle::N => "n",
            Handle::S => "s",
            Handle::E => "e",
            Handle::W => "w",
            Handle::Ne => "ne",
            Handle::Nw => "nw",
            Handle::Se => "se",
            Handle::Sw => "sw",
        }
    }

    pub fn is_move(self) -> bool {
        matches!(self, Handle::Move)
    }

    /// Horizontal edge this handle drags, if any.
    pub fn h_edge(self) -> Option<HEdge> {
        match self {
            Handle::E | Handle::Ne | Handle::Se => Some(HEdge::Right),
            Handle::W | Handle::Nw | Handle::Sw => Some(HEdge::Left),
            Handle::Move | Handle::N | Handle::S => None,
        }
    }

    /// Vertical edge this handle drags, if any.
    pub fn v_edge(self) -> Option<VEdge> {
        match self {
            Handle::S | Handle::Se | Handle::Sw => Some(VEdge::Bottom),
            Handle::N | Handle::Ne | Handle::Nw => Some(VEdge::Top),
            Handle::Move | Handle::E | Handle::W => None,
        }
    }

    /// CSS cursor shown while hovering or dragging this handle.
    ///
    /// `dragging` only matters for `move`, which switches to a closed hand.
    pub fn cursor_name(self, dragging: bool) -> &'static str {
        match self {
            Handle::Move if dragging => "grabbing",
            Handle::Move => "move",
            Handle::N => "n-resize",
            Handle::S => "s-resize",
            Handle::E => "e-resize",
            Handle::W => "w-resize",
            Handle::Ne => "ne-resize",
            Handle::Nw => "nw-resize",
            Handle::Se => "se-resize",
            Handle::Sw => "sw-resize",
        }
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Handle {
    type Err = CropError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Handle::ALL
            .into_iter()
            .find(|h| h.id() == s)
            .ok_or_else(|| CropError::UnknownHandle(s.to_string()))
    }
}
