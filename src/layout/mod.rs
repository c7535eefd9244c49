//! Dispersal: arranging a set of visuals inside a region.
//!
//! The pile treats layout as a black box. Any `Disperser` can be plugged
//! in; `CenteredRow` is the default.

pub mod row;

pub use row::CenteredRow;

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

use crate::scene::CardVisual;

/// Where to lay visuals out.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DisperseTarget {
    /// Fit inside a region.
    Region(Rect),
    /// Center on a point, without a width limit.
    Point(Point),
}

impl DisperseTarget {
    /// Center of the target.
    #[must_use]
    pub fn center(&self) -> Point {
        match self {
            DisperseTarget::Region(rect) => rect.center(),
            DisperseTarget::Point(point) => *point,
        }
    }
}

/// Horizontal alignment of a row within a region.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alignment {
    /// Flush left.
    Left,
    /// Centered.
    #[default]
    Center,
    /// Flush right.
    Right,
}

/// How a dispersal pass writes its results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DisperseOptions {
    /// Row alignment.
    pub align: Alignment,

    /// Also move the rendered position, not just the home position.
    /// Used when the visuals should jump rather than glide.
    pub snap: bool,

    /// Rewrite stacking depth so later cards draw on top.
    pub reorder: bool,
}

impl DisperseOptions {
    /// Centered, gliding, reordered: the pile's own re-layout.
    #[must_use]
    pub fn relayout() -> Self {
        Self {
            align: Alignment::Center,
            snap: false,
            reorder: true,
        }
    }

    /// Centered, jumping, order untouched: visuals handed back to callers.
    #[must_use]
    pub fn snapped() -> Self {
        Self {
            align: Alignment::Center,
            snap: true,
            reorder: false,
        }
    }
}

/// Layout engine.
///
/// Implementations write home positions in place, in slice order
/// (left to right).
pub trait Disperser: Send + Sync {
    /// Lay `visuals` out within `target`.
    fn disperse<V: CardVisual>(&self, visuals: &[V], target: DisperseTarget, options: DisperseOptions);
}
