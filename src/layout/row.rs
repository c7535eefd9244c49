//! Single-row layout.
//!
//! Cards sit side by side, one card width apart, centered on the target.
//! When a region is too narrow for the row, the step between cards shrinks
//! so the row still fits and cards overlap.

use kurbo::Point;

use super::{Alignment, DisperseOptions, DisperseTarget, Disperser};
use crate::scene::CardVisual;

/// Default disperser: one centered row of cards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CenteredRow {
    card_width: f64,
}

impl CenteredRow {
    /// Create a row layout for cards of the given width.
    #[must_use]
    pub fn new(card_width: f64) -> Self {
        Self { card_width }
    }

    /// Card width used for spacing.
    #[must_use]
    pub fn card_width(&self) -> f64 {
        self.card_width
    }

    /// Distance between neighbouring card centers for `n` cards.
    #[must_use]
    pub fn step(&self, n: usize, target: &DisperseTarget) -> f64 {
        match target {
            DisperseTarget::Region(rect) if n > 1 => {
                let natural = self.card_width * n as f64;
                if natural <= rect.width() {
                    self.card_width
                } else {
                    ((rect.width() - self.card_width) / (n - 1) as f64).max(0.0)
                }
            }
            _ => self.card_width,
        }
    }

    /// Card-center positions for `n` cards, left to right.
    #[must_use]
    pub fn positions(&self, n: usize, target: &DisperseTarget, align: Alignment) -> Vec<Point> {
        if n == 0 {
            return Vec::new();
        }

        let step = self.step(n, target);
        let span = step * (n - 1) as f64;
        let center = target.center();

        let first_x = match (target, align) {
            (DisperseTarget::Region(rect), Alignment::Left) => rect.x0 + self.card_width / 2.0,
            (DisperseTarget::Region(rect), Alignment::Right) => {
                rect.x1 - self.card_width / 2.0 - span
            }
            _ => center.x - span / 2.0,
        };

        (0..n)
            .map(|i| Point::new(first_x + step * i as f64, center.y))
            .collect()
    }
}

impl Disperser for CenteredRow {
    fn disperse<V: CardVisual>(&self, visuals: &[V], target: DisperseTarget, options: DisperseOptions) {
        let positions = self.positions(visuals.len(), &target, options.align);

        for (i, (visual, pos)) in visuals.iter().zip(positions).enumerate() {
            visual.set_home_pos(pos);
            if options.snap {
                visual.set_pos(pos);
            }
            if options.reorder {
                visual.set_z_value(i as f64);
            }
        }
    }
}
