//! Logical clock for clearance scheduling.
//!
//! One tick is one invocation of the clearance scheduler. The clock only
//! ever moves forward, one step at a time.

use serde::{Deserialize, Serialize};

/// A point on the pile's logical clock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Tick(pub u64);

impl Tick {
    /// Clock origin.
    pub const ZERO: Tick = Tick(0);

    /// Clearance stamp of a card that is not scheduled for removal.
    pub const NEVER: Tick = Tick(u64::MAX);

    /// Get the raw tick count.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// The following tick.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Ticks elapsed since `earlier`, zero if `earlier` is in the future.
    #[must_use]
    pub const fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// Check if this is the "never" stamp.
    #[must_use]
    pub const fn is_never(self) -> bool {
        self.0 == u64::MAX
    }
}

impl std::fmt::Display for Tick {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_never() {
            write!(f, "Tick(never)")
        } else {
            write!(f, "Tick({})", self.0)
        }
    }
}
