//! # table-pile
//!
//! The pile of face-up cards shown on the table during a card game match.
//!
//! Cards land here when they are played and linger until they are moved on
//! or grow stale. The pile animates new arrivals in, evicts older visuals
//! of the same card, fades stale cards out on a timer, and keeps the
//! remaining cards laid out inside its display region.
//!
//! ## Design Principles
//!
//! 1. **Renderer-Agnostic**: Visuals, animations and effects are reached
//!    through the `Scene` and `CardVisual` traits. Nothing here draws.
//!
//! 2. **One Lock, Never Across Animations**: All list and clock edits happen
//!    under a single mutex. Animation groups are built while locked and
//!    started after the guard is released.
//!
//! 3. **Host-Owned Time**: Clearance runs on logical ticks. The host calls
//!    `TablePile::on_tick` at its own cadence, or spawns a `ClearanceTimer`.
//!
//! ## Clearance
//!
//! Every card carries a clearance stamp, "never" when it arrives. A delayed
//! `clear` pulls every stamp to the current tick. Once the clock passes a
//! card's stamp the card is disabled; more than `clearance_delay_ticks`
//! later it is faded out and removed.
//!
//! ## Modules
//!
//! - `core`: Card ids, move descriptors, ticks, configuration, errors
//! - `scene`: Collaborator traits and the headless scene
//! - `layout`: Dispersal of visuals within a region
//! - `pile`: The table pile and its clearance timer

pub mod core;
pub mod scene;
pub mod layout;
pub mod pile;

// Re-export commonly used types
pub use crate::core::{
    CardId, CardsMove, MoveReason, MoveReasonKind, Place,
    Tick, PileConfig, PileError, PileResult,
};

pub use crate::scene::{Animation, AnimationGroup, CardVisual, Scene, HeadlessCard, HeadlessScene};

pub use crate::layout::{Alignment, CenteredRow, DisperseOptions, DisperseTarget, Disperser};

pub use crate::pile::{ClearanceTimer, PileSnapshot, SnapshotEntry, TablePile};
