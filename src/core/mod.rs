//! Core types: card identity, move descriptors, the logical clock,
//! configuration and errors.
//!
//! Everything here is plain data shared by the scene, layout and pile
//! modules.

pub mod card;
pub mod moves;
pub mod tick;
pub mod config;
pub mod error;

pub use card::CardId;
pub use moves::{CardsMove, MoveReason, MoveReasonKind, Place};
pub use tick::Tick;
pub use config::PileConfig;
pub use error::{PileError, PileResult};
