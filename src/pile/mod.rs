//! The table pile and its clearance scheduler.
//!
//! ## Key Types
//!
//! - `TablePile`: visible cards, their clearance stamps and the public API
//! - `PileSnapshot`: read-only view for inspection
//! - `ClearanceTimer`: background thread calling `TablePile::on_tick`

pub(crate) mod state;
pub mod table;
pub mod timer;

pub use state::{PileSnapshot, SnapshotEntry};
pub use table::TablePile;
pub use timer::ClearanceTimer;
