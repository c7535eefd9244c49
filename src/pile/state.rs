//! Lock-protected pile data.
//!
//! `PileState` is only ever reached through the `TablePile` mutex. Methods
//! here edit the list and the clock and prepare animation groups; they
//! never start animations or call into the scene.

use kurbo::{Point, Vec2};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::card::CardId;
use crate::core::tick::Tick;
use crate::scene::{AnimationGroup, CardVisual};

/// Visuals leaving the pile in one pass. Usually a handful.
pub(crate) type Batch<V> = SmallVec<[V; 8]>;

/// A visual in the pile and the tick at which it becomes stale.
#[derive(Clone, Debug)]
pub(crate) struct PileEntry<V> {
    pub(crate) visual: V,
    pub(crate) clear_at: Tick,
}

/// Visible cards plus the logical clock.
#[derive(Debug)]
pub(crate) struct PileState<V> {
    entries: Vec<PileEntry<V>>,
    tick: Tick,
}

impl<V> Default for PileState<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            tick: Tick::ZERO,
        }
    }
}

impl<V: CardVisual> PileState<V> {
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn tick(&self) -> Tick {
        self.tick
    }

    /// Handles to all visible cards, left to right.
    pub(crate) fn visuals(&self) -> Vec<V> {
        self.entries.iter().map(|e| e.visual.clone()).collect()
    }

    /// Take out every visible card showing the same card as one of
    /// `incoming`. Unknown cards never match.
    pub(crate) fn evict_duplicates(&mut self, incoming: &[V]) -> Batch<V> {
        let ids: FxHashSet<CardId> = incoming
            .iter()
            .map(|v| v.card_id())
            .filter(|id| !id.is_unknown())
            .collect();

        let mut evicted = Batch::new();
        if ids.is_empty() {
            return evicted;
        }

        self.entries.retain(|entry| {
            let id = entry.visual.card_id();
            if !id.is_unknown() && ids.contains(&id) {
                evicted.push(entry.visual.clone());
                false
            } else {
                true
            }
        });
        evicted
    }

    /// Home position one card to the right of the last visible card.
    pub(crate) fn right_of_last(&self, card_width: f64) -> Option<Point> {
        self.entries
            .last()
            .map(|e| e.visual.home_pos() + Vec2::new(card_width, 0.0))
    }

    /// Append visuals that never go stale on their own.
    pub(crate) fn append(&mut self, visuals: &[V]) {
        self.entries.extend(visuals.iter().map(|visual| PileEntry {
            visual: visual.clone(),
            clear_at: Tick::NEVER,
        }));
    }

    /// Advance the clock one tick.
    ///
    /// Cards more than `delay` ticks past their stamp are taken out and
    /// returned. Cards merely past their stamp are disabled in place.
    pub(crate) fn advance(&mut self, delay: u64) -> Batch<V> {
        self.tick = self.tick.next();
        let now = self.tick;

        let mut expired = Batch::new();
        self.entries.retain(|entry| {
            if now.since(entry.clear_at) > delay {
                expired.push(entry.visual.clone());
                false
            } else {
                if now > entry.clear_at {
                    entry.visual.set_enabled(false);
                }
                true
            }
        });
        expired
    }

    /// Schedule every visible card for clearance at the current tick.
    ///
    /// Stamps only move earlier, never later.
    pub(crate) fn mark_clearance(&mut self) {
        let now = self.tick;
        for entry in &mut self.entries {
            entry.clear_at = entry.clear_at.min(now);
        }
    }

    /// Take out every visible card.
    pub(crate) fn drain(&mut self) -> Batch<V> {
        self.entries.drain(..).map(|e| e.visual).collect()
    }

    /// Most recently added visual showing `card`.
    pub(crate) fn find_latest(&self, card: CardId) -> Option<V> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.visual.card_id().same_card(card))
            .map(|e| e.visual.clone())
    }
}

/// Split a batch so each known card appears once, keeping its last visual.
///
/// Returns the kept visuals in batch order and the earlier repeats.
/// Unknown cards are always kept.
pub(crate) fn dedup_batch<V: CardVisual>(incoming: &[V]) -> (Vec<V>, Batch<V>) {
    let mut seen = FxHashSet::default();
    let mut kept = Vec::with_capacity(incoming.len());
    let mut repeated = Batch::new();

    for visual in incoming.iter().rev() {
        let id = visual.card_id();
        if id.is_unknown() || seen.insert(id) {
            kept.push(visual.clone());
        } else {
            repeated.push(visual.clone());
        }
    }

    kept.reverse();
    (kept, repeated)
}

/// Prepare visuals that left the pile for their exit.
///
/// Each visual drops to the base layer, targets full transparency at its
/// current home position, and is scheduled for destruction. The returned
/// group fades them all out in parallel; `None` if there was nothing to fade.
pub(crate) fn fade_out<V: CardVisual>(
    visuals: impl IntoIterator<Item = V>,
    duration_ms: u32,
) -> Option<AnimationGroup<V>> {
    let group: AnimationGroup<V> = visuals
        .into_iter()
        .map(|visual| {
            visual.set_z_value(0.0);
            visual.set_home_opacity(0.0);
            visual.delete_later();
            visual.go_back_animation(true, true, Some(duration_ms))
        })
        .collect();

    if group.is_empty() {
        None
    } else {
        Some(group)
    }
}

/// Read-only view of one visible card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    /// Card shown.
    pub card_id: CardId,
    /// Tick at which the card becomes stale.
    pub clear_at: Tick,
    /// Whether the visual is still enabled.
    pub enabled: bool,
}

/// Read-only view of the whole pile at one instant.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PileSnapshot {
    /// Clock at the time of the snapshot.
    pub tick: Tick,
    /// Visible cards, left to right.
    pub cards: Vec<SnapshotEntry>,
}

impl PileSnapshot {
    /// Card ids, left to right.
    #[must_use]
    pub fn card_ids(&self) -> Vec<CardId> {
        self.cards.iter().map(|c| c.card_id).collect()
    }
}

impl<V: CardVisual> PileState<V> {
    /// Capture ids, stamps and enabled flags.
    pub(crate) fn snapshot(&self) -> PileSnapshot {
        PileSnapshot {
            tick: self.tick,
            cards: self
                .entries
                .iter()
                .map(|e| SnapshotEntry {
                    card_id: e.visual.card_id(),
                    clear_at: e.clear_at,
                    enabled: e.visual.is_enabled(),
                })
                .collect(),
        }
    }
}
