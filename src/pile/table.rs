//! The table pile: face-up cards waiting to be cleared away.
//!
//! Two kinds of callers touch the pile concurrently:
//! - game events: `add_cards`, `remove_cards`, `clear`, `show_judgment_result`
//! - the clearance scheduler: `on_tick`
//!
//! Both go through one mutex around `PileState`. Every method edits the
//! list under the lock, drops the guard, and only then starts animations and
//! the re-layout pass.

use std::sync::atomic::{AtomicUsize, Ordering};

use kurbo::{Affine, Point, Rect, Vec2};
use parking_lot::{Mutex, RwLock};
use tracing::{debug, trace};

use super::state::{dedup_batch, fade_out, PileSnapshot, PileState};
use crate::core::card::CardId;
use crate::core::config::PileConfig;
use crate::core::error::PileResult;
use crate::core::moves::{CardsMove, MoveReasonKind};
use crate::core::tick::Tick;
use crate::layout::{CenteredRow, DisperseOptions, DisperseTarget, Disperser};
use crate::scene::{AnimationGroup, CardVisual, Scene};

/// Display region and the values derived from it.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Geometry {
    region: Rect,
    num_cards_visible: usize,
    transform: Affine,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            region: Rect::ZERO,
            num_cards_visible: 1,
            transform: Affine::IDENTITY,
        }
    }
}

/// Pile of face-up cards on the table.
///
/// ## Usage
///
/// ```
/// use table_pile::core::{CardId, CardsMove, MoveReasonKind, PileConfig, Place};
/// use table_pile::pile::TablePile;
/// use table_pile::scene::{HeadlessScene, Scene};
///
/// let pile = TablePile::new(HeadlessScene::new(), PileConfig::default()).unwrap();
/// pile.resize(600.0, 200.0);
///
/// let played = pile.scene().create_visuals(&[CardId(12)]);
/// let mv = CardsMove::new(Place::Hand, Place::Table, MoveReasonKind::Use);
/// pile.add_cards(&played, &mv);
/// assert_eq!(pile.len(), 1);
///
/// // Schedule everything for removal; the scheduler does the rest
/// pile.clear(true);
/// for _ in 0..4 {
///     pile.on_tick();
/// }
/// assert!(pile.is_empty());
/// ```
pub struct TablePile<S: Scene, L = CenteredRow> {
    scene: S,
    disperser: L,
    config: PileConfig,
    state: Mutex<PileState<S::Visual>>,
    /// Mirror of the visible count for the unlocked emptiness pre-check.
    visible: AtomicUsize,
    /// Serializes layout passes so an older snapshot never lands last.
    /// Never taken while `state` is held.
    layout: Mutex<()>,
    geometry: RwLock<Geometry>,
}

impl<S: Scene> TablePile<S, CenteredRow> {
    /// Create a pile laid out as a single centered row.
    pub fn new(scene: S, config: PileConfig) -> PileResult<Self> {
        let disperser = CenteredRow::new(config.card_width);
        Self::with_disperser(scene, disperser, config)
    }
}

impl<S: Scene, L: Disperser> TablePile<S, L> {
    /// Create a pile with a custom layout engine.
    pub fn with_disperser(scene: S, disperser: L, config: PileConfig) -> PileResult<Self> {
        config.validate()?;
        Ok(Self {
            scene,
            disperser,
            config,
            state: Mutex::new(PileState::default()),
            visible: AtomicUsize::new(0),
            layout: Mutex::new(()),
            geometry: RwLock::new(Geometry::default()),
        })
    }

    /// The scene this pile draws into.
    pub fn scene(&self) -> &S {
        &self.scene
    }

    /// Active configuration.
    pub fn config(&self) -> &PileConfig {
        &self.config
    }

    // === Mutation ===

    /// Hand visuals for `cards` to the caller, laid out around the center.
    ///
    /// The visuals are fresh and not tracked by the pile. Moves into a
    /// special placement are handled elsewhere and yield nothing.
    pub fn remove_cards(&self, cards: &[CardId], mv: &CardsMove) -> Vec<S::Visual> {
        if mv.is_to_special() {
            return Vec::new();
        }

        let center = self.bounding_region().center();
        let _state = self.state.lock();
        let visuals = self.scene.create_visuals(cards);
        self.disperser.disperse(
            &visuals,
            DisperseTarget::Point(center),
            DisperseOptions::snapped(),
        );
        debug!(count = visuals.len(), to = ?mv.to, "handing cards off the table");
        visuals
    }

    /// Put visuals on the table.
    ///
    /// Cards that entered naturally are destroyed and swapped (or
    /// hidden-skill) cards are hidden; neither joins the pile. Otherwise
    /// older visuals of the same cards are faded out and the new ones are
    /// appended on the right. If the batch itself repeats a card, only its
    /// last visual is kept.
    ///
    /// Always returns `false`: the caller never needs to do more.
    pub fn add_cards(&self, cards: &[S::Visual], mv: &CardsMove) -> bool {
        if cards.is_empty() {
            return false;
        }

        let reason = &mv.reason;
        if reason.kind == MoveReasonKind::NaturalEnter {
            for card in cards {
                card.delete_later();
            }
            return false;
        }
        if reason.kind == MoveReasonKind::Swap
            || reason
                .skill_name
                .as_deref()
                .is_some_and(|skill| self.config.hides_skill(skill))
        {
            for card in cards {
                card.hide();
            }
            return false;
        }

        let region_center = self.bounding_region().center();
        let card_step = Vec2::new(self.config.card_width, 0.0);

        let (cards, repeated) = dedup_batch(cards);

        let evicted = {
            let mut state = self.state.lock();

            let mut evicted = state.evict_duplicates(&cards);
            evicted.extend(repeated);
            let evicted_count = evicted.len();
            let fade = fade_out(evicted, self.config.fade_out_ms);

            let mut anchor = state
                .right_of_last(self.config.card_width)
                .unwrap_or(region_center);

            state.append(&cards);

            for card in &cards {
                card.set_home_opacity(1.0);
                card.show_footnote();
                if mv.from.slides_in() {
                    card.set_opacity(0.0);
                    card.set_pos(anchor);
                    anchor += card_step;
                }
            }

            self.visible.store(state.len(), Ordering::Release);
            debug!(
                added = cards.len(),
                evicted = evicted_count,
                visible = state.len(),
                from = ?mv.from,
                "cards added to table"
            );
            fade
        };

        self.start(evicted);
        self.adjust_cards();
        false
    }

    /// Clear the pile.
    ///
    /// Delayed: stamp every card with the current tick and let the
    /// scheduler take them. Immediate: fade everything out now.
    pub fn clear(&self, delayed: bool) {
        if self.visible.load(Ordering::Acquire) == 0 {
            return;
        }

        let fade = {
            let mut state = self.state.lock();
            // Re-check now that we hold the lock.
            if state.is_empty() {
                return;
            }

            if delayed {
                state.mark_clearance();
                debug!(tick = %state.tick(), visible = state.len(), "table clearance scheduled");
                None
            } else {
                let drained = state.drain();
                self.visible.store(0, Ordering::Release);
                debug!(cleared = drained.len(), "table cleared");
                fade_out(drained, self.config.fade_out_ms)
            }
        };

        self.start(fade);
    }

    /// Delayed clear: `clear(true)`.
    pub fn clear_delayed(&self) {
        self.clear(true);
    }

    /// Immediate clear: `clear(false)`.
    pub fn clear_now(&self) {
        self.clear(false);
    }

    /// Stamp the most recent visual of `card` with a judgment result.
    ///
    /// If the card is not on the table a placeholder visual carries the
    /// effect and is scheduled for destruction right after.
    pub fn show_judgment_result(&self, card: CardId, took_effect: bool) {
        let (judge_card, placeholder) = {
            let state = self.state.lock();
            match state.find_latest(card) {
                Some(visual) => (visual, false),
                None => (self.scene.create_visual(card), true),
            }
        };

        self.scene
            .play_effect(&judge_card, self.config.judge_effect(took_effect));
        if placeholder {
            judge_card.delete_later();
        }
        self.adjust_cards();
    }

    // === Scheduling ===

    /// One scheduler tick: advance the clock and clear stale cards.
    pub fn on_tick(&self) {
        let fade = {
            let mut state = self.state.lock();
            let expired = state.advance(self.config.clearance_delay_ticks);
            trace!(tick = %state.tick(), expired = expired.len(), "table pile tick");

            if expired.is_empty() {
                return;
            }

            self.visible.store(state.len(), Ordering::Release);
            debug!(expired = expired.len(), visible = state.len(), "stale cards cleared");
            fade_out(expired, self.config.fade_out_ms)
        };

        self.start(fade);
        self.adjust_cards();
    }

    // === Layout ===

    /// Re-layout every visible card and glide them into place.
    ///
    /// Passes run one at a time, each on a snapshot taken after the
    /// previous pass finished.
    pub fn adjust_cards(&self) {
        if self.visible.load(Ordering::Acquire) == 0 {
            return;
        }

        let _layout = self.layout.lock();
        let visuals = self.state.lock().visuals();
        if visuals.is_empty() {
            return;
        }

        self.disperser.disperse(
            &visuals,
            DisperseTarget::Region(self.bounding_region()),
            DisperseOptions::relayout(),
        );

        let duration = match self.config.layout_ms {
            0 => None,
            ms => Some(ms),
        };
        let group: AnimationGroup<_> = visuals
            .iter()
            .map(|v| v.go_back_animation(true, true, duration))
            .collect();
        self.scene.start(group);
    }

    /// Resize the display region.
    ///
    /// Recomputes how many cards fit side by side and re-anchors the pile
    /// on its own center. Visible cards are not moved.
    pub fn resize(&self, width: f64, height: f64) {
        let num_cards_visible = if width > 0.0 {
            (width / self.config.card_width) as usize + 1
        } else {
            1
        };

        let mut geometry = self.geometry.write();
        *geometry = Geometry {
            region: Rect::from_origin_size(Point::ZERO, (width, height)),
            num_cards_visible,
            transform: Affine::translate((-width / 2.0, -height / 2.0)),
        };
        debug!(width, height, num_cards_visible, "table pile resized");
    }

    // === Queries ===

    /// Current display bounds.
    pub fn bounding_region(&self) -> Rect {
        self.geometry.read().region
    }

    /// How many cards fit side by side without overlapping.
    pub fn num_cards_visible(&self) -> usize {
        self.geometry.read().num_cards_visible
    }

    /// Transform placing the region's center at the pile's origin.
    pub fn transform(&self) -> Affine {
        self.geometry.read().transform
    }

    /// Current scheduler tick.
    pub fn current_tick(&self) -> Tick {
        self.state.lock().tick()
    }

    /// Number of visible cards.
    pub fn len(&self) -> usize {
        self.state.lock().len()
    }

    /// Check if no cards are visible.
    pub fn is_empty(&self) -> bool {
        self.state.lock().is_empty()
    }

    /// Handles to the visible cards, left to right.
    pub fn visible_cards(&self) -> Vec<S::Visual> {
        self.state.lock().visuals()
    }

    /// Consistent view of ids, stamps and enabled flags.
    pub fn snapshot(&self) -> PileSnapshot {
        self.state.lock().snapshot()
    }

    fn start(&self, group: Option<AnimationGroup<S::Visual>>) {
        if let Some(group) = group {
            self.scene.start(group);
        }
    }
}

impl<S: Scene, L> std::fmt::Debug for TablePile<S, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TablePile")
            .field("visible", &self.visible.load(Ordering::Relaxed))
            .field("geometry", &*self.geometry.read())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
