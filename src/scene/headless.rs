//! In-memory scene that records what the pile asks of it.
//!
//! Nothing is drawn and nothing animates on its own. Started groups stay
//! "running" until `HeadlessScene::finish_animations` completes them, which
//! lets tests observe the state a card is in before its animation lands.
//!
//! ## Usage
//!
//! ```
//! use table_pile::core::CardId;
//! use table_pile::scene::{CardVisual, HeadlessScene, Scene};
//!
//! let scene = HeadlessScene::new();
//! let card = scene.create_visual(CardId(7));
//! card.set_home_opacity(0.0);
//!
//! scene.start(std::iter::once(card.go_back_animation(false, true, None)).collect());
//! assert_eq!(scene.running_groups(), 1);
//!
//! scene.finish_animations();
//! assert_eq!(card.opacity(), 0.0);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use kurbo::Point;
use parking_lot::Mutex;

use super::{Animation, AnimationGroup, CardVisual, Scene};
use crate::core::card::CardId;

#[derive(Debug)]
struct CardState {
    home_pos: Point,
    pos: Point,
    home_opacity: f64,
    opacity: f64,
    enabled: bool,
    z_value: f64,
    footnote: bool,
    hidden: bool,
    delete_scheduled: bool,
}

impl Default for CardState {
    fn default() -> Self {
        Self {
            home_pos: Point::ZERO,
            pos: Point::ZERO,
            home_opacity: 1.0,
            opacity: 1.0,
            enabled: true,
            z_value: 0.0,
            footnote: false,
            hidden: false,
            delete_scheduled: false,
        }
    }
}

/// Card visual backed by shared in-memory state.
///
/// Clones share state. Equality is identity: two handles are equal only if
/// they refer to the same visual.
#[derive(Clone, Debug)]
pub struct HeadlessCard {
    serial: u64,
    card_id: CardId,
    state: Arc<Mutex<CardState>>,
}

impl PartialEq for HeadlessCard {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }
}

impl Eq for HeadlessCard {}

impl HeadlessCard {
    fn new(serial: u64, card_id: CardId) -> Self {
        Self {
            serial,
            card_id,
            state: Arc::new(Mutex::new(CardState::default())),
        }
    }

    /// Creation order within the owning scene.
    #[must_use]
    pub fn serial(&self) -> u64 {
        self.serial
    }

    /// Rendered position.
    #[must_use]
    pub fn pos(&self) -> Point {
        self.state.lock().pos
    }

    /// Rendered opacity.
    #[must_use]
    pub fn opacity(&self) -> f64 {
        self.state.lock().opacity
    }

    /// Stacking depth.
    #[must_use]
    pub fn z_value(&self) -> f64 {
        self.state.lock().z_value
    }

    /// Check if the footnote is shown.
    #[must_use]
    pub fn footnote_shown(&self) -> bool {
        self.state.lock().footnote
    }

    /// Check if the visual was hidden.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.state.lock().hidden
    }

    /// Check if deferred destruction was requested.
    #[must_use]
    pub fn is_delete_scheduled(&self) -> bool {
        self.state.lock().delete_scheduled
    }
}

impl CardVisual for HeadlessCard {
    fn card_id(&self) -> CardId {
        self.card_id
    }

    fn home_pos(&self) -> Point {
        self.state.lock().home_pos
    }

    fn set_home_pos(&self, pos: Point) {
        self.state.lock().home_pos = pos;
    }

    fn home_opacity(&self) -> f64 {
        self.state.lock().home_opacity
    }

    fn set_home_opacity(&self, opacity: f64) {
        self.state.lock().home_opacity = opacity;
    }

    fn set_pos(&self, pos: Point) {
        self.state.lock().pos = pos;
    }

    fn set_opacity(&self, opacity: f64) {
        self.state.lock().opacity = opacity;
    }

    fn set_enabled(&self, enabled: bool) {
        self.state.lock().enabled = enabled;
    }

    fn is_enabled(&self) -> bool {
        self.state.lock().enabled
    }

    fn set_z_value(&self, z: f64) {
        self.state.lock().z_value = z;
    }

    fn show_footnote(&self) {
        self.state.lock().footnote = true;
    }

    fn hide(&self) {
        self.state.lock().hidden = true;
    }

    fn delete_later(&self) {
        self.state.lock().delete_scheduled = true;
    }
}

#[derive(Debug, Default)]
struct SceneLog {
    running: Vec<AnimationGroup<HeadlessCard>>,
    groups_started: usize,
    effects: Vec<(HeadlessCard, String)>,
}

/// Scene that records started groups and effects.
#[derive(Debug, Default)]
pub struct HeadlessScene {
    next_serial: AtomicU64,
    log: Mutex<SceneLog>,
}

impl HeadlessScene {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of visuals created so far.
    #[must_use]
    pub fn visuals_created(&self) -> u64 {
        self.next_serial.load(Ordering::Relaxed)
    }

    /// Total groups handed to `start`.
    #[must_use]
    pub fn groups_started(&self) -> usize {
        self.log.lock().groups_started
    }

    /// Groups started but not yet finished.
    #[must_use]
    pub fn running_groups(&self) -> usize {
        self.log.lock().running.len()
    }

    /// Clone of the running groups, oldest first.
    #[must_use]
    pub fn running(&self) -> Vec<AnimationGroup<HeadlessCard>> {
        self.log.lock().running.clone()
    }

    /// Effects played so far, oldest first.
    #[must_use]
    pub fn effects(&self) -> Vec<(CardId, String)> {
        self.log
            .lock()
            .effects
            .iter()
            .map(|(visual, effect)| (visual.card_id, effect.clone()))
            .collect()
    }

    /// Visuals that carried each effect, oldest first.
    #[must_use]
    pub fn effect_visuals(&self) -> Vec<HeadlessCard> {
        self.log.lock().effects.iter().map(|(visual, _)| visual.clone()).collect()
    }

    /// Run every pending group to its end state and dispose of it.
    ///
    /// Returns the number of groups completed.
    pub fn finish_animations(&self) -> usize {
        let groups = std::mem::take(&mut self.log.lock().running);
        let count = groups.len();

        for animation in groups.into_iter().flatten() {
            match animation {
                Animation::GoBack {
                    visual,
                    animate_position,
                    animate_opacity,
                    ..
                } => {
                    let mut state = visual.state.lock();
                    if animate_position {
                        state.pos = state.home_pos;
                    }
                    if animate_opacity {
                        state.opacity = state.home_opacity;
                    }
                }
            }
        }

        count
    }
}

impl Scene for HeadlessScene {
    type Visual = HeadlessCard;

    fn create_visual(&self, card: CardId) -> HeadlessCard {
        let serial = self.next_serial.fetch_add(1, Ordering::Relaxed);
        HeadlessCard::new(serial, card)
    }

    fn start(&self, group: AnimationGroup<HeadlessCard>) {
        let mut log = self.log.lock();
        log.groups_started += 1;
        log.running.push(group);
    }

    fn play_effect(&self, visual: &HeadlessCard, effect: &str) {
        self.log.lock().effects.push((visual.clone(), effect.to_string()));
    }
}
