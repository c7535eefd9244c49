//! Collaborators the pile drives but does not own.
//!
//! The pile never renders anything. It talks to:
//! - `CardVisual`: a handle to one on-screen card
//! - `Scene`: creates visuals, runs animation groups and overlay effects
//!
//! Animations are plain data. The pile builds an `AnimationGroup` while its
//! lock is held and hands it to `Scene::start` after the lock is released.
//! The scene owns the group from then on and drops it when it stops.
//!
//! ## Implementations
//!
//! - `headless`: in-memory scene that records everything, for tests and
//!   hosts without a display

pub mod headless;

pub use headless::{HeadlessCard, HeadlessScene};

use kurbo::Point;

use crate::core::card::CardId;

/// Handle to one card visual.
///
/// Handles are cheap to clone and all clones refer to the same visual, like
/// a reference-counted UI object. Setters take `&self` for that reason.
///
/// "Home" values are where the visual rests once its animations finish;
/// `pos`/`opacity` are what is rendered right now.
pub trait CardVisual: Clone + Send + Sync + 'static {
    /// Logical card shown by this visual.
    fn card_id(&self) -> CardId;

    /// Resting position.
    fn home_pos(&self) -> Point;

    /// Set the resting position.
    fn set_home_pos(&self, pos: Point);

    /// Resting opacity.
    fn home_opacity(&self) -> f64;

    /// Set the resting opacity.
    fn set_home_opacity(&self, opacity: f64);

    /// Move the rendered visual immediately.
    fn set_pos(&self, pos: Point);

    /// Change rendered opacity immediately.
    fn set_opacity(&self, opacity: f64);

    /// Enable or disable the visual. Disabled cards are drawn greyed out.
    fn set_enabled(&self, enabled: bool);

    /// Check if the visual is enabled.
    fn is_enabled(&self) -> bool;

    /// Stacking depth. Higher values draw on top.
    fn set_z_value(&self, z: f64);

    /// Show the caption under the card (who played it, and how).
    fn show_footnote(&self);

    /// Stop rendering without destroying.
    fn hide(&self);

    /// Destroy once nothing references the visual any more.
    fn delete_later(&self);

    /// Animation gliding the visual back to its home values.
    fn go_back_animation(
        &self,
        animate_position: bool,
        animate_opacity: bool,
        duration_ms: Option<u32>,
    ) -> Animation<Self> {
        Animation::GoBack {
            visual: self.clone(),
            animate_position,
            animate_opacity,
            duration_ms,
        }
    }
}

/// A single animation over one visual.
#[derive(Clone, Debug)]
pub enum Animation<V> {
    /// Glide to home position and/or home opacity.
    GoBack {
        /// Animated visual.
        visual: V,
        /// Interpolate the position.
        animate_position: bool,
        /// Interpolate the opacity.
        animate_opacity: bool,
        /// Duration, or `None` for the scene's default.
        duration_ms: Option<u32>,
    },
}

impl<V> Animation<V> {
    /// The visual this animation moves.
    #[must_use]
    pub fn visual(&self) -> &V {
        match self {
            Animation::GoBack { visual, .. } => visual,
        }
    }
}

/// Animations that run in parallel and are disposed together.
#[derive(Clone, Debug)]
pub struct AnimationGroup<V> {
    animations: Vec<Animation<V>>,
}

impl<V> Default for AnimationGroup<V> {
    fn default() -> Self {
        Self {
            animations: Vec::new(),
        }
    }
}

impl<V> AnimationGroup<V> {
    /// Create an empty group.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an animation.
    pub fn add(&mut self, animation: Animation<V>) {
        self.animations.push(animation);
    }

    /// Number of animations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.animations.len()
    }

    /// Check if the group has nothing to run.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }

    /// Iterate over the animations.
    pub fn iter(&self) -> impl Iterator<Item = &Animation<V>> {
        self.animations.iter()
    }
}

impl<V> IntoIterator for AnimationGroup<V> {
    type Item = Animation<V>;
    type IntoIter = std::vec::IntoIter<Animation<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.animations.into_iter()
    }
}

impl<V> FromIterator<Animation<V>> for AnimationGroup<V> {
    fn from_iter<I: IntoIterator<Item = Animation<V>>>(iter: I) -> Self {
        Self {
            animations: iter.into_iter().collect(),
        }
    }
}

/// The host scene.
///
/// ## Implementation Notes
///
/// - `start` must not block; the group runs asynchronously and is dropped
///   when it stops
/// - No method may call back into the pile that invoked it
pub trait Scene: Send + Sync {
    /// Visual handle type this scene produces.
    type Visual: CardVisual;

    /// Create a visual for a card.
    fn create_visual(&self, card: CardId) -> Self::Visual;

    /// Create one visual per card, in order.
    fn create_visuals(&self, cards: &[CardId]) -> Vec<Self::Visual> {
        cards.iter().map(|&card| self.create_visual(card)).collect()
    }

    /// Run a group of animations in parallel, disposing of it when done.
    fn start(&self, group: AnimationGroup<Self::Visual>);

    /// Play a one-shot overlay effect (e.g. a judgment stamp) on a visual.
    fn play_effect(&self, visual: &Self::Visual, effect: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_collect() {
        let scene = HeadlessScene::new();
        let a = scene.create_visual(CardId(1));
        let b = scene.create_visual(CardId(2));

        let group: AnimationGroup<_> = [&a, &b]
            .iter()
            .map(|v| v.go_back_animation(true, false, Some(250)))
            .collect();

        assert_eq!(group.len(), 2);
        assert_eq!(group.iter().next().unwrap().visual().card_id(), CardId(1));
    }

    #[test]
    fn test_go_back_animation_fields() {
        let scene = HeadlessScene::new();
        let card = scene.create_visual(CardId(3));

        match card.go_back_animation(true, true, None) {
            Animation::GoBack {
                animate_position,
                animate_opacity,
                duration_ms,
                ..
            } => {
                assert!(animate_position);
                assert!(animate_opacity);
                assert_eq!(duration_ms, None);
            }
        }
    }

    #[test]
    fn test_empty_group() {
        let group: AnimationGroup<HeadlessCard> = AnimationGroup::new();
        assert!(group.is_empty());
        assert_eq!(group.into_iter().count(), 0);
    }
}
