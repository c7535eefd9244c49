//! Move descriptors handed to the pile by the game layer.
//!
//! The pile does not know why a card moved beyond the reason kind and the
//! optional skill name. Both drive suppression policy in
//! [`TablePile::add_cards`](crate::pile::TablePile::add_cards).

use serde::{Deserialize, Serialize};

/// Where a card is, or is going.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Place {
    /// A player's hand.
    Hand,
    /// A player's equipment area.
    Equip,
    /// Delayed tricks waiting in a player's judgment area.
    DelayedTrick,
    /// The judgment zone.
    Judge,
    /// Per-player piles outside the normal zones (set aside by skills).
    Special,
    /// The shared discard pile.
    DiscardPile,
    /// Top of the draw pile.
    DrawPile,
    /// Bottom of the draw pile.
    DrawPileBottom,
    /// Face-up on the table (this pile).
    Table,
    /// Location not known to this client.
    Unknown,
}

impl Place {
    /// Cards leaving these places slide into the pile from its right edge
    /// instead of flying in from where they were drawn.
    #[must_use]
    pub const fn slides_in(self) -> bool {
        matches!(
            self,
            Place::DrawPile | Place::DrawPileBottom | Place::Judge | Place::Table
        )
    }
}

/// Coarse classification of why cards moved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveReasonKind {
    /// Played as a card use.
    Use,
    /// Played in response to another card.
    Response,
    /// Discarded.
    Discard,
    /// Put somewhere by an effect.
    Put,
    /// Revealed as a judgment card.
    Judge,
    /// Shown to everyone.
    Show,
    /// Drawn.
    Draw,
    /// Exchanged between two areas.
    Swap,
    /// Entered a zone face-down as part of the normal flow.
    NaturalEnter,
    /// Anything else.
    #[default]
    Other,
}

/// Reason attached to a card move.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveReason {
    /// Reason classification.
    pub kind: MoveReasonKind,

    /// Skill that caused the move, if any.
    #[serde(default)]
    pub skill_name: Option<String>,
}

impl MoveReason {
    /// Create a reason without a skill.
    #[must_use]
    pub fn new(kind: MoveReasonKind) -> Self {
        Self {
            kind,
            skill_name: None,
        }
    }

    /// Attach the skill responsible for the move.
    #[must_use]
    pub fn with_skill(mut self, skill: impl Into<String>) -> Self {
        self.skill_name = Some(skill.into());
        self
    }

    /// Check if the move was caused by the named skill.
    #[must_use]
    pub fn is_skill(&self, skill: &str) -> bool {
        self.skill_name.as_deref() == Some(skill)
    }
}

/// A batch of cards moving from one place to another.
///
/// ```
/// use table_pile::core::{CardsMove, MoveReasonKind, Place};
///
/// let play = CardsMove::new(Place::Hand, Place::Table, MoveReasonKind::Use);
/// assert!(!play.from.slides_in());
/// assert!(!play.is_to_special());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardsMove {
    /// Origin of the cards.
    pub from: Place,
    /// Destination of the cards.
    pub to: Place,
    /// Why they moved.
    pub reason: MoveReason,
}

impl CardsMove {
    /// Create a move with a skill-less reason.
    #[must_use]
    pub fn new(from: Place, to: Place, kind: MoveReasonKind) -> Self {
        Self {
            from,
            to,
            reason: MoveReason::new(kind),
        }
    }

    /// Replace the reason.
    #[must_use]
    pub fn with_reason(mut self, reason: MoveReason) -> Self {
        self.reason = reason;
        self
    }

    /// Check if the cards are headed for a special placement.
    #[must_use]
    pub fn is_to_special(&self) -> bool {
        self.to == Place::Special
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slides_in() {
        assert!(Place::DrawPile.slides_in());
        assert!(Place::DrawPileBottom.slides_in());
        assert!(Place::Judge.slides_in());
        assert!(Place::Table.slides_in());
        assert!(!Place::Hand.slides_in());
        assert!(!Place::Equip.slides_in());
        assert!(!Place::Special.slides_in());
    }

    #[test]
    fn test_reason_skill() {
        let reason = MoveReason::new(MoveReasonKind::Put).with_skill("luck_card");
        assert!(reason.is_skill("luck_card"));
        assert!(!reason.is_skill("guanxing"));
        assert!(!MoveReason::default().is_skill("luck_card"));
    }

    #[test]
    fn test_move_serialization() {
        let mv = CardsMove::new(Place::DrawPile, Place::Table, MoveReasonKind::Judge)
            .with_reason(MoveReason::new(MoveReasonKind::Judge).with_skill("tieqi"));

        let json = serde_json::to_string(&mv).unwrap();
        let deserialized: CardsMove = serde_json::from_str(&json).unwrap();
        assert_eq!(mv, deserialized);
    }
}
