//! Card identity as seen by the pile.
//!
//! The pile never interprets card ids beyond equality. A visual whose
//! face is hidden from this client carries `CardId::UNKNOWN`, which
//! never matches anything (two hidden cards are not duplicates).

use serde::{Deserialize, Serialize};

/// Identifier of the logical card a visual represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub i32);

impl CardId {
    /// Sentinel for a face-down or otherwise unidentified card.
    pub const UNKNOWN: CardId = CardId(-1);

    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Check if this is the hidden-card sentinel.
    #[must_use]
    pub const fn is_unknown(self) -> bool {
        self.0 == Self::UNKNOWN.0
    }

    /// Identity comparison used for duplicate eviction.
    ///
    /// Unknown cards never match, not even each other.
    #[must_use]
    pub const fn same_card(self, other: CardId) -> bool {
        !self.is_unknown() && !other.is_unknown() && self.0 == other.0
    }
}

impl From<i32> for CardId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_unknown() {
            write!(f, "Card(?)")
        } else {
            write!(f, "Card({})", self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_never_matches() {
        assert!(!CardId::UNKNOWN.same_card(CardId::UNKNOWN));
        assert!(!CardId::UNKNOWN.same_card(CardId(3)));
        assert!(!CardId(3).same_card(CardId::UNKNOWN));
    }

    #[test]
    fn test_same_card() {
        assert!(CardId(5).same_card(CardId(5)));
        assert!(!CardId(5).same_card(CardId(6)));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", CardId(42)), "Card(42)");
        assert_eq!(format!("{}", CardId::UNKNOWN), "Card(?)");
    }

    #[test]
    fn test_serialization() {
        let id = CardId(17);
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: CardId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
