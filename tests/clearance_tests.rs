//! Clearance scheduler integration tests.
//!
//! These tests verify staged clearance (disable, then fade out), the
//! logical clock, delayed and immediate clears, and that concurrent game
//! events and ticks leave the pile consistent.

use std::sync::Arc;
use std::thread;

use table_pile::{
    CardId, CardVisual, CardsMove, HeadlessScene, MoveReasonKind, PileConfig, Place, Scene,
    TablePile, Tick,
};

fn new_pile(delay: u64) -> TablePile<HeadlessScene> {
    let config = PileConfig::default().with_clearance_delay(delay);
    let pile = TablePile::new(HeadlessScene::new(), config).unwrap();
    pile.resize(930.0, 200.0);
    pile
}

fn play() -> CardsMove {
    CardsMove::new(Place::Hand, Place::Table, MoveReasonKind::Use)
}

// =============================================================================
// Staged Clearance
// =============================================================================

/// A card stamped at tick 0 is disabled from tick 1 and removed after the delay.
#[test]
fn test_disable_then_remove() {
    let pile = new_pile(3);
    let cards = pile.scene().create_visuals(&[CardId(1)]);
    pile.add_cards(&cards, &play());
    pile.clear(true);
    assert_eq!(pile.snapshot().cards[0].clear_at, Tick(0));

    pile.on_tick();
    assert_eq!(pile.current_tick(), Tick(1));
    assert_eq!(pile.visible_cards(), cards);
    assert!(!cards[0].is_enabled());

    // Still within the delay at ticks 2 and 3
    pile.on_tick();
    pile.on_tick();
    assert_eq!(pile.len(), 1);
    assert!(!cards[0].is_delete_scheduled());

    // 4 - 0 > 3
    pile.on_tick();
    assert!(pile.is_empty());
    assert!(cards[0].is_delete_scheduled());
    assert_eq!(cards[0].home_opacity(), 0.0);
}

/// Cards never cleared stay forever.
#[test]
fn test_unstamped_cards_persist() {
    let pile = new_pile(0);
    let cards = pile.scene().create_visuals(&[CardId(1), CardId(2)]);
    pile.add_cards(&cards, &play());

    for _ in 0..50 {
        pile.on_tick();
    }

    assert_eq!(pile.len(), 2);
    assert!(cards.iter().all(CardVisual::is_enabled));
}

/// The remaining cards are re-laid out after an expiry.
#[test]
fn test_expiry_relayouts_survivors() {
    let pile = new_pile(0);
    let old = pile.scene().create_visuals(&[CardId(1)]);
    pile.add_cards(&old, &play());
    pile.clear(true);

    let fresh = pile.scene().create_visuals(&[CardId(2)]);
    pile.add_cards(&fresh, &play());
    pile.scene().finish_animations();

    pile.on_tick();

    assert_eq!(pile.visible_cards(), fresh);
    // fade group for the stale card, layout group for the survivor
    assert_eq!(pile.scene().running_groups(), 2);
    assert_eq!(fresh[0].home_pos(), pile.bounding_region().center());
}

/// A tick with nothing to expire starts no animations.
#[test]
fn test_idle_tick_is_quiet() {
    let pile = new_pile(3);
    for _ in 0..5 {
        pile.on_tick();
    }

    assert_eq!(pile.current_tick(), Tick(5));
    assert_eq!(pile.scene().groups_started(), 0);
}

// =============================================================================
// Clear
// =============================================================================

/// Delayed clear never postpones an earlier stamp.
#[test]
fn test_delayed_clear_is_monotonic() {
    let pile = new_pile(10);
    let first = pile.scene().create_visuals(&[CardId(1)]);
    pile.add_cards(&first, &play());
    pile.clear(true); // stamp 0

    pile.on_tick();
    pile.on_tick();
    let second = pile.scene().create_visuals(&[CardId(2)]);
    pile.add_cards(&second, &play());

    pile.clear(true);
    let once = pile.snapshot();
    pile.clear(true);
    let twice = pile.snapshot();

    assert_eq!(once, twice);
    assert_eq!(once.cards[0].clear_at, Tick(0));
    assert_eq!(once.cards[1].clear_at, Tick(2));
}

/// Immediate clear empties the pile at once.
#[test]
fn test_immediate_clear() {
    let pile = new_pile(3);
    let cards = pile.scene().create_visuals(&[CardId(1), CardId(2)]);
    pile.add_cards(&cards, &play());

    pile.clear(false);

    assert!(pile.is_empty());
    assert!(cards.iter().all(|c| c.is_delete_scheduled()));

    // Nothing left for the scheduler
    let started = pile.scene().groups_started();
    pile.on_tick();
    assert_eq!(pile.scene().groups_started(), started);
}

/// A card re-added after a delayed clear starts fresh.
#[test]
fn test_readd_after_clear_resets_stamp() {
    let pile = new_pile(1);
    let old = pile.scene().create_visuals(&[CardId(1)]);
    pile.add_cards(&old, &play());
    pile.clear(true);
    pile.on_tick();

    let again = pile.scene().create_visuals(&[CardId(1)]);
    pile.add_cards(&again, &play());

    for _ in 0..5 {
        pile.on_tick();
    }

    assert_eq!(pile.visible_cards(), again);
    assert_eq!(pile.snapshot().cards[0].clear_at, Tick::NEVER);
    assert!(old[0].is_delete_scheduled());
}

// =============================================================================
// Concurrency
// =============================================================================

/// Game events and ticks racing on several threads keep the pile consistent.
#[test]
fn test_concurrent_events_and_ticks() {
    let pile = Arc::new(new_pile(2));

    let ticker = {
        let pile = Arc::clone(&pile);
        thread::spawn(move || {
            for _ in 0..200 {
                pile.on_tick();
            }
        })
    };

    let players: Vec<_> = (0..4)
        .map(|p| {
            let pile = Arc::clone(&pile);
            thread::spawn(move || {
                for i in 0..50 {
                    let id = CardId(p * 1000 + i % 10);
                    let cards = pile.scene().create_visuals(&[id]);
                    pile.add_cards(&cards, &play());
                    if i % 7 == 0 {
                        pile.clear(true);
                    }
                }
            })
        })
        .collect();

    ticker.join().unwrap();
    for player in players {
        player.join().unwrap();
    }

    assert_eq!(pile.current_tick(), Tick(200));

    let ids = pile.snapshot().card_ids();
    let mut unique = ids.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(ids.len(), unique.len());
}
