//! Per-player state within one game.
//!
//! ## PlayerRecord
//!
//! Hand, win count, display name and avatar reference. Owned by the
//! `GameSession` that created it and keyed by display name there.
//!
//! ## Submission
//!
//! The response cards a player played this round, in blank order.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::ResponseId;
use crate::core::PlayerIdentity;

/// Per-player state.
///
/// The hand keeps insertion order. It may hold the same response index
/// twice, because decks reshuffle without withholding cards already dealt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    identity: PlayerIdentity,
    display_name: String,
    avatar: String,
    hand: Vector<ResponseId>,
    wins: u32,
}

impl PlayerRecord {
    /// Create a player with an empty hand and no wins.
    #[must_use]
    pub fn new(identity: PlayerIdentity, display_name: impl Into<String>, avatar: impl Into<String>) -> Self {
        Self {
            identity,
            display_name: display_name.into(),
            avatar: avatar.into(),
            hand: Vector::new(),
            wins: 0,
        }
    }

    #[must_use]
    pub fn identity(&self) -> PlayerIdentity {
        self.identity
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub fn avatar(&self) -> &str {
        &self.avatar
    }

    #[must_use]
    pub fn wins(&self) -> u32 {
        self.wins
    }

    /// Cards currently held, in the order they were received.
    #[must_use]
    pub fn hand(&self) -> &Vector<ResponseId> {
        &self.hand
    }

    #[must_use]
    pub fn hand_size(&self) -> usize {
        self.hand.len()
    }

    #[must_use]
    pub fn holds(&self, card: ResponseId) -> bool {
        self.hand.contains(&card)
    }

    /// Check every card in `cards` can be taken from the hand, counting
    /// repeated indices against repeated holdings.
    #[must_use]
    pub fn can_cover(&self, cards: &[ResponseId]) -> bool {
        cards.iter().all(|card| {
            let wanted = cards.iter().filter(|&c| c == card).count();
            let held = self.hand.iter().filter(|&c| c == card).count();
            held >= wanted
        })
    }

    /// Add a card to the end of the hand.
    pub fn receive(&mut self, card: ResponseId) {
        self.hand.push_back(card);
    }

    /// Remove one copy of each card. All-or-nothing: returns false and
    /// leaves the hand untouched if any card is missing.
    pub fn take_cards(&mut self, cards: &[ResponseId]) -> bool {
        if !self.can_cover(cards) {
            return false;
        }
        for card in cards {
            if let Some(pos) = self.hand.index_of(card) {
                self.hand.remove(pos);
            }
        }
        true
    }

    /// Count a round win.
    pub fn record_win(&mut self) {
        self.wins += 1;
    }
}

/// Response cards played in one round, in the order they fill the blanks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    cards: SmallVec<[ResponseId; 3]>,
}

impl Submission {
    #[must_use]
    pub fn new(cards: &[ResponseId]) -> Self {
        Self {
            cards: SmallVec::from_slice(cards),
        }
    }

    #[must_use]
    pub fn cards(&self) -> &[ResponseId] {
        &self.cards
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
