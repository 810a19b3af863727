//! Self-reshuffling draw pile over catalog indices.
//!
//! A `Deck` is a stack of catalog indices for one card kind (top = end of
//! the order). It never runs dry: the draw that empties it immediately
//! replaces the order with a fresh uniform permutation of the whole catalog.
//! Cards still held in hands are not withheld from the new permutation.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::definition::CardIndex;
use crate::core::GameRng;

/// Draw pile for one card kind.
///
/// ## Example
///
/// ```
/// use czar::cards::{Deck, ResponseId};
/// use czar::core::GameRng;
///
/// let mut rng = GameRng::new(42);
/// let mut deck: Deck<ResponseId> = Deck::new(3, &mut rng);
///
/// let drawn: Vec<_> = (0..3).map(|_| deck.draw(&mut rng)).collect();
/// assert_eq!(drawn.len(), 3);
///
/// // The third draw emptied the deck, which reshuffled on the spot.
/// assert_eq!(deck.remaining(), 3);
/// assert_eq!(deck.reshuffles(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck<C: CardIndex> {
    order: Vector<C>,
    catalog_size: usize,
    reshuffles: u64,
}

impl<C: CardIndex> Deck<C> {
    /// Create a freshly shuffled deck over `catalog_size` cards.
    ///
    /// Panics if `catalog_size` is zero. `CardCatalog` rejects empty card
    /// lists, so decks built from a catalog always have cards.
    #[must_use]
    pub fn new(catalog_size: usize, rng: &mut GameRng) -> Self {
        assert!(catalog_size > 0, "Deck needs at least 1 card");

        Self {
            order: Self::permutation(catalog_size, rng),
            catalog_size,
            reshuffles: 0,
        }
    }

    /// Remove and return the top card, reshuffling if that empties the deck.
    pub fn draw(&mut self, rng: &mut GameRng) -> C {
        if self.order.is_empty() {
            // Only a decoded record can arrive here empty.
            self.reshuffle(rng);
        }

        let card = self
            .order
            .pop_back()
            .expect("deck always holds at least one card");

        if self.order.is_empty() {
            self.reshuffle(rng);
        }

        card
    }

    /// Replace the order with a fresh permutation of the whole catalog.
    fn reshuffle(&mut self, rng: &mut GameRng) {
        self.order = Self::permutation(self.catalog_size, rng);
        self.reshuffles += 1;
        tracing::debug!(
            cards = self.catalog_size,
            reshuffles = self.reshuffles,
            "Reshuffled deck"
        );
    }

    fn permutation(size: usize, rng: &mut GameRng) -> Vector<C> {
        rng.permutation(size).into_iter().map(C::from_raw).collect()
    }

    /// Cards left before the next implicit reshuffle.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.order.len()
    }

    /// Size of the catalog this deck draws from.
    #[must_use]
    pub fn catalog_size(&self) -> usize {
        self.catalog_size
    }

    /// How many times the deck has reshuffled itself.
    #[must_use]
    pub fn reshuffles(&self) -> u64 {
        self.reshuffles
    }

    /// Peek at the card the next draw returns.
    #[must_use]
    pub fn top(&self) -> Option<C> {
        self.order.last().copied()
    }

    /// Cards left in the current pass, bottom to top.
    pub fn indices(&self) -> impl Iterator<Item = C> + '_ {
        self.order.iter().copied()
    }

    /// True if the remaining order is part of one permutation of
    /// `0..catalog_size`: every index in range, none repeated.
    #[must_use]
    pub fn is_partial_permutation(&self) -> bool {
        if self.order.len() > self.catalog_size {
            return false;
        }
        let mut seen = vec![false; self.catalog_size];
        self.order.iter().all(|card| match seen.get_mut(card.index()) {
            Some(slot) if !*slot => {
                *slot = true;
                true
            }
            _ => false,
        })
    }
}
