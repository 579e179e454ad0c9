//! Holdem Odds: Deck
//!
//! The deck is the set of cards not yet assigned to a hand or the board.
//! Membership is tracked twice: an ordered `Vec<Card>` for sampling and a
//! 52-bit mask (one bit per card id) for O(1) lookups.

use crate::card::Card;
use crate::error::{OddsError, Result};
use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// Deck composition. Only the standard 52-card deck is supported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DeckType {
    #[default]
    Full,
}

impl DeckType {
    pub fn size(self) -> usize {
        match self {
            DeckType::Full => 52,
        }
    }
}

impl FromStr for DeckType {
    type Err = OddsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(DeckType::Full),
            _ => Err(OddsError::UnsupportedDeckType(s.to_string())),
        }
    }
}

impl fmt::Display for DeckType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeckType::Full => write!(f, "full"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
    mask: u64,
}

impl Deck {
    pub fn new(deck_type: DeckType) -> Self {
        let cards: Vec<Card> = match deck_type {
            DeckType::Full => (0..52).filter_map(Card::from_id).collect(),
        };
        let mask = cards.iter().fold(0u64, |m, c| m | (1u64 << c.id()));
        Self { cards, mask }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[inline]
    pub fn contains(&self, card: Card) -> bool {
        self.mask & (1u64 << card.id()) != 0
    }

    /// Remaining cards, in no particular order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Take a specific card out of the deck.
    pub fn remove(&mut self, card: Card) -> Result<()> {
        if !self.contains(card) {
            return Err(OddsError::CardUnavailable(card));
        }
        if let Some(i) = self.cards.iter().position(|&c| c == card) {
            self.cards.swap_remove(i);
        }
        self.mask &= !(1u64 << card.id());
        Ok(())
    }

    /// Draw `n` distinct cards uniformly at random and remove them.
    pub fn random_card<R: Rng + ?Sized>(&mut self, n: usize, rng: &mut R) -> Result<Vec<Card>> {
        self.ensure(n)?;
        partial_shuffle(&mut self.cards, n, rng);
        let drawn: Vec<Card> = self.cards.drain(..n).collect();
        for card in &drawn {
            self.mask &= !(1u64 << card.id());
        }
        Ok(drawn)
    }

    /// Sample `n` distinct cards uniformly at random, leaving the deck as is.
    pub fn peek_random<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Result<Vec<Card>> {
        self.ensure(n)?;
        let mut pool = self.cards.clone();
        partial_shuffle(&mut pool, n, rng);
        pool.truncate(n);
        Ok(pool)
    }

    fn ensure(&self, n: usize) -> Result<()> {
        if n > self.cards.len() {
            return Err(OddsError::InsufficientCards {
                requested: n,
                remaining: self.cards.len(),
            });
        }
        Ok(())
    }
}

/// Fisher-Yates partial shuffle: after the call `cards[..n]` is a uniform
/// sample without replacement. Only shuffles what we need.
#[inline]
pub(crate) fn partial_shuffle<R: Rng + ?Sized>(cards: &mut [Card], n: usize, rng: &mut R) {
    let len = cards.len();
    for k in 0..n.min(len) {
        let swap_idx = rng.gen_range(k..len);
        cards.swap(k, swap_idx);
    }
}

// ── Tests ───────────────────────────────────────────────────────────
