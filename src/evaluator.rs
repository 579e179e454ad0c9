//! Holdem Odds: Hand Evaluator
//!
//! Bitwise best-of-5..7 evaluator. Ranks are folded into 13-bit masks
//! (one per suit plus one for the whole hand), and the best five-card hand
//! is read straight off the masks and per-rank counts, no combinations.
//!
//! ## Hand Value (higher = better)
//!
//! A [`HandRank`] packs the category and up to five tie-break ranks into
//! one `u32`, so plain integer comparison is the full poker ordering:
//!
//! ```text
//! bits 20..24  category (0 = high card .. 8 = straight flush)
//! bits 16..20  first tie-break rank (2-14)
//! bits 12..16  second
//! ...          down to bits 0..4
//! ```
//!
//! | Category        | Tie-break ranks                 |
//! |-----------------|---------------------------------|
//! | Straight Flush  | high card (5 for the wheel)     |
//! | Four of a Kind  | quad, kicker                    |
//! | Full House      | trips, pair                     |
//! | Flush           | five flush ranks                |
//! | Straight        | high card (5 for the wheel)     |
//! | Three of a Kind | trips, two kickers              |
//! | Two Pair        | high pair, low pair, kicker     |
//! | One Pair        | pair, three kickers             |
//! | High Card       | five ranks                      |

use crate::card::{Card, ACE, TWO};
use crate::error::{OddsError, Result};
use std::fmt;

// ── Lookup Tables ───────────────────────────────────────────────────

// Rank bit positions: bit 0 = deuce .. bit 12 = ace
const RANK_MASK: u16 = 0x1FFF;

// Straights from best to worst. Index i has high card ACE - i.
const STRAIGHTS: [u16; 10] = [
    0b1111100000000, // A-K-Q-J-T
    0b0111110000000, // K-Q-J-T-9
    0b0011111000000, // Q-J-T-9-8
    0b0001111100000, // J-T-9-8-7
    0b0000111110000, // T-9-8-7-6
    0b0000011111000, // 9-8-7-6-5
    0b0000001111100, // 8-7-6-5-4
    0b0000000111110, // 7-6-5-4-3
    0b0000000011111, // 6-5-4-3-2
    0b1000000001111, // 5-4-3-2-A (wheel)
];

// ── Hand Value ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl HandCategory {
    fn from_bits(bits: u32) -> HandCategory {
        match bits {
            0 => HandCategory::HighCard,
            1 => HandCategory::OnePair,
            2 => HandCategory::TwoPair,
            3 => HandCategory::ThreeOfAKind,
            4 => HandCategory::Straight,
            5 => HandCategory::Flush,
            6 => HandCategory::FullHouse,
            7 => HandCategory::FourOfAKind,
            _ => HandCategory::StraightFlush,
        }
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HandCategory::HighCard => "High Card",
            HandCategory::OnePair => "One Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
        };
        write!(f, "{name}")
    }
}

/// Totally ordered value of a player's best five-card hand.
///
/// Equal categories with equal tie-break ranks compare exactly equal,
/// which is what split-pot detection relies on.
#[derive(Debug, Clone, Copy, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct HandRank(u32);

impl HandRank {
    fn pack(category: HandCategory, ranks: &[u8]) -> Self {
        let mut value = (category as u32) << 20;
        for (i, &r) in ranks.iter().take(5).enumerate() {
            value |= (r as u32) << (16 - 4 * i);
        }
        Self(value)
    }

    pub fn category(self) -> HandCategory {
        HandCategory::from_bits(self.0 >> 20)
    }

    /// Tie-break ranks in significance order (2-14).
    pub fn ranks(self) -> Vec<u8> {
        (0..5)
            .map(|i| ((self.0 >> (16 - 4 * i)) & 0xF) as u8)
            .take_while(|&r| r != 0)
            .collect()
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.category())?;
        for rank in self.ranks() {
            let symbol = match rank {
                10 => 'T',
                11 => 'J',
                12 => 'Q',
                13 => 'K',
                14 => 'A',
                r => char::from(b'0' + r),
            };
            write!(f, " {symbol}")?;
        }
        Ok(())
    }
}

// ── Core Evaluator ──────────────────────────────────────────────────

/// Rank the best five-card hand among 5, 6 or 7 distinct cards.
pub fn evaluate(cards: &[Card]) -> Result<HandRank> {
    if !(5..=7).contains(&cards.len()) {
        return Err(OddsError::InvalidHandSize(cards.len()));
    }
    let mut seen = 0u64;
    for &card in cards {
        let bit = 1u64 << card.id();
        if seen & bit != 0 {
            return Err(OddsError::DuplicateCard(card));
        }
        seen |= bit;
    }
    Ok(rank_cards(cards))
}

/// Unchecked evaluation for the simulation hot path.
///
/// Cards must be distinct. Fewer than five cards still yields a consistent
/// value (missing kickers count as nothing).
#[inline]
pub(crate) fn rank_cards(cards: &[Card]) -> HandRank {
    let mut counts = [0u8; 15];
    let mut suit_bits = [0u16; 4];
    let mut rank_bits = 0u16;

    for &card in cards {
        let bit = 1u16 << (card.rank() - TWO);
        counts[card.rank() as usize] += 1;
        suit_bits[card.suit().index()] |= bit;
        rank_bits |= bit;
    }

    let flush = suit_bits.iter().copied().find(|b| b.count_ones() >= 5);

    if let Some(high) = flush.and_then(straight_high) {
        return HandRank::pack(HandCategory::StraightFlush, &[high]);
    }

    // Rank groups, highest rank first
    let mut quad = 0u8;
    let mut trips = [0u8; 2];
    let mut n_trips = 0;
    let mut pairs = [0u8; 3];
    let mut n_pairs = 0;
    for rank in (TWO..=ACE).rev() {
        match counts[rank as usize] {
            4 => quad = rank,
            3 if n_trips < 2 => {
                trips[n_trips] = rank;
                n_trips += 1;
            }
            2 if n_pairs < 3 => {
                pairs[n_pairs] = rank;
                n_pairs += 1;
            }
            _ => {}
        }
    }

    if quad != 0 {
        let kicker = top_ranks(rank_bits & !bit_of(quad), 1);
        return HandRank::pack(HandCategory::FourOfAKind, &[quad, kicker[0]]);
    }

    if n_trips > 0 && (n_trips > 1 || n_pairs > 0) {
        // A second set of trips plays as the pair
        let pair = trips[1].max(pairs[0]);
        return HandRank::pack(HandCategory::FullHouse, &[trips[0], pair]);
    }

    if let Some(bits) = flush {
        return HandRank::pack(HandCategory::Flush, &top_ranks(bits, 5));
    }

    if let Some(high) = straight_high(rank_bits) {
        return HandRank::pack(HandCategory::Straight, &[high]);
    }

    if n_trips > 0 {
        let k = top_ranks(rank_bits & !bit_of(trips[0]), 2);
        return HandRank::pack(HandCategory::ThreeOfAKind, &[trips[0], k[0], k[1]]);
    }

    if n_pairs > 1 {
        let (hi, lo) = (pairs[0], pairs[1]);
        let k = top_ranks(rank_bits & !bit_of(hi) & !bit_of(lo), 1);
        return HandRank::pack(HandCategory::TwoPair, &[hi, lo, k[0]]);
    }

    if n_pairs == 1 {
        let k = top_ranks(rank_bits & !bit_of(pairs[0]), 3);
        return HandRank::pack(HandCategory::OnePair, &[pairs[0], k[0], k[1], k[2]]);
    }

    HandRank::pack(HandCategory::HighCard, &top_ranks(rank_bits, 5))
}

#[inline]
fn bit_of(rank: u8) -> u16 {
    1 << (rank - TWO)
}

/// High card of the best straight in a rank mask.
#[inline]
fn straight_high(bits: u16) -> Option<u8> {
    STRAIGHTS
        .iter()
        .position(|&s| bits & s == s)
        .map(|i| ACE - i as u8)
}

/// The `n` highest ranks present in a mask, zero-padded.
#[inline]
fn top_ranks(bits: u16, n: usize) -> [u8; 5] {
    let mut out = [0u8; 5];
    let mut remaining = bits & RANK_MASK;
    for slot in out.iter_mut().take(n) {
        if remaining == 0 {
            break;
        }
        let top = 15 - remaining.leading_zeros() as u8;
        *slot = top + TWO;
        remaining &= !(1 << top);
    }
    out
}

// ── Tests ───────────────────────────────────────────────────────────
