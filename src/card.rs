//! Holdem Odds: Card Model
//!
//! ## Card Encoding
//!
//! A card is a rank in `2..=14` (11=J, 12=Q, 13=K, 14=A) and a suit.
//! The compact id form used by the deck and the evaluator is 0-51:
//!   - `rank = (id >> 2) + 2`
//!   - `suit = id & 3`   (0=♣, 1=♦, 2=♥, 3=♠)
//!
//! Text form is rank char plus suit char: `"As"`, `"Td"`, `"2c"`.

use crate::error::{OddsError, Result};
use std::fmt;
use std::str::FromStr;

pub const TWO: u8 = 2;
pub const TEN: u8 = 10;
pub const JACK: u8 = 11;
pub const QUEEN: u8 = 12;
pub const KING: u8 = 13;
pub const ACE: u8 = 14;

/// Card suit, ordered by id bits.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Suit {
    Club = 0,
    Diamond = 1,
    Heart = 2,
    Spade = 3,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Club, Suit::Diamond, Suit::Heart, Suit::Spade];

    pub fn index(self) -> usize {
        self as usize
    }

    fn from_bits(bits: u8) -> Suit {
        match bits & 3 {
            0 => Suit::Club,
            1 => Suit::Diamond,
            2 => Suit::Heart,
            _ => Suit::Spade,
        }
    }

    fn symbol(self) -> char {
        match self {
            Suit::Club => 'c',
            Suit::Diamond => 'd',
            Suit::Heart => 'h',
            Suit::Spade => 's',
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Immutable playing card. Identity is the (rank, suit) pair.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Card {
    rank: u8,
    suit: Suit,
}

impl Card {
    /// Build a card, rejecting ranks outside `2..=14`.
    pub fn new(rank: u8, suit: Suit) -> Result<Self> {
        if !(TWO..=ACE).contains(&rank) {
            return Err(OddsError::InvalidCard(format!("rank {rank} out of range 2-14")));
        }
        Ok(Self { rank, suit })
    }

    /// Card for a compact id, `None` for ids past 51.
    pub fn from_id(id: u8) -> Option<Self> {
        (id < 52).then(|| Self {
            rank: (id >> 2) + TWO,
            suit: Suit::from_bits(id),
        })
    }

    #[inline]
    pub fn id(self) -> u8 {
        ((self.rank - TWO) << 2) | self.suit as u8
    }

    #[inline]
    pub fn rank(self) -> u8 {
        self.rank
    }

    #[inline]
    pub fn suit(self) -> Suit {
        self.suit
    }

    /// Presentation filename for this card, e.g. `As.png`.
    pub fn image_name(self) -> String {
        format!("{self}.png")
    }
}

fn rank_symbol(rank: u8) -> char {
    match rank {
        TEN => 'T',
        JACK => 'J',
        QUEEN => 'Q',
        KING => 'K',
        ACE => 'A',
        r => char::from(b'0' + r),
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", rank_symbol(self.rank), self.suit)
    }
}

impl FromStr for Card {
    type Err = OddsError;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.trim().chars();
        let (Some(r), Some(u), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(OddsError::InvalidCard(s.to_string()));
        };
        let rank = match r.to_ascii_uppercase() {
            'T' => TEN,
            'J' => JACK,
            'Q' => QUEEN,
            'K' => KING,
            'A' => ACE,
            d @ '2'..='9' => d as u8 - b'0',
            _ => return Err(OddsError::InvalidCard(s.to_string())),
        };
        let suit = match u.to_ascii_lowercase() {
            'c' => Suit::Club,
            'd' => Suit::Diamond,
            'h' => Suit::Heart,
            's' => Suit::Spade,
            _ => return Err(OddsError::InvalidCard(s.to_string())),
        };
        Card::new(rank, suit)
    }
}

/// Parse a whitespace-separated card list such as `"As Kd 7c"`.
pub fn parse_cards(s: &str) -> Result<Vec<Card>> {
    s.split_whitespace().map(str::parse).collect()
}

/// Space-separated text form of a card list.
pub fn format_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(Card::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrip_covers_deck() {
        let ids: Vec<u8> = (0..52).filter_map(Card::from_id).map(Card::id).collect();
        assert_eq!(ids, (0..52).collect::<Vec<u8>>());
        assert!(Card::from_id(52).is_none());
    }

    #[test]
    fn test_id_layout() {
        // A♠ is the last id, 2♣ the first
        assert_eq!("As".parse::<Card>().unwrap().id(), 51);
        assert_eq!("2c".parse::<Card>().unwrap().id(), 0);
        assert_eq!("Th".parse::<Card>().unwrap().id(), 8 * 4 + 2);
    }

    #[test]
    fn test_parse_and_display() {
        let card: Card = "qh".parse().unwrap();
        assert_eq!(card.rank(), QUEEN);
        assert_eq!(card.suit(), Suit::Heart);
        assert_eq!(card.to_string(), "Qh");

        let cards = parse_cards("As  Kd 7c").unwrap();
        assert_eq!(format_cards(&cards), "As Kd 7c");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "A", "1s", "Ax", "Asd", "10s"] {
            assert!(bad.parse::<Card>().is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn test_new_rejects_rank() {
        assert!(Card::new(1, Suit::Club).is_err());
        assert!(Card::new(15, Suit::Club).is_err());
        assert!(Card::new(ACE, Suit::Club).is_ok());
    }

    #[test]
    fn test_image_name() {
        assert_eq!("Td".parse::<Card>().unwrap().image_name(), "Td.png");
        assert_eq!("2c".parse::<Card>().unwrap().image_name(), "2c.png");
    }
}
