//! Holdem Odds: Table State
//!
//! A table owns its deck, its seats and the community cards. It is mutated
//! only through [`Table::add_to_hand`], [`Table::add_to_community`] and
//! [`Table::next_round`]; every check runs before anything is touched, so a
//! failed call leaves the table exactly as it was.
//!
//! Tables are plain values. The simulation branches by cloning, never by
//! sharing, so one trial can never observe another trial's deals.

use crate::card::{format_cards, Card};
use crate::deck::{Deck, DeckType};
use crate::error::{OddsError, Result};
use rand::Rng;
use std::fmt;
use std::fmt::Write as _;

/// Seat number of the tracked player.
pub const HERO: usize = 1;
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 10;

// ── Street ──────────────────────────────────────────────────────────

/// Board stage, fixed by how many community cards are showing.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
}

impl Street {
    pub const fn community_count(self) -> usize {
        match self {
            Street::Preflop => 0,
            Street::Flop => 3,
            Street::Turn => 4,
            Street::River => 5,
        }
    }

    pub const fn from_community_count(n: usize) -> Option<Street> {
        match n {
            0 => Some(Street::Preflop),
            3 => Some(Street::Flop),
            4 => Some(Street::Turn),
            5 => Some(Street::River),
            _ => None,
        }
    }

    pub const fn next(self) -> Option<Street> {
        match self {
            Street::Preflop => Some(Street::Flop),
            Street::Flop => Some(Street::Turn),
            Street::Turn => Some(Street::River),
            Street::River => None,
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Street::Preflop => "PREFLOP",
            Street::Flop => "FLOP",
            Street::Turn => "TURN",
            Street::River => "RIVER",
        };
        write!(f, "{name}")
    }
}

// ── Player ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Player {
    id: usize,
    hole: Option<[Card; 2]>,
}

impl Player {
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn hole(&self) -> Option<[Card; 2]> {
        self.hole
    }

    pub fn is_dealt(&self) -> bool {
        self.hole.is_some()
    }
}

// ── Table ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    deck_type: DeckType,
    deck: Deck,
    players: Vec<Player>,
    community: Vec<Card>,
    street: Street,
}

impl Table {
    /// Empty table with `num_players` seats (2-10), numbered from 1.
    pub fn new(num_players: usize, deck_type: DeckType) -> Result<Self> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&num_players) {
            return Err(OddsError::InvalidPlayerCount(num_players));
        }
        Ok(Self {
            deck_type,
            deck: Deck::new(deck_type),
            players: (1..=num_players).map(|id| Player { id, hole: None }).collect(),
            community: Vec::with_capacity(5),
            street: Street::Preflop,
        })
    }

    /// Assign exactly two hole cards to a player and take them out of the deck.
    pub fn add_to_hand(&mut self, player_id: usize, cards: &[Card]) -> Result<()> {
        let num_players = self.players.len();
        let seat = player_id
            .checked_sub(1)
            .filter(|&i| i < num_players)
            .ok_or(OddsError::UnknownPlayer { id: player_id, num_players })?;

        if self.players[seat].is_dealt() {
            return Err(OddsError::PlayerAlreadyDealt(player_id));
        }
        let &[a, b] = cards else {
            return Err(OddsError::InvalidHoleCount(cards.len()));
        };
        self.check_available(cards)?;

        self.deck.remove(a)?;
        self.deck.remove(b)?;
        self.players[seat].hole = Some([a, b]);
        log::trace!("player {player_id} dealt {a} {b}");
        Ok(())
    }

    /// Reveal the initial board: 3, 4 or 5 cards on a table with none showing.
    pub fn add_to_community(&mut self, cards: &[Card]) -> Result<()> {
        if !self.community.is_empty() {
            return Err(OddsError::CommunityAlreadyDealt(self.community.len()));
        }
        let street = match Street::from_community_count(cards.len()) {
            Some(Street::Preflop) | None => {
                return Err(OddsError::InvalidCommunityCount(cards.len()));
            }
            Some(street) => street,
        };
        self.check_available(cards)?;

        for &card in cards {
            self.deck.remove(card)?;
        }
        self.community.extend_from_slice(cards);
        self.street = street;
        log::trace!("community set to {} ({street})", format_cards(cards));
        Ok(())
    }

    /// Sample `n` distinct cards from the deck without dealing them.
    ///
    /// This is how a caller picks random cards to hand back to
    /// [`Table::add_to_hand`] or [`Table::add_to_community`].
    pub fn random_card<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Result<Vec<Card>> {
        self.deck.peek_random(n, rng)
    }

    /// Deal the next street from the deck: 0→3, 3→4 or 4→5 community cards.
    pub fn next_round<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Street> {
        let next = self.street.next().ok_or(OddsError::RiverReached)?;
        let needed = next.community_count() - self.community.len();
        let dealt = self.deck.random_card(needed, rng)?;
        self.community.extend(dealt);
        self.street = next;
        log::trace!("advanced to {next}: {}", format_cards(&self.community));
        Ok(next)
    }

    /// Human-readable snapshot of seats, board and street.
    pub fn view_table(&self) -> String {
        let mut out = String::new();
        let board = if self.community.is_empty() {
            "-".to_string()
        } else {
            format_cards(&self.community)
        };
        let _ = writeln!(out, "Street: {}", self.street);
        let _ = writeln!(out, "Community: {board}");
        for player in &self.players {
            let hand = match player.hole {
                Some(cards) => format_cards(&cards),
                None => "?? ??".to_string(),
            };
            let tag = if player.id == HERO { " (hero)" } else { "" };
            let _ = writeln!(out, "Player {}{tag}: {hand}", player.id);
        }
        let _ = write!(out, "Deck: {} cards remaining", self.deck.len());
        out
    }

    /// No card sits in more than one of {hands, board, deck}, and together
    /// they make up exactly one deck.
    pub fn is_consistent(&self) -> bool {
        let mut seen = 0u64;
        let mut total = 0usize;
        let held = self
            .players
            .iter()
            .filter_map(|p| p.hole)
            .flatten()
            .chain(self.community.iter().copied())
            .chain(self.deck.cards().iter().copied());
        for card in held {
            let bit = 1u64 << card.id();
            if seen & bit != 0 {
                return false;
            }
            seen |= bit;
            total += 1;
        }
        total == self.deck_type.size()
            && self.deck.cards().iter().all(|&c| self.deck.contains(c))
            && self.street.community_count() == self.community.len()
    }

    fn check_available(&self, cards: &[Card]) -> Result<()> {
        let mut seen = 0u64;
        for &card in cards {
            let bit = 1u64 << card.id();
            if seen & bit != 0 {
                return Err(OddsError::DuplicateCard(card));
            }
            seen |= bit;
            if !self.deck.contains(card) {
                return Err(OddsError::CardUnavailable(card));
            }
        }
        Ok(())
    }

    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    pub fn deck_type(&self) -> DeckType {
        self.deck_type
    }

    pub fn street(&self) -> Street {
        self.street
    }

    pub fn community(&self) -> &[Card] {
        &self.community
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: usize) -> Option<&Player> {
        id.checked_sub(1).and_then(|i| self.players.get(i))
    }

    pub fn hero_hand(&self) -> Option<[Card; 2]> {
        self.players.first().and_then(|p| p.hole)
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.view_table())
    }
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::parse_cards;
    use crate::error::ErrorKind;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    fn cards(s: &str) -> Vec<Card> {
        parse_cards(s).unwrap()
    }

    fn rng() -> Xoshiro256PlusPlus {
        Xoshiro256PlusPlus::seed_from_u64(42)
    }

    #[test]
    fn test_player_count_bounds() {
        assert!(Table::new(1, DeckType::Full).is_err());
        assert!(Table::new(11, DeckType::Full).is_err());
        let err = Table::new(0, DeckType::Full).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        for n in MIN_PLAYERS..=MAX_PLAYERS {
            let table = Table::new(n, DeckType::Full).unwrap();
            assert_eq!(table.num_players(), n);
            assert_eq!(table.street(), Street::Preflop);
            assert!(table.is_consistent());
        }
    }

    #[test]
    fn test_add_to_hand() {
        let mut table = Table::new(3, DeckType::Full).unwrap();
        table.add_to_hand(1, &cards("As Ad")).unwrap();
        assert_eq!(table.hero_hand(), Some([cards("As")[0], cards("Ad")[0]]));
        assert_eq!(table.deck().len(), 50);
        assert!(table.is_consistent());
    }

    #[test]
    fn test_add_to_hand_twice_is_conflict() {
        let mut table = Table::new(2, DeckType::Full).unwrap();
        table.add_to_hand(1, &cards("As Ad")).unwrap();
        let err = table.add_to_hand(1, &cards("Ks Kd")).unwrap_err();
        assert!(matches!(err, OddsError::PlayerAlreadyDealt(1)));
        assert_eq!(err.kind(), ErrorKind::CardConflict);
        assert_eq!(table.deck().len(), 50, "failed call must not deal");
    }

    #[test]
    fn test_add_to_hand_rejects_dealt_card() {
        let mut table = Table::new(2, DeckType::Full).unwrap();
        table.add_to_hand(1, &cards("As Ad")).unwrap();
        let err = table.add_to_hand(2, &cards("Ks As")).unwrap_err();
        assert!(matches!(err, OddsError::CardUnavailable(_)));
        assert!(table.deck().contains(cards("Ks")[0]), "Ks must stay in the deck");
        assert!(!table.player(2).unwrap().is_dealt());
    }

    #[test]
    fn test_add_to_hand_validation() {
        let mut table = Table::new(2, DeckType::Full).unwrap();
        assert!(matches!(
            table.add_to_hand(1, &cards("As Ad Ac")),
            Err(OddsError::InvalidHoleCount(3))
        ));
        assert!(matches!(
            table.add_to_hand(1, &cards("As As")),
            Err(OddsError::DuplicateCard(_))
        ));
        assert!(matches!(
            table.add_to_hand(3, &cards("Ks Kd")),
            Err(OddsError::UnknownPlayer { id: 3, num_players: 2 })
        ));
        assert!(matches!(
            table.add_to_hand(0, &cards("Ks Kd")),
            Err(OddsError::UnknownPlayer { id: 0, .. })
        ));
        assert!(table.is_consistent());
    }

    #[test]
    fn test_add_to_community_sets_street() {
        for (board, street) in [
            ("2c 7d Th", Street::Flop),
            ("2c 7d Th Js", Street::Turn),
            ("2c 7d Th Js Qh", Street::River),
        ] {
            let mut table = Table::new(4, DeckType::Full).unwrap();
            table.add_to_community(&cards(board)).unwrap();
            assert_eq!(table.street(), street);
            assert_eq!(table.community(), cards(board).as_slice());
            assert!(table.is_consistent());
        }
    }

    #[test]
    fn test_add_to_community_validation() {
        let mut table = Table::new(2, DeckType::Full).unwrap();
        table.add_to_hand(1, &cards("As Ad")).unwrap();
        for bad in ["", "2c", "2c 3c", "2c 3c 4c 5c 6c 7c"] {
            let err = table.add_to_community(&cards(bad)).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Configuration, "{bad:?}");
        }
        let err = table.add_to_community(&cards("As 7d Th")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CardConflict);

        table.add_to_community(&cards("2c 7d Th")).unwrap();
        assert!(matches!(
            table.add_to_community(&cards("Jc Qd Kh")),
            Err(OddsError::CommunityAlreadyDealt(3))
        ));
        assert!(table.is_consistent());
    }

    #[test]
    fn test_next_round_walks_streets() {
        let mut rng = rng();
        let mut table = Table::new(6, DeckType::Full).unwrap();
        table.add_to_hand(1, &cards("As Ad")).unwrap();

        assert_eq!(table.next_round(&mut rng).unwrap(), Street::Flop);
        assert_eq!(table.community().len(), 3);
        assert_eq!(table.next_round(&mut rng).unwrap(), Street::Turn);
        assert_eq!(table.community().len(), 4);
        assert_eq!(table.next_round(&mut rng).unwrap(), Street::River);
        assert_eq!(table.community().len(), 5);
        assert_eq!(table.deck().len(), 52 - 2 - 5);
        assert!(table.is_consistent());

        assert!(matches!(table.next_round(&mut rng), Err(OddsError::RiverReached)));
        assert_eq!(table.community().len(), 5);
    }

    #[test]
    fn test_random_card_does_not_deal() {
        let mut rng = rng();
        let mut table = Table::new(2, DeckType::Full).unwrap();
        let hand = table.random_card(2, &mut rng).unwrap();
        assert_eq!(table.deck().len(), 52);
        table.add_to_hand(1, &hand).unwrap();
        assert_eq!(table.deck().len(), 50);

        let err = table.random_card(51, &mut rng).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientCards);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut rng = rng();
        let mut table = Table::new(3, DeckType::Full).unwrap();
        table.add_to_hand(1, &cards("Kh Qh")).unwrap();
        let mut branch = table.clone();
        branch.next_round(&mut rng).unwrap();
        let _ = branch.add_to_hand(2, &cards("2c 2d"));
        assert_eq!(table.street(), Street::Preflop);
        assert!(table.community().is_empty());
        assert_eq!(table.deck().len(), 50);
        assert!(!table.player(2).unwrap().is_dealt());
    }

    #[test]
    fn test_view_table() {
        let mut table = Table::new(2, DeckType::Full).unwrap();
        table.add_to_hand(1, &cards("As Ad")).unwrap();
        table.add_to_community(&cards("Kd 7c 2h")).unwrap();
        let view = table.view_table();
        assert_eq!(
            view,
            "Street: FLOP\n\
             Community: Kd 7c 2h\n\
             Player 1 (hero): As Ad\n\
             Player 2: ?? ??\n\
             Deck: 47 cards remaining"
        );
    }
}
