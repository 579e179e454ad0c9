//! Error types for table bookkeeping and simulation.
//!
//! Every failure in this crate is a local state violation detected at the
//! offending call. Nothing is retried internally; [`OddsError::kind`] tells the
//! caller which class of misuse it is looking at.

use crate::card::Card;
use thiserror::Error;

/// Broad class of an [`OddsError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Invalid table, deck, board or simulation parameters.
    Configuration,
    /// A card or seat that is already taken elsewhere.
    CardConflict,
    /// More cards requested than the deck holds.
    InsufficientCards,
    /// Table is missing state the simulation needs.
    IncompleteState,
}

/// Engine errors
#[derive(Debug, Error)]
pub enum OddsError {
    /// Player count outside 2..=10
    #[error("Invalid player count {0}: must be between 2 and 10")]
    InvalidPlayerCount(usize),

    /// Deck type other than the full deck
    #[error("Unsupported deck type: {0}")]
    UnsupportedDeckType(String),

    /// Community reveal that is not 3, 4 or 5 cards
    #[error("Invalid community card count {0}: must be 3, 4 or 5")]
    InvalidCommunityCount(usize),

    /// Initial community reveal on a table that already shows a board
    #[error("Community cards already dealt ({0} on the board)")]
    CommunityAlreadyDealt(usize),

    /// Player id outside 1..=num_players
    #[error("Unknown player {id}: table seats players 1 to {num_players}")]
    UnknownPlayer { id: usize, num_players: usize },

    /// Hole card assignment that is not exactly two cards
    #[error("Invalid hole card count {0}: a hand is exactly two cards")]
    InvalidHoleCount(usize),

    /// `next_round` called on a complete board
    #[error("Board is complete: no street after the river")]
    RiverReached,

    /// Zero samples, zero threads, or similar
    #[error("Invalid simulation parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// Config source (JSON or environment) could not be parsed
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Rank outside 2..=14 or unparsable card text
    #[error("Invalid card: {0}")]
    InvalidCard(String),

    /// Evaluator called with fewer than five or more than seven cards
    #[error("Invalid hand size {0}: evaluation takes 5 to 7 cards")]
    InvalidHandSize(usize),

    /// Dedicated rayon pool could not be created
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// Card is on the board, in a hand, or otherwise out of the deck
    #[error("Card {0} is not available in the deck")]
    CardUnavailable(Card),

    /// Same card listed twice in a single request
    #[error("Card {0} appears more than once")]
    DuplicateCard(Card),

    /// Hole cards assigned twice to one player
    #[error("Player {0} already has hole cards")]
    PlayerAlreadyDealt(usize),

    /// Draw larger than the remaining deck
    #[error("Insufficient cards: requested {requested}, {remaining} remaining")]
    InsufficientCards { requested: usize, remaining: usize },

    /// Simulation started before the tracked player has a hand
    #[error("Player {0} has no hole cards: deal the tracked hand first")]
    MissingHeroHand(usize),
}

impl OddsError {
    /// Taxonomy class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            OddsError::InvalidPlayerCount(_)
            | OddsError::UnsupportedDeckType(_)
            | OddsError::InvalidCommunityCount(_)
            | OddsError::CommunityAlreadyDealt(_)
            | OddsError::UnknownPlayer { .. }
            | OddsError::InvalidHoleCount(_)
            | OddsError::RiverReached
            | OddsError::InvalidParameter { .. }
            | OddsError::InvalidConfig(_)
            | OddsError::InvalidCard(_)
            | OddsError::InvalidHandSize(_)
            | OddsError::ThreadPool(_) => ErrorKind::Configuration,
            OddsError::CardUnavailable(_)
            | OddsError::DuplicateCard(_)
            | OddsError::PlayerAlreadyDealt(_) => ErrorKind::CardConflict,
            OddsError::InsufficientCards { .. } => ErrorKind::InsufficientCards,
            OddsError::MissingHeroHand(_) => ErrorKind::IncompleteState,
        }
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, OddsError>;
