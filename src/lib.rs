//! Holdem Odds: Entry Point
//!
//! Win/tie/lose probabilities for one tracked player at a Texas Hold'em
//! table where only part of the cards are known.
//!
//! ## Architecture
//!
//! ```text
//! caller (web layer, CLI)
//!     │  new_table → add_to_hand / add_to_community → compute_equity
//!     ▼
//! lib.rs  ──────────────────────────  This file (entry point)
//!     ├── card.rs                    Card, Suit, text form
//!     ├── deck.rs                    Deck, uniform draw without replacement
//!     ├── evaluator.rs               best-of-5..7 hand evaluator (bitwise)
//!     ├── table.rs                   seats, board, street
//!     ├── simulation.rs              two-level Monte Carlo (rayon)
//!     ├── aggregate.rs               mean over outer samples → Equity
//!     ├── config.rs                  sample sizes, seed, threads
//!     └── error.rs                   OddsError taxonomy
//! ```
//!
//! ## Example
//!
//! ```
//! use holdem_odds::{compute_equity, new_table, parse_cards};
//!
//! let mut table = new_table(2, "full").unwrap();
//! table.add_to_hand(1, &parse_cards("As Ad").unwrap()).unwrap();
//! let odds = compute_equity(&table, 4, 500).unwrap();
//! assert!((odds.win + odds.tie + odds.lose - 1.0).abs() < 1e-6);
//! ```

pub mod aggregate;
pub mod card;
pub mod config;
pub mod deck;
pub mod error;
pub mod evaluator;
pub mod simulation;
pub mod table;

pub use aggregate::{Aggregator, Equity};
pub use card::{format_cards, parse_cards, Card, Suit};
pub use config::SimulationConfig;
pub use deck::{Deck, DeckType};
pub use error::{ErrorKind, OddsError, Result};
pub use evaluator::{evaluate, HandCategory, HandRank};
pub use simulation::{SimulationReport, SimulationTally, Simulator, Tally, POT_UNITS};
pub use table::{Player, Street, Table, HERO, MAX_PLAYERS, MIN_PLAYERS};

/// Initialize logging. Safe to call more than once.
pub fn init() {
    env_logger::try_init().ok();
    log::debug!("{} ready", version());
}

/// Return the engine version string.
pub fn version() -> String {
    format!("holdem-odds v{}", env!("CARGO_PKG_VERSION"))
}

/// Empty table for `num_players` (2-10) seats and a named deck type.
pub fn new_table(num_players: usize, deck_type: &str) -> Result<Table> {
    Table::new(num_players, deck_type.parse()?)
}

/// Probabilities for player 1 from `n_outer` board completions of
/// `n_inner` showdowns each.
///
/// The table is only read; every sample works on its own copy.
pub fn compute_equity(table: &Table, n_outer: usize, n_inner: usize) -> Result<Equity> {
    Ok(Simulator::new(n_outer, n_inner)?.run(table)?.equity)
}

/// Same as [`compute_equity`], with sample sizes, seed and threads from
/// a [`SimulationConfig`].
pub fn compute_equity_with(table: &Table, config: &SimulationConfig) -> Result<Equity> {
    Ok(Simulator::from_config(config, table.street())?.run(table)?.equity)
}
