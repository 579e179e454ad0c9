//! Holdem Odds: Simulation Engine
//!
//! Two nested Monte Carlo loops:
//!
//! 1. **Outer sample** (street completion): clone the table and, unless the
//!    board is already complete, deal one more street on the clone. This
//!    fixes one random completion of the unseen board.
//! 2. **Inner trials** (hand simulation): on that clone, repeatedly deal
//!    fresh hole cards to every seat without a hand plus whatever board is
//!    still missing, evaluate every seat and tally the showdown.
//!
//! Outer samples are independent and run in parallel on rayon. Each one
//! owns its own Xoshiro256++ stream, split off a seeded base generator
//! with `jump()`, and results are collected in sample order, so a seeded
//! run gives identical tallies whatever the thread count.

use crate::aggregate::{Aggregator, Equity};
use crate::card::Card;
use crate::config::SimulationConfig;
use crate::deck::partial_shuffle;
use crate::error::{OddsError, Result};
use crate::evaluator::{rank_cards, HandRank};
use crate::table::{Street, Table, HERO};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;
use std::time::Instant;

// ── Tallies ─────────────────────────────────────────────────────────

/// One whole pot in [`Tally::share`] units. Divisible by every split
/// size from 1 to 10 players, so shares stay exact integers.
pub const POT_UNITS: u64 = 2520;

/// Showdown counts for one seat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub wins: u64,
    pub ties: u64,
    pub losses: u64,
    /// Pots won, in [`POT_UNITS`]: a full pot per win, an even split per tie.
    pub share: u64,
}

impl Tally {
    pub fn trials(&self) -> u64 {
        self.wins + self.ties + self.losses
    }

    /// Average fraction of the pot taken, in percent.
    pub fn share_pct(&self) -> f64 {
        match self.trials() {
            0 => 0.0,
            t => self.share as f64 * 100.0 / (t * POT_UNITS) as f64,
        }
    }

    pub fn win_pct(&self) -> f64 {
        self.pct(self.wins)
    }

    pub fn tie_pct(&self) -> f64 {
        self.pct(self.ties)
    }

    pub fn loss_pct(&self) -> f64 {
        self.pct(self.losses)
    }

    fn pct(&self, n: u64) -> f64 {
        match self.trials() {
            0 => 0.0,
            t => n as f64 * 100.0 / t as f64,
        }
    }
}

/// Per-seat counts over a batch of inner trials.
///
/// A tie is credited to every seat sharing the best hand of a trial; a win
/// only to a unique best hand. Tied seats split the pot evenly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationTally {
    players: Vec<Tally>,
    trials: u64,
}

impl SimulationTally {
    pub fn new(num_players: usize) -> Self {
        Self {
            players: vec![Tally::default(); num_players],
            trials: 0,
        }
    }

    /// Record one showdown. `ranks[i]` is the hand of seat `i + 1`.
    pub fn record(&mut self, ranks: &[HandRank]) {
        let Some(&best) = ranks.iter().max() else {
            return;
        };
        let n_best = ranks.iter().filter(|&&r| r == best).count();
        let split = POT_UNITS / n_best as u64;
        for (tally, &rank) in self.players.iter_mut().zip(ranks) {
            if rank != best {
                tally.losses += 1;
            } else if n_best == 1 {
                tally.wins += 1;
                tally.share += POT_UNITS;
            } else {
                tally.ties += 1;
                tally.share += split;
            }
        }
        self.trials += 1;
    }

    /// Sum another batch into this one.
    pub fn merge(&mut self, other: &SimulationTally) {
        for (mine, theirs) in self.players.iter_mut().zip(&other.players) {
            mine.wins += theirs.wins;
            mine.ties += theirs.ties;
            mine.losses += theirs.losses;
            mine.share += theirs.share;
        }
        self.trials += other.trials;
    }

    pub fn trials(&self) -> u64 {
        self.trials
    }

    /// Counts for a seat, numbered from 1.
    pub fn player(&self, id: usize) -> Option<&Tally> {
        id.checked_sub(1).and_then(|i| self.players.get(i))
    }

    pub fn players(&self) -> &[Tally] {
        &self.players
    }

    /// Counts for the tracked player.
    pub fn hero(&self) -> Tally {
        self.players.first().copied().unwrap_or_default()
    }
}

// ── Inner Loop ──────────────────────────────────────────────────────

/// Run `n_inner` showdowns on a fixed table.
///
/// Seats with known hole cards keep them; every other seat gets two fresh
/// cards each trial, and the board is topped up to five cards. Nothing from
/// one trial carries over into the next.
pub fn simulate_hands<R: Rng + ?Sized>(
    table: &Table,
    n_inner: usize,
    rng: &mut R,
) -> Result<SimulationTally> {
    let players = table.players();
    let community = table.community();
    let missing = Street::River.community_count() - community.len();
    let n_unknown = players.iter().filter(|p| !p.is_dealt()).count();
    let needed = missing + 2 * n_unknown;

    let mut stock: Vec<Card> = table.deck().cards().to_vec();
    if needed > stock.len() {
        return Err(OddsError::InsufficientCards {
            requested: needed,
            remaining: stock.len(),
        });
    }

    let mut tally = SimulationTally::new(players.len());
    let mut ranks = vec![HandRank::default(); players.len()];
    let mut board: Vec<Card> = Vec::with_capacity(5);
    let mut hand: Vec<Card> = Vec::with_capacity(7);

    for _ in 0..n_inner {
        // Fisher-Yates partial shuffle (only shuffle what we need)
        partial_shuffle(&mut stock, needed, rng);

        board.clear();
        board.extend_from_slice(community);
        board.extend_from_slice(&stock[..missing]);

        let mut offset = missing;
        for (seat, player) in players.iter().enumerate() {
            let hole = match player.hole() {
                Some(hole) => hole,
                None => {
                    offset += 2;
                    [stock[offset - 2], stock[offset - 1]]
                }
            };
            hand.clear();
            hand.extend_from_slice(&hole);
            hand.extend_from_slice(&board);
            ranks[seat] = rank_cards(&hand);
        }

        tally.record(&ranks);
    }

    Ok(tally)
}

// ── Outer Loop ──────────────────────────────────────────────────────

/// One street-completion sample followed by its inner batch.
pub fn outer_sample<R: Rng + ?Sized>(
    table: &Table,
    n_inner: usize,
    rng: &mut R,
) -> Result<SimulationTally> {
    let mut branch = table.clone();
    if branch.street() != Street::River {
        branch.next_round(rng)?;
    }
    simulate_hands(&branch, n_inner, rng)
}

/// Everything one engine run produced.
#[derive(Debug, Clone)]
pub struct SimulationReport {
    /// Averaged probabilities for the tracked player.
    pub equity: Equity,
    /// Counts summed over all outer samples, for every seat.
    pub tally: SimulationTally,
    pub samples: usize,
    /// Seed of the base generator; rerun with it to reproduce.
    pub seed: u64,
}

/// Configured two-level Monte Carlo run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Simulator {
    n_outer: usize,
    n_inner: usize,
    seed: Option<u64>,
    threads: Option<usize>,
}

impl Simulator {
    pub fn new(n_outer: usize, n_inner: usize) -> Result<Self> {
        if n_outer == 0 {
            return Err(OddsError::InvalidParameter {
                name: "n_outer",
                reason: "must be at least 1".into(),
            });
        }
        if n_inner == 0 {
            return Err(OddsError::InvalidParameter {
                name: "n_inner",
                reason: "must be at least 1".into(),
            });
        }
        Ok(Self {
            n_outer,
            n_inner,
            seed: None,
            threads: None,
        })
    }

    /// Simulator for a table at `street`, using the config's escalation policy.
    pub fn from_config(config: &SimulationConfig, street: Street) -> Result<Self> {
        config.validate()?;
        let mut sim = Self::new(config.outer_samples(street), config.n_inner)?;
        sim.seed = config.seed;
        sim.threads = config.threads;
        Ok(sim)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Run on a dedicated pool of `threads` workers instead of the global one.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    pub fn n_outer(&self) -> usize {
        self.n_outer
    }

    pub fn n_inner(&self) -> usize {
        self.n_inner
    }

    /// Per-sample tallies in sample order.
    pub fn outer_tallies(&self, table: &Table) -> Result<Vec<SimulationTally>> {
        let seed = self.seed.unwrap_or_else(rand::random::<u64>);
        self.sample(table, seed)
    }

    /// Full run: sample, then average the tracked player's results.
    pub fn run(&self, table: &Table) -> Result<SimulationReport> {
        let start = Instant::now();
        let seed = self.seed.unwrap_or_else(rand::random::<u64>);
        log::debug!(
            "simulating {} players at {}: {} outer x {} inner, seed {seed}",
            table.num_players(),
            table.street(),
            self.n_outer,
            self.n_inner,
        );

        let tallies = self.sample(table, seed)?;

        let mut aggregator = Aggregator::new();
        let mut total = SimulationTally::new(table.num_players());
        for (i, tally) in tallies.iter().enumerate() {
            let hero = tally.hero();
            log::debug!(
                "outer sample {i}: win {:.2}% tie {:.2}%",
                hero.win_pct(),
                hero.tie_pct()
            );
            aggregator.add(&hero);
            total.merge(tally);
        }

        let equity = aggregator.finish().ok_or(OddsError::InvalidParameter {
            name: "n_outer",
            reason: "no samples were run".into(),
        })?;

        log::info!(
            "{} players at {}: {equity} ({} trials in {:.1?})",
            table.num_players(),
            table.street(),
            total.trials(),
            start.elapsed(),
        );

        Ok(SimulationReport {
            equity,
            tally: total,
            samples: tallies.len(),
            seed,
        })
    }

    fn sample(&self, table: &Table, seed: u64) -> Result<Vec<SimulationTally>> {
        if !table.player(HERO).is_some_and(|p| p.is_dealt()) {
            return Err(OddsError::MissingHeroHand(HERO));
        }

        // One independent stream per outer sample
        let mut base = Xoshiro256PlusPlus::seed_from_u64(seed);
        let streams: Vec<Xoshiro256PlusPlus> = (0..self.n_outer)
            .map(|_| {
                let stream = base.clone();
                base.jump();
                stream
            })
            .collect();

        let n_inner = self.n_inner;
        let run = move || {
            streams
                .into_par_iter()
                .map(|mut rng| outer_sample(table, n_inner, &mut rng))
                .collect::<Result<Vec<_>>>()
        };

        match self.threads {
            None => run(),
            Some(0) => Err(OddsError::InvalidParameter {
                name: "threads",
                reason: "must be at least 1".into(),
            }),
            Some(n) => rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()?
                .install(run),
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────
