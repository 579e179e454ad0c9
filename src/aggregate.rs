//! Holdem Odds: Probability Aggregator
//!
//! Each outer sample is an equally weighted draw from the distribution of
//! board completions, so the final estimate is the plain arithmetic mean of
//! the per-sample win and tie percentages.

use crate::simulation::Tally;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Win/tie/lose probabilities for the tracked player, each in [0, 1],
/// plus the expected fraction of the pot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Equity {
    pub win: f64,
    pub tie: f64,
    pub lose: f64,
    /// Expected pot share: wins count whole, ties count `1 / k` for a
    /// `k`-way split.
    pub share: f64,
}

impl Equity {
    /// Build from win and tie probabilities and the pot share; `lose` is
    /// the complement.
    pub fn from_rates(win: f64, tie: f64, share: f64) -> Self {
        Self {
            win,
            tie,
            lose: (1.0 - win - tie).max(0.0),
            share,
        }
    }

    /// Expected share of the pot, between `win` and `win + tie`.
    pub fn equity(&self) -> f64 {
        self.share
    }
}

impl fmt::Display for Equity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "win {:.2}%  tie {:.2}%  lose {:.2}%",
            self.win * 100.0,
            self.tie * 100.0,
            self.lose * 100.0
        )
    }
}

/// Running mean of per-sample win/tie/share percentages.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    samples: usize,
    win_pct: f64,
    tie_pct: f64,
    share_pct: f64,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one outer sample's tally for the tracked player.
    pub fn add(&mut self, tally: &Tally) {
        self.add_percentages(tally.win_pct(), tally.tie_pct(), tally.share_pct());
    }

    pub fn add_percentages(&mut self, win_pct: f64, tie_pct: f64, share_pct: f64) {
        self.samples += 1;
        self.win_pct += win_pct;
        self.tie_pct += tie_pct;
        self.share_pct += share_pct;
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Mean over all samples, `None` before the first one.
    pub fn finish(&self) -> Option<Equity> {
        if self.samples == 0 {
            return None;
        }
        let n = self.samples as f64;
        Some(Equity::from_rates(
            self.win_pct / 100.0 / n,
            self.tie_pct / 100.0 / n,
            self.share_pct / 100.0 / n,
        ))
    }
}
