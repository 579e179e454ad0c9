//! Simulation configuration.
//!
//! Sample sizes, seed and worker count. Values come from [`Default`], a
//! JSON document, or `HOLDEM_ODDS_*` environment variables.

use crate::error::{OddsError, Result};
use crate::table::Street;
use serde::{Deserialize, Serialize};
use std::env::VarError;
use std::str::FromStr;

/// Environment variable prefix for [`SimulationConfig::from_env`]
pub const ENV_PREFIX: &str = "HOLDEM_ODDS_";

/// Monte Carlo sample sizes and runtime knobs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Outer samples while the flop is still unknown (default: 30)
    pub n_outer: usize,

    /// Outer samples once the flop is known (default: 100)
    pub n_outer_postflop: usize,

    /// Inner trials per outer sample (default: 10,000)
    pub n_inner: usize,

    /// Fixed seed for reproducible runs; fresh entropy when unset
    pub seed: Option<u64>,

    /// Dedicated worker count; the global rayon pool when unset
    pub threads: Option<usize>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            n_outer: 30,
            n_outer_postflop: 100,
            n_inner: 10_000,
            seed: None,
            threads: None,
        }
    }
}

impl SimulationConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("n_outer", self.n_outer),
            ("n_outer_postflop", self.n_outer_postflop),
            ("n_inner", self.n_inner),
            ("threads", self.threads.unwrap_or(1)),
        ];
        for (name, value) in positive {
            if value == 0 {
                return Err(OddsError::InvalidParameter {
                    name,
                    reason: "must be at least 1".into(),
                });
            }
        }
        Ok(())
    }

    /// Parse and validate a JSON document; missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| OddsError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by `HOLDEM_ODDS_N_OUTER`, `HOLDEM_ODDS_N_OUTER_POSTFLOP`,
    /// `HOLDEM_ODDS_N_INNER`, `HOLDEM_ODDS_SEED` and `HOLDEM_ODDS_THREADS`.
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set but does not parse, or if the
    /// resulting configuration is invalid.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Some(v) = env_var("N_OUTER")? {
            config.n_outer = v;
        }
        if let Some(v) = env_var("N_OUTER_POSTFLOP")? {
            config.n_outer_postflop = v;
        }
        if let Some(v) = env_var("N_INNER")? {
            config.n_inner = v;
        }
        if let Some(v) = env_var("SEED")? {
            config.seed = Some(v);
        }
        if let Some(v) = env_var("THREADS")? {
            config.threads = Some(v);
        }
        config.validate()?;
        Ok(config)
    }

    /// Outer sample count for a table at `street`: `n_outer` preflop,
    /// `n_outer_postflop` once the flop is known.
    pub fn outer_samples(&self, street: Street) -> usize {
        match street {
            Street::Preflop => self.n_outer,
            Street::Flop | Street::Turn | Street::River => self.n_outer_postflop,
        }
    }
}

fn env_var<T: FromStr>(key: &str) -> Result<Option<T>> {
    let name = format!("{ENV_PREFIX}{key}");
    match std::env::var(&name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| OddsError::InvalidConfig(format!("{name}={raw:?} is not a valid value"))),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(raw)) => Err(OddsError::InvalidConfig(format!(
            "{name}={raw:?} is not valid UTF-8"
        ))),
    }
}
