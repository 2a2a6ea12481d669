//! Game rules consulted by the discovery protocol.
//!
//! Loaded from `rules.json` with support for an environment variable override.

use std::{
    collections::HashMap,
    env, fs, io,
    path::{Path, PathBuf},
    sync::Arc,
};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    environment::{WormholeStability, WormholeStats},
    ids::PlayerNum,
};

pub const BUILTIN_RULES: &str = include_str!("data/rules.json");

/// Environment variable naming a rules file to load instead of the builtin.
pub const RULES_PATH_ENV: &str = "INTEL_RULES_PATH";

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Rules {
    /// Base seed for every random stream derived from these rules.
    pub seed: u64,
    /// Maximum fractional error applied to scanned population of foreign planets.
    pub population_scanner_error: f64,
    pub wormhole_stats: HashMap<WormholeStability, WormholeStats>,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            seed: 0,
            population_scanner_error: 0.2,
            wormhole_stats: HashMap::new(),
        }
    }
}

impl Rules {
    pub fn builtin() -> Arc<Self> {
        Arc::new(serde_json::from_str(BUILTIN_RULES).expect("builtin rules should parse"))
    }

    pub fn from_json_str(json: &str) -> Result<Self, RulesError> {
        let rules: Rules = serde_json::from_str(json)?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn from_file(path: &Path) -> Result<Self, RulesError> {
        let contents = fs::read_to_string(path).map_err(|source| RulesError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Rules::from_json_str(&contents)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_population_scanner_error(mut self, error: f64) -> Self {
        self.population_scanner_error = error;
        self
    }

    pub fn validate(&self) -> Result<(), RulesError> {
        let error = self.population_scanner_error;
        if !(0.0..=1.0).contains(&error) {
            return Err(RulesError::Invalid(format!(
                "population_scanner_error must be within [0, 1], got {error}"
            )));
        }
        Ok(())
    }

    /// Random stream for one player's discoveries during one turn.
    ///
    /// Streams depend only on the seed, the turn and the player, so players can
    /// be processed in any order or in parallel with identical results.
    pub fn rng_for(&self, turn: u64, player: PlayerNum) -> ChaCha8Rng {
        let seed = self.seed ^ (u64::from(player.0) << 32) ^ turn;
        ChaCha8Rng::seed_from_u64(seed)
    }

    pub fn wormhole_stats_for(&self, stability: WormholeStability) -> WormholeStats {
        self.wormhole_stats
            .get(&stability)
            .copied()
            .unwrap_or_default()
    }
}

#[derive(Debug, Error)]
pub enum RulesError {
    #[error("failed to parse rules: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read rules from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid rules: {0}")]
    Invalid(String),
}

/// Where the active rules came from.
#[derive(Debug, Clone)]
pub struct RulesMetadata {
    path: Option<PathBuf>,
}

impl RulesMetadata {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// `None` when the builtin rules are in use.
    pub fn path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }
}

/// Load rules from `INTEL_RULES_PATH`, falling back to the builtin document.
pub fn load_rules_from_env() -> (Arc<Rules>, RulesMetadata) {
    if let Some(path) = env::var(RULES_PATH_ENV).ok().map(PathBuf::from) {
        match Rules::from_file(&path) {
            Ok(rules) => {
                tracing::info!(
                    target: "stellar::config",
                    path = %path.display(),
                    "rules.loaded=file"
                );
                return (Arc::new(rules), RulesMetadata::new(Some(path)));
            }
            Err(err) => {
                tracing::warn!(
                    target: "stellar::config",
                    path = %path.display(),
                    error = %err,
                    "rules.load_failed"
                );
            }
        }
    }

    let rules = Rules::builtin();
    tracing::info!(target: "stellar::config", "rules.loaded=builtin");
    (rules, RulesMetadata::new(None))
}
