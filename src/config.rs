//! Engine and application settings, loadable from TOML

use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::MAX_SEARCH_DEPTH;

/// Which move-selection strategy the computer player uses
#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Win or block when possible, otherwise rank depth-1 positions with the heuristic
    TacticalHeuristic,
    /// Rank single trial placements by neighbouring pieces, no tree
    Greedy,
}

impl std::str::FromStr for StrategyKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tactical" | "tactical_heuristic" | "tactical-heuristic" => Ok(StrategyKind::TacticalHeuristic),
            "greedy" => Ok(StrategyKind::Greedy),
            other => Err(ConfigError::Validation(format!("unknown strategy '{}'", other))),
        }
    }
}

/// How tree scores reach the depth-1 candidates
#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBackup {
    /// Score each depth-1 position directly. Only one ply is built.
    Immediate,
    /// Build the full tree and back leaf scores up with minimax
    Minimax,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub strategy: StrategyKind,
    pub search_depth: usize,
    pub backup: ScoreBackup,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::TacticalHeuristic,
            search_depth: 3,
            backup: ScoreBackup::Immediate,
        }
    }
}

impl EngineConfig {
    pub fn greedy() -> Self {
        Self {
            strategy: StrategyKind::Greedy,
            ..Self::default()
        }
    }

    /// Search depth limited to `1..=MAX_SEARCH_DEPTH`
    pub fn effective_depth(&self) -> usize {
        clamp_depth(self.search_depth)
    }

    pub fn validate(&self, section: &str) -> Result<(), ConfigError> {
        if self.search_depth == 0 || self.search_depth > MAX_SEARCH_DEPTH {
            return Err(ConfigError::Validation(format!(
                "{}.search_depth must be between 1 and {}",
                section, MAX_SEARCH_DEPTH
            )));
        }
        Ok(())
    }
}

/// Limits a requested search depth to what the engine supports
pub fn clamp_depth(depth: usize) -> usize {
    if depth > MAX_SEARCH_DEPTH {
        warn!(
            "search depth {} exceeds the maximum of {}, clamping",
            depth, MAX_SEARCH_DEPTH
        );
    }
    depth.max(1).min(MAX_SEARCH_DEPTH)
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    /// The engine playing against `AppConfig::cpu`
    pub challenger: EngineConfig,
    /// Number of forced opening moves enumerated before the engines take over
    pub opening_plies: usize,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            challenger: EngineConfig::greedy(),
            opening_plies: 2,
        }
    }
}

/// Top-level application configuration
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub cpu: EngineConfig,
    pub tournament: TournamentConfig,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path`, falling back to defaults if the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.cpu.validate("cpu")?;
        self.tournament.challenger.validate("tournament.challenger")?;
        if self.tournament.opening_plies > 2 {
            return Err(ConfigError::Validation(
                "tournament.opening_plies must be at most 2".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
