//! Search configuration.
//!
//! Every tunable lives here or in [`EvalWeights`]. Missing TOML fields fall back to defaults:
//!
//! ```toml
//! [alpha_beta]
//! depth = 6
//!
//! [mcts]
//! simulations = 2000
//!
//! [weights]
//! mobility = 12
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ConfigError;
use crate::evaluator::EvalWeights;

/// Configuration for the depth-limited alpha-beta search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlphaBetaConfig {
    /// Plies searched below the root. Passes consume depth too.
    pub depth: u32,
    /// Cut branches once `beta <= alpha`. Turning it off yields plain minimax with the same value.
    pub pruning: bool,
}

impl Default for AlphaBetaConfig {
    fn default() -> Self {
        Self {
            depth: 5,
            pruning: true,
        }
    }
}

impl AlphaBetaConfig {
    /// Sets the number of plies searched below the root.
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    /// Enables or disables alpha-beta cutoffs.
    pub fn with_pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }
}

/// Configuration for Monte Carlo Tree Search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MctsConfig {
    /// Number of select/expand/simulate/backpropagate rounds per search.
    pub simulations: u32,
    /// Exploration constant `C` in UCB1.
    pub exploration: f64,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            simulations: 1000,
            exploration: std::f64::consts::SQRT_2,
        }
    }
}

impl MctsConfig {
    /// A small budget for tests.
    pub fn for_testing() -> Self {
        Self {
            simulations: 200,
            ..Self::default()
        }
    }

    /// Sets the number of simulations per search.
    pub fn with_simulations(mut self, n: u32) -> Self {
        self.simulations = n;
        self
    }

    /// Sets the UCB1 exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration = c;
        self
    }
}

/// All search settings in one place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub alpha_beta: AlphaBetaConfig,
    pub mcts: MctsConfig,
    pub weights: EvalWeights,
}

impl EngineConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loading engine config from {}", path.display());
        Self::from_toml_str(&content)
    }

    /// Like [`from_path`](Self::from_path), but falls back to defaults on any error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::from_path(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("{}, using built-in defaults", e);
                Self::default()
            }
        }
    }

    /// Checks the weights and rejects settings no search can run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.weights.validate()?;
        if self.alpha_beta.depth == 0 {
            return Err(ConfigError::InvalidValue(
                "alpha_beta.depth must be at least 1".into(),
            ));
        }
        if self.mcts.simulations == 0 {
            return Err(ConfigError::InvalidValue(
                "mcts.simulations must be at least 1".into(),
            ));
        }
        if !(self.mcts.exploration.is_finite() && self.mcts.exploration >= 0.0) {
            return Err(ConfigError::InvalidValue(format!(
                "mcts.exploration must be a finite non-negative number, got {}",
                self.mcts.exploration
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.alpha_beta.depth, 5);
        assert!(config.alpha_beta.pruning);
        assert_eq!(config.mcts.simulations, 1000);
        assert!((config.mcts.exploration - std::f64::consts::SQRT_2).abs() < 1e-12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let mcts = MctsConfig::default()
            .with_simulations(100)
            .with_exploration(0.5);
        assert_eq!(mcts.simulations, 100);
        assert!((mcts.exploration - 0.5).abs() < 1e-12);

        let ab = AlphaBetaConfig::default().with_depth(3).with_pruning(false);
        assert_eq!(ab.depth, 3);
        assert!(!ab.pruning);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let toml_content = r#"
[alpha_beta]
depth = 6

[weights]
mobility = 12
"#;
        let config = EngineConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.alpha_beta.depth, 6);
        assert!(config.alpha_beta.pruning);
        assert_eq!(config.mcts.simulations, 1000);
        assert_eq!(config.weights.mobility, 12);
        assert_eq!(config.weights.corner, 50);
        assert_eq!(config.weights.positional.len(), 64);
    }

    #[test]
    fn test_short_positional_table_is_rejected() {
        let toml_content = r#"
[weights]
positional = [1, 2, 3]
"#;
        let err = EngineConfig::from_toml_str(toml_content).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidWeights {
                expected: 64,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_overflowing_terminal_weight_is_rejected() {
        let err = EngineConfig::from_toml_str("[weights]\nterminal = 2147483647\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));
    }

    #[test]
    fn test_negative_weight_is_rejected() {
        let err = EngineConfig::from_toml_str("[weights]\nfrontier = -3\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));
    }

    #[test]
    fn test_zero_depth_is_rejected() {
        let err = EngineConfig::from_toml_str("[alpha_beta]\ndepth = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));
    }

    #[test]
    fn test_malformed_toml_is_a_parse_error() {
        let err = EngineConfig::from_toml_str("[mcts\nsimulations = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = EngineConfig::load_or_default("/nonexistent/board-search.toml");
        assert_eq!(config, EngineConfig::default());
        assert!(matches!(
            EngineConfig::from_path("/nonexistent/board-search.toml"),
            Err(ConfigError::Io { .. })
        ));
    }
}
