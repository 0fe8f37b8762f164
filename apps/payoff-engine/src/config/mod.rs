//! Configuration module for the payoff engine.
//!
//! Loads YAML configuration with environment variable interpolation and
//! validates it before use. Every section is optional.
//!
//! # Usage
//!
//! ```rust,ignore
//! use payoff_engine::config::load_config;
//!
//! // Load from default path (config.yaml), defaults when absent
//! let config = load_config(None)?;
//!
//! // Load from custom path
//! let config = load_config(Some("custom/config.yaml"))?;
//!
//! println!("grid points: {}", config.grid.points);
//! ```

mod chain;
mod grid;
mod observability;
mod solver;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use chain::{ChainConfig, MAX_STRIKE_WINDOW};
pub use grid::{GridConfig, MAX_GRID_POINTS};
pub use observability::{LoggingConfig, ObservabilityConfig};
pub use solver::SolverConfig;

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    /// Price grid configuration.
    #[serde(default)]
    pub grid: GridConfig,
    /// Option chain configuration.
    #[serde(default)]
    pub chain: ChainConfig,
    /// Break-even solver configuration.
    #[serde(default)]
    pub solver: SolverConfig,
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file with environment variable interpolation.
///
/// With `path` unset, `config.yaml` is read if present and defaults are used
/// otherwise. An explicit path that cannot be read is an error.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let explicit = path.is_some();
    let path = path.unwrap_or(DEFAULT_CONFIG_PATH);

    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if !explicit && e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(Config::default());
        }
        Err(e) => {
            return Err(ConfigError::ReadError {
                path: path.to_string(),
                source: e,
            });
        }
    };

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string (useful for testing).
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = if interpolated.trim().is_empty() {
        Config::default()
    } else {
        serde_yaml_bw::from_str(&interpolated)?
    };
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax.
#[allow(clippy::expect_used)] // Regex is compile-time constant
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |caps: &regex::Captures<'_>| {
        let default_value = caps.get(2).map_or("", |m| m.as_str());
        match std::env::var(&caps[1]) {
            Ok(v) if !v.is_empty() => v,
            _ => default_value.to_string(),
        }
    })
    .into_owned()
}

/// Validate configuration values.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let grid = &config.grid;

    if !(2..=MAX_GRID_POINTS).contains(&grid.points) {
        return Err(ConfigError::ValidationError(format!(
            "grid.points must be between 2 and {MAX_GRID_POINTS}"
        )));
    }

    if !(grid.lower_factor.is_finite() && grid.lower_factor > 0.0) {
        return Err(ConfigError::ValidationError(
            "grid.lower_factor must be positive".to_string(),
        ));
    }

    if !(grid.upper_factor.is_finite() && grid.upper_factor > grid.lower_factor) {
        return Err(ConfigError::ValidationError(
            "grid.upper_factor must be greater than grid.lower_factor".to_string(),
        ));
    }

    if config.chain.strike_window > MAX_STRIKE_WINDOW {
        return Err(ConfigError::ValidationError(format!(
            "chain.strike_window must be at most {MAX_STRIKE_WINDOW}"
        )));
    }

    let tolerance = config.solver.tolerance;
    if !(tolerance.is_finite() && tolerance > 0.0) {
        return Err(ConfigError::ValidationError(
            "solver.tolerance must be positive".to_string(),
        ));
    }

    let valid_formats = ["json", "pretty"];
    if !valid_formats.contains(&config.observability.logging.format.as_str()) {
        return Err(ConfigError::ValidationError(format!(
            "observability.logging.format must be one of: {valid_formats:?}"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.grid.points, 10_000);
        assert!((config.grid.lower_factor - 0.5).abs() < f64::EPSILON);
        assert!((config.grid.upper_factor - 1.5).abs() < f64::EPSILON);
        assert_eq!(config.chain.strike_window, 10);
        assert!((config.solver.tolerance - 1e-6).abs() < f64::EPSILON);
        assert!(!config.solver.verify);
        assert_eq!(config.observability.logging.level, "info");
        assert_eq!(config.observability.logging.format, "pretty");
    }

    #[test]
    fn test_load_empty_config() {
        let config = load_config_from_string("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_partial_config() {
        let yaml = r"
grid:
  points: 500
";
        let config = match load_config_from_string(yaml) {
            Ok(c) => c,
            Err(e) => panic!("should load partial config: {e}"),
        };
        assert_eq!(config.grid.points, 500);
        assert!((config.grid.upper_factor - 1.5).abs() < f64::EPSILON); // Default value
        assert_eq!(config.chain, ChainConfig::default());
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
grid:
  points: 2001
  lower_factor: 0.8
  upper_factor: 1.2

chain:
  strike_window: 5

solver:
  tolerance: 0.0001
  verify: true

observability:
  logging:
    level: "debug"
    format: "json"
"#;

        let config = match load_config_from_string(yaml) {
            Ok(c) => c,
            Err(e) => panic!("should load full config: {e}"),
        };

        assert_eq!(config.grid.points, 2001);
        assert!((config.grid.lower_factor - 0.8).abs() < f64::EPSILON);
        assert_eq!(config.chain.strike_window, 5);
        assert!((config.solver.tolerance - 0.0001).abs() < f64::EPSILON);
        assert!(config.solver.verify);
        assert_eq!(config.observability.logging.level, "debug");
        assert_eq!(config.observability.logging.format, "json");
    }

    #[test]
    fn test_env_var_with_default_when_missing() {
        let input = "points: ${PAYOFF_CONFIG_TEST_NONEXISTENT_VAR:-250}";
        assert_eq!(interpolate_env_vars(input), "points: 250");
    }

    #[test]
    #[expect(clippy::literal_string_with_formatting_args)] // ${...} is env var syntax, not format args
    fn test_env_var_with_default_uses_existing() {
        // PATH should always exist
        let input = "path: ${PATH:-default}";
        let result = interpolate_env_vars(input);

        assert_ne!(result, "path: default");
        assert!(result.starts_with("path: "));
    }

    #[test]
    fn test_env_var_without_default_becomes_empty() {
        let input = "level: ${PAYOFF_CONFIG_TEST_UNLIKELY_TO_EXIST}";
        assert_eq!(interpolate_env_vars(input), "level: ");
    }

    #[test]
    fn test_interpolated_default_is_parsed() {
        let yaml = "grid:\n  points: ${PAYOFF_CONFIG_TEST_GRID_POINTS:-321}\n";
        let config = load_config_from_string(yaml).unwrap();
        assert_eq!(config.grid.points, 321);
    }

    #[test]
    fn test_validation_too_few_points() {
        let yaml = "grid:\n  points: 1\n";
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for single grid point");
        };
        assert!(err.to_string().contains("grid.points"));
    }

    #[test]
    fn test_validation_too_many_points() {
        let yaml = "grid:\n  points: 100000000\n";
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for oversized grid");
        };
        assert!(err.to_string().contains("grid.points"));
    }

    #[test]
    fn test_validation_strike_window_bound() {
        let yaml = "chain:\n  strike_window: 18446744073709551615\n";
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for oversized strike window");
        };
        assert!(err.to_string().contains("strike_window"));

        let config = load_config_from_string("chain:\n  strike_window: 1000\n").unwrap();
        assert_eq!(config.chain.strike_window, MAX_STRIKE_WINDOW);
    }

    #[test]
    fn test_validation_inverted_factors() {
        let yaml = "grid:\n  lower_factor: 1.5\n  upper_factor: 0.5\n";
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for inverted factors");
        };
        assert!(err.to_string().contains("upper_factor"));
    }

    #[test]
    fn test_validation_non_positive_tolerance() {
        let yaml = "solver:\n  tolerance: 0\n";
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for zero tolerance");
        };
        assert!(err.to_string().contains("tolerance"));
    }

    #[test]
    fn test_validation_invalid_log_format() {
        let yaml = "observability:\n  logging:\n    format: xml\n";
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for invalid format");
        };
        assert!(err.to_string().contains("format"));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "chain:\n  strike_window: 3").unwrap();

        let config = load_config(file.path().to_str()).unwrap();
        assert_eq!(config.chain.strike_window, 3);
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.yaml");

        let err = load_config(path.to_str()).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }
}
