//! Payoff Engine Binary
//!
//! Evaluates one scenario file and prints a JSON report to stdout.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin payoff-engine -- scenario.yaml
//! ```
//!
//! # Environment Variables
//!
//! - `PAYOFF_CONFIG`: Config file path (default: config.yaml, optional)
//! - `PAYOFF_SCENARIO`: Scenario path when no argument is given
//! - `RUST_LOG`: Log filter (overrides `observability.logging.level`)

use anyhow::Context;

use payoff_engine::Scenario;
use payoff_engine::config::{DEFAULT_CONFIG_PATH, load_config};
use payoff_engine::observability::init_tracing;

fn main() -> anyhow::Result<()> {
    load_dotenv();

    let config_path = std::env::var("PAYOFF_CONFIG").ok();
    let config = load_config(config_path.as_deref()).context("loading configuration")?;

    init_tracing(&config.observability.logging).context("initializing tracing")?;
    tracing::debug!(
        path = config_path.as_deref().unwrap_or(DEFAULT_CONFIG_PATH),
        explicit = config_path.is_some(),
        grid_points = config.grid.points,
        "Configuration loaded"
    );

    let scenario_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("PAYOFF_SCENARIO").ok())
        .context("usage: payoff-engine <scenario.yaml|scenario.json> (or set PAYOFF_SCENARIO)")?;

    tracing::info!(path = %scenario_path, "Loading scenario");
    let scenario = Scenario::load(&scenario_path)
        .with_context(|| format!("loading scenario {scenario_path}"))?;

    let report = scenario.run(&config).context("evaluating scenario")?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Load .env file from current or ancestor directories.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        for dir in cwd.ancestors().skip(1) {
            let env_path = dir.join(".env");
            if env_path.exists() {
                // Unreadable .env falls back to the process environment
                let _ = dotenvy::from_path(&env_path);
                return;
            }
        }
    }
}
