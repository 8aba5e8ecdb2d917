//! Society engine binary for the HyperBeings simulation.
//!
//! This is the main entry point that wires together the society, the seed
//! beings, the minter, the broadcast callback, and the control console. It
//! loads configuration, initializes all subsystems, and runs the step loop
//! until a termination condition is met.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `hyperbeings-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Pick the random source (seeded or thread)
//! 4. Create the society and seed its beings
//! 5. Create operator state from simulation bounds
//! 6. Install the Ctrl-C stop handler, the stdin control console, and the
//!    event logger
//! 7. Run the step loop
//! 8. Log the result

mod broadcast;
mod control;
mod error;
mod seed;

use std::path::Path;
use std::sync::Arc;

use hyperbeings_agents::{RandomSource, SeededRandom, ThreadRandom};
use hyperbeings_core::config::SimulationConfig;
use hyperbeings_core::minting::StubMinter;
use hyperbeings_core::operator::OperatorState;
use hyperbeings_core::runner;
use hyperbeings_core::society::Society;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::broadcast::{BroadcastCallback, SocietyEvent};
use crate::error::EngineError;

/// Config file looked up in the working directory.
const CONFIG_PATH: &str = "hyperbeings-config.yaml";

/// Application entry point for the society engine.
///
/// Initializes all subsystems and runs the step loop. Returns an error
/// code on failure.
///
/// # Errors
///
/// Returns an error if the config file is invalid or a seed being cannot
/// be created.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration. Logging is not up yet, so the outcome is
    //    reported right after the subscriber is installed.
    let (config, from_file) = load_config()?;

    // 2. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!("hyperbeings-engine starting");
    if !from_file {
        info!(path = CONFIG_PATH, "Config file not found, using defaults");
    }
    info!(
        step_interval_ms = config.society.step_interval_ms,
        activity_pacing_ms = config.society.activity_pacing_ms,
        seed = ?config.random.seed,
        seed_agents = config.seed_agents.len(),
        "Configuration loaded"
    );

    // 3. Pick the random source.
    let rng: Box<dyn RandomSource> = match config.random.seed {
        Some(seed) => Box::new(SeededRandom::new(seed)),
        None => Box::new(ThreadRandom::new()),
    };

    // 4. Create the society and seed its beings.
    let mut society = Society::new(
        config.society.clone(),
        config.economy.agent_config(),
        rng,
    );
    let mut minter = StubMinter::new();
    let seeded = seed::seed_society(&mut society, &config.seed_agents, &mut minter)
        .map_err(EngineError::from)?;
    info!(
        seeded = seeded.len(),
        minted = minter.minted(),
        "Society ready"
    );

    // 5. Create operator state.
    let operator = Arc::new(OperatorState::new(
        config.society.step_interval_ms,
        &config.simulation,
    ));
    info!(
        max_steps = operator.bounds().max_steps,
        max_real_time_seconds = operator.bounds().max_real_time_seconds,
        step_interval_ms = operator.step_interval_ms(),
        "Operator state initialized"
    );

    // 6. Ctrl-C requests a clean stop; the in-flight step completes.
    {
        let stopper = Arc::clone(&operator);
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("Shutdown signal received");
                    stopper.request_stop();
                }
                Err(e) => warn!(error = %e, "failed to listen for shutdown signal"),
            }
        });
    }

    // Console commands reach the loop through the operator state.
    let lines = control::spawn_stdin_reader().map_err(EngineError::from)?;
    {
        let console_operator = Arc::clone(&operator);
        tokio::spawn(async move { control::run_console(lines, &console_operator).await });
    }
    info!("Control console listening on stdin");

    let mut callback = BroadcastCallback::new();
    tokio::spawn(log_events(callback.subscribe()));

    // 7. Run the step loop.
    let result = runner::run_society(&mut society, &mut minter, &operator, &mut callback).await;

    // 8. Log results.
    runner::log_simulation_end(&result);

    info!(
        end_reason = ?result.end_reason,
        total_steps = result.total_steps,
        "hyperbeings-engine shutdown complete"
    );

    Ok(())
}

/// Load the simulation configuration from `hyperbeings-config.yaml`.
///
/// Looks for the config file relative to the current working directory.
/// Returns the config and whether it came from the file.
fn load_config() -> Result<(SimulationConfig, bool), EngineError> {
    let config_path = Path::new(CONFIG_PATH);
    if config_path.exists() {
        let config = SimulationConfig::from_file(config_path)?;
        Ok((config, true))
    } else {
        let config = SimulationConfig::parse("")?;
        Ok((config, false))
    }
}

/// Log every society event as JSON at debug level until the channel
/// closes.
async fn log_events(mut rx: tokio::sync::broadcast::Receiver<SocietyEvent>) {
    loop {
        match rx.recv().await {
            Ok(event) => match serde_json::to_string(&event) {
                Ok(json) => debug!(bytes = json.len(), payload = %json, "Society event"),
                Err(e) => warn!(error = %e, "failed to serialize society event"),
            },
            Err(RecvError::Lagged(skipped)) => {
                warn!(skipped, "Event logger fell behind");
            }
            Err(RecvError::Closed) => break,
        }
    }
}
