//! Simulation loop runner with operator controls.
//!
//! This module provides [`run_society`], the top-level async function
//! that drives the step loop with support for:
//!
//! - **Bounded simulation**: stop after `max_steps` or `max_real_time_seconds`
//! - **Pause/resume**: operator can halt and continue the step loop
//! - **Variable step speed**: step interval adjustable at runtime
//! - **Queued spawns**: being creation requests are applied between steps
//! - **Operator stop**: clean stop after the in-flight step completes
//!
//! The runner wraps [`Society::simulate_step`] and adds the control plane
//! around it. A failing step is logged and the loop keeps going, so a
//! society waiting for its second being stays alive.

use std::sync::Arc;

use tracing::{info, warn};

use crate::minting::Minter;
use crate::operator::{OperatorState, SimulationEndReason, SocietyCommand};
use crate::society::{Society, SpawnOutcome, StepReport};

/// Result of the simulation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationResult {
    /// The reason the simulation ended.
    pub end_reason: SimulationEndReason,
    /// The last step report, if any step completed.
    pub final_report: Option<StepReport>,
    /// Total number of steps that completed.
    pub total_steps: u64,
    /// Number of steps that were skipped because they failed.
    pub failed_steps: u64,
    /// Number of beings created from queued commands.
    pub spawned: u64,
}

/// Callback invoked by the runner as the society changes.
///
/// Implementations can use this to broadcast overviews, record reports,
/// etc. The callback receives the event and the current society.
pub trait StepCallback: Send {
    /// Called after a step completes successfully.
    fn on_step(&mut self, report: &StepReport, society: &Society);

    /// Called after a queued spawn creates a being.
    fn on_spawn(&mut self, _outcome: &SpawnOutcome, _society: &Society) {}
}

/// A no-op step callback for testing.
pub struct NoOpCallback;

impl StepCallback for NoOpCallback {
    fn on_step(&mut self, _report: &StepReport, _society: &Society) {}
}

/// Apply queued commands in submission order. Returns the number of
/// beings created.
async fn apply_commands(
    society: &mut Society,
    minter: &mut dyn Minter,
    operator: &OperatorState,
    callback: &mut dyn StepCallback,
) -> u64 {
    let mut spawned: u64 = 0;
    for command in operator.drain_commands().await {
        match command {
            SocietyCommand::Spawn(request) => match society.spawn_agent(&request, minter) {
                Ok(outcome) => {
                    spawned = spawned.saturating_add(1);
                    callback.on_spawn(&outcome, society);
                }
                Err(err) => warn!(name = %request.name, %err, "Spawn request rejected"),
            },
        }
    }
    spawned
}

/// Run the simulation loop until a termination condition is met.
///
/// This is the main entry point for a society run. It integrates the
/// step cycle with operator controls (pause, resume, speed, stop, queued
/// spawns) and simulation boundaries (max steps, max time).
///
/// # Arguments
///
/// * `society` - The society to drive
/// * `minter` - Backend used for queued spawns
/// * `operator` - Shared operator control state
/// * `callback` - Called after each step and spawn
///
/// # Returns
///
/// Returns a [`SimulationResult`] describing why the simulation ended
/// and the final step report.
pub async fn run_society(
    society: &mut Society,
    minter: &mut dyn Minter,
    operator: &Arc<OperatorState>,
    callback: &mut dyn StepCallback,
) -> SimulationResult {
    let mut result = SimulationResult {
        end_reason: SimulationEndReason::OperatorStop,
        final_report: None,
        total_steps: 0,
        failed_steps: 0,
        spawned: 0,
    };

    let bounds = operator.bounds();
    info!(
        max_steps = bounds.max_steps,
        max_real_time_seconds = bounds.max_real_time_seconds,
        step_interval_ms = operator.step_interval_ms(),
        population = society.population(),
        "Simulation starting"
    );
    operator.record_progress(society.steps(), society.population());

    loop {
        // --- Check pause ---
        if operator.is_paused() {
            info!(step = society.steps(), "Simulation paused");
            let state = operator.wait_while_paused().await;
            info!(?state, "Simulation no longer paused");
        }

        // --- Check stop request (before step) ---
        if operator.is_stop_requested() {
            info!("Operator stop requested");
            result.end_reason = SimulationEndReason::OperatorStop;
            break;
        }

        // --- Check bounds (before step) ---
        if let Some(reason) = operator.boundary_reached(society.steps()) {
            info!(
                ?reason,
                step = society.steps(),
                elapsed = operator.elapsed_seconds(),
                "Simulation bound reached"
            );
            result.end_reason = reason;
            break;
        }

        // --- Apply queued commands ---
        let spawned = apply_commands(society, minter, operator, callback).await;
        result.spawned = result.spawned.saturating_add(spawned);

        // --- Execute step ---
        match society.simulate_step().await {
            Ok(report) => {
                result.total_steps = result.total_steps.saturating_add(1);
                operator.record_progress(report.step, society.population());
                callback.on_step(&report, society);

                let reached = operator.boundary_reached(report.step);
                result.final_report = Some(report);
                if let Some(reason) = reached {
                    info!(
                        ?reason,
                        step = society.steps(),
                        elapsed = operator.elapsed_seconds(),
                        "Simulation bound reached"
                    );
                    result.end_reason = reason;
                    break;
                }
            }
            Err(err) => {
                operator.record_progress(society.steps(), society.population());
                result.failed_steps = result.failed_steps.saturating_add(1);
                warn!(%err, population = society.population(), "Step skipped");
            }
        }

        // --- Sleep for step interval ---
        let interval_ms = operator.step_interval_ms();
        if interval_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(interval_ms)).await;
        } else {
            tokio::task::yield_now().await;
        }
    }

    operator.set_end_reason(result.end_reason).await;
    result
}

/// Log the simulation end sequence.
///
/// This should be called after [`run_society`] returns.
pub fn log_simulation_end(result: &SimulationResult) {
    info!(
        reason = ?result.end_reason,
        total_steps = result.total_steps,
        failed_steps = result.failed_steps,
        spawned = result.spawned,
        "Simulation ended"
    );

    if let Some(ref report) = result.final_report {
        info!(
            step = report.step,
            population = report.stats.population,
            total_wealth = report.stats.total_wealth,
            average_reputation = report.stats.average_reputation,
            active_collaborations = report.stats.active_collaborations,
            "Final step report"
        );
    } else {
        warn!("Simulation ended with no steps executed");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use hyperbeings_agents::{Agent, AgentConfig, ScriptedRandom, SeededRandom};
    use hyperbeings_types::{SpawnRequest, TraitOverrides};

    use super::*;
    use crate::config::{SimulationBoundsConfig, SocietyConfig};
    use crate::minting::StubMinter;

    fn quiet_config() -> SocietyConfig {
        SocietyConfig {
            activity_pacing_ms: 0,
            introductions_per_agent: 0,
            ..SocietyConfig::default()
        }
    }

    fn overrides(value: u8) -> TraitOverrides {
        TraitOverrides {
            creativity: Some(value),
            socialness: Some(value),
            risk_taking: Some(value),
            ambition: Some(value),
            empathy: Some(value),
        }
    }

    fn make_society(names: &[&str]) -> Society {
        let mut rng = ScriptedRandom::constant(0.5);
        let agent_config = AgentConfig::default();
        let mut society = Society::new(
            quiet_config(),
            agent_config,
            Box::new(SeededRandom::new(42)),
        );
        for name in names {
            let agent = Agent::create(*name, &overrides(60), &agent_config, &mut rng).unwrap();
            society.add_agent(agent);
        }
        society
    }

    fn bounded(max_steps: u64) -> SimulationBoundsConfig {
        SimulationBoundsConfig {
            max_steps,
            max_real_time_seconds: 0,
        }
    }

    #[tokio::test]
    async fn bounded_by_max_steps() {
        let mut society = make_society(&["Ada", "Ben"]);
        let mut minter = StubMinter::new();
        let operator = Arc::new(OperatorState::new(0, &bounded(5)));
        let mut cb = NoOpCallback;

        let result = run_society(&mut society, &mut minter, &operator, &mut cb).await;

        assert_eq!(result.end_reason, SimulationEndReason::MaxStepsReached);
        assert_eq!(result.total_steps, 5);
        assert_eq!(result.final_report.map(|r| r.step), Some(5));
        assert_eq!(society.steps(), 5);
        assert_eq!(
            operator.end_reason().await,
            Some(SimulationEndReason::MaxStepsReached)
        );
    }

    #[tokio::test]
    async fn operator_stop() {
        let mut society = make_society(&["Ada", "Ben"]);
        let mut minter = StubMinter::new();
        let operator = Arc::new(OperatorState::new(0, &bounded(0)));
        operator.request_stop();
        let mut cb = NoOpCallback;

        let result = run_society(&mut society, &mut minter, &operator, &mut cb).await;

        assert_eq!(result.end_reason, SimulationEndReason::OperatorStop);
        assert_eq!(result.total_steps, 0);
        assert!(result.final_report.is_none());
    }

    #[tokio::test]
    async fn step_callback_is_called() {
        struct CountCallback {
            steps: u64,
            spawns: u64,
        }
        impl StepCallback for CountCallback {
            fn on_step(&mut self, _report: &StepReport, _society: &Society) {
                self.steps = self.steps.saturating_add(1);
            }
            fn on_spawn(&mut self, _outcome: &SpawnOutcome, _society: &Society) {
                self.spawns = self.spawns.saturating_add(1);
            }
        }

        let mut society = make_society(&["Ada", "Ben"]);
        let mut minter = StubMinter::new();
        let operator = Arc::new(OperatorState::new(0, &bounded(3)));
        let mut cb = CountCallback {
            steps: 0,
            spawns: 0,
        };

        let _ = run_society(&mut society, &mut minter, &operator, &mut cb).await;

        assert_eq!(cb.steps, 3);
        assert_eq!(cb.spawns, 0);
    }

    #[tokio::test]
    async fn queued_spawns_join_before_the_step() {
        let mut society = make_society(&[]);
        let mut minter = StubMinter::new();
        let operator = Arc::new(OperatorState::new(0, &bounded(1)));
        for name in ["Nova", "Orion"] {
            operator
                .submit(SocietyCommand::Spawn(SpawnRequest {
                    name: name.to_owned(),
                    traits: Some(overrides(70)),
                }))
                .await;
        }
        let mut cb = NoOpCallback;

        let result = run_society(&mut society, &mut minter, &operator, &mut cb).await;

        assert_eq!(result.spawned, 2);
        assert_eq!(result.total_steps, 1);
        assert_eq!(result.failed_steps, 0);
        assert_eq!(society.population(), 2);
        assert_eq!(minter.minted(), 2);
    }

    #[tokio::test]
    async fn invalid_spawn_is_skipped() {
        let mut society = make_society(&["Ada", "Ben"]);
        let mut minter = StubMinter::new();
        let operator = Arc::new(OperatorState::new(0, &bounded(1)));
        operator
            .submit(SocietyCommand::Spawn(SpawnRequest {
                name: "Ghost".to_owned(),
                traits: None,
            }))
            .await;
        let mut cb = NoOpCallback;

        let result = run_society(&mut society, &mut minter, &operator, &mut cb).await;

        assert_eq!(result.spawned, 0);
        assert_eq!(society.population(), 2);
        assert_eq!(minter.minted(), 0);
    }

    #[tokio::test]
    async fn failing_steps_do_not_end_the_run() {
        let mut society = make_society(&["Solo"]);
        let mut minter = StubMinter::new();
        let operator = Arc::new(OperatorState::new(10, &bounded(0)));
        let mut cb = NoOpCallback;

        let stopper = Arc::clone(&operator);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(tokio::time::Duration::from_millis(60)).await;
            stopper.request_stop();
        });

        let result = run_society(&mut society, &mut minter, &operator, &mut cb).await;
        handle.await.unwrap();

        assert_eq!(result.end_reason, SimulationEndReason::OperatorStop);
        assert_eq!(result.total_steps, 0);
        assert!(result.failed_steps >= 1);
    }

    #[tokio::test]
    async fn paused_run_waits_for_resume() {
        let mut society = make_society(&["Ada", "Ben"]);
        let mut minter = StubMinter::new();
        let operator = Arc::new(OperatorState::new(0, &bounded(3)));
        operator.pause();
        let mut cb = NoOpCallback;

        let controller = Arc::clone(&operator);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(tokio::time::Duration::from_millis(30)).await;
            let held = controller.status().await;
            controller.resume();
            held
        });

        let result = run_society(&mut society, &mut minter, &operator, &mut cb).await;
        let held = handle.await.unwrap();

        assert_eq!(held.steps, 0);
        assert_eq!(held.population, 2);
        assert_eq!(result.total_steps, 3);
        let status = operator.status().await;
        assert_eq!(status.steps, 3);
        assert_eq!(status.end_reason, Some(SimulationEndReason::MaxStepsReached));
    }

    #[tokio::test]
    async fn runtime_interval_overrides_the_configured_one() {
        let mut society = make_society(&["Ada", "Ben"]);
        let mut minter = StubMinter::new();
        let operator = Arc::new(OperatorState::new(5_000, &bounded(2)));
        assert_eq!(operator.set_step_interval_ms(100), Some(5_000));
        let mut cb = NoOpCallback;

        let run = run_society(&mut society, &mut minter, &operator, &mut cb);
        let result = tokio::time::timeout(tokio::time::Duration::from_secs(2), run)
            .await
            .unwrap();

        assert_eq!(result.total_steps, 2);
    }
}
