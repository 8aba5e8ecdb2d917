//! Run control shared between the step loop and the engine's control inputs.
//!
//! The step loop owns the society. Everything else (the Ctrl-C handler, the
//! control console) talks to it through an [`OperatorState`] held in an
//! [`Arc`](std::sync::Arc):
//!
//! - the run state ([`RunState`]) lives in a [`tokio::sync::watch`] channel,
//!   so a paused loop parks on `wait_for` and wakes on resume or stop
//! - the step interval and the progress counters are atomics
//! - new beings are queued as [`SocietyCommand`]s and drained by the loop
//!   between steps, so the society only ever has one writer

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use hyperbeings_types::SpawnRequest;
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, watch};

use crate::config::SimulationBoundsConfig;

/// Smallest step interval accepted at runtime, in milliseconds.
pub const MIN_STEP_INTERVAL_MS: u64 = 100;

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationEndReason {
    /// `max_steps` steps completed.
    MaxStepsReached,
    /// `max_real_time_seconds` elapsed.
    MaxRealTimeReached,
    /// Stopped from a control input.
    OperatorStop,
}

/// Where the step loop is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    /// Stepping at the current interval.
    Running,
    /// Parked until resumed or stopped.
    Paused,
    /// Finishing the in-flight step, then exiting.
    Stopping,
}

/// A change to the society applied at the next step boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SocietyCommand {
    /// Create, introduce, and mint a new being.
    Spawn(SpawnRequest),
}

/// Control handle for one run.
#[derive(Debug)]
pub struct OperatorState {
    state: watch::Sender<RunState>,
    step_interval_ms: AtomicU64,
    bounds: SimulationBoundsConfig,
    started_at: DateTime<Utc>,
    /// Steps completed, as last reported by the loop.
    steps: AtomicU64,
    /// Population, as last reported by the loop.
    population: AtomicU64,
    commands: Mutex<Vec<SocietyCommand>>,
    end_reason: Mutex<Option<SimulationEndReason>>,
}

impl OperatorState {
    /// Control handle for a run that starts now, in the running state.
    pub fn new(step_interval_ms: u64, bounds: &SimulationBoundsConfig) -> Self {
        let (state, _) = watch::channel(RunState::Running);
        Self {
            state,
            step_interval_ms: AtomicU64::new(step_interval_ms),
            bounds: bounds.clone(),
            started_at: Utc::now(),
            steps: AtomicU64::new(0),
            population: AtomicU64::new(0),
            commands: Mutex::new(Vec::new()),
            end_reason: Mutex::new(None),
        }
    }

    // -----------------------------------------------------------------------
    // Run state
    // -----------------------------------------------------------------------

    /// Current run state.
    pub fn run_state(&self) -> RunState {
        *self.state.borrow()
    }

    /// Whether the loop is parked.
    pub fn is_paused(&self) -> bool {
        self.run_state() == RunState::Paused
    }

    /// Whether a stop was requested.
    pub fn is_stop_requested(&self) -> bool {
        self.run_state() == RunState::Stopping
    }

    /// Park the loop before its next step.
    ///
    /// Returns `false` when the run was not running (already paused, or
    /// stopping).
    pub fn pause(&self) -> bool {
        self.state.send_if_modified(|state| {
            if *state == RunState::Running {
                *state = RunState::Paused;
                true
            } else {
                false
            }
        })
    }

    /// Let a parked loop continue. Returns `false` when it was not paused.
    pub fn resume(&self) -> bool {
        self.state.send_if_modified(|state| {
            if *state == RunState::Paused {
                *state = RunState::Running;
                true
            } else {
                false
            }
        })
    }

    /// Ask the loop to exit. The in-flight step still completes and a
    /// paused loop wakes up to exit.
    pub fn request_stop(&self) {
        self.state.send_modify(|state| *state = RunState::Stopping);
    }

    /// Wait while the run is paused. Returns the state that ended the wait.
    pub async fn wait_while_paused(&self) -> RunState {
        let mut rx = self.state.subscribe();
        // The sender lives in `self`, so the channel cannot close here.
        rx.wait_for(|state| *state != RunState::Paused)
            .await
            .map_or(RunState::Stopping, |state| *state)
    }

    // -----------------------------------------------------------------------
    // Step speed
    // -----------------------------------------------------------------------

    /// Current pause between steps, in milliseconds.
    pub fn step_interval_ms(&self) -> u64 {
        self.step_interval_ms.load(Ordering::Acquire)
    }

    /// Change the pause between steps.
    ///
    /// Returns the previous interval, or `None` when `ms` is below
    /// [`MIN_STEP_INTERVAL_MS`] and the interval was left alone.
    pub fn set_step_interval_ms(&self, ms: u64) -> Option<u64> {
        (ms >= MIN_STEP_INTERVAL_MS).then(|| self.step_interval_ms.swap(ms, Ordering::AcqRel))
    }

    // -----------------------------------------------------------------------
    // Boundaries
    // -----------------------------------------------------------------------

    /// Configured run bounds. Zero means unlimited.
    pub const fn bounds(&self) -> &SimulationBoundsConfig {
        &self.bounds
    }

    /// The bound that ends the run after `completed_steps` steps, if any.
    ///
    /// The step bound is checked before the time bound.
    pub fn boundary_reached(&self, completed_steps: u64) -> Option<SimulationEndReason> {
        let SimulationBoundsConfig {
            max_steps,
            max_real_time_seconds,
        } = self.bounds;
        if max_steps > 0 && completed_steps >= max_steps {
            Some(SimulationEndReason::MaxStepsReached)
        } else if max_real_time_seconds > 0 && self.elapsed_seconds() >= max_real_time_seconds {
            Some(SimulationEndReason::MaxRealTimeReached)
        } else {
            None
        }
    }

    /// Whole seconds since the run started. Clock skew reads as zero.
    pub fn elapsed_seconds(&self) -> u64 {
        let elapsed = Utc::now().signed_duration_since(self.started_at).num_seconds();
        u64::try_from(elapsed).unwrap_or(0)
    }

    // -----------------------------------------------------------------------
    // Progress and outcome
    // -----------------------------------------------------------------------

    /// Publish the loop's progress for [`Self::status`].
    pub fn record_progress(&self, steps: u64, population: usize) {
        self.steps.store(steps, Ordering::Release);
        self.population
            .store(u64::try_from(population).unwrap_or(u64::MAX), Ordering::Release);
    }

    /// Record why the run ended.
    pub async fn set_end_reason(&self, reason: SimulationEndReason) {
        *self.end_reason.lock().await = Some(reason);
    }

    /// Why the run ended, once it has.
    pub async fn end_reason(&self) -> Option<SimulationEndReason> {
        *self.end_reason.lock().await
    }

    // -----------------------------------------------------------------------
    // Command queue
    // -----------------------------------------------------------------------

    /// Queue a command and return how many are now waiting.
    pub async fn submit(&self, command: SocietyCommand) -> usize {
        let mut queue = self.commands.lock().await;
        queue.push(command);
        queue.len()
    }

    /// Commands waiting for the next step boundary.
    pub async fn pending_commands(&self) -> usize {
        self.commands.lock().await.len()
    }

    /// Take every queued command, oldest first.
    pub async fn drain_commands(&self) -> Vec<SocietyCommand> {
        std::mem::take(&mut *self.commands.lock().await)
    }

    /// Point-in-time view of the run.
    pub async fn status(&self) -> SimulationStatus {
        SimulationStatus {
            state: self.run_state(),
            steps: self.steps.load(Ordering::Acquire),
            population: self.population.load(Ordering::Acquire),
            pending_commands: self.pending_commands().await,
            step_interval_ms: self.step_interval_ms(),
            elapsed_seconds: self.elapsed_seconds(),
            max_steps: self.bounds.max_steps,
            max_real_time_seconds: self.bounds.max_real_time_seconds,
            end_reason: self.end_reason().await,
            started_at: self.started_at.to_rfc3339(),
        }
    }
}

/// Run status as reported to a control input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationStatus {
    /// Current run state.
    pub state: RunState,
    /// Steps completed.
    pub steps: u64,
    /// Beings in the society.
    pub population: u64,
    /// Commands waiting for the next step boundary.
    pub pending_commands: usize,
    /// Pause between steps in milliseconds.
    pub step_interval_ms: u64,
    /// Seconds since the run started.
    pub elapsed_seconds: u64,
    /// Step bound (0 = unlimited).
    pub max_steps: u64,
    /// Wall-clock bound in seconds (0 = unlimited).
    pub max_real_time_seconds: u64,
    /// Set once the run has ended.
    pub end_reason: Option<SimulationEndReason>,
    /// RFC 3339 start time.
    pub started_at: String,
}
