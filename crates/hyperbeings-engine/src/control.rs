//! Control console: JSON commands on stdin, one per line.
//!
//! A plain thread reads stdin and forwards lines over a tokio channel, and
//! [`run_console`] turns each line into a call on the shared
//! [`OperatorState`]. The step loop picks the effects up at its next step
//! boundary. Replies are logged as JSON.
//!
//! ```text
//! {"command":"spawn","name":"Nova","traits":{"creativity":85}}
//! {"command":"recommend","name":"Iris","focus":"creative"}
//! {"command":"pause"}
//! {"command":"resume"}
//! {"command":"speed","interval_ms":250}
//! {"command":"status"}
//! {"command":"stop"}
//! ```

use std::io::BufRead;

use hyperbeings_agents::{RandomSource, ThreadRandom, recommend_traits};
use hyperbeings_core::operator::{
    MIN_STEP_INTERVAL_MS, OperatorState, SimulationStatus, SocietyCommand,
};
use hyperbeings_types::{RecommendationFocus, SpawnRequest};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Lines buffered between the stdin thread and the console task.
const LINE_BUFFER: usize = 64;

/// A command read from the console.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum ControlCommand {
    /// Queue a being with the given traits.
    Spawn(SpawnRequest),
    /// Queue a being with recommended traits for a focus.
    Recommend {
        /// Display name for the new being.
        name: String,
        /// What the recommended traits should favor.
        focus: RecommendationFocus,
    },
    /// Park the step loop.
    Pause,
    /// Let a parked step loop continue.
    Resume,
    /// End the run after the in-flight step.
    Stop,
    /// Report the run status.
    Status,
    /// Change the pause between steps.
    Speed {
        /// New interval in milliseconds.
        interval_ms: u64,
    },
}

/// Outcome of a console command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reply", rename_all = "snake_case")]
pub enum ControlReply {
    /// A spawn was queued for the next step boundary.
    Queued {
        /// Name of the queued being.
        name: String,
        /// Commands now waiting, this one included.
        pending: usize,
    },
    /// Pause handled; `changed` is false if the run was not running.
    Paused {
        /// Whether the run state changed.
        changed: bool,
    },
    /// Resume handled; `changed` is false if the run was not paused.
    Resumed {
        /// Whether the run state changed.
        changed: bool,
    },
    /// The run will stop after the in-flight step.
    StopRequested,
    /// The step interval was changed.
    SpeedChanged {
        /// Interval before the change.
        previous_ms: u64,
        /// Interval now in effect.
        interval_ms: u64,
    },
    /// The step interval was below the minimum and left alone.
    SpeedRejected {
        /// Interval that was asked for.
        requested_ms: u64,
        /// Smallest accepted interval.
        minimum_ms: u64,
    },
    /// Current run status.
    Status(SimulationStatus),
}

/// Parse one console line.
pub fn parse_command(line: &str) -> Result<ControlCommand, serde_json::Error> {
    serde_json::from_str(line)
}

/// Apply a command to the operator state.
pub async fn dispatch(
    operator: &OperatorState,
    command: ControlCommand,
    rng: &mut dyn RandomSource,
) -> ControlReply {
    match command {
        ControlCommand::Spawn(request) => queue_spawn(operator, request).await,
        ControlCommand::Recommend { name, focus } => {
            let recommendation = recommend_traits(focus, rng);
            debug!(%name, ?focus, traits = ?recommendation.traits, "Traits recommended");
            queue_spawn(operator, SpawnRequest::from_recommendation(name, recommendation)).await
        }
        ControlCommand::Pause => ControlReply::Paused {
            changed: operator.pause(),
        },
        ControlCommand::Resume => ControlReply::Resumed {
            changed: operator.resume(),
        },
        ControlCommand::Stop => {
            operator.request_stop();
            ControlReply::StopRequested
        }
        ControlCommand::Status => ControlReply::Status(operator.status().await),
        ControlCommand::Speed { interval_ms } => match operator.set_step_interval_ms(interval_ms) {
            Some(previous_ms) => ControlReply::SpeedChanged {
                previous_ms,
                interval_ms,
            },
            None => ControlReply::SpeedRejected {
                requested_ms: interval_ms,
                minimum_ms: MIN_STEP_INTERVAL_MS,
            },
        },
    }
}

async fn queue_spawn(operator: &OperatorState, request: SpawnRequest) -> ControlReply {
    let name = request.name.clone();
    let pending = operator.submit(SocietyCommand::Spawn(request)).await;
    ControlReply::Queued { name, pending }
}

/// Handle console lines until the channel closes.
///
/// Blank lines are skipped and malformed ones are logged. Returns the
/// number of commands handled.
pub async fn run_console(mut lines: mpsc::Receiver<String>, operator: &OperatorState) -> usize {
    let mut rng = ThreadRandom::new();
    let mut handled: usize = 0;

    while let Some(line) = lines.recv().await {
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        let command = match parse_command(input) {
            Ok(command) => command,
            Err(e) => {
                warn!(error = %e, input, "Unrecognized control command");
                continue;
            }
        };

        let reply = dispatch(operator, command, &mut rng).await;
        handled = handled.saturating_add(1);
        match serde_json::to_string(&reply) {
            Ok(json) => info!(reply = %json, "Control command handled"),
            Err(e) => warn!(error = %e, "failed to serialize control reply"),
        }
    }

    debug!(handled, "Control console closed");
    handled
}

/// Start the stdin reader thread and return the receiving end of its lines.
///
/// The thread is detached; it ends at EOF, on a read error, or when the
/// receiver is dropped.
pub fn spawn_stdin_reader() -> std::io::Result<mpsc::Receiver<String>> {
    let (tx, rx) = mpsc::channel(LINE_BUFFER);
    std::thread::Builder::new()
        .name("control-stdin".to_owned())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.blocking_send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "failed to read control input");
                        break;
                    }
                }
            }
        })?;
    Ok(rx)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use hyperbeings_agents::ScriptedRandom;
    use hyperbeings_core::config::SimulationBoundsConfig;
    use hyperbeings_core::operator::RunState;
    use hyperbeings_types::TraitOverrides;

    use super::*;

    fn operator() -> OperatorState {
        OperatorState::new(1000, &SimulationBoundsConfig::default())
    }

    #[test]
    fn commands_parse_from_json_lines() {
        let cases = [
            (r#"{"command":"pause"}"#, ControlCommand::Pause),
            (r#"{"command":"resume"}"#, ControlCommand::Resume),
            (r#"{"command":"stop"}"#, ControlCommand::Stop),
            (r#"{"command":"status"}"#, ControlCommand::Status),
            (
                r#"{"command":"speed","interval_ms":250}"#,
                ControlCommand::Speed { interval_ms: 250 },
            ),
            (
                r#"{"command":"recommend","name":"Iris","focus":"entrepreneur"}"#,
                ControlCommand::Recommend {
                    name: "Iris".to_owned(),
                    focus: RecommendationFocus::Entrepreneur,
                },
            ),
        ];
        for (line, expected) in cases {
            assert_eq!(parse_command(line).unwrap(), expected, "{line}");
        }
    }

    #[test]
    fn spawn_carries_its_traits() {
        let line = r#"{"command":"spawn","name":"Nova","traits":{"creativity":85}}"#;

        let expected = ControlCommand::Spawn(SpawnRequest {
            name: "Nova".to_owned(),
            traits: Some(TraitOverrides {
                creativity: Some(85),
                ..TraitOverrides::default()
            }),
        });
        assert_eq!(parse_command(line).unwrap(), expected);
    }

    #[test]
    fn unknown_command_is_an_error() {
        assert!(parse_command(r#"{"command":"dance"}"#).is_err());
        assert!(parse_command("pause").is_err());
    }

    #[tokio::test]
    async fn spawn_and_recommend_are_queued() {
        let operator = operator();
        let mut rng = ScriptedRandom::constant(0.5);

        let spawn = parse_command(r#"{"command":"spawn","name":"Nova","traits":{}}"#).unwrap();
        let first = dispatch(&operator, spawn, &mut rng).await;
        let recommend = ControlCommand::Recommend {
            name: "Iris".to_owned(),
            focus: RecommendationFocus::Creative,
        };
        let second = dispatch(&operator, recommend, &mut rng).await;

        assert_eq!(
            first,
            ControlReply::Queued {
                name: "Nova".to_owned(),
                pending: 1
            }
        );
        assert_eq!(
            second,
            ControlReply::Queued {
                name: "Iris".to_owned(),
                pending: 2
            }
        );
        let queued = operator.drain_commands().await;
        let recommended = queued.get(1).map(|SocietyCommand::Spawn(r)| r.clone());
        assert!(
            recommended
                .and_then(|r| r.traits)
                .is_some_and(|t| t.is_complete())
        );
    }

    #[tokio::test]
    async fn pause_and_resume_report_changes() {
        let operator = operator();
        let mut rng = ScriptedRandom::constant(0.5);

        let replies = [
            dispatch(&operator, ControlCommand::Pause, &mut rng).await,
            dispatch(&operator, ControlCommand::Pause, &mut rng).await,
            dispatch(&operator, ControlCommand::Resume, &mut rng).await,
        ];

        assert_eq!(
            replies,
            [
                ControlReply::Paused { changed: true },
                ControlReply::Paused { changed: false },
                ControlReply::Resumed { changed: true },
            ]
        );
        assert_eq!(operator.run_state(), RunState::Running);
    }

    #[tokio::test]
    async fn speed_below_minimum_is_rejected() {
        let operator = operator();
        let mut rng = ScriptedRandom::constant(0.5);

        let too_fast = ControlCommand::Speed { interval_ms: 20 };
        let rejected = dispatch(&operator, too_fast, &mut rng).await;
        let slower = ControlCommand::Speed { interval_ms: 300 };
        let changed = dispatch(&operator, slower, &mut rng).await;

        assert_eq!(
            rejected,
            ControlReply::SpeedRejected {
                requested_ms: 20,
                minimum_ms: MIN_STEP_INTERVAL_MS
            }
        );
        assert_eq!(
            changed,
            ControlReply::SpeedChanged {
                previous_ms: 1000,
                interval_ms: 300
            }
        );
        assert_eq!(operator.step_interval_ms(), 300);
    }

    #[tokio::test]
    async fn status_reply_serializes_with_its_tag() {
        let operator = operator();
        let mut rng = ScriptedRandom::constant(0.5);
        operator.record_progress(4, 2);

        let reply = dispatch(&operator, ControlCommand::Status, &mut rng).await;
        let json = serde_json::to_value(&reply).unwrap();

        assert_eq!(json["reply"], "status");
        assert_eq!(json["steps"], 4);
        assert_eq!(json["population"], 2);
        assert_eq!(json["state"], "running");
    }

    #[tokio::test]
    async fn console_handles_lines_until_closed() {
        let operator = operator();
        let (tx, rx) = mpsc::channel(8);
        for line in [
            r#"{"command":"spawn","name":"Nova","traits":{}}"#,
            "",
            "not json",
            r#"{"command":"pause"}"#,
            r#"{"command":"stop"}"#,
        ] {
            tx.send(line.to_owned()).await.unwrap();
        }
        drop(tx);

        let handled = run_console(rx, &operator).await;

        assert_eq!(handled, 3);
        assert_eq!(operator.pending_commands().await, 1);
        assert!(operator.is_stop_requested());
    }
}
