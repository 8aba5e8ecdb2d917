//! Step callback that publishes society updates.
//!
//! After each step and each queued spawn, this callback builds a fresh
//! [`SocietyOverview`] and the list of [`LifeSummary`] values and sends
//! them as [`SocietyEvent`]s on a tokio broadcast channel. A dashboard
//! transport subscribes to the channel; the engine itself only logs.

use chrono::Utc;
use hyperbeings_core::runner::StepCallback;
use hyperbeings_core::society::{Society, SpawnOutcome, StepReport};
use hyperbeings_types::{LifeSummary, SocietyOverview};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

/// Capacity of the broadcast channel for society events.
///
/// If a subscriber falls behind by more than this many messages it will
/// receive a [`broadcast::error::RecvError::Lagged`] and skip to the
/// newest message.
const BROADCAST_CAPACITY: usize = 256;

/// An update pushed to subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "kebab-case")]
pub enum SocietyEvent {
    /// Society-wide overview.
    SocietyUpdate(SocietyOverview),
    /// Life summary of every being.
    BeingsUpdate(Vec<LifeSummary>),
}

/// Callback that bridges the step loop to the broadcast channel.
pub struct BroadcastCallback {
    tx: broadcast::Sender<SocietyEvent>,
}

impl BroadcastCallback {
    /// Create a new callback with its own channel.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self { tx }
    }

    /// Subscribe to society events.
    pub fn subscribe(&self) -> broadcast::Receiver<SocietyEvent> {
        self.tx.subscribe()
    }

    /// Publish both updates for the current society.
    ///
    /// Returns the number of receivers that got the overview.
    pub fn publish(&self, society: &Society) -> usize {
        // send returns Err only when there are zero receivers,
        // which is normal when no dashboard is connected.
        let receivers = self
            .tx
            .send(SocietyEvent::SocietyUpdate(society.overview()))
            .unwrap_or(0);
        let _ = self.tx.send(SocietyEvent::BeingsUpdate(
            society.all_life_summaries(Utc::now()),
        ));
        receivers
    }
}

impl Default for BroadcastCallback {
    fn default() -> Self {
        Self::new()
    }
}

impl StepCallback for BroadcastCallback {
    fn on_step(&mut self, report: &StepReport, society: &Society) {
        let receivers = self.publish(society);
        debug!(step = report.step, receivers, "Society update sent");
    }

    fn on_spawn(&mut self, outcome: &SpawnOutcome, society: &Society) {
        let receivers = self.publish(society);
        debug!(agent = %outcome.name, receivers, "Society update sent after spawn");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use hyperbeings_agents::{AgentConfig, SeededRandom};
    use hyperbeings_core::config::SocietyConfig;
    use hyperbeings_core::minting::StubMinter;
    use hyperbeings_types::{SpawnRequest, TraitOverrides};

    use super::*;

    fn society_with_one_being() -> (Society, SpawnOutcome) {
        let config = SocietyConfig {
            activity_pacing_ms: 0,
            ..SocietyConfig::default()
        };
        let mut society = Society::new(
            config,
            AgentConfig::default(),
            Box::new(SeededRandom::new(5)),
        );
        let outcome = society
            .spawn_agent(
                &SpawnRequest {
                    name: "Alice".to_owned(),
                    traits: Some(TraitOverrides::default()),
                },
                &mut StubMinter::new(),
            )
            .unwrap();
        (society, outcome)
    }

    #[test]
    fn publish_without_subscribers_is_fine() {
        let (society, _) = society_with_one_being();
        let callback = BroadcastCallback::new();
        assert_eq!(callback.publish(&society), 0);
    }

    #[tokio::test]
    async fn spawn_publishes_overview_then_beings() {
        let (society, outcome) = society_with_one_being();
        let mut callback = BroadcastCallback::new();
        let mut rx = callback.subscribe();

        callback.on_spawn(&outcome, &society);

        let first = rx.recv().await.unwrap();
        assert!(
            matches!(&first, SocietyEvent::SocietyUpdate(o) if o.stats.population == 1),
            "overview must come first: {first:?}"
        );

        let second = rx.recv().await.unwrap();
        let names: Vec<String> = match second {
            SocietyEvent::BeingsUpdate(beings) => beings.into_iter().map(|b| b.name).collect(),
            SocietyEvent::SocietyUpdate(_) => Vec::new(),
        };
        assert_eq!(names, vec!["Alice".to_owned()]);
    }

    #[test]
    fn events_serialize_with_kebab_case_tags() {
        let json = serde_json::to_value(SocietyEvent::BeingsUpdate(Vec::new())).unwrap();
        assert_eq!(json["type"], "beings-update");
        assert!(json["data"].as_array().is_some_and(Vec::is_empty));
    }
}
