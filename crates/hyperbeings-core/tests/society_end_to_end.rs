//! End-to-end runs of a small society through the public API.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use hyperbeings_agents::{Agent, AgentConfig, SeededRandom};
use hyperbeings_core::config::{SimulationBoundsConfig, SimulationConfig, SocietyConfig};
use hyperbeings_core::minting::StubMinter;
use hyperbeings_core::operator::{OperatorState, SimulationEndReason};
use hyperbeings_core::runner::{NoOpCallback, run_society};
use hyperbeings_core::society::Society;
use hyperbeings_types::{SpawnRequest, TraitOverrides};

fn fast_config() -> SocietyConfig {
    SocietyConfig {
        activity_pacing_ms: 0,
        ..SocietyConfig::default()
    }
}

fn trader() -> TraitOverrides {
    TraitOverrides {
        risk_taking: Some(90),
        ambition: Some(85),
        ..TraitOverrides::default()
    }
}

fn artist() -> TraitOverrides {
    TraitOverrides {
        creativity: Some(95),
        empathy: Some(85),
        ..TraitOverrides::default()
    }
}

fn two_being_society(seed: u64) -> Society {
    let mut society = Society::new(
        fast_config(),
        AgentConfig::default(),
        Box::new(SeededRandom::new(seed)),
    );
    let mut minter = StubMinter::new();
    for (name, traits) in [("Trader", trader()), ("Artist", artist())] {
        let request = SpawnRequest {
            name: name.to_owned(),
            traits: Some(traits),
        };
        society.spawn_agent(&request, &mut minter).unwrap();
    }
    society
}

#[tokio::test]
async fn three_steps_keep_the_society_whole() {
    let mut society = two_being_society(2024);

    for expected in 1..=3 {
        let report = society.simulate_step().await.unwrap();
        assert_eq!(report.step, expected);
    }

    let stats = society.stats();
    assert_eq!(stats.population, 2);
    assert!(stats.total_wealth >= 200);
    assert!(!society.interactions().is_empty());
    assert!(stats.average_reputation <= 100);

    let trader = society.agents().first().unwrap();
    assert_eq!(trader.traits().risk_taking, 90);
    assert_eq!(trader.traits().ambition, 85);
    let artist = society.agents().get(1).unwrap();
    assert_eq!(artist.traits().creativity, 95);
    assert_eq!(artist.traits().empathy, 85);
}

#[tokio::test]
async fn runner_drives_a_seeded_society_to_its_step_limit() {
    let mut society = two_being_society(7);
    let mut minter = StubMinter::new();
    let bounds = SimulationBoundsConfig {
        max_steps: 4,
        max_real_time_seconds: 0,
    };
    let operator = Arc::new(OperatorState::new(0, &bounds));

    let result = run_society(&mut society, &mut minter, &operator, &mut NoOpCallback).await;

    assert_eq!(result.end_reason, SimulationEndReason::MaxStepsReached);
    assert_eq!(result.total_steps, 4);
    assert_eq!(society.steps(), 4);

    let report = result.final_report.unwrap();
    assert_eq!(report.stats, society.stats());
    assert!(report.successful_activities <= report.activities);
    assert!(report.activities <= 2);
}

#[tokio::test]
async fn same_seed_same_history() {
    let mut first = two_being_society(99);
    let mut second = two_being_society(99);

    for _ in 0..3 {
        let a = first.simulate_step().await.unwrap();
        let b = second.simulate_step().await.unwrap();
        assert_eq!(a, b);
    }

    let wallets =
        |society: &Society| -> Vec<u64> { society.agents().iter().map(Agent::wallet).collect() };
    assert_eq!(wallets(&first), wallets(&second));
    assert_eq!(first.interactions().len(), second.interactions().len());
}

#[test]
fn overview_serializes_for_the_dashboard() {
    let society = two_being_society(1);
    let overview = society.overview();

    let json = serde_json::to_value(&overview).unwrap();

    assert_eq!(json["stats"]["population"], 2);
    assert_eq!(json["top_earners"].as_array().map(Vec::len), Some(2));
}

#[test]
fn project_config_seeds_are_valid_requests() {
    let config = SimulationConfig::default();
    let mut society = Society::new(
        fast_config(),
        config.economy.agent_config(),
        Box::new(SeededRandom::new(3)),
    );
    let mut minter = StubMinter::new();

    for seed in &config.seed_agents {
        let request = SpawnRequest {
            name: seed.name.clone(),
            traits: Some(seed.traits),
        };
        let outcome = society.spawn_agent(&request, &mut minter).unwrap();
        assert!(outcome.mint.is_ok());
    }

    assert_eq!(society.population(), 2);
    assert_eq!(society.refresh_stats().total_wealth, 200);
}
