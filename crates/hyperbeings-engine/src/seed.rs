//! Seeding the society with its starting beings.
//!
//! At startup the engine creates every being listed under `seed_agents`
//! in `hyperbeings-config.yaml`. Seed beings go through the same path as
//! host requests ([`Society::spawn_agent`]), so they are introduced to
//! each other and minted like any later arrival.

use hyperbeings_core::config::SeedAgentConfig;
use hyperbeings_core::minting::Minter;
use hyperbeings_core::society::{Society, SocietyError, SpawnOutcome};
use hyperbeings_types::SpawnRequest;
use tracing::info;

/// Create every seed being in order.
///
/// Omitted traits are randomized. Stops at the first being that fails
/// validation; beings created before it stay in the society.
pub fn seed_society(
    society: &mut Society,
    seeds: &[SeedAgentConfig],
    minter: &mut dyn Minter,
) -> Result<Vec<SpawnOutcome>, SocietyError> {
    let mut outcomes = Vec::with_capacity(seeds.len());
    for seed in seeds {
        let request = SpawnRequest {
            name: seed.name.clone(),
            traits: Some(seed.traits),
        };
        outcomes.push(society.spawn_agent(&request, minter)?);
    }
    info!(
        seeded = outcomes.len(),
        population = society.population(),
        "Seed beings created"
    );
    Ok(outcomes)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use hyperbeings_agents::{AgentConfig, AgentError, SeededRandom};
    use hyperbeings_core::config::{SimulationConfig, SocietyConfig};
    use hyperbeings_core::minting::StubMinter;
    use hyperbeings_types::TraitOverrides;

    use super::*;

    fn empty_society() -> Society {
        Society::new(
            SocietyConfig::default(),
            AgentConfig::default(),
            Box::new(SeededRandom::new(9)),
        )
    }

    #[test]
    fn default_seeds_create_alice_and_bob() {
        let config = SimulationConfig::default();
        let mut society = empty_society();
        let mut minter = StubMinter::new();

        let outcomes = seed_society(&mut society, &config.seed_agents, &mut minter).unwrap();

        assert_eq!(outcomes.len(), 2);
        assert_eq!(society.population(), 2);
        assert_eq!(minter.minted(), 2);
        let alice = society.agents().first().unwrap();
        assert_eq!(alice.name(), "Alice");
        assert_eq!(alice.traits().socialness, 90);
        // Bob was introduced to Alice on arrival.
        assert_eq!(society.interactions().len(), 1);
    }

    #[test]
    fn blank_seed_name_stops_seeding() {
        let seeds = vec![
            SeedAgentConfig {
                name: "Ada".to_owned(),
                traits: TraitOverrides::default(),
            },
            SeedAgentConfig {
                name: "  ".to_owned(),
                traits: TraitOverrides::default(),
            },
        ];
        let mut society = empty_society();

        let result = seed_society(&mut society, &seeds, &mut StubMinter::new());

        assert_eq!(
            result.err(),
            Some(SocietyError::InvalidAgent {
                source: AgentError::MissingName
            })
        );
        assert_eq!(society.population(), 1);
    }
}
