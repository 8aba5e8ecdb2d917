//! Starting values for newly created beings.
//!
//! [`AgentConfig`] bundles the tunables applied at creation so that the
//! society (and tests) can override them. The engine builds it from the
//! `economy` section of `hyperbeings-config.yaml`.

/// Configuration applied when a being is created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentConfig {
    /// Wallet balance every being starts with (default: 100).
    pub starting_wallet: u64,

    /// Reputation every being starts with (default: 50).
    pub starting_reputation: u8,

    /// Maximum absolute noise added to a trait when deriving its initial
    /// skill (default: 10.0).
    pub skill_noise: f64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            starting_wallet: 100,
            starting_reputation: 50,
            skill_noise: 10.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = AgentConfig::default();
        assert_eq!(cfg.starting_wallet, 100);
        assert_eq!(cfg.starting_reputation, 50);
        assert!((cfg.skill_noise - 10.0).abs() < f64::EPSILON);
    }
}
