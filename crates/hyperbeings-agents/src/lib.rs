//! AI being state, economic decisions, and relationships for the HyperBeings
//! simulation.
//!
//! This crate contains the logic layer for individual beings -- everything
//! that operates on a single being's state without touching I/O. It sits
//! between `hyperbeings-types` (which defines the data structures) and
//! `hyperbeings-core` (which owns the society and drives the loop).
//!
//! # Modules
//!
//! - [`agent`] -- The being itself ([`Agent`])
//! - [`config`] -- Starting values for new beings ([`AgentConfig`])
//! - [`decision`] -- Opportunity scoring and execution ([`DecisionEngine`])
//! - [`error`] -- Creation-time validation errors ([`AgentError`])
//! - [`goals`] -- Goal completion and follow-up goals
//! - [`personality`] -- Trait seeding, economic style, initial goals
//! - [`random`] -- Injectable randomness ([`RandomSource`])
//! - [`skills`] -- Initial skills and skill growth
//! - [`social`] -- Compatibility and relationship tracking ([`SocialGraph`])

pub mod agent;
pub mod config;
pub mod decision;
pub mod error;
pub mod goals;
pub mod personality;
pub mod random;
pub mod skills;
pub mod social;

// Re-export primary types at crate root for convenience.
pub use agent::Agent;
pub use config::AgentConfig;
pub use decision::{DecisionEngine, Opportunity, opportunity_score, select_best_option};
pub use error::AgentError;
pub use personality::recommend_traits;
pub use random::{RandomSource, ScriptedRandom, SeededRandom, ThreadRandom};
pub use social::{Counterpart, SocialGraph, compatibility};
