//! Read-only projections rendered by the dashboard.
//!
//! These are snapshots: building one never mutates the society, and
//! holding one does not keep any agent alive.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{EconomicStyle, Skill, TraitKind};
use crate::ids::AgentId;
use crate::structs::{ActivityResult, CollaborativeProject, InteractionRecord, SocietyStats, Traits};

/// Economic rollup for one being.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct EconomicStatus {
    /// Current wallet balance.
    pub wallet: u64,
    /// Economic style derived at creation.
    pub economic_style: EconomicStyle,
    /// Sum of the last five positive-profit memories.
    pub recent_earnings: u64,
    /// Number of memories recorded.
    pub total_activities: u32,
    /// Percentage of successful memories, rounded.
    pub success_rate: u32,
}

/// Full status snapshot of one being.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AgentStatus {
    /// Being identifier.
    pub id: AgentId,
    /// Display name.
    pub name: String,
    /// Current wallet balance.
    pub wallet: u64,
    /// Personality vector.
    pub traits: Traits,
    /// Skill levels.
    pub skills: BTreeMap<Skill, f64>,
    /// Open goals, rendered as labels.
    pub goals: Vec<String>,
    /// Reputation in `0..=100`.
    pub reputation: u8,
    /// Number of economic activities run.
    pub experience_level: u32,
    /// Economic style derived at creation.
    pub economic_style: EconomicStyle,
    /// Economic rollup.
    pub economic_status: EconomicStatus,
    /// Last three memories.
    pub recent_memories: Vec<ActivityResult>,
    /// Wall-clock creation time.
    pub born_at: DateTime<Utc>,
}

/// Condensed life story of one being (the `beings-update` payload).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LifeSummary {
    /// Being identifier.
    pub id: AgentId,
    /// Display name.
    pub name: String,
    /// Whole minutes since creation.
    pub age_minutes: i64,
    /// Current wallet balance.
    pub wallet: u64,
    /// Sum of all positive profits ever recorded.
    pub total_earnings: u64,
    /// Percentage of successful memories, rounded.
    pub success_rate: u32,
    /// Number of economic activities run.
    pub experience_level: u32,
    /// Reputation in `0..=100`.
    pub reputation: u8,
    /// Number of beings this one has a relationship with.
    pub relationships: u32,
    /// Number of goals completed.
    pub goals_completed: u32,
    /// Economic style derived at creation.
    pub economic_style: EconomicStyle,
    /// Highest trait.
    pub dominant_trait: TraitKind,
    /// Value of the highest trait.
    pub dominant_trait_value: u8,
}

/// One row of a leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RankedAgent {
    /// Being identifier.
    pub id: AgentId,
    /// Display name.
    pub name: String,
    /// The ranked value (wallet or reputation).
    pub value: u64,
}

/// Society-wide overview (the `society-update` payload).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SocietyOverview {
    /// Aggregate statistics from the last refresh.
    pub stats: SocietyStats,
    /// Up to three wealthiest beings.
    pub top_earners: Vec<RankedAgent>,
    /// Up to three most reputable beings.
    pub most_reputable: Vec<RankedAgent>,
    /// Projects still running.
    pub active_projects: Vec<CollaborativeProject>,
    /// Last five interactions, oldest first.
    pub recent_interactions: Vec<InteractionRecord>,
}
