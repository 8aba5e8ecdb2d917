//! Core entity structs for the HyperBeings society simulation.
//!
//! Covers the personality vector ([`Traits`]), the records an agent
//! accumulates ([`ActivityResult`], [`Relationship`], [`Goal`]), and the
//! records owned by the society registry ([`CollaborativeProject`],
//! [`InteractionRecord`], [`SocietyStats`]).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{
    InteractionKind, ProjectKind, ProjectStatus, RecommendationFocus, Skill, TraitKind,
};
use crate::ids::{AgentId, InteractionId, ProjectId};

/// Upper bound of every trait value, reputation, and skill level.
pub const SCALE_MAX: u8 = 100;

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// Immutable five-dimensional personality vector.
///
/// Each trait is an integer in `0..=100`. Traits never change after the
/// being is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Traits {
    /// Drive to make art and novel things.
    pub creativity: u8,
    /// Appetite for company and conversation.
    pub socialness: u8,
    /// Tolerance for uncertain outcomes.
    pub risk_taking: u8,
    /// Drive toward wealth and status.
    pub ambition: u8,
    /// Sensitivity to the feelings of others.
    pub empathy: u8,
}

impl Traits {
    /// Read a single trait by kind.
    pub const fn get(&self, kind: TraitKind) -> u8 {
        match kind {
            TraitKind::Creativity => self.creativity,
            TraitKind::Socialness => self.socialness,
            TraitKind::RiskTaking => self.risk_taking,
            TraitKind::Ambition => self.ambition,
            TraitKind::Empathy => self.empathy,
        }
    }

    /// The trait with the highest value.
    ///
    /// Ties go to the trait that comes first in [`TraitKind::ALL`].
    pub fn dominant(&self) -> (TraitKind, u8) {
        let mut best = (TraitKind::Creativity, self.creativity);
        for kind in TraitKind::ALL {
            let value = self.get(kind);
            if value > best.1 {
                best = (kind, value);
            }
        }
        best
    }
}

/// Caller-supplied partial traits for agent creation.
///
/// Any field left as `None` is randomized. A supplied value is used
/// verbatim, including zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TraitOverrides {
    /// Override for creativity.
    #[serde(default)]
    pub creativity: Option<u8>,
    /// Override for socialness.
    #[serde(default)]
    pub socialness: Option<u8>,
    /// Override for risk-taking.
    #[serde(default)]
    pub risk_taking: Option<u8>,
    /// Override for ambition.
    #[serde(default)]
    pub ambition: Option<u8>,
    /// Override for empathy.
    #[serde(default)]
    pub empathy: Option<u8>,
}

impl TraitOverrides {
    /// Read a single override by kind.
    pub const fn get(&self, kind: TraitKind) -> Option<u8> {
        match kind {
            TraitKind::Creativity => self.creativity,
            TraitKind::Socialness => self.socialness,
            TraitKind::RiskTaking => self.risk_taking,
            TraitKind::Ambition => self.ambition,
            TraitKind::Empathy => self.empathy,
        }
    }

    /// Whether every trait is supplied.
    pub const fn is_complete(&self) -> bool {
        self.creativity.is_some()
            && self.socialness.is_some()
            && self.risk_taking.is_some()
            && self.ambition.is_some()
            && self.empathy.is_some()
    }
}

impl From<Traits> for TraitOverrides {
    fn from(traits: Traits) -> Self {
        Self {
            creativity: Some(traits.creativity),
            socialness: Some(traits.socialness),
            risk_taking: Some(traits.risk_taking),
            ambition: Some(traits.ambition),
            empathy: Some(traits.empathy),
        }
    }
}

/// Trait recommendation payload produced by the assistant collaborator.
///
/// Hosts may pass this instead of hand-written overrides when creating a
/// being; every trait is supplied, so nothing is randomized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TraitRecommendation {
    /// What the recommendation optimizes for.
    pub focus: RecommendationFocus,
    /// The recommended traits.
    pub traits: Traits,
}

impl From<TraitRecommendation> for TraitOverrides {
    fn from(recommendation: TraitRecommendation) -> Self {
        Self::from(recommendation.traits)
    }
}

// ---------------------------------------------------------------------------
// Goals
// ---------------------------------------------------------------------------

/// A personal goal. Only [`Goal::EarnTokens`] is ever checked for completion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Goal {
    /// Reach a wallet balance of at least `target`.
    EarnTokens {
        /// Wallet balance that completes the goal.
        target: u64,
    },
    /// Befriend a number of other beings.
    MakeFriends {
        /// Number of friends wanted.
        count: u32,
    },
    /// Create and sell digital art.
    SellDigitalArt,
    /// Start a business venture.
    StartBusinessVenture,
    /// Fallback goal for beings with no strong drives.
    ExploreDigitalWorld,
    /// Invest in other beings.
    InvestInOthers,
    /// Mentor newly created beings.
    MentorNewcomers,
    /// Start a collaborative project.
    StartCollaborativeProject,
}

impl core::fmt::Display for Goal {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::EarnTokens { target } => write!(f, "Earn {target} tokens"),
            Self::MakeFriends { count } => write!(f, "Make {count} AI friends"),
            Self::SellDigitalArt => f.write_str("Create and sell digital art"),
            Self::StartBusinessVenture => f.write_str("Start a business venture"),
            Self::ExploreDigitalWorld => f.write_str("Explore the digital world"),
            Self::InvestInOthers => f.write_str("Invest in other AI beings"),
            Self::MentorNewcomers => f.write_str("Become a mentor to new AI beings"),
            Self::StartCollaborativeProject => f.write_str("Start a collaborative project"),
        }
    }
}

// ---------------------------------------------------------------------------
// Agent records
// ---------------------------------------------------------------------------

/// Outcome of one economic activity (or a completed collaboration),
/// appended to a being's memories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ActivityResult {
    /// Whether the activity succeeded.
    pub success: bool,
    /// Tokens earned. Always zero for failures.
    pub profit: u64,
    /// Label of what was attempted.
    pub experience: String,
    /// Wall-clock time the result was recorded.
    pub timestamp: DateTime<Utc>,
}

/// One side of a relationship, as seen by the being that owns it.
///
/// Both beings keep their own entry for each other; the entries evolve
/// independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Relationship {
    /// Display name of the other being.
    pub name: String,
    /// Relationship strength; never negative.
    pub strength: u32,
    /// Number of interactions with the other being.
    pub interaction_count: u32,
    /// Number of collaborative projects started together.
    pub collaboration_count: u32,
}

impl Relationship {
    /// A fresh relationship with no history.
    pub const fn new(name: String) -> Self {
        Self {
            name,
            strength: 0,
            interaction_count: 0,
            collaboration_count: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Society records
// ---------------------------------------------------------------------------

/// A timed joint venture between two beings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CollaborativeProject {
    /// Unique project identifier.
    pub id: ProjectId,
    /// Project category, which doubles as its name.
    pub name: ProjectKind,
    /// The two participating beings.
    pub participants: (AgentId, AgentId),
    /// Wall-clock time the project started.
    pub started_at: DateTime<Utc>,
    /// Minutes of wall-clock time until the project completes.
    pub expected_duration_minutes: u32,
    /// Lifecycle status.
    pub status: ProjectStatus,
    /// Tokens split between the participants on completion.
    pub potential_reward: u64,
    /// Skills the pair brings to the project.
    pub required_skills: Vec<Skill>,
    /// Wall-clock time the project completed, if it has.
    pub completed_at: Option<DateTime<Utc>>,
}

impl CollaborativeProject {
    /// Whether the project is still running.
    pub fn is_active(&self) -> bool {
        self.status == ProjectStatus::Active
    }

    /// Whether enough wall-clock time has passed for the project to finish.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        let elapsed = now.signed_duration_since(self.started_at);
        elapsed.num_minutes() >= i64::from(self.expected_duration_minutes)
    }

    /// Per-participant share of the reward, rounded down.
    pub const fn reward_share(&self) -> u64 {
        self.potential_reward / 2
    }
}

/// Shared log entry for one facilitated interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct InteractionRecord {
    /// Unique interaction identifier.
    pub id: InteractionId,
    /// Initiator and counterpart.
    pub participants: (AgentId, AgentId),
    /// Interaction type tag.
    pub kind: InteractionKind,
    /// Wall-clock time of the interaction.
    pub timestamp: DateTime<Utc>,
    /// True only if both sides succeeded.
    pub success: bool,
    /// Human-readable outcome.
    pub outcome: String,
}

/// Aggregate statistics, recomputed at the end of every step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SocietyStats {
    /// Number of beings in the society.
    pub population: u32,
    /// Sum of all wallets.
    pub total_wealth: u64,
    /// Mean reputation, rounded to the nearest integer.
    pub average_reputation: u32,
    /// Number of projects still active.
    pub active_collaborations: u32,
}

// ---------------------------------------------------------------------------
// Creation and minting
// ---------------------------------------------------------------------------

/// Request to create a being, as submitted by a host transport.
///
/// Both fields are required; a missing `traits` object is rejected rather
/// than randomized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SpawnRequest {
    /// Display name for the new being.
    pub name: String,
    /// Trait overrides. Individual traits may still be omitted.
    #[serde(default)]
    pub traits: Option<TraitOverrides>,
}

impl SpawnRequest {
    /// Build a request from an assistant trait recommendation.
    pub fn from_recommendation(
        name: impl Into<String>,
        recommendation: TraitRecommendation,
    ) -> Self {
        Self {
            name: name.into(),
            traits: Some(TraitOverrides::from(recommendation)),
        }
    }
}

/// Proof that a being was minted as a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct MintReceipt {
    /// Token id assigned by the minting contract.
    pub token_id: u64,
    /// Transaction hash of the mint.
    pub transaction_hash: String,
    /// When the mint was confirmed.
    pub minted_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn traits(c: u8, s: u8, r: u8, a: u8, e: u8) -> Traits {
        Traits {
            creativity: c,
            socialness: s,
            risk_taking: r,
            ambition: a,
            empathy: e,
        }
    }

    fn project(reward: u64, minutes: u32, started_at: DateTime<Utc>) -> CollaborativeProject {
        CollaborativeProject {
            id: ProjectId::new(),
            name: ProjectKind::AiMusicBand,
            participants: (AgentId::new(), AgentId::new()),
            started_at,
            expected_duration_minutes: minutes,
            status: ProjectStatus::Active,
            potential_reward: reward,
            required_skills: Vec::new(),
            completed_at: None,
        }
    }

    #[test]
    fn dominant_trait_picks_maximum() {
        let t = traits(10, 20, 95, 40, 50);
        assert_eq!(t.dominant(), (TraitKind::RiskTaking, 95));
    }

    #[test]
    fn dominant_trait_ties_go_to_first() {
        let t = traits(60, 80, 80, 10, 80);
        assert_eq!(t.dominant(), (TraitKind::Socialness, 80));

        let flat = traits(50, 50, 50, 50, 50);
        assert_eq!(flat.dominant(), (TraitKind::Creativity, 50));
    }

    #[test]
    fn overrides_from_traits_are_complete() {
        let o = TraitOverrides::from(traits(0, 1, 2, 3, 4));
        assert!(o.is_complete());
        assert_eq!(o.creativity, Some(0));
        assert_eq!(o.get(TraitKind::Empathy), Some(4));
        assert!(!TraitOverrides::default().is_complete());
    }

    #[test]
    fn goal_labels() {
        assert_eq!(Goal::EarnTokens { target: 1000 }.to_string(), "Earn 1000 tokens");
        assert_eq!(Goal::MakeFriends { count: 5 }.to_string(), "Make 5 AI friends");
        assert_eq!(Goal::ExploreDigitalWorld.to_string(), "Explore the digital world");
    }

    #[test]
    fn reward_share_rounds_down() {
        let now = Utc::now();
        assert_eq!(project(150, 5, now).reward_share(), 75);
        assert_eq!(project(299, 5, now).reward_share(), 149);
    }

    #[test]
    fn project_due_after_expected_duration() {
        let start = Utc::now();
        let p = project(100, 5, start);
        assert!(!p.is_due(start));
        assert!(!p.is_due(start + Duration::minutes(4)));
        assert!(p.is_due(start + Duration::minutes(5)));
        assert!(p.is_due(start + Duration::minutes(30)));
    }

    #[test]
    fn spawn_request_from_recommendation_is_complete() {
        let rec = TraitRecommendation {
            focus: RecommendationFocus::Creative,
            traits: traits(95, 80, 70, 85, 90),
        };
        let request = SpawnRequest::from_recommendation("Iris", rec);
        assert_eq!(request.name, "Iris");
        assert!(request.traits.is_some_and(|t| t.is_complete()));
    }

    #[test]
    fn spawn_request_traits_default_to_missing() {
        let fallback = SpawnRequest {
            name: String::new(),
            traits: Some(TraitOverrides::default()),
        };
        let request: SpawnRequest =
            serde_json::from_str(r#"{"name":"Nova"}"#).unwrap_or(fallback);
        assert_eq!(request.name, "Nova");
        assert!(request.traits.is_none());
    }
}
