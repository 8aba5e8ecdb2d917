//! The AI being: identity, traits, economy, and social state.
//!
//! An [`Agent`] is created once through [`Agent::create`] and afterwards only
//! mutated through its own methods, which keep every invariant in place:
//!
//! - wallet never drops below zero (credits saturate, nothing debits)
//! - reputation stays within `[0, 100]`
//! - skills stay within `[0, 100]`
//! - relationship strength never drops below zero
//!
//! Traits and the derived economic style never change after creation.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use hyperbeings_types::{
    ActivityResult, AgentId, AgentStatus, EconomicStatus, EconomicStyle, Goal, InteractionKind,
    LifeSummary, SCALE_MAX, Skill, TraitOverrides, Traits,
};
use tracing::{debug, info};

use crate::config::AgentConfig;
use crate::decision::{self, DecisionEngine};
use crate::error::AgentError;
use crate::goals::{self, GoalContext};
use crate::personality;
use crate::random::RandomSource;
use crate::skills;
use crate::social::{self, Counterpart, SocialGraph};

/// Number of memories included in a status snapshot.
const STATUS_MEMORY_WINDOW: usize = 3;

/// Largest reputation bonus drawn after a successful activity.
const MAX_SUCCESS_REPUTATION_BONUS: u32 = 5;

/// An autonomous AI being.
#[derive(Debug, Clone)]
pub struct Agent {
    id: AgentId,
    name: String,
    born_at: DateTime<Utc>,
    traits: Traits,
    economic_style: EconomicStyle,
    wallet: u64,
    reputation: u8,
    skills: BTreeMap<Skill, f64>,
    goals: Vec<Goal>,
    goals_completed: u32,
    memories: Vec<ActivityResult>,
    social: SocialGraph,
    experience_level: u32,
}

impl Agent {
    /// Create a new being.
    ///
    /// Missing traits are drawn from `rng`, then skills get their noise
    /// draws. Nothing is drawn if validation fails.
    pub fn create(
        name: impl Into<String>,
        overrides: &TraitOverrides,
        config: &AgentConfig,
        rng: &mut dyn RandomSource,
    ) -> Result<Self, AgentError> {
        let name = name.into().trim().to_owned();
        if name.is_empty() {
            return Err(AgentError::MissingName);
        }

        let traits = personality::resolve_traits(overrides, rng)?;
        let economic_style = personality::economic_style(&traits);
        let skills = skills::initial_skills(&traits, config.skill_noise, rng);
        let goals = personality::initial_goals(&traits);

        let agent = Self {
            id: AgentId::new(),
            name,
            born_at: Utc::now(),
            traits,
            economic_style,
            wallet: config.starting_wallet,
            reputation: config.starting_reputation.min(SCALE_MAX),
            skills,
            goals,
            goals_completed: 0,
            memories: Vec::new(),
            social: SocialGraph::new(),
            experience_level: 0,
        };

        info!(
            agent = %agent.name,
            id = %agent.id,
            style = %agent.economic_style,
            "AI being created"
        );
        Ok(agent)
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// Unique identifier.
    pub const fn id(&self) -> AgentId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Creation timestamp.
    pub const fn born_at(&self) -> DateTime<Utc> {
        self.born_at
    }

    /// Immutable personality traits.
    pub const fn traits(&self) -> &Traits {
        &self.traits
    }

    /// Economic style derived at creation.
    pub const fn economic_style(&self) -> EconomicStyle {
        self.economic_style
    }

    /// Current wallet balance.
    pub const fn wallet(&self) -> u64 {
        self.wallet
    }

    /// Current reputation in `[0, 100]`.
    pub const fn reputation(&self) -> u8 {
        self.reputation
    }

    /// Skill levels in `[0, 100]`.
    pub const fn skills(&self) -> &BTreeMap<Skill, f64> {
        &self.skills
    }

    /// Outstanding goals, oldest first.
    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    /// Number of goals completed so far.
    pub const fn goals_completed(&self) -> u32 {
        self.goals_completed
    }

    /// Every activity result, oldest first.
    pub fn memories(&self) -> &[ActivityResult] {
        &self.memories
    }

    /// Relationships with other beings.
    pub const fn relationships(&self) -> &SocialGraph {
        &self.social
    }

    /// Number of economic activities performed.
    pub const fn experience_level(&self) -> u32 {
        self.experience_level
    }

    /// By-value view of this being for use as the other party of an
    /// interaction.
    pub fn counterpart(&self) -> Counterpart {
        Counterpart {
            id: self.id,
            name: self.name.clone(),
            traits: self.traits,
        }
    }

    // -----------------------------------------------------------------------
    // Economy
    // -----------------------------------------------------------------------

    /// Borrow this being's decision engine.
    pub const fn decision_engine(&mut self) -> DecisionEngine<'_> {
        DecisionEngine::new(self)
    }

    /// Run one economic activity and apply its consequences.
    ///
    /// Experience always grows by one. Success raises reputation by 1..=5
    /// and nudges the related skill; failure costs one reputation point.
    /// Goals are checked afterwards.
    pub fn run_economic_activity(&mut self, rng: &mut dyn RandomSource) -> ActivityResult {
        let result = self.decision_engine().make_economic_decision(rng);
        self.experience_level = self.experience_level.saturating_add(1);

        if result.success {
            let bonus = rng
                .below(MAX_SUCCESS_REPUTATION_BONUS)
                .saturating_add(1);
            self.adjust_reputation(i32::try_from(bonus).unwrap_or(0));
            skills::nudge_for_experience(&mut self.skills, &result.experience);
        } else {
            self.adjust_reputation(-1);
        }

        self.check_goals(rng);
        result
    }

    /// Economic summary.
    pub fn economic_status(&self) -> EconomicStatus {
        decision::economic_status(self)
    }

    /// Add tokens to the wallet, saturating at `u64::MAX`.
    pub const fn credit(&mut self, amount: u64) {
        self.wallet = self.wallet.saturating_add(amount);
    }

    /// Shift reputation by `delta`, clamped to `[0, 100]`.
    pub fn adjust_reputation(&mut self, delta: i32) {
        let next = i32::from(self.reputation)
            .saturating_add(delta)
            .clamp(0, i32::from(SCALE_MAX));
        self.reputation = u8::try_from(next).unwrap_or(SCALE_MAX);
    }

    /// Append an activity result to memories.
    pub fn remember(&mut self, result: ActivityResult) {
        self.memories.push(result);
    }

    /// Complete reached goals and draw follow-ups. Returns the number of
    /// goals completed by this call.
    pub fn check_goals(&mut self, rng: &mut dyn RandomSource) -> u32 {
        let ctx = GoalContext {
            wallet: self.wallet,
            ambition: self.traits.ambition,
            reputation: self.reputation,
            experience_level: self.experience_level,
        };
        let completed = goals::check_goals(&mut self.goals, &ctx, rng);
        if completed > 0 {
            self.goals_completed = self.goals_completed.saturating_add(completed);
            info!(agent = %self.name, completed, wallet = self.wallet, "Goal completed");
        }
        completed
    }

    // -----------------------------------------------------------------------
    // Social
    // -----------------------------------------------------------------------

    /// Interact with another being and update the relationship.
    ///
    /// Succeeds with probability `compatibility / 100`. Consumes one draw.
    pub fn interact_with(
        &mut self,
        other: &Counterpart,
        kind: InteractionKind,
        rng: &mut dyn RandomSource,
    ) -> bool {
        let score = social::compatibility(&self.traits, &other.traits);
        let success = rng.chance(score / 100.0);
        let relationship = self.social.record_interaction(other, success);

        debug!(
            agent = %self.name,
            other = %other.name,
            kind = kind.tag(),
            compatibility = score,
            success,
            strength = relationship.strength,
            "Interaction resolved"
        );
        success
    }

    /// Compatibility with another being.
    pub fn compatibility_with(&self, other: &Counterpart) -> f64 {
        social::compatibility(&self.traits, &other.traits)
    }

    /// Bump the collaboration counter of the relationship with `other`.
    pub fn record_collaboration(&mut self, other: AgentId) -> bool {
        self.social.record_collaboration(other)
    }

    // -----------------------------------------------------------------------
    // Projections
    // -----------------------------------------------------------------------

    /// Read-only status snapshot.
    pub fn status(&self) -> AgentStatus {
        let recent_start = self.memories.len().saturating_sub(STATUS_MEMORY_WINDOW);
        AgentStatus {
            id: self.id,
            name: self.name.clone(),
            wallet: self.wallet,
            traits: self.traits,
            skills: self.skills.clone(),
            goals: self.goals.iter().map(ToString::to_string).collect(),
            reputation: self.reputation,
            experience_level: self.experience_level,
            economic_style: self.economic_style,
            economic_status: self.economic_status(),
            recent_memories: self.memories.iter().skip(recent_start).cloned().collect(),
            born_at: self.born_at,
        }
    }

    /// Life summary as of `now`.
    pub fn life_summary(&self, now: DateTime<Utc>) -> LifeSummary {
        let total_earnings = self
            .memories
            .iter()
            .fold(0_u64, |sum, m| sum.saturating_add(m.profit));
        let (dominant_trait, dominant_trait_value) = self.traits.dominant();

        LifeSummary {
            id: self.id,
            name: self.name.clone(),
            age_minutes: now.signed_duration_since(self.born_at).num_minutes(),
            wallet: self.wallet,
            total_earnings,
            success_rate: decision::success_percentage(&self.memories),
            experience_level: self.experience_level,
            reputation: self.reputation,
            relationships: u32::try_from(self.social.len()).unwrap_or(u32::MAX),
            goals_completed: self.goals_completed,
            economic_style: self.economic_style,
            dominant_trait,
            dominant_trait_value,
        }
    }
}
