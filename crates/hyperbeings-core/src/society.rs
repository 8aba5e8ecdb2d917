//! The society registry and the simulation step.
//!
//! A [`Society`] owns every being, the interaction log, and the project
//! list. It is the only writer of that state: beings refer to each other by
//! id, and pairwise operations hand each side a by-value
//! [`Counterpart`](hyperbeings_agents::Counterpart) of the other.
//!
//! # Step
//!
//! [`Society::simulate_step`] runs one round in a fixed order:
//!
//! 1. **Interactions** -- up to `interactions_per_step` random pairs meet
//! 2. **Economy** -- each being works with probability
//!    `activity_probability`, one after another with a pacing delay
//! 3. **Projects** -- due projects complete and pay out
//! 4. **Stats** -- aggregates are recomputed
//!
//! All randomness comes from the [`RandomSource`] the society was built
//! with.

use std::time::Duration;

use chrono::{DateTime, Utc};
use hyperbeings_agents::{Agent, AgentConfig, AgentError, RandomSource};
use hyperbeings_types::{
    ActivityResult, AgentId, AgentStatus, CollaborativeProject, InteractionId, InteractionKind,
    InteractionRecord, LifeSummary, MintReceipt, ProjectId, ProjectKind, ProjectStatus,
    RankedAgent, Skill, SocietyOverview, SocietyStats, SpawnRequest,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::SocietyConfig;
use crate::minting::{MintError, MintRequest, Minter};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Outcome text of an interaction where both sides succeeded.
pub const POSITIVE_OUTCOME: &str = "Positive interaction - relationship strengthened";

/// Outcome text of any other interaction.
pub const NEUTRAL_OUTCOME: &str = "Neutral interaction";

/// Reputation granted to each participant of a completed project.
pub const PROJECT_REPUTATION_BONUS: i32 = 10;

/// Number of beings in each overview ranking.
const RANKING_SIZE: usize = 3;

/// Number of interactions in the overview.
const RECENT_INTERACTIONS: usize = 5;

/// Minimum project duration in minutes.
const MIN_PROJECT_MINUTES: u32 = 5;

/// Number of distinct project durations (5..=14 minutes).
const PROJECT_MINUTE_SPAN: u32 = 10;

/// Minimum project reward.
const MIN_PROJECT_REWARD: u32 = 100;

/// Number of distinct project rewards (100..=299 tokens).
const PROJECT_REWARD_SPAN: u32 = 200;

/// Trait level above which a participant contributes a required skill.
const SKILL_REQUIREMENT_THRESHOLD: u8 = 70;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur while operating on the society.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SocietyError {
    /// A step needs at least two beings.
    #[error("need at least 2 beings for social interactions, have {population}")]
    InsufficientPopulation {
        /// Current population.
        population: usize,
    },

    /// No being with this id exists.
    #[error("unknown being: {id}")]
    UnknownAgent {
        /// The id that was looked up.
        id: AgentId,
    },

    /// A being cannot interact or collaborate with itself.
    #[error("being {id} cannot interact with itself")]
    SelfInteraction {
        /// The offending id.
        id: AgentId,
    },

    /// Creating a being failed validation.
    #[error("invalid being: {source}")]
    InvalidAgent {
        /// The underlying validation error.
        #[from]
        source: AgentError,
    },
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

/// Summary of one simulation step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StepReport {
    /// 1-based step number.
    pub step: u64,
    /// Interactions facilitated during the step.
    pub interactions: u32,
    /// Interactions where both sides succeeded.
    pub successful_interactions: u32,
    /// Projects started during the step.
    pub projects_started: u32,
    /// Economic activities run during the step.
    pub activities: u32,
    /// Economic activities that succeeded.
    pub successful_activities: u32,
    /// Projects completed during the step.
    pub projects_completed: u32,
    /// Aggregates after the step.
    pub stats: SocietyStats,
}

/// Result of [`Society::spawn_agent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnOutcome {
    /// Id of the created being.
    pub agent_id: AgentId,
    /// Name of the created being.
    pub name: String,
    /// The mint result. A failure here does not undo the creation.
    pub mint: Result<MintReceipt, MintError>,
}

// ---------------------------------------------------------------------------
// Society
// ---------------------------------------------------------------------------

/// Registry of beings plus everything they share.
pub struct Society {
    agents: Vec<Agent>,
    projects: Vec<CollaborativeProject>,
    interactions: Vec<InteractionRecord>,
    stats: SocietyStats,
    steps: u64,
    config: SocietyConfig,
    agent_config: AgentConfig,
    rng: Box<dyn RandomSource>,
}

impl std::fmt::Debug for Society {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Society")
            .field("population", &self.agents.len())
            .field("projects", &self.projects.len())
            .field("interactions", &self.interactions.len())
            .field("steps", &self.steps)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl Society {
    /// Create an empty society.
    pub fn new(
        config: SocietyConfig,
        agent_config: AgentConfig,
        rng: Box<dyn RandomSource>,
    ) -> Self {
        info!("AI society initialized");
        Self {
            agents: Vec::new(),
            projects: Vec::new(),
            interactions: Vec::new(),
            stats: SocietyStats::default(),
            steps: 0,
            config,
            agent_config,
            rng,
        }
    }

    // -----------------------------------------------------------------------
    // Read access
    // -----------------------------------------------------------------------

    /// Number of beings.
    pub fn population(&self) -> usize {
        self.agents.len()
    }

    /// Beings in insertion order.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Look up a being.
    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.iter().find(|agent| agent.id() == id)
    }

    /// Status snapshot of one being.
    pub fn agent_status(&self, id: AgentId) -> Option<AgentStatus> {
        self.agent(id).map(Agent::status)
    }

    /// Every project, active and completed.
    pub fn projects(&self) -> &[CollaborativeProject] {
        &self.projects
    }

    /// The full interaction log, oldest first.
    pub fn interactions(&self) -> &[InteractionRecord] {
        &self.interactions
    }

    /// Aggregates as of the last refresh.
    pub const fn stats(&self) -> SocietyStats {
        self.stats
    }

    /// Number of completed steps.
    pub const fn steps(&self) -> u64 {
        self.steps
    }

    /// Creation config applied to spawned beings.
    pub const fn agent_config(&self) -> &AgentConfig {
        &self.agent_config
    }

    // -----------------------------------------------------------------------
    // Membership
    // -----------------------------------------------------------------------

    /// Add a being and introduce it to up to `introductions_per_agent`
    /// randomly chosen existing beings.
    pub fn add_agent(&mut self, agent: Agent) -> AgentId {
        let id = agent.id();
        let name = agent.name().to_owned();

        let mut candidates: Vec<AgentId> = self.agents.iter().map(Agent::id).collect();
        self.agents.push(agent);
        self.stats.population = u32::try_from(self.agents.len()).unwrap_or(u32::MAX);

        info!(agent = %name, population = self.stats.population, "Being joined the society");

        let meet = self.config.introductions_per_agent.min(candidates.len());
        for _ in 0..meet {
            let pick = self.rng.index(candidates.len());
            let other = candidates.swap_remove(pick);
            let introduced = self.facilitate_interaction(id, other, InteractionKind::Introduction);
            if let Err(err) = introduced {
                warn!(agent = %name, %err, "Introduction failed");
            }
        }
        id
    }

    /// Create a being from a transport request, add it, then mint it.
    ///
    /// The being is added before minting. A mint failure is logged and
    /// reported in the outcome; the being stays.
    pub fn spawn_agent(
        &mut self,
        request: &SpawnRequest,
        minter: &mut dyn Minter,
    ) -> Result<SpawnOutcome, SocietyError> {
        if request.name.trim().is_empty() {
            return Err(AgentError::MissingName.into());
        }
        let overrides = request.traits.ok_or(AgentError::MissingTraits)?;

        let agent = Agent::create(
            request.name.as_str(),
            &overrides,
            &self.agent_config,
            self.rng.as_mut(),
        )?;
        let mint_request = MintRequest {
            name: agent.name().to_owned(),
            traits: *agent.traits(),
            economic_style: agent.economic_style(),
        };
        let name = mint_request.name.clone();
        let agent_id = self.add_agent(agent);

        let mint = minter.mint(&mint_request);
        match &mint {
            Ok(receipt) => info!(agent = %name, token_id = receipt.token_id, "Being minted"),
            Err(err) => warn!(agent = %name, %err, "Minting failed; being kept"),
        }

        Ok(SpawnOutcome {
            agent_id,
            name,
            mint,
        })
    }

    // -----------------------------------------------------------------------
    // Interactions and collaboration
    // -----------------------------------------------------------------------

    fn index_of(&self, id: AgentId) -> Result<usize, SocietyError> {
        self.agents
            .iter()
            .position(|agent| agent.id() == id)
            .ok_or(SocietyError::UnknownAgent { id })
    }

    /// Both beings interact with each other and the shared outcome is
    /// logged.
    ///
    /// When both sides succeed on a social interaction, a collaboration is
    /// proposed with probability `collaboration_probability`.
    pub fn facilitate_interaction(
        &mut self,
        first: AgentId,
        second: AgentId,
        kind: InteractionKind,
    ) -> Result<InteractionRecord, SocietyError> {
        if first == second {
            return Err(SocietyError::SelfInteraction { id: first });
        }
        let a = self.index_of(first)?;
        let b = self.index_of(second)?;

        let view_a = self.agents.get(a).map(Agent::counterpart);
        let view_b = self.agents.get(b).map(Agent::counterpart);
        let (Some(view_a), Some(view_b)) = (view_a, view_b) else {
            return Err(SocietyError::UnknownAgent { id: first });
        };

        let rng = self.rng.as_mut();
        let success_a = match self.agents.get_mut(a) {
            Some(agent) => agent.interact_with(&view_b, kind, rng),
            None => false,
        };
        let success_b = match self.agents.get_mut(b) {
            Some(agent) => agent.interact_with(&view_a, kind, rng),
            None => false,
        };
        let success = success_a && success_b;

        let record = InteractionRecord {
            id: InteractionId::new(),
            participants: (first, second),
            kind,
            timestamp: Utc::now(),
            success,
            outcome: if success { POSITIVE_OUTCOME } else { NEUTRAL_OUTCOME }.to_owned(),
        };
        self.interactions.push(record.clone());

        debug!(
            first = %view_a.name,
            second = %view_b.name,
            kind = kind.tag(),
            success,
            "Interaction facilitated"
        );

        if success
            && kind == InteractionKind::Social
            && self.rng.chance(self.config.collaboration_probability)
        {
            self.propose_collaboration(first, second)?;
        }
        Ok(record)
    }

    /// Start a project between two beings if their compatibility exceeds
    /// `collaboration_threshold`. Returns the new project, if any.
    pub fn propose_collaboration(
        &mut self,
        first: AgentId,
        second: AgentId,
    ) -> Result<Option<CollaborativeProject>, SocietyError> {
        if first == second {
            return Err(SocietyError::SelfInteraction { id: first });
        }
        let a = self.index_of(first)?;
        let b = self.index_of(second)?;
        let (Some(agent_a), Some(agent_b)) = (self.agents.get(a), self.agents.get(b)) else {
            return Err(SocietyError::UnknownAgent { id: first });
        };

        let compatibility = agent_a.compatibility_with(&agent_b.counterpart());
        if compatibility <= self.config.collaboration_threshold {
            debug!(
                first = %agent_a.name(),
                second = %agent_b.name(),
                compatibility,
                "Collaboration declined"
            );
            return Ok(None);
        }

        let required_skills = required_skills(agent_a, agent_b);
        let names = (agent_a.name().to_owned(), agent_b.name().to_owned());

        let kind = ProjectKind::ALL
            .get(self.rng.index(ProjectKind::ALL.len()))
            .copied()
            .unwrap_or(ProjectKind::DigitalArtGallery);
        let project = CollaborativeProject {
            id: ProjectId::new(),
            name: kind,
            participants: (first, second),
            started_at: Utc::now(),
            expected_duration_minutes: MIN_PROJECT_MINUTES
                .saturating_add(self.rng.below(PROJECT_MINUTE_SPAN)),
            status: ProjectStatus::Active,
            potential_reward: u64::from(
                MIN_PROJECT_REWARD.saturating_add(self.rng.below(PROJECT_REWARD_SPAN)),
            ),
            required_skills,
            completed_at: None,
        };

        for (index, other) in [(a, second), (b, first)] {
            if let Some(agent) = self.agents.get_mut(index) {
                agent.record_collaboration(other);
            }
        }
        self.projects.push(project.clone());
        self.stats.active_collaborations = self.stats.active_collaborations.saturating_add(1);

        info!(
            project = %project.name,
            first = %names.0,
            second = %names.1,
            minutes = project.expected_duration_minutes,
            reward = project.potential_reward,
            "Collaboration started"
        );
        Ok(Some(project))
    }

    // -----------------------------------------------------------------------
    // Simulation step
    // -----------------------------------------------------------------------

    /// Run one simulation step at the current time.
    pub async fn simulate_step(&mut self) -> Result<StepReport, SocietyError> {
        self.simulate_step_at(Utc::now()).await
    }

    /// Run one simulation step, judging project deadlines against `now`.
    pub async fn simulate_step_at(
        &mut self,
        now: DateTime<Utc>,
    ) -> Result<StepReport, SocietyError> {
        let population = self.agents.len();
        if population < 2 {
            return Err(SocietyError::InsufficientPopulation { population });
        }

        let step = self.steps.saturating_add(1);
        info!(step, population, "Society step started");
        let mut report = StepReport {
            step,
            ..StepReport::default()
        };

        let projects_before = self.projects.len();
        self.run_interactions(&mut report);
        report.projects_started =
            u32::try_from(self.projects.len().saturating_sub(projects_before)).unwrap_or(u32::MAX);

        self.run_economic_activities(&mut report).await;
        report.projects_completed = self.progress_projects(now);
        report.stats = self.refresh_stats();

        self.steps = step;
        info!(
            step,
            interactions = report.interactions,
            activities = report.activities,
            completed = report.projects_completed,
            wealth = report.stats.total_wealth,
            "Society step finished"
        );
        Ok(report)
    }

    fn run_interactions(&mut self, report: &mut StepReport) {
        let count = self.config.interactions_per_step.min(self.agents.len());
        for _ in 0..count {
            let first = self.rng.index(self.agents.len());
            let second = self.rng.index(self.agents.len());
            if first == second {
                continue;
            }
            let (Some(a), Some(b)) = (
                self.agents.get(first).map(Agent::id),
                self.agents.get(second).map(Agent::id),
            ) else {
                continue;
            };
            let pool = InteractionKind::RANDOM_POOL;
            let kind = pool
                .get(self.rng.index(pool.len()))
                .copied()
                .unwrap_or(InteractionKind::Social);

            match self.facilitate_interaction(a, b, kind) {
                Ok(record) => {
                    report.interactions = report.interactions.saturating_add(1);
                    if record.success {
                        report.successful_interactions =
                            report.successful_interactions.saturating_add(1);
                    }
                }
                Err(err) => warn!(%err, "Interaction skipped"),
            }
        }
    }

    async fn run_economic_activities(&mut self, report: &mut StepReport) {
        let probability = self.config.activity_probability;
        let workers: Vec<usize> = (0..self.agents.len())
            .filter(|_| self.rng.chance(probability))
            .collect();
        let pacing = Duration::from_millis(self.config.activity_pacing_ms);

        for index in workers {
            let Some(agent) = self.agents.get_mut(index) else {
                continue;
            };
            let result = agent.run_economic_activity(self.rng.as_mut());
            report.activities = report.activities.saturating_add(1);
            if result.success {
                report.successful_activities = report.successful_activities.saturating_add(1);
            }
            if !pacing.is_zero() {
                tokio::time::sleep(pacing).await;
            }
        }
    }

    /// Complete every active project that is due at `now`.
    ///
    /// Each participant receives half the reward (rounded down), ten
    /// reputation points, and a memory of the collaboration. Returns the
    /// number of projects completed.
    pub fn progress_projects(&mut self, now: DateTime<Utc>) -> u32 {
        let mut completed = 0_u32;
        for project in self.projects.iter_mut().filter(|p| p.is_active() && p.is_due(now)) {
            project.status = ProjectStatus::Completed;
            project.completed_at = Some(now);
            let share = project.reward_share();

            for participant in [project.participants.0, project.participants.1] {
                let Some(agent) = self.agents.iter_mut().find(|a| a.id() == participant) else {
                    continue;
                };
                agent.credit(share);
                agent.adjust_reputation(PROJECT_REPUTATION_BONUS);
                agent.remember(ActivityResult {
                    success: true,
                    profit: share,
                    experience: format!("Completed collaboration: {}", project.name),
                    timestamp: now,
                });
                info!(
                    agent = %agent.name(),
                    project = %project.name,
                    share,
                    "Collaboration paid out"
                );
            }

            self.stats.active_collaborations = self.stats.active_collaborations.saturating_sub(1);
            completed = completed.saturating_add(1);
        }
        completed
    }

    /// Recompute aggregate statistics.
    pub fn refresh_stats(&mut self) -> SocietyStats {
        let population = self.agents.len();
        let total_wealth = self
            .agents
            .iter()
            .fold(0_u64, |sum, agent| sum.saturating_add(agent.wallet()));
        let reputation_sum = self
            .agents
            .iter()
            .fold(0_u64, |sum, agent| sum.saturating_add(u64::from(agent.reputation())));

        let average_reputation = if population == 0 {
            0
        } else {
            #[allow(
                clippy::cast_precision_loss,
                clippy::cast_possible_truncation,
                clippy::cast_sign_loss
            )]
            let mean = (reputation_sum as f64 / population as f64).round() as u32;
            mean
        };
        let active = self.projects.iter().filter(|p| p.is_active()).count();

        self.stats = SocietyStats {
            population: u32::try_from(population).unwrap_or(u32::MAX),
            total_wealth,
            average_reputation,
            active_collaborations: u32::try_from(active).unwrap_or(u32::MAX),
        };
        debug!(
            population = self.stats.population,
            total_wealth,
            average_reputation,
            active_collaborations = self.stats.active_collaborations,
            interactions = self.interactions.len(),
            "Society stats refreshed"
        );
        self.stats
    }

    // -----------------------------------------------------------------------
    // Projections
    // -----------------------------------------------------------------------

    /// Dashboard overview: stats, rankings, active projects, and the most
    /// recent interactions.
    pub fn overview(&self) -> SocietyOverview {
        let rank = |value: fn(&Agent) -> u64| -> Vec<RankedAgent> {
            let mut ranked: Vec<RankedAgent> = self
                .agents
                .iter()
                .map(|agent| RankedAgent {
                    id: agent.id(),
                    name: agent.name().to_owned(),
                    value: value(agent),
                })
                .collect();
            ranked.sort_by(|x, y| y.value.cmp(&x.value));
            ranked.truncate(RANKING_SIZE);
            ranked
        };

        let recent_start = self.interactions.len().saturating_sub(RECENT_INTERACTIONS);
        SocietyOverview {
            stats: self.stats,
            top_earners: rank(Agent::wallet),
            most_reputable: rank(|agent| u64::from(agent.reputation())),
            active_projects: self
                .projects
                .iter()
                .filter(|p| p.is_active())
                .cloned()
                .collect(),
            recent_interactions: self.interactions.iter().skip(recent_start).cloned().collect(),
        }
    }

    /// Life summary of every being as of `now`.
    pub fn all_life_summaries(&self, now: DateTime<Utc>) -> Vec<LifeSummary> {
        self.agents.iter().map(|agent| agent.life_summary(now)).collect()
    }
}

/// Skills a project between `a` and `b` calls for.
fn required_skills(a: &Agent, b: &Agent) -> Vec<Skill> {
    let either = |pick: fn(&Agent) -> u8| {
        pick(a) > SKILL_REQUIREMENT_THRESHOLD || pick(b) > SKILL_REQUIREMENT_THRESHOLD
    };
    let mut skills = Vec::with_capacity(3);
    if either(|agent| agent.traits().creativity) {
        skills.push(Skill::Creativity);
    }
    if either(|agent| agent.traits().socialness) {
        skills.push(Skill::Communication);
    }
    if either(|agent| agent.traits().ambition) {
        skills.push(Skill::Leadership);
    }
    skills
}
