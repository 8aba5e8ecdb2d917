//! Economic decision making: opportunity enumeration, scoring, execution.
//!
//! A [`DecisionEngine`] is a short-lived mutable view over one [`Agent`].
//! It is created on demand by [`Agent::decision_engine`] and owns nothing,
//! so there is no back-pointer between a being and its engine.
//!
//! # Pipeline
//!
//! 1. [`opportunities_for`] lazily yields the opportunities a being's
//!    traits and wallet unlock. `simple_task` is always available.
//! 2. [`select_best_option`] picks the highest [`opportunity_score`],
//!    keeping the earliest candidate on ties.
//! 3. [`DecisionEngine::execute_decision`] rolls for success, credits the
//!    wallet, and appends an [`ActivityResult`] to the being's memories.

use chrono::Utc;
use hyperbeings_types::{ActivityResult, EconomicStatus, OpportunityKind, Traits};
use tracing::debug;

use crate::agent::Agent;
use crate::random::RandomSource;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Order in which opportunities are enumerated.
const OPPORTUNITY_ORDER: [OpportunityKind; 4] = [
    OpportunityKind::CreateArt,
    OpportunityKind::SocialService,
    OpportunityKind::Investment,
    OpportunityKind::SimpleTask,
];

/// Base success rate in percent before the trait adjustment.
const BASE_SUCCESS_RATE: f64 = 70.0;

/// Lowest possible success rate in percent.
const MIN_SUCCESS_RATE: f64 = 30.0;

/// Highest possible success rate in percent.
const MAX_SUCCESS_RATE: f64 = 95.0;

/// Total width of the profit variance band (±15%).
const PROFIT_VARIANCE: f64 = 0.3;

/// Number of positive-profit memories summed into recent earnings.
const RECENT_EARNINGS_WINDOW: usize = 5;

// ---------------------------------------------------------------------------
// Opportunity
// ---------------------------------------------------------------------------

/// One candidate economic activity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Opportunity {
    /// Type tag.
    pub kind: OpportunityKind,
    /// Human-readable action label.
    pub action: &'static str,
    /// Profit credited (before variance) if the activity succeeds.
    pub expected_profit: f64,
    /// Risk level in `[0, 100]`.
    pub risk_level: u8,
    /// Time the activity takes, in minutes.
    pub time_required: u32,
}

impl Opportunity {
    /// Build the opportunity of the given kind if the being qualifies.
    pub fn offered(kind: OpportunityKind, traits: &Traits, wallet: u64) -> Option<Self> {
        let (expected_profit, risk_level, time_required) = match kind {
            OpportunityKind::CreateArt if traits.creativity > 70 => {
                (f64::from(traits.creativity) * 2.0, 30, 60)
            }
            OpportunityKind::SocialService if traits.socialness > 60 => {
                (f64::from(traits.socialness) * 1.5, 20, 90)
            }
            OpportunityKind::Investment if traits.ambition > 80 && wallet > 200 => {
                (150.0, traits.risk_taking, 30)
            }
            OpportunityKind::SimpleTask => (25.0, 5, 45),
            _ => return None,
        };
        Some(Self {
            kind,
            action: kind.action_label(),
            expected_profit,
            risk_level,
            time_required,
        })
    }

    /// The always-available baseline task.
    pub fn simple_task() -> Self {
        Self {
            kind: OpportunityKind::SimpleTask,
            action: OpportunityKind::SimpleTask.action_label(),
            expected_profit: 25.0,
            risk_level: 5,
            time_required: 45,
        }
    }
}

// ---------------------------------------------------------------------------
// Pure helpers
// ---------------------------------------------------------------------------

/// Lazily enumerate the opportunities available to a being.
///
/// The iterator is finite and regenerated on every call.
pub fn opportunities_for(traits: Traits, wallet: u64) -> impl Iterator<Item = Opportunity> {
    OPPORTUNITY_ORDER
        .into_iter()
        .filter_map(move |kind| Opportunity::offered(kind, &traits, wallet))
}

/// Score an opportunity for a being.
///
/// `profit / time`, halved if the risk exceeds the being's risk tolerance
/// (otherwise ×1.2), then ×1.5 for ambitious beings eyeing profit above 100.
pub fn opportunity_score(opportunity: &Opportunity, traits: &Traits) -> f64 {
    let mut score = opportunity.expected_profit / f64::from(opportunity.time_required.max(1));

    if opportunity.risk_level > traits.risk_taking {
        score *= 0.5;
    } else {
        score *= 1.2;
    }

    if opportunity.expected_profit > 100.0 && traits.ambition > 70 {
        score *= 1.5;
    }
    score
}

/// Pick the highest-scoring opportunity. Ties keep the earliest candidate.
pub fn select_best_option(
    opportunities: impl IntoIterator<Item = Opportunity>,
    traits: &Traits,
) -> Option<Opportunity> {
    opportunities
        .into_iter()
        .map(|opportunity| (opportunity_score(&opportunity, traits), opportunity))
        .fold(None, |best: Option<(f64, Opportunity)>, candidate| match best {
            Some(current) if candidate.0 > current.0 => Some(candidate),
            Some(current) => Some(current),
            None => Some(candidate),
        })
        .map(|(_, opportunity)| opportunity)
}

/// Success rate in percent for an opportunity, clamped to `[30, 95]`.
pub fn success_rate(kind: OpportunityKind, traits: &Traits) -> f64 {
    let adjustment = match kind {
        OpportunityKind::CreateArt => (f64::from(traits.creativity) - 50.0) * 0.5,
        OpportunityKind::SocialService => (f64::from(traits.socialness) - 50.0) * 0.5,
        OpportunityKind::Investment => (f64::from(traits.risk_taking) - 50.0) * 0.3,
        OpportunityKind::SimpleTask => 0.0,
    };
    (BASE_SUCCESS_RATE + adjustment).clamp(MIN_SUCCESS_RATE, MAX_SUCCESS_RATE)
}

/// Apply the ±15% variance for a uniform draw in `[0, 1)`, rounding down.
pub fn realized_profit(expected: f64, draw: f64) -> u64 {
    let varied = expected * (draw - 0.5).mul_add(PROFIT_VARIANCE, 1.0);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let profit = varied.floor().max(0.0) as u64;
    profit
}

/// Share of successful memories, as a rounded percentage. Zero if empty.
pub fn success_percentage(memories: &[ActivityResult]) -> u32 {
    if memories.is_empty() {
        return 0;
    }
    let successes = memories.iter().filter(|m| m.success).count();
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    let rate = (successes as f64 / memories.len() as f64 * 100.0).round() as u32;
    rate
}

/// Economic summary of a being.
pub fn economic_status(agent: &Agent) -> EconomicStatus {
    let memories = agent.memories();
    let recent_earnings = memories
        .iter()
        .rev()
        .filter(|m| m.profit > 0)
        .take(RECENT_EARNINGS_WINDOW)
        .fold(0_u64, |sum, m| sum.saturating_add(m.profit));

    EconomicStatus {
        wallet: agent.wallet(),
        economic_style: agent.economic_style(),
        recent_earnings,
        total_activities: u32::try_from(memories.len()).unwrap_or(u32::MAX),
        success_rate: success_percentage(memories),
    }
}

// ---------------------------------------------------------------------------
// DecisionEngine
// ---------------------------------------------------------------------------

/// Mutable decision view over a single being.
#[derive(Debug)]
pub struct DecisionEngine<'a> {
    agent: &'a mut Agent,
}

impl<'a> DecisionEngine<'a> {
    /// Borrow `agent` for one round of decision making.
    pub const fn new(agent: &'a mut Agent) -> Self {
        Self { agent }
    }

    /// Opportunities currently available to the being.
    pub fn evaluate_opportunities(&self) -> impl Iterator<Item = Opportunity> + use<> {
        opportunities_for(*self.agent.traits(), self.agent.wallet())
    }

    /// Best of `opportunities` for this being.
    pub fn select_best_option(
        &self,
        opportunities: impl IntoIterator<Item = Opportunity>,
    ) -> Option<Opportunity> {
        select_best_option(opportunities, self.agent.traits())
    }

    /// Attempt `decision`, crediting the wallet on success.
    ///
    /// Consumes one draw for the success roll and, on success, one more for
    /// the profit variance. Always appends the result to memories.
    pub fn execute_decision(
        &mut self,
        decision: &Opportunity,
        rng: &mut dyn RandomSource,
    ) -> ActivityResult {
        let rate = success_rate(decision.kind, self.agent.traits());
        let success = rng.chance(rate / 100.0);
        let profit = if success {
            realized_profit(decision.expected_profit, rng.next_unit())
        } else {
            0
        };

        if profit > 0 {
            self.agent.credit(profit);
        }

        let result = ActivityResult {
            success,
            profit,
            experience: decision.action.to_owned(),
            timestamp: Utc::now(),
        };
        self.agent.remember(result.clone());

        debug!(
            agent = %self.agent.name(),
            action = decision.kind.tag(),
            success,
            profit,
            wallet = self.agent.wallet(),
            "Economic activity resolved"
        );
        result
    }

    /// Evaluate, select, and execute the best available opportunity.
    pub fn make_economic_decision(&mut self, rng: &mut dyn RandomSource) -> ActivityResult {
        let choice = self
            .select_best_option(self.evaluate_opportunities())
            .unwrap_or_else(Opportunity::simple_task);
        self.execute_decision(&choice, rng)
    }

    /// Economic summary of the borrowed being.
    pub fn economic_status(&self) -> EconomicStatus {
        economic_status(self.agent)
    }
}
