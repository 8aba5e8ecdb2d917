//! Goal completion and follow-up goal generation.
//!
//! Only [`Goal::EarnTokens`] goals are checked programmatically. Every
//! completion removes the goal once and may add one follow-up goal drawn
//! from the candidates the being currently qualifies for.

use hyperbeings_types::Goal;

use crate::random::RandomSource;

/// The parts of a being's state that goal checks read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalContext {
    /// Current wallet balance.
    pub wallet: u64,
    /// The being's ambition trait.
    pub ambition: u8,
    /// Current reputation.
    pub reputation: u8,
    /// Current experience level.
    pub experience_level: u32,
}

/// Follow-up goals the being qualifies for, in a fixed order.
pub fn follow_up_candidates(ctx: &GoalContext) -> Vec<Goal> {
    let mut candidates = Vec::with_capacity(3);
    if ctx.wallet > 500 && ctx.ambition > 60 {
        candidates.push(Goal::InvestInOthers);
    }
    if ctx.reputation > 80 {
        candidates.push(Goal::MentorNewcomers);
    }
    if ctx.experience_level > 10 {
        candidates.push(Goal::StartCollaborativeProject);
    }
    candidates
}

/// Remove every completed goal and append follow-ups.
///
/// Returns the number of goals completed by this call. Running it twice
/// against the same state completes nothing the second time. No random
/// draw happens when a completion has no qualifying follow-up.
pub fn check_goals(goals: &mut Vec<Goal>, ctx: &GoalContext, rng: &mut dyn RandomSource) -> u32 {
    let before = goals.len();
    goals.retain(|goal| !is_completed(goal, ctx));
    let completed = u32::try_from(before.saturating_sub(goals.len())).unwrap_or(u32::MAX);

    for _ in 0..completed {
        let candidates = follow_up_candidates(ctx);
        if candidates.is_empty() {
            break;
        }
        let pick = rng.index(candidates.len());
        if let Some(goal) = candidates.into_iter().nth(pick) {
            goals.push(goal);
        }
    }
    completed
}

const fn is_completed(goal: &Goal, ctx: &GoalContext) -> bool {
    match goal {
        Goal::EarnTokens { target } => ctx.wallet >= *target,
        _ => false,
    }
}
