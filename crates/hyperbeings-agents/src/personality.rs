//! Trait seeding and everything derived from traits once at creation.
//!
//! - [`resolve_traits`] fills missing overrides with random values
//! - [`economic_style`] applies the first-match style cascade
//! - [`initial_goals`] derives the starting goal list
//! - [`recommend_traits`] proposes a trait vector for a desired focus

use hyperbeings_types::{
    EconomicStyle, Goal, RecommendationFocus, SCALE_MAX, TraitKind, TraitOverrides,
    TraitRecommendation, Traits,
};

use crate::error::AgentError;
use crate::random::RandomSource;

/// Wallet target of the "earn tokens" goal handed to ambitious beings.
pub const EARN_GOAL_TARGET: u64 = 1000;

/// Friend count of the "make friends" goal handed to social beings.
pub const FRIEND_GOAL_COUNT: u32 = 5;

/// Exclusive upper bound for randomized trait values.
const RANDOM_TRAIT_BOUND: u32 = 100;

/// Build a full trait vector from partial overrides.
///
/// Supplied values pass through untouched (zero included). Missing values
/// are drawn uniformly from `0..100`, one draw per missing trait, in
/// [`TraitKind::ALL`] order.
///
/// # Errors
///
/// Returns [`AgentError::TraitOutOfRange`] if any supplied value exceeds
/// 100. Validation happens before any random draw.
pub fn resolve_traits(
    overrides: &TraitOverrides,
    rng: &mut dyn RandomSource,
) -> Result<Traits, AgentError> {
    validate_overrides(overrides)?;

    let mut pick = |kind: TraitKind| -> u8 {
        overrides.get(kind).unwrap_or_else(|| {
            u8::try_from(rng.below(RANDOM_TRAIT_BOUND)).unwrap_or(SCALE_MAX)
        })
    };

    Ok(Traits {
        creativity: pick(TraitKind::Creativity),
        socialness: pick(TraitKind::Socialness),
        risk_taking: pick(TraitKind::RiskTaking),
        ambition: pick(TraitKind::Ambition),
        empathy: pick(TraitKind::Empathy),
    })
}

/// Reject overrides outside `0..=100`.
///
/// # Errors
///
/// Returns [`AgentError::TraitOutOfRange`] naming the first offending trait.
pub fn validate_overrides(overrides: &TraitOverrides) -> Result<(), AgentError> {
    for kind in TraitKind::ALL {
        if let Some(value) = overrides.get(kind) {
            if value > SCALE_MAX {
                return Err(AgentError::TraitOutOfRange { kind, value });
            }
        }
    }
    Ok(())
}

/// Derive the economic style. The first matching rule wins.
pub const fn economic_style(traits: &Traits) -> EconomicStyle {
    if traits.risk_taking > 70 && traits.ambition > 60 {
        EconomicStyle::Entrepreneur
    } else if traits.creativity > 80 {
        EconomicStyle::Creator
    } else if traits.risk_taking < 30 {
        EconomicStyle::Saver
    } else if traits.socialness > 75 {
        EconomicStyle::Collaborator
    } else {
        EconomicStyle::Balanced
    }
}

/// Derive the starting goals. Always returns at least one goal.
pub fn initial_goals(traits: &Traits) -> Vec<Goal> {
    let mut goals = Vec::new();

    if traits.ambition > 50 {
        goals.push(Goal::EarnTokens {
            target: EARN_GOAL_TARGET,
        });
    }
    if traits.socialness > 60 {
        goals.push(Goal::MakeFriends {
            count: FRIEND_GOAL_COUNT,
        });
    }
    if traits.creativity > 70 {
        goals.push(Goal::SellDigitalArt);
    }
    if traits.risk_taking > 80 {
        goals.push(Goal::StartBusinessVenture);
    }

    if goals.is_empty() {
        goals.push(Goal::ExploreDigitalWorld);
    }
    goals
}

/// `(floor, span)` per trait in [`TraitKind::ALL`] order. A recommended
/// value is `floor + below(span)`.
const fn recommendation_bands(focus: RecommendationFocus) -> [(u8, u32); 5] {
    match focus {
        RecommendationFocus::Creative => [(90, 10), (70, 20), (60, 20), (80, 15), (75, 20)],
        RecommendationFocus::Entrepreneur => [(70, 20), (80, 15), (85, 15), (95, 5), (60, 25)],
        RecommendationFocus::Social => [(60, 25), (95, 5), (40, 30), (70, 20), (90, 10)],
        RecommendationFocus::Balanced => [(70, 20), (70, 20), (50, 30), (75, 20), (70, 20)],
    }
}

/// Propose a trait vector suited to `focus`.
///
/// Draws once per trait in [`TraitKind::ALL`] order. Every value stays
/// below 100.
pub fn recommend_traits(
    focus: RecommendationFocus,
    rng: &mut dyn RandomSource,
) -> TraitRecommendation {
    let mut values = recommendation_bands(focus).into_iter().map(|(floor, span)| {
        let jitter = u8::try_from(rng.below(span)).unwrap_or(0);
        floor.saturating_add(jitter).min(SCALE_MAX)
    });
    let mut next = || values.next().unwrap_or(0);

    let traits = Traits {
        creativity: next(),
        socialness: next(),
        risk_taking: next(),
        ambition: next(),
        empathy: next(),
    };
    TraitRecommendation { focus, traits }
}
