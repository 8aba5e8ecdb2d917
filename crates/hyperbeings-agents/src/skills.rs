//! Skill levels: initial derivation from traits and growth through work.
//!
//! Skills are floats clamped to `[0, 100]`. A being starts with four skills
//! derived from its traits plus bounded noise:
//!
//! | skill           | source trait                        |
//! |-----------------|-------------------------------------|
//! | `creativity`    | creativity                          |
//! | `communication` | socialness                          |
//! | `analytics`     | ambition                            |
//! | `marketing`     | mean of socialness and creativity   |
//!
//! Successful activities nudge one skill by [`SKILL_NUDGE`], keyed on a
//! substring of the activity's experience label.

use std::collections::BTreeMap;

use hyperbeings_types::{Skill, Traits};

use crate::random::RandomSource;

/// Upper bound of every skill level.
pub const MAX_SKILL_LEVEL: f64 = 100.0;

/// Increment applied to a skill after a related success.
pub const SKILL_NUDGE: f64 = 2.0;

/// Clamp a skill level into `[0, 100]`.
pub const fn clamp_skill(level: f64) -> f64 {
    level.clamp(0.0, MAX_SKILL_LEVEL)
}

/// Derive the initial skill map from traits.
///
/// Each skill is `base + (u * 2 - 1) * noise` for one uniform draw `u`,
/// clamped to `[0, 100]`. Draw order: creativity, communication,
/// analytics, marketing.
pub fn initial_skills(
    traits: &Traits,
    noise: f64,
    rng: &mut dyn RandomSource,
) -> BTreeMap<Skill, f64> {
    let marketing_base = (f64::from(traits.socialness) + f64::from(traits.creativity)) / 2.0;
    let bases = [
        (Skill::Creativity, f64::from(traits.creativity)),
        (Skill::Communication, f64::from(traits.socialness)),
        (Skill::Analytics, f64::from(traits.ambition)),
        (Skill::Marketing, marketing_base),
    ];

    bases
        .into_iter()
        .map(|(skill, base)| {
            let jitter = rng.next_unit().mul_add(2.0, -1.0) * noise;
            (skill, clamp_skill(base + jitter))
        })
        .collect()
}

/// Nudge the skill related to a successful activity.
///
/// Labels containing `"art"` grow creativity; labels containing
/// `"social"` grow communication. A label can match both.
pub fn nudge_for_experience(skills: &mut BTreeMap<Skill, f64>, experience: &str) {
    if experience.contains("art") {
        bump(skills, Skill::Creativity);
    }
    if experience.contains("social") {
        bump(skills, Skill::Communication);
    }
}

fn bump(skills: &mut BTreeMap<Skill, f64>, skill: Skill) {
    let level = skills.entry(skill).or_insert(0.0);
    *level = clamp_skill(*level + SKILL_NUDGE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedRandom;

    fn traits(c: u8, s: u8, a: u8) -> Traits {
        Traits {
            creativity: c,
            socialness: s,
            risk_taking: 50,
            ambition: a,
            empathy: 50,
        }
    }

    fn level(skills: &BTreeMap<Skill, f64>, skill: Skill) -> f64 {
        skills.get(&skill).copied().unwrap_or(-1.0)
    }

    #[test]
    fn midpoint_draw_means_no_noise() {
        let mut rng = ScriptedRandom::constant(0.5);
        let skills = initial_skills(&traits(60, 40, 80), 10.0, &mut rng);
        assert_eq!(skills.len(), 4);
        assert!((level(&skills, Skill::Creativity) - 60.0).abs() < 1e-9);
        assert!((level(&skills, Skill::Communication) - 40.0).abs() < 1e-9);
        assert!((level(&skills, Skill::Analytics) - 80.0).abs() < 1e-9);
        assert!((level(&skills, Skill::Marketing) - 50.0).abs() < 1e-9);
        assert!(!skills.contains_key(&Skill::Leadership));
    }

    #[test]
    fn noise_is_bounded_and_clamped() {
        let mut rng = ScriptedRandom::new([0.0, 0.999_999, 0.0, 0.999_999]);
        let skills = initial_skills(&traits(5, 95, 0), 10.0, &mut rng);
        assert!(level(&skills, Skill::Creativity).abs() < 1e-9);
        assert!((level(&skills, Skill::Communication) - 100.0).abs() < 1e-9);
        assert!(level(&skills, Skill::Analytics).abs() < 1e-9);
        assert!(level(&skills, Skill::Marketing) <= 60.0);
    }

    #[test]
    fn art_and_social_labels_nudge_matching_skills() {
        let mut skills = BTreeMap::from([
            (Skill::Creativity, 50.0),
            (Skill::Communication, 99.5),
        ]);
        nudge_for_experience(&mut skills, "Create and sell digital art");
        nudge_for_experience(&mut skills, "Provide social media management");
        assert!((level(&skills, Skill::Creativity) - 52.0).abs() < 1e-9);
        assert!((level(&skills, Skill::Communication) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn unrelated_label_changes_nothing() {
        let mut skills = BTreeMap::from([(Skill::Creativity, 10.0)]);
        nudge_for_experience(&mut skills, "Complete data entry work");
        assert_eq!(skills.len(), 1);
        assert!((level(&skills, Skill::Creativity) - 10.0).abs() < 1e-9);
    }
}
