//! Relationships and compatibility between beings.
//!
//! Each being keeps a [`SocialGraph`] of relationships keyed by the other
//! being's [`AgentId`]. Beings never hold references to each other: the
//! other party of an interaction is passed in as a [`Counterpart`], a small
//! by-value view carrying just the id, name, and traits.
//!
//! Compatibility is a symmetric score in `[0, 100]`:
//!
//! ```text
//! 50 + (50 - |Δsocialness|) / 2 + (50 - |Δempathy|) / 2
//!    + 10 if 30 < |Δcreativity| < 70
//! ```

use std::collections::BTreeMap;

use hyperbeings_types::{AgentId, Relationship, Traits};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Strength gained from a successful interaction.
pub const STRENGTH_GAIN: u32 = 5;

/// Strength lost from a failed interaction (floored at zero).
pub const STRENGTH_LOSS: u32 = 2;

/// Bonus for complementary (moderately different) creativity.
const CREATIVE_COMPLEMENT_BONUS: f64 = 10.0;

// ---------------------------------------------------------------------------
// Counterpart
// ---------------------------------------------------------------------------

/// By-value view of the other party in an interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Counterpart {
    /// The other being's id.
    pub id: AgentId,
    /// The other being's display name.
    pub name: String,
    /// The other being's traits.
    pub traits: Traits,
}

// ---------------------------------------------------------------------------
// Compatibility
// ---------------------------------------------------------------------------

/// Compute the symmetric compatibility score of two trait vectors.
pub fn compatibility(a: &Traits, b: &Traits) -> f64 {
    let social_gap = f64::from(a.socialness.abs_diff(b.socialness));
    let empathy_gap = f64::from(a.empathy.abs_diff(b.empathy));
    let creative_gap = a.creativity.abs_diff(b.creativity);

    let mut score = 50.0;
    score += (50.0 - social_gap) / 2.0;
    score += (50.0 - empathy_gap) / 2.0;
    if (31..70).contains(&creative_gap) {
        score += CREATIVE_COMPLEMENT_BONUS;
    }
    score.clamp(0.0, 100.0)
}

// ---------------------------------------------------------------------------
// SocialGraph
// ---------------------------------------------------------------------------

/// Per-being relationship table keyed by the other being's id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SocialGraph {
    relationships: BTreeMap<AgentId, Relationship>,
}

impl SocialGraph {
    /// Create an empty graph.
    pub const fn new() -> Self {
        Self {
            relationships: BTreeMap::new(),
        }
    }

    /// Look up the relationship with another being.
    pub fn get(&self, other: AgentId) -> Option<&Relationship> {
        self.relationships.get(&other)
    }

    /// Number of beings this being has a relationship with.
    pub fn len(&self) -> usize {
        self.relationships.len()
    }

    /// Whether this being has no relationships yet.
    pub fn is_empty(&self) -> bool {
        self.relationships.is_empty()
    }

    /// Iterate relationships in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&AgentId, &Relationship)> {
        self.relationships.iter()
    }

    /// Record one interaction with `other`, creating the relationship on
    /// first contact.
    ///
    /// Increments the interaction count, then adds [`STRENGTH_GAIN`] on
    /// success or removes [`STRENGTH_LOSS`] (saturating) on failure.
    pub fn record_interaction(&mut self, other: &Counterpart, success: bool) -> &Relationship {
        let relationship = self
            .relationships
            .entry(other.id)
            .or_insert_with(|| Relationship::new(other.name.clone()));

        relationship.interaction_count = relationship.interaction_count.saturating_add(1);
        relationship.strength = if success {
            relationship.strength.saturating_add(STRENGTH_GAIN)
        } else {
            relationship.strength.saturating_sub(STRENGTH_LOSS)
        };
        relationship
    }

    /// Bump the collaboration counter for an existing relationship.
    ///
    /// Returns `false` if there is no relationship with `other`.
    pub fn record_collaboration(&mut self, other: AgentId) -> bool {
        match self.relationships.get_mut(&other) {
            Some(relationship) => {
                relationship.collaboration_count =
                    relationship.collaboration_count.saturating_add(1);
                true
            }
            None => false,
        }
    }
}
