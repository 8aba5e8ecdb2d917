//! Enumeration types for the HyperBeings society simulation.
//!
//! Every categorical value that the dashboard exchanges as a bare
//! string (economic styles, opportunity tags, interaction tags, project
//! categories) is a closed enum here. The `label` methods return the exact
//! strings the dashboard renders.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// One dimension of the five-trait personality vector.
///
/// The declaration order is significant: it is the iteration order used when
/// picking a dominant trait, so ties resolve to the earlier variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum TraitKind {
    /// Drive to make art and novel things.
    Creativity,
    /// Appetite for company and conversation.
    Socialness,
    /// Tolerance for uncertain outcomes.
    RiskTaking,
    /// Drive toward wealth and status.
    Ambition,
    /// Sensitivity to the feelings of others.
    Empathy,
}

impl TraitKind {
    /// All trait kinds in canonical order.
    pub const ALL: [Self; 5] = [
        Self::Creativity,
        Self::Socialness,
        Self::RiskTaking,
        Self::Ambition,
        Self::Empathy,
    ];

    /// Dashboard label for this trait.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Creativity => "creativity",
            Self::Socialness => "socialness",
            Self::RiskTaking => "risk_taking",
            Self::Ambition => "ambition",
            Self::Empathy => "empathy",
        }
    }
}

impl core::fmt::Display for TraitKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Economic style
// ---------------------------------------------------------------------------

/// Categorical economic temperament, derived once from traits at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum EconomicStyle {
    /// High risk-taking combined with ambition.
    Entrepreneur,
    /// Very high creativity.
    Creator,
    /// Low risk-taking.
    Saver,
    /// Very high socialness.
    Collaborator,
    /// None of the above.
    Balanced,
}

impl EconomicStyle {
    /// Dashboard label for this style.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Entrepreneur => "entrepreneur",
            Self::Creator => "creator",
            Self::Saver => "saver",
            Self::Collaborator => "collaborator",
            Self::Balanced => "balanced",
        }
    }
}

impl core::fmt::Display for EconomicStyle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Opportunities
// ---------------------------------------------------------------------------

/// Type tag of an economic opportunity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum OpportunityKind {
    /// Create and sell digital art.
    CreateArt,
    /// Provide social media management.
    SocialService,
    /// Invest in other beings' projects.
    Investment,
    /// Always-available baseline work.
    SimpleTask,
}

impl OpportunityKind {
    /// Wire tag for this opportunity type.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::CreateArt => "create_art",
            Self::SocialService => "social_service",
            Self::Investment => "investment",
            Self::SimpleTask => "simple_task",
        }
    }

    /// Human-readable action label, recorded as the memory's experience.
    pub const fn action_label(self) -> &'static str {
        match self {
            Self::CreateArt => "Create and sell digital art",
            Self::SocialService => "Provide social media management",
            Self::Investment => "Invest in other AI beings' projects",
            Self::SimpleTask => "Complete data entry work",
        }
    }
}

// ---------------------------------------------------------------------------
// Interactions
// ---------------------------------------------------------------------------

/// Type tag of a pairwise interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum InteractionKind {
    /// First meeting when a being joins the society.
    Introduction,
    /// Casual social contact; the only kind that can spawn a collaboration.
    Social,
    /// Business discussion.
    Business,
    /// Joint creative exploration.
    Creative,
    /// One being helping another.
    Helping,
}

impl InteractionKind {
    /// Kinds drawn for the random interactions of a simulation step.
    pub const RANDOM_POOL: [Self; 4] =
        [Self::Social, Self::Business, Self::Creative, Self::Helping];

    /// Wire tag for this interaction kind.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Introduction => "introduction",
            Self::Social => "social",
            Self::Business => "business",
            Self::Creative => "creative",
            Self::Helping => "helping",
        }
    }
}

impl core::fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.tag())
    }
}

// ---------------------------------------------------------------------------
// Skills
// ---------------------------------------------------------------------------

/// A named skill. Skill levels are floats in `[0, 100]`.
///
/// `Leadership` never appears in a being's initial skill map; it only shows
/// up as a required skill on collaborative projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Skill {
    /// Artistic production, seeded from creativity.
    Creativity,
    /// Talking to people, seeded from socialness.
    Communication,
    /// Numbers and planning, seeded from ambition.
    Analytics,
    /// Selling, seeded from socialness and creativity.
    Marketing,
    /// Leading a joint venture.
    Leadership,
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

/// Category (and display name) of a collaborative project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ProjectKind {
    /// Digital Art Gallery.
    DigitalArtGallery,
    /// AI Music Band.
    AiMusicBand,
    /// Virtual Business Venture.
    VirtualBusinessVenture,
    /// Knowledge Sharing Platform.
    KnowledgeSharingPlatform,
    /// Creative Writing Collaboration.
    CreativeWritingCollaboration,
    /// Investment Partnership.
    InvestmentPartnership,
}

impl ProjectKind {
    /// The fixed category list projects are drawn from.
    pub const ALL: [Self; 6] = [
        Self::DigitalArtGallery,
        Self::AiMusicBand,
        Self::VirtualBusinessVenture,
        Self::KnowledgeSharingPlatform,
        Self::CreativeWritingCollaboration,
        Self::InvestmentPartnership,
    ];

    /// Display name of the project.
    pub const fn label(self) -> &'static str {
        match self {
            Self::DigitalArtGallery => "Digital Art Gallery",
            Self::AiMusicBand => "AI Music Band",
            Self::VirtualBusinessVenture => "Virtual Business Venture",
            Self::KnowledgeSharingPlatform => "Knowledge Sharing Platform",
            Self::CreativeWritingCollaboration => "Creative Writing Collaboration",
            Self::InvestmentPartnership => "Investment Partnership",
        }
    }
}

impl core::fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Lifecycle status of a collaborative project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ProjectStatus {
    /// Still running; not yet rewarded.
    Active,
    /// Finished and rewarded. Terminal.
    Completed,
}

// ---------------------------------------------------------------------------
// Assistant recommendations
// ---------------------------------------------------------------------------

/// Focus of a trait recommendation produced by the assistant collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum RecommendationFocus {
    /// Art-oriented being.
    Creative,
    /// Business-oriented being.
    Entrepreneur,
    /// Relationship-oriented being.
    Social,
    /// No particular emphasis.
    Balanced,
}
