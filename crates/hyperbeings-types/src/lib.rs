//! Shared type definitions for the HyperBeings society simulation.
//!
//! This crate is the single source of truth for the data exchanged between
//! the simulation crates and the dashboard. Types flow downstream to
//! `TypeScript` via `ts-rs`.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for beings, projects, and interactions
//! - [`enums`] -- Closed enumerations (traits, styles, opportunity and interaction tags)
//! - [`structs`] -- Core records (traits, memories, relationships, projects, stats)
//! - [`projections`] -- Read-only snapshots rendered by the dashboard

pub mod enums;
pub mod ids;
pub mod projections;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{
    EconomicStyle, InteractionKind, OpportunityKind, ProjectKind, ProjectStatus,
    RecommendationFocus, Skill, TraitKind,
};
pub use ids::{AgentId, InteractionId, ProjectId};
pub use projections::{AgentStatus, EconomicStatus, LifeSummary, RankedAgent, SocietyOverview};
pub use structs::{
    ActivityResult, CollaborativeProject, Goal, InteractionRecord, MintReceipt, Relationship,
    SCALE_MAX, SocietyStats, SpawnRequest, TraitOverrides, TraitRecommendation, Traits,
};

#[cfg(test)]
mod tests {
    //! Integration tests for type exports and `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        // ts-rs generates TypeScript bindings when types with
        // #[ts(export)] are used. The files are written to the `bindings/`
        // directory relative to the crate root.
        use ts_rs::TS;

        // IDs
        let _ = crate::ids::AgentId::export_all();
        let _ = crate::ids::ProjectId::export_all();
        let _ = crate::ids::InteractionId::export_all();

        // Enums
        let _ = crate::enums::TraitKind::export_all();
        let _ = crate::enums::EconomicStyle::export_all();
        let _ = crate::enums::OpportunityKind::export_all();
        let _ = crate::enums::InteractionKind::export_all();
        let _ = crate::enums::Skill::export_all();
        let _ = crate::enums::ProjectKind::export_all();
        let _ = crate::enums::ProjectStatus::export_all();
        let _ = crate::enums::RecommendationFocus::export_all();

        // Structs
        let _ = crate::structs::Traits::export_all();
        let _ = crate::structs::TraitOverrides::export_all();
        let _ = crate::structs::TraitRecommendation::export_all();
        let _ = crate::structs::Goal::export_all();
        let _ = crate::structs::ActivityResult::export_all();
        let _ = crate::structs::Relationship::export_all();
        let _ = crate::structs::CollaborativeProject::export_all();
        let _ = crate::structs::InteractionRecord::export_all();
        let _ = crate::structs::SocietyStats::export_all();
        let _ = crate::structs::SpawnRequest::export_all();
        let _ = crate::structs::MintReceipt::export_all();

        // Projections
        let _ = crate::projections::EconomicStatus::export_all();
        let _ = crate::projections::AgentStatus::export_all();
        let _ = crate::projections::LifeSummary::export_all();
        let _ = crate::projections::RankedAgent::export_all();
        let _ = crate::projections::SocietyOverview::export_all();
    }
}
