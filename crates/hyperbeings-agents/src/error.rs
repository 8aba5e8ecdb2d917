//! Error types for the hyperbeings-agents crate.
//!
//! Creation-time validation is the only place agent operations can fail:
//! once a being exists, every economic and social operation clamps its
//! arithmetic instead of erroring.

use hyperbeings_types::TraitKind;

/// Errors that can occur while creating or validating a being.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AgentError {
    /// The requested name was empty or whitespace.
    #[error("a being needs a non-empty name")]
    MissingName,

    /// A creation request arrived without any traits.
    #[error("traits are required to create a being")]
    MissingTraits,

    /// A supplied trait was outside `0..=100`.
    #[error("trait {kind} out of range: {value} (expected 0..=100)")]
    TraitOutOfRange {
        /// Which trait was invalid.
        kind: TraitKind,
        /// The rejected value.
        value: u8,
    },
}
