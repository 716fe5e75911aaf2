//! Errors raised by character generation and the manual builder.

use thiserror::Error;

use crate::reference::ReferenceDataError;

/// Request and builder validation failures.
///
/// Every variant except [`CharacterError::ReferenceData`] is an invalid
/// argument: the request is rejected before a character is produced.
#[derive(Debug, Error)]
pub enum CharacterError {
    #[error("level must be between {min} and {max} (got {level})")]
    LevelOutOfRange { level: i64, min: u8, max: u8 },
    #[error("unknown archetype '{0}'")]
    UnknownArchetype(String),
    #[error("unknown class '{0}'")]
    UnknownClass(String),
    #[error("unknown subclass '{0}'")]
    UnknownSubclass(String),
    #[error("subclass {subclass} does not belong to class {class}")]
    SubclassMismatch { class: String, subclass: String },
    #[error("unknown ancestry '{0}'")]
    UnknownAncestry(String),
    #[error("unknown community '{0}'")]
    UnknownCommunity(String),
    #[error("invalid trait allocation: {0}")]
    InvalidTraitAllocation(String),
    #[error("invalid domain card selection '{0}'")]
    InvalidDomainCard(String),
    #[error("exactly {expected} advancement choices required per level (got {got})")]
    AdvancementCount { expected: usize, got: usize },
    #[error("advancement '{0}' is not offered by the manual builder")]
    InvalidAdvancement(String),
    #[error("cannot level from {current} to {requested}; levels advance one step at a time")]
    LevelSequence { current: u8, requested: u8 },
    #[error(transparent)]
    ReferenceData(#[from] ReferenceDataError),
}

impl CharacterError {
    /// True for request-validation failures, false for dataset failures.
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        !matches!(self, Self::ReferenceData(_))
    }
}
