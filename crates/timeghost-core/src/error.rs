//! Error types for the `timeghost-core` crate.

use crate::ghost::Timeghost;

/// Errors raised while building or rendering a single [`Timeghost`].
#[derive(Debug, thiserror::Error)]
pub enum GhostError {
    /// The triple is out of order, or the middle is not closer to the first.
    ///
    /// Carries the rejected triple so callers can report it.
    #[error("invalid timeghost: {0}")]
    Invalid(Box<Timeghost>),

    /// No decimal precision up to the cap renders the two gaps differently.
    ///
    /// Only happens for triples whose gaps are equal or nearly so, which
    /// never pass validation.
    #[error("gaps are indistinguishable at {max_precision} decimal places")]
    PrecisionDegenerate {
        /// The highest precision that was tried.
        max_precision: usize,
    },
}

impl GhostError {
    /// Recover the rejected triple from an [`GhostError::Invalid`] error.
    pub fn into_candidate(self) -> Option<Box<Timeghost>> {
        match self {
            Self::Invalid(ghost) => Some(ghost),
            Self::PrecisionDegenerate { .. } => None,
        }
    }
}

/// Errors returned by a [`Selector`](crate::selector::Selector) run.
#[derive(Debug, thiserror::Error)]
pub enum SelectError {
    /// The pool was empty and no middle event was pinned.
    #[error("event pool is empty")]
    EmptyPool,

    /// No earlier (or later) event exists for the middle event.
    #[error("no candidate event available around {middle}")]
    NoCandidateFound {
        /// Description of the middle event that had no partner.
        middle: String,
    },

    /// Every attempt was spent without producing a valid triple.
    #[error("no valid timeghost found after {attempts} attempt(s)")]
    SearchExhausted {
        /// Number of attempts made.
        attempts: u32,
        /// The last rejected triple, if any triple was built at all.
        last_candidate: Option<Box<Timeghost>>,
    },
}
