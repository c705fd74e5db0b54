//! Error types for the progress tracker.

use greenerway_types::JourneyId;

/// Errors returned by the progress tracker and its stores.
#[derive(Debug, thiserror::Error)]
pub enum ProgressError {
    /// A journey or goal value is outside its documented range.
    #[error("invalid input `{field}`: {reason}")]
    InvalidInput {
        /// Name of the offending field.
        field: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// A counter would overflow.
    #[error("arithmetic overflow in {context}")]
    ArithmeticOverflow {
        /// The counter being updated.
        context: &'static str,
    },

    /// The stats or journey store failed.
    #[error("store error: {message}")]
    Store {
        /// Description from the store.
        message: String,
    },

    /// No journey with this id exists for the user.
    #[error("journey {0} not found")]
    JourneyNotFound(JourneyId),
}

impl ProgressError {
    /// Shorthand for a [`ProgressError::InvalidInput`].
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// Shorthand for a [`ProgressError::Store`].
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }
}
