//! Error types for the emission advisor.
//!
//! The advisor performs no I/O. The only failure is input outside the
//! documented domain, which is rejected rather than silently clamped so
//! that upstream bugs surface.

/// Errors returned by validating advisor entry points.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AdvisorError {
    /// An input value is outside its documented range.
    #[error("invalid input `{field}`: {reason}")]
    InvalidInput {
        /// Name of the offending field.
        field: &'static str,
        /// What was wrong with it.
        reason: String,
    },
}

impl AdvisorError {
    /// Shorthand for an [`AdvisorError::InvalidInput`].
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}
