//! Type-safe identifier wrappers.
//!
//! Records created by this workspace (journeys, goals) use UUID v7
//! (time-ordered) so that documents sort by creation time in the external
//! store. Users are identified by the opaque uid issued by the
//! authentication provider, which is not a UUID.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for a completed journey record.
    JourneyId
}

define_id! {
    /// Unique identifier for a savings goal.
    GoalId
}

/// Identifier of a user as issued by the authentication provider.
///
/// Opaque string; the only operations are equality, ordering (for keyed
/// maps) and display.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    /// Wrap an auth-provider uid.
    pub fn new(uid: impl Into<String>) -> Self {
        Self(uid.into())
    }

    /// Borrow the raw uid.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for UserId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(uid: &str) -> Self {
        Self(String::from(uid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn journey_ids_are_unique() {
        let a = JourneyId::new();
        let b = JourneyId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn user_id_serializes_as_bare_string() {
        let id = UserId::new("uid-123");
        let json = serde_json::to_string(&id).unwrap_or_default();
        assert_eq!(json, "\"uid-123\"");
    }

    #[test]
    fn user_id_display_matches_uid() {
        assert_eq!(UserId::from("abc").to_string(), "abc");
    }
}
