//! Participant roles.

use serde::{Deserialize, Serialize};

/// Whether this participant may mutate replicated state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// The single server. Owns all item and counter mutation.
    Authority,
    /// A client mirror. Sends requests, applies notifications.
    Replica,
}

impl Role {
    #[must_use]
    pub const fn is_authority(self) -> bool {
        matches!(self, Role::Authority)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Authority => write!(f, "authority"),
            Role::Replica => write!(f, "replica"),
        }
    }
}
