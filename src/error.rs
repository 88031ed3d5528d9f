//! Error and rejection types.
//!
//! Two kinds of "no" exist in the kitchen:
//!
//! - [`KitchenError`]: a contract was broken (a replica tried to mutate,
//!   an id does not exist, a notification arrived out of order). Returned
//!   through `Result` and propagated with `?`.
//! - [`Rejection`]: a well-formed request whose preconditions no longer
//!   hold. These are normal gameplay outcomes; the request is dropped and
//!   state is left untouched.

use crate::core::{ClientId, CounterId, HolderId, ItemId};

/// Errors surfaced by kitchen operations.
#[derive(Debug, thiserror::Error)]
pub enum KitchenError {
    #[error("{op} requires authority")]
    NotAuthority { op: &'static str },

    #[error("unknown item {0}")]
    UnknownItem(ItemId),

    #[error("unknown holder {0}")]
    UnknownHolder(HolderId),

    #[error("unknown counter {0}")]
    UnknownCounter(CounterId),

    #[error("unknown client {0}")]
    UnknownClient(ClientId),

    #[error("no free player slot")]
    KitchenFull,

    #[error("{holder} already holds {item}")]
    HolderOccupied { holder: HolderId, item: ItemId },

    #[error("out-of-order notification: expected seq {expected}, got {got}")]
    OutOfOrder { expected: u64, got: u64 },

    #[error("ownership invariant violated: {0}")]
    InvariantViolated(String),

    #[error("codec error: {0}")]
    Codec(#[from] bincode::Error),
}

impl KitchenError {
    /// True for errors caused by calling a mutating operation on a replica.
    #[must_use]
    pub fn is_authority_violation(&self) -> bool {
        matches!(self, KitchenError::NotAuthority { .. })
    }
}

/// Why a client request was dropped without effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("client has no player")]
    NoPlayerForClient,

    #[error("both or neither side holds an item")]
    NothingToTransfer,

    #[error("no recipe accepts this item")]
    NoRecipe,

    #[error("nothing to cut")]
    NothingToCut,

    #[error("counter does not support this action")]
    WrongCounterKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = KitchenError::NotAuthority { op: "spawn" };
        assert_eq!(err.to_string(), "spawn requires authority");
        assert!(err.is_authority_violation());

        let err = KitchenError::OutOfOrder { expected: 4, got: 6 };
        assert_eq!(err.to_string(), "out-of-order notification: expected seq 4, got 6");
        assert!(!err.is_authority_violation());

        let err = KitchenError::HolderOccupied {
            holder: HolderId::Counter(CounterId(1)),
            item: ItemId(3),
        };
        assert_eq!(err.to_string(), "Counter(1) already holds Item(3)");
    }

    #[test]
    fn test_rejection_messages() {
        assert_eq!(Rejection::NoRecipe.to_string(), "no recipe accepts this item");
        assert_eq!(Rejection::NoPlayerForClient.to_string(), "client has no player");
    }
}
