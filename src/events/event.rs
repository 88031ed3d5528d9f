//! Feedback events.
//!
//! These are what visual and audio layers listen to. They never feed back
//! into the simulation.

use serde::{Deserialize, Serialize};

use crate::core::CounterId;
use crate::counters::StoveState;

/// Something an observer may want to react to.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum FeedbackEvent {
    /// A counter's normalized progress changed. Always in `[0, 1]`.
    ProgressChanged { counter: CounterId, progress: f32 },

    /// A stove moved to a new state.
    StateChanged { counter: CounterId, state: StoveState },

    /// Global: some stove changed state (sizzle on/off).
    AnyStoveStateChanged { counter: CounterId },

    /// Global: a chop landed somewhere.
    AnyCut { counter: CounterId },

    /// An item was attached to a counter.
    ItemPlaced { counter: CounterId },

    /// The local player's selected counter changed.
    SelectionChanged { target: Option<CounterId> },
}

/// Discriminant of a [`FeedbackEvent`], used for subscription filtering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeedbackKind {
    ProgressChanged,
    StateChanged,
    AnyStoveStateChanged,
    AnyCut,
    ItemPlaced,
    SelectionChanged,
}

impl FeedbackEvent {
    /// The event's kind.
    #[must_use]
    pub const fn kind(&self) -> FeedbackKind {
        match self {
            FeedbackEvent::ProgressChanged { .. } => FeedbackKind::ProgressChanged,
            FeedbackEvent::StateChanged { .. } => FeedbackKind::StateChanged,
            FeedbackEvent::AnyStoveStateChanged { .. } => FeedbackKind::AnyStoveStateChanged,
            FeedbackEvent::AnyCut { .. } => FeedbackKind::AnyCut,
            FeedbackEvent::ItemPlaced { .. } => FeedbackKind::ItemPlaced,
            FeedbackEvent::SelectionChanged { .. } => FeedbackKind::SelectionChanged,
        }
    }

    /// The counter the event concerns. For a selection change this is the
    /// newly selected counter.
    #[must_use]
    pub const fn counter(&self) -> Option<CounterId> {
        match *self {
            FeedbackEvent::ProgressChanged { counter, .. }
            | FeedbackEvent::StateChanged { counter, .. }
            | FeedbackEvent::AnyStoveStateChanged { counter }
            | FeedbackEvent::AnyCut { counter }
            | FeedbackEvent::ItemPlaced { counter } => Some(counter),
            FeedbackEvent::SelectionChanged { target } => target,
        }
    }

    /// For a selection change, whether `counter` is now the highlighted one.
    /// `None` for every other event.
    #[must_use]
    pub fn selects(&self, counter: CounterId) -> Option<bool> {
        match *self {
            FeedbackEvent::SelectionChanged { target } => Some(target == Some(counter)),
            _ => None,
        }
    }
}
