//! Feedback events for visual and audio observers.
//!
//! ## Key Components
//!
//! - [`FeedbackEvent`]: progress, state, placement, cut and selection events
//! - [`FeedbackBus`]: subscriber table with topic filtering and `reset()`
//! - [`EventLog`]: a recorder handy for tests and debugging overlays
//!
//! Events are derived on each participant from the authority's
//! notifications (see [`crate::net::Replica`]) or raised locally by
//! interaction targeting. Nothing here can change simulation state.

mod bus;
mod event;

pub use bus::{EventLog, FeedbackBus, SubscriptionId, Topic};
pub use event::{FeedbackEvent, FeedbackKind};
