//! Replication primitives.
//!
//! ## Key Components
//!
//! - [`Role`]: authority or replica
//! - [`Replicated`]: authority-owned variable with an explicit publish step
//! - [`Request`]: replica → authority action, sender identity implicit
//! - [`Notification`] / [`Envelope`]: authority → all, sequence-numbered
//! - [`Outbox`]: ordered broadcast queue on the authority
//! - [`Snapshot`]: state handed to a late joiner
//! - [`Replica`]: read-only mirror that derives feedback events
//!
//! The kitchen is agnostic to the transport. Hosts move encoded
//! requests and envelopes however they like, as long as every replica
//! sees envelopes in `seq` order.

mod message;
mod outbox;
mod replica;
mod replicated;
mod role;
mod snapshot;

pub use message::{CounterVar, Envelope, Notification, Request};
pub use outbox::Outbox;
pub use replica::{CounterMirror, CounterView, MirrorItem, Replica, ReplicaView, StoveMirror};
pub use replicated::Replicated;
pub use role::Role;
pub use snapshot::{CounterRecord, ItemRecord, PlayerRecord, Snapshot};
