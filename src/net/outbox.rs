//! Ordered broadcast queue on the authority.

use super::message::{Envelope, Notification};

/// Notifications waiting to be broadcast, stamped in emission order.
///
/// The host drains the outbox once per tick and hands every envelope to
/// the transport, which must deliver them to each replica in `seq` order.
#[derive(Clone, Debug, Default)]
pub struct Outbox {
    next_seq: u64,
    pending: Vec<Envelope>,
}

impl Outbox {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp and queue a notification. Returns its sequence number.
    pub fn publish(&mut self, body: Notification) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        tracing::trace!(seq, ?body, "publish");
        self.pending.push(Envelope { seq, body });
        seq
    }

    /// Take every queued envelope.
    pub fn drain(&mut self) -> Vec<Envelope> {
        std::mem::take(&mut self.pending)
    }

    /// Envelopes not yet drained.
    #[must_use]
    pub fn pending(&self) -> &[Envelope] {
        &self.pending
    }

    /// Sequence number the next notification will get.
    #[must_use]
    pub fn next_seq(&self) -> u64 {
        self.next_seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CounterId;

    #[test]
    fn test_sequence_numbers_are_contiguous() {
        let mut outbox = Outbox::new();
        let a = outbox.publish(Notification::ProgressReset { counter: CounterId(0) });
        let b = outbox.publish(Notification::ProgressReset { counter: CounterId(1) });

        assert_eq!((a, b), (0, 1));
        assert_eq!(outbox.next_seq(), 2);

        let drained = outbox.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].seq, 0);
        assert_eq!(drained[1].seq, 1);
        assert!(outbox.pending().is_empty());

        let c = outbox.publish(Notification::ProgressReset { counter: CounterId(0) });
        assert_eq!(c, 2);
    }
}
