//! Observer registration table.
//!
//! The bus stores subscriptions and delivers each published event to every
//! subscription whose topic matches, in subscription order. Scene changes
//! call [`FeedbackBus::reset`] to drop every subscriber at once.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::event::{FeedbackEvent, FeedbackKind};
use crate::core::CounterId;

/// Handle returned by [`FeedbackBus::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(pub u32);

impl SubscriptionId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Subscription({})", self.0)
    }
}

/// Which events a subscription receives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Topic {
    /// Everything.
    Any,
    /// Every event of one kind, from any counter.
    Kind(FeedbackKind),
    /// Every event concerning one counter.
    Counter(CounterId),
}

impl Topic {
    /// Check whether an event falls under this topic.
    #[must_use]
    pub fn matches(&self, event: &FeedbackEvent) -> bool {
        match self {
            Topic::Any => true,
            Topic::Kind(kind) => event.kind() == *kind,
            Topic::Counter(counter) => event.counter() == Some(*counter),
        }
    }
}

type Callback = Box<dyn FnMut(&FeedbackEvent)>;

struct Subscription {
    id: SubscriptionId,
    topic: Topic,
    callback: Callback,
}

/// Process-wide feedback event table.
#[derive(Default)]
pub struct FeedbackBus {
    subscriptions: Vec<Subscription>,
    next_id: u32,
}

impl FeedbackBus {
    /// Create an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for a topic.
    pub fn subscribe(
        &mut self,
        topic: Topic,
        callback: impl FnMut(&FeedbackEvent) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription {
            id,
            topic,
            callback: Box::new(callback),
        });
        id
    }

    /// Remove a subscription. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }

    /// Deliver an event to every matching subscriber.
    pub fn publish(&mut self, event: FeedbackEvent) {
        for sub in &mut self.subscriptions {
            if sub.topic.matches(&event) {
                (sub.callback)(&event);
            }
        }
    }

    /// Drop every subscriber. Call on scene transitions.
    pub fn reset(&mut self) {
        tracing::debug!(dropped = self.subscriptions.len(), "feedback bus reset");
        self.subscriptions.clear();
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}

impl std::fmt::Debug for FeedbackBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedbackBus")
            .field("subscriptions", &self.subscriptions.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

/// Shared recorder of delivered events.
///
/// ```
/// use coop_kitchen::core::CounterId;
/// use coop_kitchen::events::{EventLog, FeedbackBus, FeedbackEvent, Topic};
///
/// let mut bus = FeedbackBus::new();
/// let log = EventLog::new();
/// bus.subscribe(Topic::Any, log.recorder());
///
/// bus.publish(FeedbackEvent::AnyCut { counter: CounterId::new(0) });
/// assert_eq!(log.len(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<FeedbackEvent>>>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A callback that appends to this log.
    pub fn recorder(&self) -> impl FnMut(&FeedbackEvent) + 'static {
        let events = Rc::clone(&self.events);
        move |event| events.borrow_mut().push(*event)
    }

    /// Copy of everything recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<FeedbackEvent> {
        self.events.borrow().clone()
    }

    /// Take everything recorded so far, leaving the log empty.
    pub fn take(&self) -> Vec<FeedbackEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cut(counter: u16) -> FeedbackEvent {
        FeedbackEvent::AnyCut {
            counter: CounterId(counter),
        }
    }

    #[test]
    fn test_topic_filtering() {
        let mut bus = FeedbackBus::new();
        let all = EventLog::new();
        let cuts = EventLog::new();
        let counter_one = EventLog::new();

        bus.subscribe(Topic::Any, all.recorder());
        bus.subscribe(Topic::Kind(FeedbackKind::AnyCut), cuts.recorder());
        bus.subscribe(Topic::Counter(CounterId(1)), counter_one.recorder());

        bus.publish(cut(0));
        bus.publish(cut(1));
        bus.publish(FeedbackEvent::ItemPlaced {
            counter: CounterId(1),
        });

        assert_eq!(all.len(), 3);
        assert_eq!(cuts.len(), 2);
        assert_eq!(counter_one.len(), 2);
    }

    #[test]
    fn test_unsubscribe() {
        let mut bus = FeedbackBus::new();
        let log = EventLog::new();
        let id = bus.subscribe(Topic::Any, log.recorder());

        bus.publish(cut(0));
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.publish(cut(0));

        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_reset_drops_all_subscribers() {
        let mut bus = FeedbackBus::new();
        let log = EventLog::new();
        bus.subscribe(Topic::Any, log.recorder());
        bus.subscribe(Topic::Kind(FeedbackKind::AnyCut), log.recorder());
        assert_eq!(bus.len(), 2);

        bus.reset();
        bus.publish(cut(0));

        assert!(bus.is_empty());
        assert!(log.is_empty());
    }

    #[test]
    fn test_delivery_in_subscription_order() {
        let mut bus = FeedbackBus::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        for tag in 0..3 {
            let order = Rc::clone(&order);
            bus.subscribe(Topic::Any, move |_| order.borrow_mut().push(tag));
        }
        bus.publish(cut(0));

        assert_eq!(*order.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn test_log_take() {
        let mut bus = FeedbackBus::new();
        let log = EventLog::new();
        bus.subscribe(Topic::Any, log.recorder());
        bus.publish(cut(0));

        assert_eq!(log.take(), vec![cut(0)]);
        assert!(log.is_empty());
    }
}
