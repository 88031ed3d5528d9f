//! Read-only mirror of the authority's state.
//!
//! A replica follows the authority's notification stream in strict
//! sequence order and re-derives feedback events from variable changes,
//! the way change callbacks would on a networked variable. It never
//! mutates simulation state of its own.
//!
//! ## Late join
//!
//! Subscribe to the replica's bus first, then call [`Replica::join`] with a
//! snapshot. The join installs the snapshot silently, then raises one
//! synthetic state and progress event per non-idle stove so observers do
//! not wait for the next natural transition.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::message::{CounterVar, Envelope, Notification};
use super::snapshot::Snapshot;
use crate::core::{ClientId, CounterId, HolderId, ItemId, PlayerId, Vec3};
use crate::counters::{timer_progress, CounterKind, StoveState};
use crate::error::KitchenError;
use crate::events::{FeedbackBus, FeedbackEvent};
use crate::items::ItemTypeId;

/// What a replica knows about one item.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MirrorItem {
    pub item_type: ItemTypeId,
    pub owner: Option<HolderId>,
    pub anchor: Vec3,
}

/// Mirrored stove variables.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StoveMirror {
    pub state: StoveState,
    pub fry_timer: f32,
    pub burn_timer: f32,
    pub fry_timer_max: f32,
    pub burn_timer_max: f32,
}

impl StoveMirror {
    /// Normalized progress of the running stage.
    #[must_use]
    pub fn progress(&self) -> f32 {
        match self.state {
            StoveState::Frying => timer_progress(self.fry_timer, self.fry_timer_max),
            StoveState::Burning => timer_progress(self.burn_timer, self.burn_timer_max),
            _ => 0.0,
        }
    }
}

/// Mirrored counter variables by kind.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum CounterMirror {
    Plain,
    /// `progress` is the last normalized value announced by the authority.
    Cutting { cuts: u32, progress: f32 },
    Stove(StoveMirror),
}

impl CounterMirror {
    fn for_kind(kind: CounterKind) -> Self {
        match kind {
            CounterKind::Clear => CounterMirror::Plain,
            CounterKind::Cutting => CounterMirror::Cutting {
                cuts: 0,
                progress: 0.0,
            },
            CounterKind::Stove => CounterMirror::Stove(StoveMirror::default()),
        }
    }

    /// Normalized progress as last observed.
    #[must_use]
    pub fn progress(&self) -> f32 {
        match self {
            CounterMirror::Plain => 0.0,
            CounterMirror::Cutting { progress, .. } => *progress,
            CounterMirror::Stove(stove) => stove.progress(),
        }
    }
}

/// A mirrored counter.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CounterView {
    pub kind: CounterKind,
    pub attach_point: Vec3,
    pub mirror: CounterMirror,
}

/// Persistent maps behind a replica. Cloning is cheap, so observers can
/// keep a view from an earlier frame around.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReplicaView {
    items: im::HashMap<ItemId, MirrorItem>,
    held: im::HashMap<HolderId, ItemId>,
    players: im::OrdMap<PlayerId, ClientId>,
    counters: im::OrdMap<CounterId, CounterView>,
}

impl ReplicaView {
    #[must_use]
    pub fn item(&self, item: ItemId) -> Option<&MirrorItem> {
        self.items.get(&item)
    }

    /// The item a holder shows, if any.
    #[must_use]
    pub fn held_item(&self, holder: HolderId) -> Option<ItemId> {
        self.held.get(&holder).copied()
    }

    #[must_use]
    pub fn item_owner(&self, item: ItemId) -> Option<HolderId> {
        self.items.get(&item).and_then(|i| i.owner)
    }

    #[must_use]
    pub fn counter(&self, counter: CounterId) -> Option<&CounterView> {
        self.counters.get(&counter)
    }

    #[must_use]
    pub fn stove_state(&self, counter: CounterId) -> Option<StoveState> {
        match self.counters.get(&counter)?.mirror {
            CounterMirror::Stove(stove) => Some(stove.state),
            _ => None,
        }
    }

    #[must_use]
    pub fn progress(&self, counter: CounterId) -> Option<f32> {
        self.counters.get(&counter).map(|c| c.mirror.progress())
    }

    #[must_use]
    pub fn client_of(&self, player: PlayerId) -> Option<ClientId> {
        self.players.get(&player).copied()
    }

    pub fn players(&self) -> impl Iterator<Item = (PlayerId, ClientId)> + '_ {
        self.players.iter().map(|(p, c)| (*p, *c))
    }

    pub fn items(&self) -> impl Iterator<Item = (ItemId, &MirrorItem)> + '_ {
        self.items.iter().map(|(id, item)| (*id, item))
    }

    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    fn counter_mut(&mut self, counter: CounterId) -> Result<&mut CounterView, KitchenError> {
        self.counters
            .get_mut(&counter)
            .ok_or(KitchenError::UnknownCounter(counter))
    }
}

type Derived = SmallVec<[FeedbackEvent; 4]>;

/// One observer's view of the kitchen.
#[derive(Debug, Default)]
pub struct Replica {
    view: ReplicaView,
    expected_seq: u64,
    bus: FeedbackBus,
}

impl Replica {
    /// A replica that has seen nothing yet. Expects sequence 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current mirrored state.
    #[must_use]
    pub fn view(&self) -> &ReplicaView {
        &self.view
    }

    /// Feedback subscribers for this observer.
    pub fn bus_mut(&mut self) -> &mut FeedbackBus {
        &mut self.bus
    }

    /// Sequence number this replica will accept next.
    #[must_use]
    pub fn expected_seq(&self) -> u64 {
        self.expected_seq
    }

    #[must_use]
    pub fn held_item(&self, holder: HolderId) -> Option<ItemId> {
        self.view.held_item(holder)
    }

    #[must_use]
    pub fn item_owner(&self, item: ItemId) -> Option<HolderId> {
        self.view.item_owner(item)
    }

    #[must_use]
    pub fn stove_state(&self, counter: CounterId) -> Option<StoveState> {
        self.view.stove_state(counter)
    }

    #[must_use]
    pub fn progress(&self, counter: CounterId) -> Option<f32> {
        self.view.progress(counter)
    }

    /// Install a snapshot and announce where long-running cooks stand.
    pub fn join(&mut self, snapshot: &Snapshot) {
        let mut view = ReplicaView::default();

        for record in &snapshot.counters {
            let mut counter = CounterView {
                kind: record.kind,
                attach_point: record.attach_point,
                mirror: CounterMirror::for_kind(record.kind),
            };
            for var in &record.vars {
                store_var(&mut counter.mirror, *var);
            }
            view.counters.insert(record.id, counter);
        }
        for player in &snapshot.players {
            view.players.insert(player.id, player.client);
        }
        for item in &snapshot.items {
            view.items.insert(
                item.id,
                MirrorItem {
                    item_type: item.item_type,
                    owner: item.owner,
                    anchor: item.anchor,
                },
            );
            if let Some(owner) = item.owner {
                view.held.insert(owner, item.id);
            }
        }

        self.view = view;
        self.expected_seq = snapshot.next_seq;
        tracing::debug!(next_seq = snapshot.next_seq, items = snapshot.items.len(), "replica joined");

        let mut synthetic = Vec::new();
        for (id, counter) in &self.view.counters {
            if let CounterMirror::Stove(stove) = counter.mirror {
                if stove.state != StoveState::Idle {
                    synthetic.push(FeedbackEvent::StateChanged {
                        counter: *id,
                        state: stove.state,
                    });
                    synthetic.push(FeedbackEvent::AnyStoveStateChanged { counter: *id });
                    synthetic.push(FeedbackEvent::ProgressChanged {
                        counter: *id,
                        progress: stove.progress(),
                    });
                }
            }
        }
        for event in synthetic {
            self.bus.publish(event);
        }
    }

    /// Apply the next envelope from the authority.
    ///
    /// Anything but the expected sequence number is refused and leaves the
    /// mirror untouched.
    pub fn apply(&mut self, envelope: &Envelope) -> Result<(), KitchenError> {
        if envelope.seq != self.expected_seq {
            tracing::warn!(expected = self.expected_seq, got = envelope.seq, "out-of-order notification");
            return Err(KitchenError::OutOfOrder {
                expected: self.expected_seq,
                got: envelope.seq,
            });
        }

        let derived = self.apply_body(&envelope.body)?;
        self.expected_seq += 1;

        for event in derived {
            self.bus.publish(event);
        }
        Ok(())
    }

    /// Decode and apply an encoded envelope.
    pub fn apply_bytes(&mut self, bytes: &[u8]) -> Result<(), KitchenError> {
        let envelope = Envelope::decode(bytes)?;
        self.apply(&envelope)
    }

    /// Drop every feedback subscriber. Call on scene transitions.
    pub fn reset_feedback(&mut self) {
        self.bus.reset();
    }

    fn apply_body(&mut self, body: &Notification) -> Result<Derived, KitchenError> {
        let mut derived = Derived::new();
        let view = &mut self.view;

        match *body {
            Notification::PlayerJoined { player, client } => {
                view.players.insert(player, client);
            }
            Notification::PlayerLeft { player } => {
                view.players.remove(&player);
                view.held.remove(&HolderId::Player(player));
            }
            Notification::ItemSpawned { item, item_type } => {
                view.items.insert(
                    item,
                    MirrorItem {
                        item_type,
                        owner: None,
                        anchor: Vec3::ZERO,
                    },
                );
            }
            Notification::ItemMoved {
                item,
                from,
                to,
                anchor,
            } => {
                let entry = view.items.get_mut(&item).ok_or(KitchenError::UnknownItem(item))?;
                entry.owner = Some(to);
                entry.anchor = anchor;
                if let Some(from) = from {
                    if view.held.get(&from) == Some(&item) {
                        view.held.remove(&from);
                    }
                }
                view.held.insert(to, item);
                if let HolderId::Counter(counter) = to {
                    derived.push(FeedbackEvent::ItemPlaced { counter });
                }
            }
            Notification::ItemDespawned { item } => {
                let removed = view.items.remove(&item).ok_or(KitchenError::UnknownItem(item))?;
                if let Some(owner) = removed.owner {
                    if view.held.get(&owner) == Some(&item) {
                        view.held.remove(&owner);
                    }
                }
            }
            Notification::CounterVar { counter, var } => {
                let view = view.counter_mut(counter)?;
                check_var_kind(counter, view.kind, var)?;
                store_var(&mut view.mirror, var);
                derive_var_events(counter, &view.mirror, var, &mut derived);
            }
            Notification::Cut { counter, progress } => {
                let view = view.counter_mut(counter)?;
                if let CounterMirror::Cutting { progress: shown, .. } = &mut view.mirror {
                    *shown = progress;
                }
                derived.push(FeedbackEvent::ProgressChanged { counter, progress });
                derived.push(FeedbackEvent::AnyCut { counter });
            }
            Notification::ProgressReset { counter } => {
                let view = view.counter_mut(counter)?;
                if let CounterMirror::Cutting { progress: shown, .. } = &mut view.mirror {
                    *shown = 0.0;
                }
                derived.push(FeedbackEvent::ProgressChanged {
                    counter,
                    progress: 0.0,
                });
            }
        }

        Ok(derived)
    }
}

fn check_var_kind(counter: CounterId, kind: CounterKind, var: CounterVar) -> Result<(), KitchenError> {
    let expected = match var {
        CounterVar::CutProgress(_) => CounterKind::Cutting,
        _ => CounterKind::Stove,
    };
    if kind == expected {
        Ok(())
    } else {
        Err(KitchenError::InvariantViolated(format!(
            "{var:?} sent to {counter} of kind {kind:?}"
        )))
    }
}

fn store_var(mirror: &mut CounterMirror, var: CounterVar) {
    match (mirror, var) {
        (CounterMirror::Cutting { cuts, .. }, CounterVar::CutProgress(v)) => *cuts = v,
        (CounterMirror::Stove(stove), var) => match var {
            CounterVar::StoveState(v) => stove.state = v,
            CounterVar::FryTimer(v) => stove.fry_timer = v,
            CounterVar::BurnTimer(v) => stove.burn_timer = v,
            CounterVar::FryTimerMax(v) => stove.fry_timer_max = v,
            CounterVar::BurnTimerMax(v) => stove.burn_timer_max = v,
            CounterVar::CutProgress(_) => {}
        },
        _ => {}
    }
}

/// Events a change callback would raise for `var`, given the mirror after
/// the change was stored.
fn derive_var_events(counter: CounterId, mirror: &CounterMirror, var: CounterVar, out: &mut Derived) {
    let CounterMirror::Stove(stove) = mirror else {
        return;
    };
    match var {
        CounterVar::StoveState(state) => {
            out.push(FeedbackEvent::StateChanged { counter, state });
            out.push(FeedbackEvent::AnyStoveStateChanged { counter });
            // A new stage starts its bar where its own timer stands.
            out.push(FeedbackEvent::ProgressChanged {
                counter,
                progress: stove.progress(),
            });
        }
        CounterVar::FryTimer(timer) => {
            if stove.state == StoveState::Frying && stove.fry_timer_max > 0.0 {
                out.push(FeedbackEvent::ProgressChanged {
                    counter,
                    progress: timer_progress(timer, stove.fry_timer_max),
                });
            }
        }
        CounterVar::BurnTimer(timer) => {
            if stove.state == StoveState::Burning && stove.burn_timer_max > 0.0 {
                out.push(FeedbackEvent::ProgressChanged {
                    counter,
                    progress: timer_progress(timer, stove.burn_timer_max),
                });
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{EventLog, Topic};
    use crate::net::snapshot::CounterRecord;

    const STOVE: CounterId = CounterId::new(0);

    fn stove_snapshot(vars: Vec<CounterVar>) -> Snapshot {
        Snapshot {
            next_seq: 10,
            counters: vec![CounterRecord {
                id: STOVE,
                kind: CounterKind::Stove,
                attach_point: Vec3::ZERO,
                vars,
            }],
            players: Vec::new(),
            items: Vec::new(),
        }
    }

    fn env(seq: u64, body: Notification) -> Envelope {
        Envelope { seq, body }
    }

    #[test]
    fn test_refuses_gaps_and_replays() {
        let mut replica = Replica::new();
        replica.join(&stove_snapshot(Vec::new()));

        let body = Notification::ProgressReset { counter: STOVE };
        let err = replica.apply(&env(11, body.clone())).unwrap_err();
        assert!(matches!(err, KitchenError::OutOfOrder { expected: 10, got: 11 }));

        replica.apply(&env(10, body.clone())).unwrap();
        assert!(replica.apply(&env(10, body)).is_err());
        assert_eq!(replica.expected_seq(), 11);
    }

    #[test]
    fn test_join_emits_synthetic_burning_events() {
        let mut replica = Replica::new();
        let log = EventLog::new();
        replica.bus_mut().subscribe(Topic::Any, log.recorder());

        replica.join(&stove_snapshot(vec![
            CounterVar::BurnTimerMax(8.0),
            CounterVar::BurnTimer(4.0),
            CounterVar::StoveState(StoveState::Burning),
        ]));

        assert_eq!(
            log.events(),
            vec![
                FeedbackEvent::StateChanged {
                    counter: STOVE,
                    state: StoveState::Burning
                },
                FeedbackEvent::AnyStoveStateChanged { counter: STOVE },
                FeedbackEvent::ProgressChanged {
                    counter: STOVE,
                    progress: 0.5
                },
            ]
        );
    }

    #[test]
    fn test_join_idle_stove_is_silent() {
        let mut replica = Replica::new();
        let log = EventLog::new();
        replica.bus_mut().subscribe(Topic::Any, log.recorder());

        replica.join(&stove_snapshot(Vec::new()));
        assert!(log.is_empty());
    }

    #[test]
    fn test_timer_events_only_in_matching_state() {
        let mut replica = Replica::new();
        let log = EventLog::new();
        replica.bus_mut().subscribe(Topic::Any, log.recorder());
        replica.join(&stove_snapshot(Vec::new()));

        let var = |seq, var| env(seq, Notification::CounterVar { counter: STOVE, var });
        replica.apply(&var(10, CounterVar::FryTimerMax(5.0))).unwrap();
        replica.apply(&var(11, CounterVar::FryTimer(1.0))).unwrap();
        assert!(log.take().is_empty());

        replica.apply(&var(12, CounterVar::StoveState(StoveState::Frying))).unwrap();
        replica.apply(&var(13, CounterVar::FryTimer(2.5))).unwrap();

        assert_eq!(
            log.take(),
            vec![
                FeedbackEvent::StateChanged {
                    counter: STOVE,
                    state: StoveState::Frying
                },
                FeedbackEvent::AnyStoveStateChanged { counter: STOVE },
                FeedbackEvent::ProgressChanged {
                    counter: STOVE,
                    progress: 0.2
                },
                FeedbackEvent::ProgressChanged {
                    counter: STOVE,
                    progress: 0.5
                },
            ]
        );
    }

    #[test]
    fn test_var_for_wrong_kind_is_rejected() {
        let mut replica = Replica::new();
        replica.join(&stove_snapshot(Vec::new()));

        let err = replica
            .apply(&env(
                10,
                Notification::CounterVar {
                    counter: STOVE,
                    var: CounterVar::CutProgress(1),
                },
            ))
            .unwrap_err();
        assert!(matches!(err, KitchenError::InvariantViolated(_)));
        assert_eq!(replica.expected_seq(), 10);
    }

    #[test]
    fn test_item_moves_are_mirrored() {
        let mut replica = Replica::new();
        let log = EventLog::new();
        replica.bus_mut().subscribe(Topic::Any, log.recorder());
        replica.join(&stove_snapshot(Vec::new()));

        let player = HolderId::Player(PlayerId(0));
        replica
            .apply(&env(10, Notification::ItemSpawned { item: ItemId(1), item_type: ItemTypeId(3) }))
            .unwrap();
        replica
            .apply(&env(
                11,
                Notification::ItemMoved {
                    item: ItemId(1),
                    from: None,
                    to: player,
                    anchor: Vec3::ZERO,
                },
            ))
            .unwrap();
        replica
            .apply(&env(
                12,
                Notification::ItemMoved {
                    item: ItemId(1),
                    from: Some(player),
                    to: HolderId::Counter(STOVE),
                    anchor: Vec3::ZERO,
                },
            ))
            .unwrap();

        assert_eq!(replica.held_item(player), None);
        assert_eq!(replica.held_item(HolderId::Counter(STOVE)), Some(ItemId(1)));
        assert_eq!(replica.item_owner(ItemId(1)), Some(HolderId::Counter(STOVE)));
        assert_eq!(log.events(), vec![FeedbackEvent::ItemPlaced { counter: STOVE }]);

        replica.apply(&env(13, Notification::ItemDespawned { item: ItemId(1) })).unwrap();
        assert_eq!(replica.held_item(HolderId::Counter(STOVE)), None);
        assert_eq!(replica.view().item_count(), 0);
    }

    #[test]
    fn test_view_is_a_cheap_snapshot() {
        let mut replica = Replica::new();
        replica.join(&stove_snapshot(Vec::new()));
        let before = replica.view().clone();

        replica
            .apply(&env(10, Notification::ItemSpawned { item: ItemId(1), item_type: ItemTypeId(3) }))
            .unwrap();

        assert_eq!(before.item_count(), 0);
        assert_eq!(replica.view().item_count(), 1);
    }
}
