//! Replication integration tests.
//!
//! Replicas follow the authority through an ordered notification stream
//! and late joiners start from a snapshot. These tests check ordering,
//! late-join feedback, and that the mirror ends up where the authority is.

use coop_kitchen::core::{ClientId, HolderId, KitchenConfig, PlayerId};
use coop_kitchen::counters::StoveState;
use coop_kitchen::error::KitchenError;
use coop_kitchen::events::{EventLog, FeedbackEvent, Topic};
use coop_kitchen::kitchen::Kitchen;
use coop_kitchen::net::{CounterVar, Envelope, Notification, Replica, Request, Snapshot};
use coop_kitchen::sim::{food, KitchenScenario};

const HOST: ClientId = ClientId::new(0);
const GUEST: ClientId = ClientId::new(7);

fn host() -> KitchenScenario {
    let mut scenario = KitchenScenario::standard(KitchenConfig::default());
    scenario.kitchen.join(HOST).unwrap();
    scenario
}

fn joined(kitchen: &mut Kitchen) -> (Replica, EventLog) {
    let mut replica = Replica::new();
    let log = EventLog::new();
    replica.bus_mut().subscribe(Topic::Any, log.recorder());
    replica.join(&kitchen.snapshot());
    kitchen.drain_outbox();
    (replica, log)
}

fn forward(kitchen: &mut Kitchen, replicas: &mut [&mut Replica]) {
    let envelopes = kitchen.drain_outbox();
    for replica in replicas.iter_mut() {
        for envelope in &envelopes {
            replica.apply(envelope).unwrap();
        }
    }
}

// =============================================================================
// Late join
// =============================================================================

#[test]
fn test_late_join_reports_running_cook() {
    let mut scenario = host();
    let stove = scenario.stove;
    let kitchen = &mut scenario.kitchen;

    kitchen
        .spawn(food::PATTY_COOKED, HolderId::Player(PlayerId::new(0)))
        .unwrap();
    kitchen.receive(HOST, Request::Interact { counter: stove }).unwrap();
    for _ in 0..4 {
        kitchen.tick(1.0).unwrap();
    }
    assert_eq!(kitchen.stove_state(stove), Some(StoveState::Burning));

    let (replica, log) = joined(kitchen);

    assert_eq!(
        log.events(),
        vec![
            FeedbackEvent::StateChanged {
                counter: stove,
                state: StoveState::Burning,
            },
            FeedbackEvent::AnyStoveStateChanged { counter: stove },
            FeedbackEvent::ProgressChanged {
                counter: stove,
                progress: 0.5,
            },
        ]
    );
    assert_eq!(replica.stove_state(stove), Some(StoveState::Burning));
    assert_eq!(
        replica.held_item(HolderId::Counter(stove)),
        kitchen.held_item(HolderId::Counter(stove))
    );
}

#[test]
fn test_late_join_idle_kitchen_is_silent() {
    let mut scenario = host();
    let (replica, log) = joined(&mut scenario.kitchen);

    assert!(log.is_empty());
    assert_eq!(replica.view().players().count(), 1);
    assert_eq!(replica.view().item_count(), 0);
}

#[test]
fn test_late_joiner_follows_live_stream() {
    let mut scenario = host();
    let stove = scenario.stove;
    let kitchen = &mut scenario.kitchen;

    kitchen
        .spawn(food::PATTY_RAW, HolderId::Player(PlayerId::new(0)))
        .unwrap();
    kitchen.receive(HOST, Request::Interact { counter: stove }).unwrap();
    kitchen.tick(1.0).unwrap();

    let (mut replica, log) = joined(kitchen);
    log.take();

    kitchen.tick(1.0).unwrap();
    forward(kitchen, &mut [&mut replica]);

    assert_eq!(
        log.events(),
        vec![FeedbackEvent::ProgressChanged {
            counter: stove,
            progress: 0.4,
        }]
    );
    assert_eq!(replica.progress(stove), kitchen.progress(stove));
}

#[test]
fn test_snapshot_survives_the_wire() {
    let mut scenario = host();
    let kitchen = &mut scenario.kitchen;
    kitchen.join(GUEST).unwrap();
    kitchen
        .spawn(food::TOMATO, HolderId::Counter(scenario.clear_counters[1]))
        .unwrap();
    kitchen
        .spawn(food::CHEESE, HolderId::Player(PlayerId::new(1)))
        .unwrap();
    kitchen.drain_outbox();

    let snapshot = kitchen.snapshot();
    let decoded = Snapshot::decode(&snapshot.encode().unwrap()).unwrap();
    assert_eq!(decoded, snapshot);

    let mut replica = Replica::new();
    replica.join(&decoded);
    assert_eq!(replica.expected_seq(), kitchen.outbox().next_seq());
    for item in kitchen.items() {
        assert_eq!(replica.item_owner(item.id), item.owner);
        assert_eq!(replica.view().item(item.id).map(|m| m.item_type), Some(item.item_type));
    }
}

// =============================================================================
// Ordering
// =============================================================================

#[test]
fn test_out_of_order_envelope_is_refused() {
    let mut scenario = host();
    let (mut replica, _log) = joined(&mut scenario.kitchen);
    let kitchen = &mut scenario.kitchen;

    kitchen
        .spawn(food::BREAD, HolderId::Counter(scenario.clear_counters[0]))
        .unwrap();
    let envelopes = kitchen.drain_outbox();
    assert!(envelopes.len() >= 2);
    let first = envelopes[0].seq;

    let err = replica.apply(&envelopes[1]).unwrap_err();
    assert!(matches!(
        err,
        KitchenError::OutOfOrder { expected, got } if expected == first && got == first + 1
    ));
    assert_eq!(replica.view().item_count(), 0);
    assert_eq!(replica.expected_seq(), first);

    for envelope in &envelopes {
        replica.apply(envelope).unwrap();
    }
    assert_eq!(replica.view().item_count(), 1);

    // Replays are refused too.
    assert!(replica.apply(&envelopes[0]).is_err());
}

#[test]
fn test_envelopes_apply_from_bytes() {
    let mut scenario = host();
    let (mut replica, log) = joined(&mut scenario.kitchen);
    let kitchen = &mut scenario.kitchen;
    let board = HolderId::Counter(scenario.cutting);

    kitchen.spawn(food::TOMATO, board).unwrap();
    for envelope in kitchen.drain_outbox() {
        replica.apply_bytes(&envelope.encode().unwrap()).unwrap();
    }

    assert_eq!(replica.held_item(board), kitchen.held_item(board));
    assert!(log.events().contains(&FeedbackEvent::ItemPlaced {
        counter: scenario.cutting,
    }));
}

#[test]
fn test_variable_for_wrong_counter_kind_is_rejected() {
    let mut scenario = host();
    let (mut replica, _log) = joined(&mut scenario.kitchen);

    let bogus = Envelope {
        seq: replica.expected_seq(),
        body: Notification::CounterVar {
            counter: scenario.cutting,
            var: CounterVar::StoveState(StoveState::Frying),
        },
    };

    let err = replica.apply(&bogus).unwrap_err();
    assert!(matches!(err, KitchenError::InvariantViolated(_)));
}

// =============================================================================
// Players and feedback
// =============================================================================

#[test]
fn test_player_leave_is_mirrored() {
    let mut scenario = host();
    let (mut replica, _log) = joined(&mut scenario.kitchen);
    let kitchen = &mut scenario.kitchen;

    let guest = kitchen.join(GUEST).unwrap();
    kitchen.spawn(food::CABBAGE, HolderId::Player(guest)).unwrap();
    forward(kitchen, &mut [&mut replica]);
    assert_eq!(replica.view().client_of(guest), Some(GUEST));
    assert_eq!(replica.view().item_count(), 1);

    kitchen.leave(GUEST).unwrap();
    forward(kitchen, &mut [&mut replica]);

    assert_eq!(replica.view().client_of(guest), None);
    assert_eq!(replica.held_item(HolderId::Player(guest)), None);
    assert_eq!(replica.view().item_count(), 0);
}

#[test]
fn test_reset_feedback_drops_subscribers() {
    let mut scenario = host();
    let (mut replica, log) = joined(&mut scenario.kitchen);
    let kitchen = &mut scenario.kitchen;

    replica.reset_feedback();
    kitchen
        .spawn(food::TOMATO, HolderId::Counter(scenario.cutting))
        .unwrap();
    forward(kitchen, &mut [&mut replica]);

    assert!(log.is_empty());
    assert!(replica.held_item(HolderId::Counter(scenario.cutting)).is_some());
}

#[test]
fn test_two_replicas_see_the_same_kitchen() {
    let mut scenario = host();
    let board = scenario.cutting;
    let (mut early, _) = joined(&mut scenario.kitchen);
    let kitchen = &mut scenario.kitchen;

    kitchen
        .spawn(food::TOMATO, HolderId::Player(PlayerId::new(0)))
        .unwrap();
    kitchen.receive(HOST, Request::Interact { counter: board }).unwrap();
    forward(kitchen, &mut [&mut early]);

    let (mut late, _) = joined(kitchen);
    kitchen
        .receive(HOST, Request::InteractAlternate { counter: board })
        .unwrap();
    forward(kitchen, &mut [&mut early, &mut late]);

    for replica in [&early, &late] {
        assert_eq!(replica.held_item(HolderId::Counter(board)), kitchen.held_item(HolderId::Counter(board)));
        assert_eq!(replica.expected_seq(), kitchen.outbox().next_seq());
    }
    assert_eq!(early.progress(board), late.progress(board));
}
