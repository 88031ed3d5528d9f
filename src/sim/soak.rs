//! Randomized, seeded soak driver.
//!
//! Drives the standard kitchen with random requests, dispenses, joins,
//! leaves and ticks, forwards every notification to a set of replicas,
//! and checks after each step that the authority's ownership invariant
//! holds and every replica agrees with it. The same seed always produces
//! the same run.

use serde::{Deserialize, Serialize};

use super::scenario::{food, KitchenScenario};
use crate::core::{ClientId, HolderId, KitchenConfig, SimRng};
use crate::error::KitchenError;
use crate::items::ItemHolder;
use crate::kitchen::{Kitchen, RequestOutcome};
use crate::net::{Replica, Request};

/// Tick length used by the soak, in seconds.
pub const SOAK_DT: f32 = 0.25;

/// Counts gathered over a soak run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoakStats {
    pub steps: u64,
    pub requests: u64,
    pub applied: u64,
    pub rejected: u64,
    pub spawned: u64,
    pub joins: u64,
    pub leaves: u64,
    pub late_replicas: u64,
}

/// A soak run in progress.
#[derive(Debug)]
pub struct Soak {
    scenario: KitchenScenario,
    rng: SimRng,
    connected: Vec<ClientId>,
    next_client: u64,
    replicas: Vec<Replica>,
    max_replicas: usize,
    stats: SoakStats,
}

impl Soak {
    /// Start a run with `players` connected clients and one replica per
    /// client, all joined before the first step.
    pub fn new(seed: u64, players: usize) -> Result<Self, KitchenError> {
        let mut soak = Self {
            scenario: KitchenScenario::standard(KitchenConfig::default()),
            rng: SimRng::new(seed),
            connected: Vec::new(),
            next_client: 0,
            replicas: Vec::new(),
            max_replicas: players * 2 + 1,
            stats: SoakStats::default(),
        };
        for _ in 0..players {
            soak.connect()?;
        }
        for _ in 0..players.max(1) {
            soak.add_replica()?;
        }
        Ok(soak)
    }

    #[must_use]
    pub fn kitchen(&self) -> &Kitchen {
        &self.scenario.kitchen
    }

    #[must_use]
    pub fn scenario(&self) -> &KitchenScenario {
        &self.scenario
    }

    #[must_use]
    pub fn replicas(&self) -> &[Replica] {
        &self.replicas
    }

    /// Seed this run was started from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    #[must_use]
    pub fn stats(&self) -> SoakStats {
        self.stats
    }

    /// Attach a new replica from a fresh snapshot. Pending notifications
    /// go to the existing replicas first.
    pub fn add_replica(&mut self) -> Result<(), KitchenError> {
        self.broadcast()?;
        let mut replica = Replica::new();
        replica.join(&self.scenario.kitchen.snapshot());
        self.replicas.push(replica);
        Ok(())
    }

    /// Run `steps` steps, stopping at the first error.
    pub fn run(&mut self, steps: u64) -> Result<SoakStats, KitchenError> {
        for _ in 0..steps {
            if let Err(err) = self.step() {
                tracing::warn!(seed = self.seed(), step = self.stats.steps, %err, "soak failed");
                return Err(err);
            }
        }
        Ok(self.stats)
    }

    /// One random step followed by a tick, broadcast and consistency check.
    pub fn step(&mut self) -> Result<(), KitchenError> {
        self.stats.steps += 1;

        if self.rng.gen_bool(0.2) {
            self.dispense()?;
        }

        for index in 0..self.connected.len() {
            if self.rng.gen_bool(0.6) {
                let client = self.connected[index];
                self.random_request(client)?;
            }
        }

        if self.rng.gen_bool(0.02) {
            self.churn()?;
        }

        self.scenario.kitchen.tick(SOAK_DT)?;
        self.broadcast()?;

        if self.replicas.len() < self.max_replicas && self.rng.gen_bool(0.01) {
            self.add_replica()?;
            self.stats.late_replicas += 1;
        }

        self.scenario.kitchen.validate()?;
        self.check_replicas()
    }

    /// Compare every replica's mirror with the authority.
    pub fn check_replicas(&self) -> Result<(), KitchenError> {
        let kitchen = &self.scenario.kitchen;
        for (index, replica) in self.replicas.iter().enumerate() {
            let view = replica.view();
            if view.item_count() != kitchen.item_count() {
                return Err(mismatch(index, format!(
                    "{} items, authority has {}",
                    view.item_count(),
                    kitchen.item_count()
                )));
            }
            for item in kitchen.items() {
                let mirrored = view.item(item.id);
                if mirrored.map(|m| (m.item_type, m.owner)) != Some((item.item_type, item.owner)) {
                    return Err(mismatch(index, format!("{} is {mirrored:?}", item.id)));
                }
            }
            for counter in kitchen.counters() {
                let holder = counter.holder_id();
                if view.held_item(holder) != counter.item() {
                    return Err(mismatch(index, format!("{holder} shows the wrong item")));
                }
                if let Some(stove) = counter.as_stove() {
                    if view.stove_state(counter.id()) != Some(stove.state()) {
                        return Err(mismatch(index, format!("{holder} shows the wrong stove state")));
                    }
                }
            }
        }
        Ok(())
    }

    fn connect(&mut self) -> Result<(), KitchenError> {
        let client = ClientId::new(self.next_client);
        self.next_client += 1;
        self.scenario.kitchen.join(client)?;
        self.connected.push(client);
        self.stats.joins += 1;
        Ok(())
    }

    fn churn(&mut self) -> Result<(), KitchenError> {
        let Some(&client) = self.rng.choose(&self.connected) else {
            return self.connect();
        };
        self.scenario.kitchen.leave(client)?;
        self.connected.retain(|c| *c != client);
        self.stats.leaves += 1;
        self.connect()
    }

    fn dispense(&mut self) -> Result<(), KitchenError> {
        let kitchen = &self.scenario.kitchen;
        let empty: Vec<_> = self
            .scenario
            .clear_counters
            .iter()
            .copied()
            .filter(|c| kitchen.held_item(HolderId::Counter(*c)).is_none())
            .collect();
        let Some(&counter) = self.rng.choose(&empty) else {
            return Ok(());
        };
        let Some(&item_type) = self.rng.choose(&food::RAW) else {
            return Ok(());
        };
        self.scenario.kitchen.spawn(item_type, HolderId::Counter(counter))?;
        self.stats.spawned += 1;
        Ok(())
    }

    fn random_request(&mut self, client: ClientId) -> Result<(), KitchenError> {
        let counters = self.scenario.counter_ids();
        let Some(&counter) = self.rng.choose(&counters) else {
            return Ok(());
        };
        let request = if self.rng.gen_bool(0.5) {
            Request::Interact { counter }
        } else {
            Request::InteractAlternate { counter }
        };

        // Round-trip through the wire format like a real transport would.
        let bytes = request.encode()?;
        self.stats.requests += 1;
        match self.scenario.kitchen.receive_bytes(client, &bytes)? {
            RequestOutcome::Applied => self.stats.applied += 1,
            RequestOutcome::Rejected(_) => self.stats.rejected += 1,
        }
        Ok(())
    }

    fn broadcast(&mut self) -> Result<(), KitchenError> {
        for envelope in self.scenario.kitchen.drain_outbox() {
            let bytes = envelope.encode()?;
            for replica in &mut self.replicas {
                replica.apply_bytes(&bytes)?;
            }
        }
        Ok(())
    }
}

fn mismatch(replica: usize, detail: String) -> KitchenError {
    KitchenError::InvariantViolated(format!("replica {replica}: {detail}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_run() {
        let mut a = Soak::new(7, 2).unwrap();
        let mut b = Soak::new(7, 2).unwrap();

        let stats_a = a.run(200).unwrap();
        let stats_b = b.run(200).unwrap();

        assert_eq!(stats_a, stats_b);
        assert_eq!(a.kitchen().item_count(), b.kitchen().item_count());
    }

    #[test]
    fn test_soak_exercises_requests() {
        let mut soak = Soak::new(42, 3).unwrap();
        let stats = soak.run(300).unwrap();

        assert_eq!(stats.steps, 300);
        assert!(stats.requests > 0);
        assert!(stats.applied > 0);
        assert!(stats.spawned > 0);
    }
}
