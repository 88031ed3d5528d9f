//! The authoritative kitchen.
//!
//! `Kitchen` owns every item, counter and player. On the authority it is
//! the only thing allowed to mutate them; every accepted mutation is
//! published to the [`Outbox`] in the same step, so replicas can follow
//! along from the notification stream alone.
//!
//! ## Example
//!
//! ```
//! use coop_kitchen::core::{ClientId, KitchenConfig, Vec3};
//! use coop_kitchen::items::ItemTypeId;
//! use coop_kitchen::kitchen::{Kitchen, RequestOutcome};
//! use coop_kitchen::net::Request;
//! use coop_kitchen::core::HolderId;
//!
//! let mut kitchen = Kitchen::host(KitchenConfig::default());
//! let counter = kitchen.add_clear_counter(Vec3::new(0.0, 1.0, 1.0));
//! let player = kitchen.join(ClientId::new(7)).unwrap();
//!
//! kitchen.spawn(ItemTypeId::new(1), HolderId::Counter(counter)).unwrap();
//! let outcome = kitchen
//!     .receive(ClientId::new(7), Request::Interact { counter })
//!     .unwrap();
//!
//! assert_eq!(outcome, RequestOutcome::Applied);
//! assert!(kitchen.held_item(HolderId::Player(player)).is_some());
//! ```

mod ownership;
mod protocol;
mod tick;

pub use protocol::RequestOutcome;

use rustc_hash::FxHashMap;

use crate::core::{ClientId, CounterId, HolderId, ItemId, KitchenConfig, PlayerId, Vec3};
use crate::counters::{
    ClearCounter, Counter, CuttingCounter, StoveCounter, StoveState,
};
use crate::error::KitchenError;
use crate::items::{Item, ItemHolder};
use crate::net::{CounterRecord, Envelope, ItemRecord, Notification, Outbox, PlayerRecord, Role, Snapshot};
use crate::players::Player;
use crate::recipes::{Burn, Cut, Fry, RecipeBook};

/// Authority world state.
#[derive(Clone, Debug)]
pub struct Kitchen {
    config: KitchenConfig,
    role: Role,
    items: FxHashMap<ItemId, Item>,
    next_item: u32,
    counters: Vec<Counter>,
    players: FxHashMap<PlayerId, Player>,
    clients: FxHashMap<ClientId, PlayerId>,
    outbox: Outbox,
}

impl Kitchen {
    /// Create an empty kitchen for the given role.
    #[must_use]
    pub fn new(config: KitchenConfig, role: Role) -> Self {
        Self {
            config,
            role,
            items: FxHashMap::default(),
            next_item: 0,
            counters: Vec::new(),
            players: FxHashMap::default(),
            clients: FxHashMap::default(),
            outbox: Outbox::new(),
        }
    }

    /// Create an empty kitchen on the authority.
    #[must_use]
    pub fn host(config: KitchenConfig) -> Self {
        Self::new(config, Role::Authority)
    }

    #[must_use]
    pub fn config(&self) -> &KitchenConfig {
        &self.config
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    // === Layout ===
    //
    // Counters are part of the scene, not of the replicated stream. Add
    // them all before any replica joins.

    fn next_counter_id(&self) -> CounterId {
        let index = u16::try_from(self.counters.len())
            .unwrap_or_else(|_| panic!("Kitchen supports at most {} counters", u16::MAX));
        CounterId::new(index)
    }

    /// Add a plain transfer counter.
    pub fn add_clear_counter(&mut self, top: Vec3) -> CounterId {
        let id = self.next_counter_id();
        self.counters.push(ClearCounter::new(id, top).into());
        id
    }

    /// Add a cutting counter with its cut recipes.
    pub fn add_cutting_counter(&mut self, top: Vec3, recipes: RecipeBook<Cut>) -> CounterId {
        let id = self.next_counter_id();
        self.counters.push(CuttingCounter::new(id, top, recipes).into());
        id
    }

    /// Add a stove with its fry and burn recipes.
    pub fn add_stove(
        &mut self,
        top: Vec3,
        fry: RecipeBook<Fry>,
        burn: RecipeBook<Burn>,
    ) -> CounterId {
        let id = self.next_counter_id();
        self.counters.push(StoveCounter::new(id, top, fry, burn).into());
        id
    }

    // === Players ===

    /// Create a player for a newly connected client. Joining twice returns
    /// the existing player.
    pub fn join(&mut self, client: ClientId) -> Result<PlayerId, KitchenError> {
        self.require_authority("join")?;
        if let Some(&player) = self.clients.get(&client) {
            return Ok(player);
        }

        let id = (0..=u8::MAX)
            .map(PlayerId::new)
            .find(|id| !self.players.contains_key(id))
            .ok_or(KitchenError::KitchenFull)?;

        self.players.insert(id, Player::new(id, client));
        self.clients.insert(client, id);
        self.outbox.publish(Notification::PlayerJoined { player: id, client });
        tracing::debug!(%client, player = %id, "player joined");
        Ok(id)
    }

    /// Remove a disconnected client's player, destroying what it held.
    pub fn leave(&mut self, client: ClientId) -> Result<(), KitchenError> {
        self.require_authority("leave")?;
        let player = *self
            .clients
            .get(&client)
            .ok_or(KitchenError::UnknownClient(client))?;

        if let Some(item) = self.held_item(HolderId::Player(player)) {
            self.destroy(item)?;
        }
        self.players.remove(&player);
        self.clients.remove(&client);
        self.outbox.publish(Notification::PlayerLeft { player });
        tracing::debug!(%client, %player, "player left");
        Ok(())
    }

    /// The player a client controls.
    #[must_use]
    pub fn player_for(&self, client: ClientId) -> Option<PlayerId> {
        self.clients.get(&client).copied()
    }

    #[must_use]
    pub fn player(&self, player: PlayerId) -> Option<&Player> {
        self.players.get(&player)
    }

    /// Mutable player access, for hosts that sync player positions.
    pub fn player_mut(&mut self, player: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(&player)
    }

    /// Connected players in id order.
    #[must_use]
    pub fn player_ids(&self) -> Vec<PlayerId> {
        let mut ids: Vec<_> = self.players.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    // === Queries ===

    #[must_use]
    pub fn counter(&self, counter: CounterId) -> Option<&Counter> {
        self.counters.get(counter.index())
    }

    pub fn counters(&self) -> impl Iterator<Item = &Counter> {
        self.counters.iter()
    }

    #[must_use]
    pub fn counter_count(&self) -> usize {
        self.counters.len()
    }

    #[must_use]
    pub fn item(&self, item: ItemId) -> Option<&Item> {
        self.items.get(&item)
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Where an item is now, following its holder's current attach point.
    #[must_use]
    pub fn item_position(&self, item: ItemId) -> Option<Vec3> {
        let item = self.items.get(&item)?;
        let holder = self.holder(item.owner?).ok()?;
        Some(item.position_at(holder.attach_point()))
    }

    /// The item a holder stores, if the holder exists and holds one.
    #[must_use]
    pub fn held_item(&self, holder: HolderId) -> Option<ItemId> {
        self.holder(holder).ok().and_then(|h| h.item())
    }

    #[must_use]
    pub fn stove_state(&self, counter: CounterId) -> Option<StoveState> {
        self.counter(counter)?.as_stove().map(StoveCounter::state)
    }

    /// Normalized progress of a counter.
    #[must_use]
    pub fn progress(&self, counter: CounterId) -> Option<f32> {
        self.counter(counter).map(Counter::progress)
    }

    // === Replication ===

    #[must_use]
    pub fn outbox(&self) -> &Outbox {
        &self.outbox
    }

    /// Take every notification published since the last drain.
    pub fn drain_outbox(&mut self) -> Vec<Envelope> {
        self.outbox.drain()
    }

    /// Capture the state a late joiner needs. Replicas that join from this
    /// snapshot expect the envelope numbered `next_seq` next.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let counters = self
            .counters
            .iter()
            .map(|counter| CounterRecord {
                id: counter.id(),
                kind: counter.kind(),
                attach_point: counter.attach_point(),
                vars: counter.vars().into_vec(),
            })
            .collect();

        let mut players: Vec<_> = self
            .players
            .values()
            .map(|p| PlayerRecord {
                id: p.id(),
                client: p.client(),
            })
            .collect();
        players.sort_unstable_by_key(|p| p.id);

        let mut items: Vec<_> = self
            .items
            .values()
            .map(|item| ItemRecord {
                id: item.id,
                item_type: item.item_type,
                owner: item.owner,
                anchor: item.anchor,
            })
            .collect();
        items.sort_unstable_by_key(|i| i.id);

        Snapshot {
            next_seq: self.outbox.next_seq(),
            counters,
            players,
            items,
        }
    }

    fn require_authority(&self, op: &'static str) -> Result<(), KitchenError> {
        if self.role.is_authority() {
            Ok(())
        } else {
            tracing::warn!(op, role = %self.role, "mutation refused on non-authority");
            Err(KitchenError::NotAuthority { op })
        }
    }
}
