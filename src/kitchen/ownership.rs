//! Item ownership: transfer, spawn, destroy.
//!
//! Ordering inside [`Kitchen::transfer`] matters. The old holder is
//! cleared before the item's back-reference is rewritten; doing it the
//! other way round would send the clear to the new holder and orphan the
//! item. Replicas see the whole move as one `ItemMoved` notification.

use super::Kitchen;
use crate::core::{CounterId, HolderId, ItemId};
use crate::error::KitchenError;
use crate::items::{HeldItem, Item, ItemHolder, ItemTypeId};
use crate::net::Notification;

impl Kitchen {
    pub(crate) fn holder(&self, holder: HolderId) -> Result<&dyn ItemHolder, KitchenError> {
        let found: Option<&dyn ItemHolder> = match holder {
            HolderId::Counter(id) => self.counters.get(id.index()).map(|c| c as &dyn ItemHolder),
            HolderId::Player(id) => self.players.get(&id).map(|p| p as &dyn ItemHolder),
        };
        found.ok_or(KitchenError::UnknownHolder(holder))
    }

    pub(crate) fn holder_mut(
        &mut self,
        holder: HolderId,
    ) -> Result<&mut dyn ItemHolder, KitchenError> {
        let found: Option<&mut dyn ItemHolder> = match holder {
            HolderId::Counter(id) => self
                .counters
                .get_mut(id.index())
                .map(|c| c as &mut dyn ItemHolder),
            HolderId::Player(id) => self.players.get_mut(&id).map(|p| p as &mut dyn ItemHolder),
        };
        found.ok_or(KitchenError::UnknownHolder(holder))
    }

    /// Publish a counter's changed variables.
    pub(crate) fn flush_counter(&mut self, counter: CounterId) {
        let Some(entry) = self.counters.get_mut(counter.index()) else {
            return;
        };
        for var in entry.drain_changes() {
            self.outbox.publish(Notification::CounterVar { counter, var });
        }
    }

    fn flush_holder(&mut self, holder: HolderId) {
        if let HolderId::Counter(counter) = holder {
            self.flush_counter(counter);
        }
    }

    /// Chops recorded on `holder`, if it is a cutting counter.
    fn cuts_on(&self, holder: HolderId) -> u32 {
        match holder {
            HolderId::Counter(id) => self
                .counters
                .get(id.index())
                .and_then(|c| c.as_cutting())
                .map_or(0, |c| c.cuts()),
            HolderId::Player(_) => 0,
        }
    }

    /// Tell replicas a board lost a partly cut item outside the request path.
    fn announce_lost_cuts(&mut self, holder: HolderId, cuts: u32) {
        let HolderId::Counter(counter) = holder else { return };
        if cuts > 0 {
            tracing::debug!(%counter, cuts, "cutting progress lost with item");
            self.outbox.publish(Notification::ProgressReset { counter });
        }
    }

    /// Move an item to `to`.
    ///
    /// Fails without side effects if the item or either holder is unknown,
    /// or if `to` already holds a different item. Moving an item to the
    /// holder that already owns it does nothing.
    pub fn transfer(&mut self, item: ItemId, to: HolderId) -> Result<(), KitchenError> {
        self.require_authority("transfer")?;

        let entry = self.items.get(&item).ok_or(KitchenError::UnknownItem(item))?;
        let (item_type, from) = (entry.item_type, entry.owner);
        if from == Some(to) {
            return Ok(());
        }

        let target = self.holder(to)?;
        if let Some(occupant) = target.item() {
            return Err(KitchenError::HolderOccupied {
                holder: to,
                item: occupant,
            });
        }
        let anchor = target.attach_point();
        let lost_cuts = match from {
            Some(from) => {
                self.holder(from)?;
                self.cuts_on(from)
            }
            None => 0,
        };

        // 1. release
        if let Some(from) = from {
            self.holder_mut(from)?.clear_item();
        }
        // 2. back-reference and pose
        if let Some(entry) = self.items.get_mut(&item) {
            entry.attach(to, anchor);
        }
        // 3. acquire
        self.holder_mut(to)?.set_item(HeldItem { id: item, item_type });

        // 4. one message for ownership and reparent, then holder variables
        self.outbox.publish(Notification::ItemMoved {
            item,
            from,
            to,
            anchor,
        });
        if let Some(from) = from {
            self.flush_holder(from);
            self.announce_lost_cuts(from, lost_cuts);
        }
        self.flush_holder(to);

        tracing::debug!(%item, ?from, %to, "item moved");
        Ok(())
    }

    /// Create an item of `item_type` and place it on `holder`.
    pub fn spawn(&mut self, item_type: ItemTypeId, holder: HolderId) -> Result<ItemId, KitchenError> {
        self.require_authority("spawn")?;

        if let Some(occupant) = self.holder(holder)?.item() {
            return Err(KitchenError::HolderOccupied {
                holder,
                item: occupant,
            });
        }

        let id = ItemId::new(self.next_item);
        self.next_item += 1;
        self.items.insert(id, Item::new(id, item_type));
        self.outbox.publish(Notification::ItemSpawned { item: id, item_type });
        tracing::debug!(item = %id, %item_type, "item spawned");

        self.transfer(id, holder)?;
        Ok(id)
    }

    /// Detach an item from its holder and retire it.
    pub fn destroy(&mut self, item: ItemId) -> Result<(), KitchenError> {
        self.require_authority("destroy")?;

        let owner = self.items.get(&item).ok_or(KitchenError::UnknownItem(item))?.owner;
        let lost_cuts = owner.map_or(0, |owner| self.cuts_on(owner));
        if let Some(owner) = owner {
            let holder = self.holder_mut(owner)?;
            if holder.item() == Some(item) {
                holder.clear_item();
            }
        }
        self.items.remove(&item);
        self.outbox.publish(Notification::ItemDespawned { item });
        if let Some(owner) = owner {
            self.flush_holder(owner);
            self.announce_lost_cuts(owner, lost_cuts);
        }

        tracing::debug!(%item, "item destroyed");
        Ok(())
    }

    /// Check the single-ownership invariant in both directions.
    pub fn validate(&self) -> Result<(), KitchenError> {
        for item in self.items.values() {
            let Some(owner) = item.owner else {
                return Err(KitchenError::InvariantViolated(format!(
                    "{} has no holder",
                    item.id
                )));
            };
            let held = self.holder(owner)?.held();
            if held.map(|h| h.id) != Some(item.id) {
                return Err(KitchenError::InvariantViolated(format!(
                    "{} points at {owner}, which holds {held:?}",
                    item.id
                )));
            }
            if held.map(|h| h.item_type) != Some(item.item_type) {
                return Err(KitchenError::InvariantViolated(format!(
                    "{owner} caches the wrong type for {}",
                    item.id
                )));
            }
        }

        let counters = self.counters.iter().map(|c| c as &dyn ItemHolder);
        let players = self.players.values().map(|p| p as &dyn ItemHolder);
        for holder in counters.chain(players) {
            let Some(held) = holder.item() else { continue };
            let owner = self.items.get(&held).and_then(|i| i.owner);
            if owner != Some(holder.holder_id()) {
                return Err(KitchenError::InvariantViolated(format!(
                    "{} holds {held}, whose owner is {owner:?}",
                    holder.holder_id()
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::core::{ClientId, HolderId, KitchenConfig, Vec3};
    use crate::error::KitchenError;
    use crate::items::{ItemHolder, ItemTypeId};
    use crate::kitchen::Kitchen;
    use crate::net::{Notification, Role};

    const TOMATO: ItemTypeId = ItemTypeId::new(1);

    fn kitchen_with_two_counters() -> (Kitchen, HolderId, HolderId) {
        let mut kitchen = Kitchen::host(KitchenConfig::default());
        let a = kitchen.add_clear_counter(Vec3::new(0.0, 1.0, 0.0));
        let b = kitchen.add_clear_counter(Vec3::new(2.0, 1.0, 0.0));
        (kitchen, HolderId::Counter(a), HolderId::Counter(b))
    }

    #[test]
    fn test_spawn_places_item() {
        let (mut kitchen, a, _) = kitchen_with_two_counters();
        let item = kitchen.spawn(TOMATO, a).unwrap();

        assert_eq!(kitchen.held_item(a), Some(item));
        assert_eq!(kitchen.item(item).unwrap().owner, Some(a));
        assert_eq!(kitchen.item(item).unwrap().anchor, Vec3::new(0.0, 1.0, 0.0));

        let bodies: Vec<_> = kitchen.drain_outbox().into_iter().map(|e| e.body).collect();
        assert!(matches!(bodies[0], Notification::ItemSpawned { .. }));
        assert!(matches!(bodies[1], Notification::ItemMoved { from: None, .. }));
        kitchen.validate().unwrap();
    }

    #[test]
    fn test_transfer_moves_between_holders() {
        let (mut kitchen, a, b) = kitchen_with_two_counters();
        let item = kitchen.spawn(TOMATO, a).unwrap();
        kitchen.drain_outbox();

        kitchen.transfer(item, b).unwrap();

        assert_eq!(kitchen.held_item(a), None);
        assert_eq!(kitchen.held_item(b), Some(item));
        assert_eq!(kitchen.item(item).unwrap().anchor, Vec3::new(2.0, 1.0, 0.0));

        let envelopes = kitchen.drain_outbox();
        assert_eq!(envelopes.len(), 1);
        assert_eq!(
            envelopes[0].body,
            Notification::ItemMoved {
                item,
                from: Some(a),
                to: b,
                anchor: Vec3::new(2.0, 1.0, 0.0),
            }
        );
        kitchen.validate().unwrap();
    }

    #[test]
    fn test_transfer_onto_occupied_holder_fails_cleanly() {
        let (mut kitchen, a, b) = kitchen_with_two_counters();
        let first = kitchen.spawn(TOMATO, a).unwrap();
        let second = kitchen.spawn(TOMATO, b).unwrap();
        kitchen.drain_outbox();

        let err = kitchen.transfer(first, b).unwrap_err();
        assert!(matches!(err, KitchenError::HolderOccupied { item, .. } if item == second));
        assert_eq!(kitchen.held_item(a), Some(first));
        assert!(kitchen.drain_outbox().is_empty());
    }

    #[test]
    fn test_transfer_to_current_owner_is_noop() {
        let (mut kitchen, a, _) = kitchen_with_two_counters();
        let item = kitchen.spawn(TOMATO, a).unwrap();
        kitchen.drain_outbox();

        kitchen.transfer(item, a).unwrap();
        assert!(kitchen.drain_outbox().is_empty());
    }

    #[test]
    fn test_destroy_clears_holder() {
        let (mut kitchen, a, _) = kitchen_with_two_counters();
        let item = kitchen.spawn(TOMATO, a).unwrap();

        kitchen.destroy(item).unwrap();

        assert_eq!(kitchen.held_item(a), None);
        assert!(kitchen.item(item).is_none());
        assert!(matches!(kitchen.destroy(item), Err(KitchenError::UnknownItem(_))));
    }

    #[test]
    fn test_replica_role_refuses_mutation() {
        let mut kitchen = Kitchen::new(KitchenConfig::default(), Role::Replica);
        let counter = HolderId::Counter(kitchen.add_clear_counter(Vec3::ZERO));

        let err = kitchen.spawn(TOMATO, counter).unwrap_err();
        assert!(err.is_authority_violation());
        assert_eq!(kitchen.item_count(), 0);
        assert!(kitchen.join(ClientId(1)).unwrap_err().is_authority_violation());
        assert!(kitchen.outbox().pending().is_empty());
    }

    #[test]
    fn test_validate_detects_broken_back_reference() {
        let (mut kitchen, a, b) = kitchen_with_two_counters();
        let item = kitchen.spawn(TOMATO, a).unwrap();

        // Simulate a holder updated outside the ownership operations.
        kitchen.holder_mut(b).unwrap().set_item(crate::items::HeldItem {
            id: item,
            item_type: TOMATO,
        });
        assert!(matches!(
            kitchen.validate(),
            Err(KitchenError::InvariantViolated(_))
        ));
        assert!(kitchen.holder(b).unwrap().has_item());
    }
}
