//! Request handling on the authority.
//!
//! Every interactive counter follows the same pattern: a client sends a
//! [`Request`], the authority resolves the caller's player, checks the
//! preconditions against current state, mutates, and broadcasts. A request
//! whose preconditions no longer hold is dropped with a [`Rejection`].

use super::Kitchen;
use crate::core::{ClientId, CounterId, HolderId, PlayerId};
use crate::counters::{Counter, CounterKind, CutStep, CuttingCounter, StoveCounter};
use crate::error::{KitchenError, Rejection};
use crate::items::ItemHolder;
use crate::net::{Notification, Request};

/// What happened to a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestOutcome {
    Applied,
    Rejected(Rejection),
}

impl RequestOutcome {
    #[must_use]
    pub fn is_applied(self) -> bool {
        matches!(self, RequestOutcome::Applied)
    }
}

impl From<Rejection> for RequestOutcome {
    fn from(rejection: Rejection) -> Self {
        RequestOutcome::Rejected(rejection)
    }
}

impl Kitchen {
    /// Handle one request from `client`.
    ///
    /// `Err` is reserved for contract violations (not the authority, a
    /// counter that does not exist). Stale or unsupported requests come
    /// back as `Ok(Rejected(_))` and leave state untouched.
    pub fn receive(&mut self, client: ClientId, request: Request) -> Result<RequestOutcome, KitchenError> {
        self.require_authority("receive")?;

        let counter = request.counter();
        let kind = self
            .counter(counter)
            .ok_or(KitchenError::UnknownCounter(counter))?
            .kind();
        let Some(player) = self.player_for(client) else {
            tracing::debug!(%client, ?request, "request from client without player");
            return Ok(Rejection::NoPlayerForClient.into());
        };

        let outcome = match (request, kind) {
            (Request::Interact { .. }, CounterKind::Clear) => self.swap(counter, player)?,
            (Request::Interact { .. }, CounterKind::Cutting) => self.interact_cutting(counter, player)?,
            (Request::Interact { .. }, CounterKind::Stove) => self.interact_stove(counter, player)?,
            (Request::InteractAlternate { .. }, CounterKind::Cutting) => self.cut(counter)?,
            (Request::InteractAlternate { .. }, _) => Rejection::WrongCounterKind.into(),
        };

        match outcome {
            RequestOutcome::Applied => tracing::debug!(%client, ?request, "request applied"),
            RequestOutcome::Rejected(reason) => {
                tracing::debug!(%client, ?request, %reason, "request rejected");
            }
        }
        Ok(outcome)
    }

    /// Decode and handle an encoded request.
    pub fn receive_bytes(&mut self, client: ClientId, bytes: &[u8]) -> Result<RequestOutcome, KitchenError> {
        let request = Request::decode(bytes)?;
        self.receive(client, request)
    }

    /// Plain swap: whichever side holds the item gives it to the other.
    fn swap(&mut self, counter: CounterId, player: PlayerId) -> Result<RequestOutcome, KitchenError> {
        let on_counter = self.held_item(HolderId::Counter(counter));
        let in_hand = self.held_item(HolderId::Player(player));

        match (on_counter, in_hand) {
            (Some(item), None) => self.transfer(item, HolderId::Player(player))?,
            (None, Some(item)) => self.transfer(item, HolderId::Counter(counter))?,
            _ => return Ok(Rejection::NothingToTransfer.into()),
        }
        Ok(RequestOutcome::Applied)
    }

    /// Zero progress whichever way the swap goes, then swap.
    fn interact_cutting(&mut self, counter: CounterId, player: PlayerId) -> Result<RequestOutcome, KitchenError> {
        self.cutting_mut(counter)?.reset_progress();
        self.swap(counter, player)?;

        self.flush_counter(counter);
        self.outbox.publish(Notification::ProgressReset { counter });
        Ok(RequestOutcome::Applied)
    }

    fn cut(&mut self, counter: CounterId) -> Result<RequestOutcome, KitchenError> {
        let step = match self.cutting_mut(counter)?.cut() {
            Ok(step) => step,
            Err(rejection) => return Ok(rejection.into()),
        };

        self.flush_counter(counter);
        self.outbox.publish(Notification::Cut {
            counter,
            progress: step.progress(),
        });

        if let CutStep::Complete { consumed, output, .. } = step {
            self.cutting_mut(counter)?.reset_progress();
            self.destroy(consumed)?;
            self.spawn(output, HolderId::Counter(counter))?;
            self.flush_counter(counter);
            self.outbox.publish(Notification::ProgressReset { counter });
            tracing::debug!(%counter, %output, "cut complete");
        }
        Ok(RequestOutcome::Applied)
    }

    fn interact_stove(&mut self, counter: CounterId, player: PlayerId) -> Result<RequestOutcome, KitchenError> {
        let on_stove = self.held_item(HolderId::Counter(counter));
        let in_hand = self.holder(HolderId::Player(player))?.held();

        match (on_stove, in_hand) {
            (None, Some(held)) => {
                let Some(placement) = self.stove_mut(counter)?.placement_for(held.item_type) else {
                    return Ok(Rejection::NoRecipe.into());
                };
                self.transfer(held.id, HolderId::Counter(counter))?;
                self.stove_mut(counter)?.begin(placement);
            }
            (Some(item), None) => {
                self.transfer(item, HolderId::Player(player))?;
                self.stove_mut(counter)?.reset();
            }
            _ => return Ok(Rejection::NothingToTransfer.into()),
        }

        self.flush_counter(counter);
        Ok(RequestOutcome::Applied)
    }

    fn cutting_mut(&mut self, counter: CounterId) -> Result<&mut CuttingCounter, KitchenError> {
        match self.counters.get_mut(counter.index()) {
            Some(Counter::Cutting(c)) => Ok(c),
            _ => Err(KitchenError::UnknownCounter(counter)),
        }
    }

    pub(crate) fn stove_mut(&mut self, counter: CounterId) -> Result<&mut StoveCounter, KitchenError> {
        match self.counters.get_mut(counter.index()) {
            Some(Counter::Stove(c)) => Ok(c),
            _ => Err(KitchenError::UnknownCounter(counter)),
        }
    }
}
