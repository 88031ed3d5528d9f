//! Per-tick authority update.

use super::Kitchen;
use crate::core::HolderId;
use crate::counters::{Counter, StoveStep};
use crate::error::KitchenError;

impl Kitchen {
    /// Advance every stove by `dt` seconds.
    ///
    /// Runs on the authority only. Finished stages replace the item on the
    /// stove within this call, so no in-between state is ever published.
    pub fn tick(&mut self, dt: f32) -> Result<(), KitchenError> {
        self.require_authority("tick")?;

        for index in 0..self.counters.len() {
            let (id, step) = match &mut self.counters[index] {
                Counter::Stove(stove) => (stove.id(), stove.advance(dt)),
                _ => continue,
            };

            self.flush_counter(id);
            match step {
                StoveStep::Idle | StoveStep::Advanced | StoveStep::Healed => {}
                StoveStep::FryDone { consumed, output } => {
                    self.destroy(consumed)?;
                    self.spawn(output, HolderId::Counter(id))?;
                    let state = self.stove_mut(id)?.finish_fry(output);
                    self.flush_counter(id);
                    tracing::debug!(counter = %id, %output, %state, "fry complete");
                }
                StoveStep::BurnDone { consumed, output } => {
                    self.destroy(consumed)?;
                    self.spawn(output, HolderId::Counter(id))?;
                    self.stove_mut(id)?.finish_burn();
                    self.flush_counter(id);
                    tracing::debug!(counter = %id, %output, "burned");
                }
            }
        }
        Ok(())
    }
}
