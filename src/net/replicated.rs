//! Authority-owned variables with explicit publication.
//!
//! A `Replicated<T>` records whether its value changed since the last
//! publish. After every authority-side mutation the kitchen drains the
//! dirty variables of the touched counter into the outbox, so replicas
//! see one change notification per changed value, in field order.

use serde::{Deserialize, Serialize};

/// A value mirrored to every replica.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Replicated<T> {
    value: T,
    #[serde(skip)]
    dirty: bool,
}

impl<T: Copy + PartialEq> Replicated<T> {
    /// A clean variable holding `value`.
    #[must_use]
    pub const fn new(value: T) -> Self {
        Self {
            value,
            dirty: false,
        }
    }

    /// Current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.value
    }

    /// Assign a value. Marks the variable dirty only if the value changed.
    pub fn set(&mut self, value: T) {
        if self.value != value {
            self.value = value;
            self.dirty = true;
        }
    }

    /// Check whether a change is waiting to be published.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Take the pending change, if any, clearing the dirty flag.
    pub fn take_dirty(&mut self) -> Option<T> {
        if self.dirty {
            self.dirty = false;
            Some(self.value)
        } else {
            None
        }
    }
}

impl<T: Copy + PartialEq + Default> Default for Replicated<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unchanged_set_stays_clean() {
        let mut var = Replicated::new(3u32);
        var.set(3);
        assert!(!var.is_dirty());
        assert_eq!(var.take_dirty(), None);
    }

    #[test]
    fn test_change_is_published_once() {
        let mut var = Replicated::new(0.0f32);
        var.set(1.5);

        assert!(var.is_dirty());
        assert_eq!(var.take_dirty(), Some(1.5));
        assert_eq!(var.take_dirty(), None);
        assert_eq!(var.get(), 1.5);
    }

    #[test]
    fn test_only_latest_value_is_published() {
        let mut var = Replicated::new(0u32);
        var.set(2);
        var.set(3);
        assert_eq!(var.take_dirty(), Some(3));
    }

    #[test]
    fn test_round_trip_to_original_still_dirty() {
        let mut var = Replicated::new(0u32);
        var.set(2);
        var.set(0);
        assert_eq!(var.take_dirty(), Some(0));
    }
}
