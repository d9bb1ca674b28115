//! Registry of named single-shot timer slots.

use alloc::collections::BTreeMap;

use super::{timer_slot_key::TimerSlotKey, timer_slot_key_allocator::TimerSlotKeyAllocator};

/// Tracks the current schedule of each named single-shot timer.
///
/// Re-arming a name replaces the slot's key, which invalidates any fire
/// event issued for the prior schedule.
#[derive(Debug, Default)]
pub struct TimerSlots {
  allocator: TimerSlotKeyAllocator,
  slots:     BTreeMap<&'static str, TimerSlotKey>,
}

impl TimerSlots {
  /// Creates an empty registry.
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Arms the named slot, cancelling any prior schedule, and returns the
  /// key identifying the new schedule.
  pub fn arm(&mut self, name: &'static str) -> TimerSlotKey {
    let key = self.allocator.allocate();
    self.slots.insert(name, key);
    key
  }

  /// Cancels the named slot.
  pub fn cancel(&mut self, name: &'static str) {
    self.slots.remove(name);
  }

  /// Returns true when the key identifies the slot's current schedule.
  #[must_use]
  pub fn is_current(&self, name: &'static str, key: TimerSlotKey) -> bool {
    self.slots.get(name).is_some_and(|current| *current == key)
  }
}
