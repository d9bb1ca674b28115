//! Allocator for timer slot keys.

use core::sync::atomic::{AtomicU64, Ordering};

use super::timer_slot_key::TimerSlotKey;

/// Issues unique [`TimerSlotKey`] values, starting at 1.
#[derive(Debug)]
pub struct TimerSlotKeyAllocator {
  counter: AtomicU64,
}

impl TimerSlotKeyAllocator {
  /// Creates a new allocator.
  #[must_use]
  pub const fn new() -> Self {
    Self { counter: AtomicU64::new(1) }
  }

  /// Issues a new unique key.
  pub fn allocate(&self) -> TimerSlotKey {
    let next = self.counter.fetch_add(1, Ordering::Relaxed);
    let raw = if next == 0 { 1 } else { next };
    TimerSlotKey::from_raw(raw)
  }

  /// Checks the next key to be issued (for testing purposes).
  #[must_use]
  pub fn peek(&self) -> TimerSlotKey {
    TimerSlotKey::from_raw(self.counter.load(Ordering::Relaxed))
  }
}

impl Default for TimerSlotKeyAllocator {
  fn default() -> Self {
    Self::new()
  }
}
