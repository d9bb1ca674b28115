//! Identity of a scheduled single-shot timer.

/// Identifies one scheduling of a named single-shot timer.
///
/// A fresh key is issued every time a slot is re-armed; a fire event
/// carrying a stale key belongs to a cancelled schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimerSlotKey(u64);

impl TimerSlotKey {
  /// Creates a key from its raw value.
  #[must_use]
  pub const fn from_raw(raw: u64) -> Self {
    Self(raw)
  }

  /// Returns the raw value.
  #[must_use]
  pub const fn into_raw(self) -> u64 {
    self.0
  }

  /// Returns true when the key was issued by an allocator.
  #[must_use]
  pub const fn is_valid(&self) -> bool {
    self.0 != 0
  }
}
