//! Tick-based monotonic instant.


use core::{cmp::Ordering, time::Duration};

/// Monotonic instant expressed as a tick count at a fixed resolution.
///
/// Instants never rely on wall-clock time; clocks hand them out and the
/// arithmetic saturates instead of wrapping.
#[derive(Clone, Copy, Debug)]
pub struct TimerInstant {
  ticks:      u64,
  resolution: Duration,
}

impl TimerInstant {
  /// Creates the zero instant at the given resolution.
  #[must_use]
  pub const fn zero(resolution: Duration) -> Self {
    Self { ticks: 0, resolution }
  }

  /// Creates an instant from a raw tick count and resolution.
  #[must_use]
  pub const fn from_ticks(ticks: u64, resolution: Duration) -> Self {
    Self { ticks, resolution }
  }

  /// Returns the raw tick count.
  #[must_use]
  pub const fn ticks(&self) -> u64 {
    self.ticks
  }

  /// Returns the tick resolution.
  #[must_use]
  pub const fn resolution(&self) -> Duration {
    self.resolution
  }

  /// Adds raw ticks, saturating at the maximum tick count.
  #[must_use]
  pub const fn saturating_add_ticks(&self, ticks: u64) -> Self {
    Self { ticks: self.ticks.saturating_add(ticks), resolution: self.resolution }
  }

  /// Adds a duration, rounding up to at least one tick when non-zero.
  #[must_use]
  pub fn saturating_add(&self, duration: Duration) -> Self {
    self.saturating_add_ticks(Self::ticks_for(duration, self.resolution))
  }

  /// Returns the elapsed duration since `earlier`, or `None` when this
  /// instant precedes it.
  #[must_use]
  pub fn checked_duration_since(&self, earlier: &Self) -> Option<Duration> {
    let later_ns = self.as_nanos();
    let earlier_ns = earlier.as_nanos();
    if later_ns < earlier_ns {
      return None;
    }
    let diff = later_ns - earlier_ns;
    Some(Duration::new((diff / 1_000_000_000) as u64, (diff % 1_000_000_000) as u32))
  }

  /// Converts a duration into ticks at the given resolution.
  ///
  /// Non-zero durations shorter than one tick still count as one tick so
  /// deadlines never land in the past.
  #[must_use]
  pub fn ticks_for(duration: Duration, resolution: Duration) -> u64 {
    if duration.is_zero() {
      return 0;
    }
    let resolution_ns = resolution.as_nanos().max(1);
    let mut ticks = duration.as_nanos() / resolution_ns;
    if ticks == 0 {
      ticks = 1;
    }
    u64::try_from(ticks).unwrap_or(u64::MAX)
  }

  fn as_nanos(&self) -> u128 {
    u128::from(self.ticks) * self.resolution.as_nanos().max(1)
  }
}

impl PartialEq for TimerInstant {
  fn eq(&self, other: &Self) -> bool {
    self.as_nanos() == other.as_nanos()
  }
}

impl Eq for TimerInstant {}

impl PartialOrd for TimerInstant {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl Ord for TimerInstant {
  fn cmp(&self, other: &Self) -> Ordering {
    self.as_nanos().cmp(&other.as_nanos())
  }
}
