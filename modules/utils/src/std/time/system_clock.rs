//! Monotonic clock backed by the host runtime.

use core::time::Duration;
use std::time::Instant;

use crate::core::time::{ClockKind, MonotonicClock, TimerInstant};

/// Monotonic clock backed by [`std::time::Instant`].
#[derive(Debug, Clone)]
pub struct SystemClock {
  anchor:     Instant,
  resolution: Duration,
}

impl SystemClock {
  /// Default tick resolution.
  pub const DEFAULT_RESOLUTION: Duration = Duration::from_millis(1);

  /// Creates a clock anchored at the current instant.
  #[must_use]
  pub fn new(resolution: Duration) -> Self {
    Self { anchor: Instant::now(), resolution }
  }
}

impl Default for SystemClock {
  fn default() -> Self {
    Self::new(Self::DEFAULT_RESOLUTION)
  }
}

impl MonotonicClock for SystemClock {
  fn now(&self) -> TimerInstant {
    let ticks = TimerInstant::ticks_for(self.anchor.elapsed(), self.resolution);
    TimerInstant::from_ticks(ticks, self.resolution)
  }

  fn kind(&self) -> ClockKind {
    ClockKind::System
  }
}
