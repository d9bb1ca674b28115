//! Shareable handle around a manual clock.

use core::time::Duration;
use std::sync::{Arc, Mutex, PoisonError};

use crate::core::time::{ClockKind, ManualClock, MonotonicClock, TimerInstant};

/// Clone-able deterministic clock for tests that share one time source
/// between a driver and its assertions.
#[derive(Debug, Clone)]
pub struct SharedManualClock {
  inner: Arc<Mutex<ManualClock>>,
}

impl SharedManualClock {
  /// Creates a shared clock anchored at zero.
  #[must_use]
  pub fn new(resolution: Duration) -> Self {
    Self { inner: Arc::new(Mutex::new(ManualClock::new(resolution))) }
  }

  /// Advances the clock by the specified duration and returns the new
  /// instant.
  pub fn advance(&self, duration: Duration) -> TimerInstant {
    self.lock().advance(duration)
  }

  fn lock(&self) -> std::sync::MutexGuard<'_, ManualClock> {
    self.inner.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

impl MonotonicClock for SharedManualClock {
  fn now(&self) -> TimerInstant {
    self.lock().now()
  }

  fn kind(&self) -> ClockKind {
    ClockKind::Deterministic
  }
}
