//! SWIM protocol settings.

use core::time::Duration;

/// Protocol timings and budgets.
///
/// Suspicion timeouts are expressed in units of the probe interval, the
/// way the lifeguard parameters are usually quoted.
#[derive(Debug, Clone)]
pub struct SwimSettings {
  /// Base interval between periodic probes.
  pub probe_interval:              Duration,
  /// Base direct-probe timeout.
  pub ping_timeout:                Duration,
  /// Number of helpers asked to probe an unresponsive member.
  pub indirect_checks:             usize,
  /// Upper bound of the local health multiplier.
  pub lhm_max:                     u32,
  /// Lower bound of the suspicion window, in probe intervals.
  pub min_suspicion_intervals:     u32,
  /// Upper bound of the suspicion window, in probe intervals.
  pub max_suspicion_intervals:     u32,
  /// Independent suspicions after which the window bottoms out.
  pub max_independent_suspicions:  u32,
  /// How long dead members are remembered.
  pub tombstone_ttl:               Duration,
  /// Gossip retransmission factor (the lambda in `lambda * ln N`).
  pub gossip_retransmit_factor:    u32,
  /// Byte budget of one gossip payload.
  pub max_gossip_bytes:            usize,
  /// Fact budget of one gossip payload.
  pub max_gossip_facts:            usize,
  /// Seed for the probe-order shuffles, fixed for reproducible tests.
  pub rng_seed:                    u64,
}

impl SwimSettings {
  /// Returns the base settings.
  #[must_use]
  pub const fn new() -> Self {
    Self {
      probe_interval:             Duration::from_secs(1),
      ping_timeout:               Duration::from_millis(300),
      indirect_checks:            3,
      lhm_max:                    8,
      min_suspicion_intervals:    3,
      max_suspicion_intervals:    10,
      max_independent_suspicions: 3,
      tombstone_ttl:              Duration::from_secs(24 * 60 * 60),
      gossip_retransmit_factor:   3,
      max_gossip_bytes:           1024,
      max_gossip_facts:           32,
      rng_seed:                   0x5117_6009,
    }
  }

  /// Replaces the probe interval.
  #[must_use]
  pub const fn with_probe_interval(mut self, interval: Duration) -> Self {
    self.probe_interval = interval;
    self
  }

  /// Replaces the direct-probe timeout.
  #[must_use]
  pub const fn with_ping_timeout(mut self, timeout: Duration) -> Self {
    self.ping_timeout = timeout;
    self
  }

  /// Replaces the number of indirect-probe helpers.
  #[must_use]
  pub const fn with_indirect_checks(mut self, checks: usize) -> Self {
    self.indirect_checks = checks;
    self
  }

  /// Replaces the local-health ceiling.
  #[must_use]
  pub const fn with_lhm_max(mut self, max: u32) -> Self {
    self.lhm_max = max;
    self
  }

  /// Replaces the suspicion window bounds, in probe intervals.
  #[must_use]
  pub const fn with_suspicion_intervals(mut self, min: u32, max: u32) -> Self {
    self.min_suspicion_intervals = min;
    self.max_suspicion_intervals = max;
    self
  }

  /// Replaces the tombstone grace period.
  #[must_use]
  pub const fn with_tombstone_ttl(mut self, ttl: Duration) -> Self {
    self.tombstone_ttl = ttl;
    self
  }

  /// Replaces the RNG seed.
  #[must_use]
  pub const fn with_rng_seed(mut self, seed: u64) -> Self {
    self.rng_seed = seed;
    self
  }

  /// Lower bound of the suspicion window.
  #[must_use]
  pub fn min_suspicion_timeout(&self) -> Duration {
    self.probe_interval.saturating_mul(self.min_suspicion_intervals)
  }

  /// Upper bound of the suspicion window.
  #[must_use]
  pub fn max_suspicion_timeout(&self) -> Duration {
    self.probe_interval.saturating_mul(self.max_suspicion_intervals)
  }

  /// Validates the settings.
  ///
  /// # Errors
  ///
  /// Returns a description of the first invalid field.
  pub const fn validate(&self) -> Result<(), &'static str> {
    if self.probe_interval.is_zero() {
      return Err("probe_interval must be > 0");
    }
    if self.ping_timeout.is_zero() {
      return Err("ping_timeout must be > 0");
    }
    if self.min_suspicion_intervals > self.max_suspicion_intervals {
      return Err("min_suspicion_intervals must not exceed max_suspicion_intervals");
    }
    if self.max_gossip_facts == 0 {
      return Err("max_gossip_facts must be > 0");
    }
    Ok(())
  }
}

impl Default for SwimSettings {
  fn default() -> Self {
    Self::new()
  }
}
