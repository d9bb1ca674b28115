//! Events feeding the local health multiplier.

/// Observations that adjust the local health multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalHealthEvent {
  /// A direct probe was acknowledged in time.
  SuccessfulProbe,
  /// A direct probe timed out.
  FailedProbe,
  /// A probe performed on behalf of another node timed out, so the
  /// origin will receive a nack instead of an ack.
  ProbeWithMissedNack,
  /// The local node had to refute a suspicion about itself.
  RefutingSuspectMessageAboutSelf,
}
