//! Outcome of a single probe as observed by the shell.

use crate::core::{gossip::GossipPayload, membership::Incarnation};

/// What a direct or aggregated indirect probe resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeResult {
  /// The target acknowledged.
  Ack {
    /// Incarnation asserted by the target.
    incarnation: Incarnation,
    /// Gossip piggybacked on the ack.
    payload:     GossipPayload,
  },
  /// A relay answered that its own probe of the target failed.
  Nack,
  /// No acknowledgement arrived within the timeout.
  Timeout,
}
