//! Instance-side classification of an indirect-probe result.

use crate::core::{gossip::GossipPayload, membership::Incarnation};

/// How the instance classified the completion of an indirect probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PingRequestOutcome {
  /// A relay reached the target; the driver should process the payload
  /// and mark the member alive.
  Alive {
    /// Incarnation asserted by the target.
    incarnation: Incarnation,
    /// Gossip piggybacked on the relayed ack.
    payload:     GossipPayload,
  },
  /// Every path to the target failed; the member was moved to suspect.
  NewlySuspect,
  /// Only nacks came back; state is unchanged.
  NackReceived,
  /// The result carried no actionable information.
  Ignored,
}
