//! Protocol message schema.

use crate::core::{gossip::GossipPayload, membership::{Incarnation, PeerRef}};

/// Wire-level protocol messages; encoding is the transport's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwimMessage {
  /// Direct probe.
  Ping {
    /// Peer the ack should be addressed to.
    reply_to: PeerRef,
    /// Piggybacked gossip.
    payload:  GossipPayload,
  },
  /// Indirect probe request: probe `target` on behalf of `reply_to`.
  PingReq {
    /// Peer to probe.
    target:   PeerRef,
    /// Peer the result should be addressed to.
    reply_to: PeerRef,
    /// Piggybacked gossip.
    payload:  GossipPayload,
  },
  /// Acknowledgement of a probe.
  Ack {
    /// Peer the ack is about.
    target:      PeerRef,
    /// Incarnation asserted by that peer.
    incarnation: Incarnation,
    /// Piggybacked gossip.
    payload:     GossipPayload,
  },
  /// Negative acknowledgement: the relay could not reach the target.
  Nack {
    /// Peer the nack is about.
    target: PeerRef,
  },
}
