//! Wire representation of protocol messages.


use serde::{Deserialize, Serialize};

use super::{WireNode, WirePayload};
use crate::core::{detection::SwimMessage, membership::PeerRef};

/// Wire representation of the protocol messages; the encoding itself is
/// the transport's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WireMessage {
  /// Direct probe.
  Ping {
    /// Peer the ack should be addressed to.
    reply_to: WireNode,
    /// Piggybacked gossip.
    payload:  WirePayload,
  },
  /// Indirect probe request.
  PingReq {
    /// Peer to probe.
    target:   WireNode,
    /// Peer the result should be addressed to.
    reply_to: WireNode,
    /// Piggybacked gossip.
    payload:  WirePayload,
  },
  /// Acknowledgement of a probe.
  Ack {
    /// Peer the ack is about.
    target:      WireNode,
    /// Incarnation asserted by that peer.
    incarnation: u64,
    /// Piggybacked gossip.
    payload:     WirePayload,
  },
  /// Negative acknowledgement.
  Nack {
    /// Peer the nack is about.
    target: WireNode,
  },
}

impl WireMessage {
  /// Converts from the core message.
  #[must_use]
  pub fn from_message(message: &SwimMessage) -> Self {
    match message {
      | SwimMessage::Ping { reply_to, payload } => Self::Ping {
        reply_to: WireNode::from_node(reply_to.node()),
        payload:  WirePayload::from_payload(payload),
      },
      | SwimMessage::PingReq { target, reply_to, payload } => Self::PingReq {
        target:   WireNode::from_node(target.node()),
        reply_to: WireNode::from_node(reply_to.node()),
        payload:  WirePayload::from_payload(payload),
      },
      | SwimMessage::Ack { target, incarnation, payload } => Self::Ack {
        target:      WireNode::from_node(target.node()),
        incarnation: incarnation.value(),
        payload:     WirePayload::from_payload(payload),
      },
      | SwimMessage::Nack { target } => Self::Nack { target: WireNode::from_node(target.node()) },
    }
  }

  /// Converts into the core message.
  #[must_use]
  pub fn to_message(&self) -> SwimMessage {
    use crate::core::membership::Incarnation;
    match self {
      | Self::Ping { reply_to, payload } => SwimMessage::Ping {
        reply_to: PeerRef::new(reply_to.to_node()),
        payload:  payload.to_payload(),
      },
      | Self::PingReq { target, reply_to, payload } => SwimMessage::PingReq {
        target:   PeerRef::new(target.to_node()),
        reply_to: PeerRef::new(reply_to.to_node()),
        payload:  payload.to_payload(),
      },
      | Self::Ack { target, incarnation, payload } => SwimMessage::Ack {
        target:      PeerRef::new(target.to_node()),
        incarnation: Incarnation::new(*incarnation),
        payload:     payload.to_payload(),
      },
      | Self::Nack { target } => SwimMessage::Nack { target: PeerRef::new(target.to_node()) },
    }
  }
}
