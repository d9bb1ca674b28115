//! Wire representation of one gossip fact.

use serde::{Deserialize, Serialize};

use super::{WireNode, WireStatus};
use crate::core::{gossip::GossipFact, membership::PeerRef};

/// Wire representation of one `(peer, status)` gossip fact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireMemberEntry {
  /// The peer the fact is about.
  pub node:   WireNode,
  /// The asserted status.
  pub status: WireStatus,
}

impl WireMemberEntry {
  /// Converts from the core fact.
  #[must_use]
  pub fn from_fact(fact: &GossipFact) -> Self {
    Self { node: WireNode::from_node(fact.peer.node()), status: WireStatus::from_status(&fact.status) }
  }

  /// Converts into the core fact; `None` when the status is malformed.
  #[must_use]
  pub fn to_fact(&self) -> Option<GossipFact> {
    Some(GossipFact::new(PeerRef::new(self.node.to_node()), self.status.to_status()?))
  }
}
