//! Wire representation of a gossip payload.

use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use super::WireMemberEntry;
use crate::core::gossip::GossipPayload;

/// Wire representation of a gossip payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WirePayload {
  /// Nothing piggybacked.
  None,
  /// Membership facts in selection order.
  Membership {
    /// The carried facts.
    entries: Vec<WireMemberEntry>,
  },
}

impl WirePayload {
  /// Converts from the core payload.
  #[must_use]
  pub fn from_payload(payload: &GossipPayload) -> Self {
    match payload {
      | GossipPayload::None => Self::None,
      | GossipPayload::Membership { entries } =>
        Self::Membership { entries: entries.iter().map(WireMemberEntry::from_fact).collect() },
    }
  }

  /// Converts into the core payload, dropping malformed entries.
  #[must_use]
  pub fn to_payload(&self) -> GossipPayload {
    match self {
      | Self::None => GossipPayload::None,
      | Self::Membership { entries } =>
        GossipPayload::from_entries(entries.iter().filter_map(WireMemberEntry::to_fact).collect()),
    }
  }
}
