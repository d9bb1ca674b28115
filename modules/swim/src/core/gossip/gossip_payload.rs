//! Gossip payload piggybacked on protocol messages.

use alloc::vec::Vec;

use super::GossipFact;

/// Membership facts attached to an outgoing message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GossipPayload {
  /// Nothing to disseminate.
  #[default]
  None,
  /// A bounded list of membership facts.
  Membership {
    /// Facts in selection order.
    entries: Vec<GossipFact>,
  },
}

impl GossipPayload {
  /// Wraps facts into a payload, collapsing an empty list into `None`.
  #[must_use]
  pub fn from_entries(entries: Vec<GossipFact>) -> Self {
    if entries.is_empty() { Self::None } else { Self::Membership { entries } }
  }

  /// Returns the carried facts, empty for `None`.
  #[must_use]
  pub fn entries(&self) -> &[GossipFact] {
    match self {
      | Self::None => &[],
      | Self::Membership { entries } => entries,
    }
  }

  /// Returns true when nothing is carried.
  #[must_use]
  pub const fn is_none(&self) -> bool {
    matches!(self, Self::None)
  }
}
