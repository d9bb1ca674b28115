//! Opaque addressable handle bound to a node.

use core::fmt;

use super::SwimNode;

/// Addressable handle bound to a [`SwimNode`].
///
/// Peers are minted by the transport; the core only carries the identity
/// and never holds connection state.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PeerRef {
  node: SwimNode,
}

impl PeerRef {
  /// Creates a handle for the given node identity.
  #[must_use]
  pub const fn new(node: SwimNode) -> Self {
    Self { node }
  }

  /// Returns the node identity this peer addresses.
  #[must_use]
  pub const fn node(&self) -> &SwimNode {
    &self.node
  }
}

impl fmt::Display for PeerRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.node)
  }
}
