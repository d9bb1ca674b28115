//! Membership error types.

use super::SwimNode;

/// Errors that can occur while mutating the membership table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MembershipError {
  /// Target node is not present in the table.
  UnknownMember {
    /// The unknown node.
    node: SwimNode,
  },
  /// The local node may not be mutated through the peer-facing paths.
  LocalNodeImmutable,
}
