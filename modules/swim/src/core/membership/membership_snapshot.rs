//! Point-in-time view of the membership table.

use alloc::vec::Vec;

use super::{MemberStatus, SwimNode};

/// Stable-ordered snapshot of the node-to-status mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipSnapshot {
  /// Entries ordered by node identity.
  pub entries: Vec<(SwimNode, MemberStatus)>,
}

impl MembershipSnapshot {
  /// Creates a snapshot from pre-ordered entries.
  #[must_use]
  pub const fn new(entries: Vec<(SwimNode, MemberStatus)>) -> Self {
    Self { entries }
  }

  /// Looks up the status recorded for a node.
  #[must_use]
  pub fn status_of(&self, node: &SwimNode) -> Option<&MemberStatus> {
    self.entries.iter().find(|(entry, _)| entry == node).map(|(_, status)| status)
  }

  /// Number of entries in the snapshot.
  #[must_use]
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  /// Returns true when the snapshot holds no entries.
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}
