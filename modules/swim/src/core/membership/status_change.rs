//! Applied status transition of a single member.

use super::{MemberStatus, PeerRef, Reachability};

/// Records a status transition applied to a member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
  /// The member the transition applies to.
  pub peer:     PeerRef,
  /// Status before the transition; absent when the member was just added.
  pub previous: Option<MemberStatus>,
  /// Status after the transition.
  pub current:  MemberStatus,
}

impl StatusChange {
  /// Creates a status change record.
  #[must_use]
  pub const fn new(peer: PeerRef, previous: Option<MemberStatus>, current: MemberStatus) -> Self {
    Self { peer, previous, current }
  }

  /// Returns the reachability the member crossed into, or `None` when the
  /// transition stays within one reachability class.
  ///
  /// A member seen for the first time counts as crossing out of the
  /// unreachable class, so newly added reachable members produce exactly
  /// one `Reachable` crossing.
  #[must_use]
  pub fn reachability_crossing(&self) -> Option<Reachability> {
    let before = self.previous.as_ref().map_or(Reachability::Unreachable, Reachability::of);
    let after = Reachability::of(&self.current);
    if before == after { None } else { Some(after) }
  }
}
