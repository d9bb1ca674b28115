//! Member status algebra.

#[cfg(test)]
mod tests;

use alloc::collections::BTreeSet;
use core::fmt;

use super::{Incarnation, MergeOutcome, SwimNode};

/// Membership status of a peer as seen by the local node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberStatus {
  /// The peer answers probes.
  Alive {
    /// Incarnation the assertion refers to.
    incarnation: Incarnation,
  },
  /// Probes failed; the peer has a bounded window to refute.
  Suspect {
    /// Incarnation the suspicion refers to.
    incarnation:  Incarnation,
    /// Nodes that independently suspect the peer.
    suspected_by: BTreeSet<SwimNode>,
  },
  /// The suspicion window elapsed without refutation.
  Unreachable {
    /// Incarnation the assertion refers to.
    incarnation: Incarnation,
  },
  /// Terminal tombstone; the peer is never readmitted.
  Dead,
}

impl MemberStatus {
  /// Creates an alive status at the given incarnation.
  #[must_use]
  pub const fn alive(incarnation: Incarnation) -> Self {
    Self::Alive { incarnation }
  }

  /// Creates a suspect status with a single suspecter.
  #[must_use]
  pub fn suspect(incarnation: Incarnation, suspected_by: BTreeSet<SwimNode>) -> Self {
    Self::Suspect { incarnation, suspected_by }
  }

  /// Returns the incarnation this status refers to, absent for `Dead`.
  #[must_use]
  pub const fn incarnation(&self) -> Option<Incarnation> {
    match self {
      | Self::Alive { incarnation } | Self::Suspect { incarnation, .. } | Self::Unreachable { incarnation } =>
        Some(*incarnation),
      | Self::Dead => None,
    }
  }

  /// Returns true for `Alive`.
  #[must_use]
  pub const fn is_alive(&self) -> bool {
    matches!(self, Self::Alive { .. })
  }

  /// Returns true for `Suspect`.
  #[must_use]
  pub const fn is_suspect(&self) -> bool {
    matches!(self, Self::Suspect { .. })
  }

  /// Returns true for `Unreachable`.
  #[must_use]
  pub const fn is_unreachable(&self) -> bool {
    matches!(self, Self::Unreachable { .. })
  }

  /// Returns true for `Dead`.
  #[must_use]
  pub const fn is_dead(&self) -> bool {
    matches!(self, Self::Dead)
  }

  /// Returns true when the member may still be probed.
  #[must_use]
  pub const fn is_probe_eligible(&self) -> bool {
    !self.is_dead()
  }

  /// Rank used to order statuses at equal incarnation.
  #[must_use]
  pub const fn precedence(&self) -> u8 {
    match self {
      | Self::Alive { .. } => 0,
      | Self::Suspect { .. } => 1,
      | Self::Unreachable { .. } => 2,
      | Self::Dead => 3,
    }
  }

  /// Merges an incoming assertion into the current status.
  ///
  /// Higher incarnation wins outright; at equal incarnation the
  /// precedence `alive < suspect < unreachable < dead` decides, except
  /// that two suspicions at the same incarnation merge their suspecter
  /// sets. `Dead` is terminal. The merge is idempotent and, at equal
  /// incarnation, commutative.
  #[must_use]
  pub fn merge(&self, incoming: &Self) -> MergeOutcome {
    if self.is_dead() {
      return MergeOutcome::Unchanged;
    }
    if incoming.is_dead() {
      return MergeOutcome::Applied { status: Self::Dead };
    }

    // Both carry incarnations from here on.
    let (Some(current_inc), Some(incoming_inc)) = (self.incarnation(), incoming.incarnation()) else {
      return MergeOutcome::Unchanged;
    };

    if incoming_inc > current_inc {
      return MergeOutcome::Applied { status: incoming.clone() };
    }
    if incoming_inc < current_inc {
      return MergeOutcome::Unchanged;
    }

    match (self, incoming) {
      | (
        Self::Suspect { suspected_by: current_set, .. },
        Self::Suspect { suspected_by: incoming_set, incarnation },
      ) => {
        if incoming_set.is_subset(current_set) {
          return MergeOutcome::Unchanged;
        }
        let union: BTreeSet<SwimNode> = current_set.union(incoming_set).cloned().collect();
        MergeOutcome::Applied { status: Self::Suspect { incarnation: *incarnation, suspected_by: union } }
      },
      | _ if incoming.precedence() > self.precedence() => MergeOutcome::Applied { status: incoming.clone() },
      | _ => MergeOutcome::Unchanged,
    }
  }

  /// Rough wire footprint, used for payload budgeting.
  #[must_use]
  pub fn estimated_wire_len(&self) -> usize {
    match self {
      | Self::Suspect { suspected_by, .. } =>
        9 + suspected_by.iter().map(SwimNode::estimated_wire_len).sum::<usize>(),
      | _ => 9,
    }
  }
}

impl fmt::Display for MemberStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      | Self::Alive { incarnation } => write!(f, "alive({})", incarnation.value()),
      | Self::Suspect { incarnation, suspected_by } =>
        write!(f, "suspect({}, {} suspecters)", incarnation.value(), suspected_by.len()),
      | Self::Unreachable { incarnation } => write!(f, "unreachable({})", incarnation.value()),
      | Self::Dead => write!(f, "dead"),
    }
  }
}
