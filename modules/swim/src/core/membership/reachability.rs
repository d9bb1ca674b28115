//! Reachability classification of member statuses.

use super::MemberStatus;

/// Two-valued reachability view reported to the cluster layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reachability {
  /// The member answers, or is still within its suspicion window.
  Reachable,
  /// The member's suspicion window elapsed, or it is dead.
  Unreachable,
}

impl Reachability {
  /// Classifies a status: alive and suspect are reachable, unreachable
  /// and dead are not.
  #[must_use]
  pub const fn of(status: &MemberStatus) -> Self {
    match status {
      | MemberStatus::Alive { .. } | MemberStatus::Suspect { .. } => Self::Reachable,
      | MemberStatus::Unreachable { .. } | MemberStatus::Dead => Self::Unreachable,
    }
  }
}
