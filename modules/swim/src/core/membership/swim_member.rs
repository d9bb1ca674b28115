//! Member record stored in the membership table.

use lifebuoy_utils_rs::core::time::TimerInstant;

use super::{MemberStatus, PeerRef};

/// Captures the current view of a single peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwimMember {
  /// Addressable handle for the peer.
  pub peer:                 PeerRef,
  /// Current status.
  pub status:               MemberStatus,
  /// Protocol period in which the status was last updated.
  pub protocol_period:      u64,
  /// When the current suspicion began; set iff the status is suspect.
  pub suspicion_started_at: Option<TimerInstant>,
}

impl SwimMember {
  /// Creates a member record.
  #[must_use]
  pub const fn new(
    peer: PeerRef,
    status: MemberStatus,
    protocol_period: u64,
    suspicion_started_at: Option<TimerInstant>,
  ) -> Self {
    Self { peer, status, protocol_period, suspicion_started_at }
  }

  /// Number of nodes currently suspecting this member.
  #[must_use]
  pub fn suspecter_count(&self) -> usize {
    match &self.status {
      | MemberStatus::Suspect { suspected_by, .. } => suspected_by.len(),
      | _ => 0,
    }
  }
}
