//! Wire representation of a member status.


use alloc::{collections::BTreeSet, vec::Vec};

use serde::{Deserialize, Serialize};

use super::WireNode;
use crate::core::membership::{Incarnation, MemberStatus, SwimNode};

/// Wire representation of a member status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireStatus {
  /// Status encoded as u8.
  pub tag:          u8,
  /// Incarnation; meaningless for dead.
  pub incarnation:  u64,
  /// Suspecting nodes; empty unless suspect.
  pub suspected_by: Vec<WireNode>,
}

impl WireStatus {
  /// Converts from the core status.
  #[must_use]
  pub fn from_status(status: &MemberStatus) -> Self {
    match status {
      | MemberStatus::Alive { incarnation } =>
        Self { tag: 0, incarnation: incarnation.value(), suspected_by: Vec::new() },
      | MemberStatus::Suspect { incarnation, suspected_by } => Self {
        tag:          1,
        incarnation:  incarnation.value(),
        suspected_by: suspected_by.iter().map(WireNode::from_node).collect(),
      },
      | MemberStatus::Unreachable { incarnation } =>
        Self { tag: 2, incarnation: incarnation.value(), suspected_by: Vec::new() },
      | MemberStatus::Dead => Self { tag: 3, incarnation: 0, suspected_by: Vec::new() },
    }
  }

  /// Converts into the core status; `None` for an unknown tag or a
  /// suspicion without suspecters.
  #[must_use]
  pub fn to_status(&self) -> Option<MemberStatus> {
    match self.tag {
      | 0 => Some(MemberStatus::alive(Incarnation::new(self.incarnation))),
      | 1 => {
        let suspected_by: BTreeSet<SwimNode> = self.suspected_by.iter().map(WireNode::to_node).collect();
        if suspected_by.is_empty() {
          return None;
        }
        Some(MemberStatus::suspect(Incarnation::new(self.incarnation), suspected_by))
      },
      | 2 => Some(MemberStatus::Unreachable { incarnation: Incarnation::new(self.incarnation) }),
      | 3 => Some(MemberStatus::Dead),
      | _ => None,
    }
  }
}
