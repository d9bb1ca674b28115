//! Directives produced while applying incoming gossip.

use super::LogLevel;
use crate::core::membership::{MemberStatus, StatusChange, SwimNode};

/// What the driver must do with one incoming gossip fact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GossipDirective {
  /// The fact concerns an unknown node; the driver must establish an
  /// association before the member can be added with the given status.
  Connect {
    /// Node to associate with.
    node:   SwimNode,
    /// Status to apply once the association exists.
    status: MemberStatus,
  },
  /// The fact merged into the membership.
  Applied {
    /// The transition that was applied.
    change: StatusChange,
  },
  /// Gossip declared the local node dead; the cluster considers this
  /// node gone even though the process keeps running.
  LocalNodeDead,
  /// The fact was dropped; `level` suggests how loudly to say so.
  Ignored {
    /// Suggested severity for diagnostics.
    level:   LogLevel,
    /// Human-readable reason.
    message: &'static str,
  },
}
