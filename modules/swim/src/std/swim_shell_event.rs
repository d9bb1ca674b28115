//! Events the shell emits towards the cluster layer.

use crate::core::membership::{Reachability, SwimNode};

/// Outbound events of the failure detector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwimShellEvent {
  /// A member crossed between the reachable and unreachable classes.
  ReachabilityChanged {
    /// The member that crossed.
    node:         SwimNode,
    /// The class it crossed into.
    reachability: Reachability,
  },
  /// Gossip declared the local node dead; the cluster has written this
  /// node off even though the process keeps running.
  LocalNodeDeclaredDead,
}
