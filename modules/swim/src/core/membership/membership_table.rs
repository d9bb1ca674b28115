//! The set of known peers and their statuses.

#[cfg(test)]
mod tests;

use alloc::{collections::BTreeMap, vec::Vec};
use core::time::Duration;

use lifebuoy_utils_rs::core::time::TimerInstant;

use super::{
  Incarnation, MarkResult, MemberStatus, MembershipError, MembershipSnapshot, MergeOutcome, PeerRef, StatusChange,
  SwimMember, SwimNode,
};

/// Mapping from node identity to member record.
///
/// The local node is always present with an `Alive` status; dead members
/// are retained as tombstones until pruned. Iteration order is the node
/// order of the underlying map, which keeps tests reproducible.
#[derive(Debug)]
pub struct MembershipTable {
  local:   SwimNode,
  members: BTreeMap<SwimNode, SwimMember>,
  dead_at: BTreeMap<SwimNode, TimerInstant>,
}

impl MembershipTable {
  /// Creates a table holding only the local member at `alive(0)`.
  #[must_use]
  pub fn new(local_peer: PeerRef) -> Self {
    let local = local_peer.node().clone();
    let mut members = BTreeMap::new();
    members
      .insert(local.clone(), SwimMember::new(local_peer, MemberStatus::alive(Incarnation::zero()), 0, None));
    Self { local, members, dead_at: BTreeMap::new() }
  }

  /// Returns the local node identity.
  #[must_use]
  pub const fn local_node(&self) -> &SwimNode {
    &self.local
  }

  /// Returns the local node's current incarnation.
  #[must_use]
  pub fn local_incarnation(&self) -> Incarnation {
    self
      .members
      .get(&self.local)
      .and_then(|member| member.status.incarnation())
      .unwrap_or_else(Incarnation::zero)
  }

  /// Returns true when the node is known, tombstones included.
  #[must_use]
  pub fn contains(&self, node: &SwimNode) -> bool {
    self.members.contains_key(node)
  }

  /// Looks up the member record for a node.
  #[must_use]
  pub fn member(&self, node: &SwimNode) -> Option<&SwimMember> {
    self.members.get(node)
  }

  /// Inserts a previously unknown member.
  ///
  /// # Errors
  ///
  /// Returns [`MembershipError::LocalNodeImmutable`] for the local node.
  pub fn insert(
    &mut self,
    peer: PeerRef,
    status: MemberStatus,
    protocol_period: u64,
    now: TimerInstant,
  ) -> Result<StatusChange, MembershipError> {
    let node = peer.node().clone();
    if node == self.local {
      return Err(MembershipError::LocalNodeImmutable);
    }
    let suspicion_started_at = status.is_suspect().then_some(now);
    if status.is_dead() {
      self.dead_at.insert(node.clone(), now);
    }
    let member = SwimMember::new(peer.clone(), status.clone(), protocol_period, suspicion_started_at);
    self.members.insert(node, member);
    Ok(StatusChange::new(peer, None, status))
  }

  /// Merges a status assertion into an existing member.
  ///
  /// # Errors
  ///
  /// Returns [`MembershipError::UnknownMember`] when the node is absent
  /// and [`MembershipError::LocalNodeImmutable`] for the local node,
  /// which only changes through refutation.
  pub fn merge(
    &mut self,
    node: &SwimNode,
    incoming: &MemberStatus,
    protocol_period: u64,
    now: TimerInstant,
  ) -> Result<MarkResult, MembershipError> {
    if *node == self.local {
      return Err(MembershipError::LocalNodeImmutable);
    }
    let Some(member) = self.members.get_mut(node) else {
      return Err(MembershipError::UnknownMember { node: node.clone() });
    };

    match member.status.merge(incoming) {
      | MergeOutcome::Unchanged =>
        Ok(MarkResult::IgnoredDueToOlderStatus { current: member.status.clone() }),
      | MergeOutcome::Applied { status } => {
        let previous = member.status.clone();
        member.suspicion_started_at = match (&previous, &status) {
          // A fresh suspicion starts its window now; a growing suspecter
          // union keeps the original window.
          | (MemberStatus::Suspect { .. }, MemberStatus::Suspect { .. }) => member.suspicion_started_at,
          | (_, MemberStatus::Suspect { .. }) => Some(now),
          | _ => None,
        };
        member.status = status.clone();
        member.protocol_period = protocol_period;
        if status.is_dead() {
          self.dead_at.insert(node.clone(), now);
        }
        Ok(MarkResult::Applied { change: StatusChange::new(member.peer.clone(), Some(previous), status) })
      },
    }
  }

  /// Replaces the local status with `alive(incarnation)` after refuting a
  /// suspicion, returning the applied transition.
  pub fn refute_local(&mut self, incarnation: Incarnation, protocol_period: u64) -> Option<StatusChange> {
    let member = self.members.get_mut(&self.local)?;
    let previous = member.status.clone();
    member.status = MemberStatus::alive(incarnation);
    member.protocol_period = protocol_period;
    member.suspicion_started_at = None;
    Some(StatusChange::new(member.peer.clone(), Some(previous), member.status.clone()))
  }

  /// Iterates all members, the local node included.
  pub fn members(&self) -> impl Iterator<Item = &SwimMember> {
    self.members.values()
  }

  /// Iterates members currently in suspect status.
  pub fn suspects(&self) -> impl Iterator<Item = &SwimMember> {
    self.members.values().filter(|member| member.status.is_suspect())
  }

  /// Number of members counted as live for gossip sizing: alive or
  /// suspect, the local node included.
  #[must_use]
  pub fn live_count(&self) -> usize {
    self
      .members
      .values()
      .filter(|member| member.status.is_alive() || member.status.is_suspect())
      .count()
  }

  /// Nodes eligible for probing: non-local and not dead.
  #[must_use]
  pub fn probe_targets(&self) -> Vec<SwimNode> {
    self
      .members
      .values()
      .filter(|member| *member.peer.node() != self.local && member.status.is_probe_eligible())
      .map(|member| member.peer.node().clone())
      .collect()
  }

  /// Alive or suspect peers other than the local node and `exclude`,
  /// candidates for relaying an indirect probe.
  #[must_use]
  pub fn helper_candidates(&self, exclude: &SwimNode) -> Vec<PeerRef> {
    self
      .members
      .values()
      .filter(|member| {
        let node = member.peer.node();
        *node != self.local && node != exclude && (member.status.is_alive() || member.status.is_suspect())
      })
      .map(|member| member.peer.clone())
      .collect()
  }

  /// Removes tombstones that have outlived the grace period, returning
  /// the pruned nodes.
  pub fn prune_tombstones(&mut self, now: TimerInstant, ttl: Duration) -> Vec<SwimNode> {
    let expired: Vec<SwimNode> = self
      .dead_at
      .iter()
      .filter(|(_, died_at)| now >= died_at.saturating_add(ttl))
      .map(|(node, _)| node.clone())
      .collect();
    for node in expired.iter() {
      self.members.remove(node);
      self.dead_at.remove(node);
    }
    expired
  }

  /// Produces a stable-ordered snapshot of the node-to-status mapping.
  #[must_use]
  pub fn snapshot(&self) -> MembershipSnapshot {
    let entries = self
      .members
      .iter()
      .map(|(node, member)| (node.clone(), member.status.clone()))
      .collect();
    MembershipSnapshot::new(entries)
  }
}
