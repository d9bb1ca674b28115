//! Shuffled round-robin probe order.


use alloc::vec::Vec;

use rand::{Rng, seq::SliceRandom};

use crate::core::membership::{MembershipTable, SwimNode};

/// Maintains a shuffled permutation of probe-eligible members.
///
/// The cursor walks the permutation once; reaching the end reshuffles.
/// Members that join mid-cycle are inserted at a random position in the
/// remaining slice so they are neither starved nor probed out of turn.
#[derive(Debug, Default)]
pub struct ProbeSchedule {
  ring:   Vec<SwimNode>,
  cursor: usize,
}

impl ProbeSchedule {
  /// Creates an empty schedule.
  #[must_use]
  pub const fn new() -> Self {
    Self { ring: Vec::new(), cursor: 0 }
  }

  /// Inserts a newly added member at a random position in the remaining
  /// slice of the current cycle.
  pub fn note_member_added<R: Rng>(&mut self, node: SwimNode, rng: &mut R) {
    if self.ring.contains(&node) {
      return;
    }
    let position = rng.gen_range(self.cursor..=self.ring.len());
    self.ring.insert(position, node);
  }

  /// Drops a member from the current cycle.
  pub fn note_member_removed(&mut self, node: &SwimNode) {
    if let Some(position) = self.ring.iter().position(|entry| entry == node) {
      self.ring.remove(position);
      if position < self.cursor {
        self.cursor -= 1;
      }
    }
  }

  /// Returns the next member to probe, reshuffling when the cycle is
  /// exhausted. Members that became dead or unknown since they were
  /// scheduled are skipped.
  pub fn next_member_to_ping<R: Rng>(&mut self, table: &MembershipTable, rng: &mut R) -> Option<SwimNode> {
    let mut rebuilt = false;
    loop {
      while self.cursor < self.ring.len() {
        let node = self.ring[self.cursor].clone();
        self.cursor += 1;
        let eligible = node != *table.local_node()
          && table.member(&node).is_some_and(|member| member.status.is_probe_eligible());
        if eligible {
          return Some(node);
        }
      }
      if rebuilt {
        return None;
      }
      self.rebuild(table, rng);
      rebuilt = true;
      if self.ring.is_empty() {
        return None;
      }
    }
  }

  /// Members remaining in the current cycle, in probe order.
  #[must_use]
  pub fn remaining(&self) -> &[SwimNode] {
    &self.ring[self.cursor..]
  }

  fn rebuild<R: Rng>(&mut self, table: &MembershipTable, rng: &mut R) {
    self.ring = table.probe_targets();
    self.ring.shuffle(rng);
    self.cursor = 0;
  }
}
