//! Selects which membership facts to piggyback on outgoing messages.

#[cfg(test)]
mod tests;

use alloc::{collections::BTreeMap, vec::Vec};

use super::{GossipFact, GossipPayload};
use crate::core::membership::{MemberStatus, MergeOutcome, PeerRef, SwimNode};

#[derive(Debug, Clone)]
struct DisseminatedFact {
  peer:         PeerRef,
  status:       MemberStatus,
  disseminated: u32,
}

/// Builds gossip payloads and tracks per-fact dissemination counts.
///
/// A fact is retransmitted until it has been included
/// `ceil(factor * ln(N + 1))` times, `N` being the live member count,
/// after which it is expelled from the gossip set.
#[derive(Debug)]
pub struct GossipSelector {
  retransmit_factor: u32,
  max_bytes:         usize,
  max_facts:         usize,
  facts:             BTreeMap<SwimNode, DisseminatedFact>,
  recipient_views:   BTreeMap<SwimNode, BTreeMap<SwimNode, MemberStatus>>,
}

impl GossipSelector {
  /// Creates a selector with the given payload budgets.
  #[must_use]
  pub const fn new(retransmit_factor: u32, max_bytes: usize, max_facts: usize) -> Self {
    Self {
      retransmit_factor,
      max_bytes,
      max_facts,
      facts: BTreeMap::new(),
      recipient_views: BTreeMap::new(),
    }
  }

  /// Records a fresh fact, restarting its dissemination count.
  pub fn record(&mut self, peer: &PeerRef, status: MemberStatus) {
    self
      .facts
      .insert(peer.node().clone(), DisseminatedFact { peer: peer.clone(), status, disseminated: 0 });
  }

  /// Drops all state about a node, typically after tombstone pruning.
  pub fn forget(&mut self, node: &SwimNode) {
    self.facts.remove(node);
    self.recipient_views.remove(node);
    for view in self.recipient_views.values_mut() {
      view.remove(node);
    }
  }

  /// Notes what `recipient` asserted about `about`, so later payloads can
  /// prioritize facts the recipient disagrees with.
  pub fn observe_recipient_view(&mut self, recipient: &SwimNode, about: &SwimNode, status: &MemberStatus) {
    self
      .recipient_views
      .entry(recipient.clone())
      .or_default()
      .insert(about.clone(), status.clone());
  }

  /// Number of inclusions after which a fact is expelled.
  #[must_use]
  pub fn dissemination_limit(&self, live_count: usize) -> u32 {
    let spread = (f64::from(self.retransmit_factor) * ((live_count as f64) + 1.0).ln()).ceil();
    (spread as u32).max(1)
  }

  /// Builds a payload for `to`, preferring refutations about the local
  /// node, then facts the recipient disagrees with, then the least
  /// disseminated facts. Included facts have their counters incremented;
  /// exhausted facts are expelled.
  pub fn make_payload(&mut self, to: &SwimNode, local: &SwimNode, live_count: usize) -> GossipPayload {
    let limit = self.dissemination_limit(live_count);
    let recipient_view = self.recipient_views.get(to);

    let mut order: Vec<(u8, u32, SwimNode)> = self
      .facts
      .iter()
      .map(|(node, fact)| {
        let priority = if node == local {
          0
        } else if recipient_view.is_some_and(|view| Self::disagrees(view.get(node), &fact.status)) {
          1
        } else {
          2
        };
        (priority, fact.disseminated, node.clone())
      })
      .collect();
    order.sort();

    let mut entries = Vec::new();
    let mut bytes = 0usize;
    let mut exhausted = Vec::new();
    for (_, _, node) in order {
      if entries.len() >= self.max_facts {
        break;
      }
      let Some(fact) = self.facts.get_mut(&node) else {
        continue;
      };
      let entry = GossipFact::new(fact.peer.clone(), fact.status.clone());
      let entry_len = entry.estimated_wire_len();
      if bytes + entry_len > self.max_bytes {
        break;
      }
      bytes += entry_len;
      entries.push(entry);
      fact.disseminated += 1;
      if fact.disseminated >= limit {
        exhausted.push(node);
      }
    }
    for node in exhausted {
      self.facts.remove(&node);
    }

    GossipPayload::from_entries(entries)
  }

  /// Current dissemination count of the fact about `node`, if pending.
  #[must_use]
  pub fn dissemination_count(&self, node: &SwimNode) -> Option<u32> {
    self.facts.get(node).map(|fact| fact.disseminated)
  }

  /// Number of facts pending dissemination.
  #[must_use]
  pub fn pending_fact_count(&self) -> usize {
    self.facts.len()
  }

  fn disagrees(recipient_belief: Option<&MemberStatus>, ours: &MemberStatus) -> bool {
    match recipient_belief {
      | Some(theirs) => matches!(theirs.merge(ours), MergeOutcome::Applied { .. }),
      | None => false,
    }
  }
}
