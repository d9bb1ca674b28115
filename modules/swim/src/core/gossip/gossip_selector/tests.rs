use alloc::{string::ToString, vec::Vec};

use super::GossipSelector;
use crate::core::{
  gossip::GossipPayload,
  membership::{Incarnation, MemberStatus, PeerRef, SwimNode},
};

fn peer(name: &str) -> PeerRef {
  PeerRef::new(SwimNode::new(name.to_string(), 7001, 1))
}

fn alive(incarnation: u64) -> MemberStatus {
  MemberStatus::alive(Incarnation::new(incarnation))
}

fn payload_nodes(payload: &GossipPayload) -> Vec<SwimNode> {
  payload.entries().iter().map(|fact| fact.peer.node().clone()).collect()
}

#[test]
fn dissemination_limit_grows_logarithmically() {
  let selector = GossipSelector::new(3, 1024, 32);
  assert_eq!(selector.dissemination_limit(1), 3);
  assert_eq!(selector.dissemination_limit(7), 7);
  assert_eq!(selector.dissemination_limit(100), 14);
}

#[test]
fn facts_are_expelled_after_the_limit() {
  let mut selector = GossipSelector::new(3, 1024, 32);
  selector.record(&peer("b"), alive(0));

  let local = peer("local").node().clone();
  let to = peer("c").node().clone();
  // live_count 1 -> limit ceil(3 * ln 2) = 3 inclusions.
  for _ in 0..3 {
    assert!(!selector.make_payload(&to, &local, 1).is_none());
  }
  assert_eq!(selector.pending_fact_count(), 0);
  assert!(selector.make_payload(&to, &local, 1).is_none());
}

#[test]
fn local_refutations_come_first() {
  let mut selector = GossipSelector::new(3, 1024, 32);
  let local = peer("zzz-local");
  selector.record(&peer("b"), alive(0));
  selector.record(&peer("c"), alive(0));
  selector.record(&local, alive(6));

  let payload = selector.make_payload(peer("b").node(), local.node(), 3);
  assert_eq!(payload_nodes(&payload).first(), Some(local.node()));
}

#[test]
fn disagreeing_recipients_are_prioritized() {
  let mut selector = GossipSelector::new(3, 1024, 2);
  let local = peer("local").node().clone();
  let recipient = peer("r").node().clone();

  selector.record(&peer("a"), alive(1));
  selector.record(&peer("b"), alive(5));
  // The recipient still believes b is at incarnation 2.
  selector.observe_recipient_view(&recipient, peer("b").node(), &alive(2));

  let payload = selector.make_payload(&recipient, &local, 4);
  assert_eq!(payload_nodes(&payload).first(), Some(peer("b").node()));
}

#[test]
fn payload_respects_the_fact_budget() {
  let mut selector = GossipSelector::new(3, 1024, 2);
  let local = peer("local").node().clone();
  selector.record(&peer("a"), alive(0));
  selector.record(&peer("b"), alive(0));
  selector.record(&peer("c"), alive(0));

  let payload = selector.make_payload(peer("x").node(), &local, 4);
  assert_eq!(payload.entries().len(), 2);
}

#[test]
fn payload_respects_the_byte_budget() {
  let per_fact = super::GossipFact::new(peer("a"), alive(0)).estimated_wire_len();
  let mut selector = GossipSelector::new(3, per_fact, 32);
  let local = peer("local").node().clone();
  selector.record(&peer("a"), alive(0));
  selector.record(&peer("b"), alive(0));

  let payload = selector.make_payload(peer("x").node(), &local, 3);
  assert_eq!(payload.entries().len(), 1);
}

#[test]
fn empty_selection_encodes_as_none() {
  let mut selector = GossipSelector::new(3, 1024, 32);
  let local = peer("local").node().clone();
  assert_eq!(selector.make_payload(peer("x").node(), &local, 1), GossipPayload::None);
}

#[test]
fn ties_break_by_node_order() {
  let mut selector = GossipSelector::new(3, 1024, 32);
  let local = peer("local").node().clone();
  selector.record(&peer("b"), alive(0));
  selector.record(&peer("a"), alive(0));

  let payload = selector.make_payload(peer("x").node(), &local, 3);
  let nodes = payload_nodes(&payload);
  assert_eq!(nodes, alloc::vec![peer("a").node().clone(), peer("b").node().clone()]);
}
