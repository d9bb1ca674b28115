use alloc::{collections::BTreeSet, string::ToString, vec};
use core::time::Duration;

use lifebuoy_utils_rs::core::time::TimerInstant;

use super::MembershipTable;
use crate::core::membership::{
  Incarnation, MarkResult, MemberStatus, MembershipError, PeerRef, StatusChange, SwimNode,
};

fn peer(name: &str) -> PeerRef {
  PeerRef::new(SwimNode::new(name.to_string(), 7001, 1))
}

fn now(seconds: u64) -> TimerInstant {
  TimerInstant::from_ticks(seconds, Duration::from_secs(1))
}

fn table() -> MembershipTable {
  MembershipTable::new(peer("local"))
}

#[test]
fn local_member_starts_alive_at_incarnation_zero() {
  let table = table();
  assert_eq!(table.local_incarnation(), Incarnation::zero());
  let local_node = table.local_node().clone();
  let local = table.member(&local_node).unwrap();
  assert!(local.status.is_alive());
}

#[test]
fn merge_on_unknown_member_is_an_error() {
  let mut table = table();
  let node = peer("ghost").node().clone();
  let result = table.merge(&node, &MemberStatus::alive(Incarnation::zero()), 0, now(0));
  assert_eq!(result, Err(MembershipError::UnknownMember { node }));
}

#[test]
fn suspicion_sets_and_clears_started_at() {
  let mut table = table();
  let member = peer("b");
  table.insert(member.clone(), MemberStatus::alive(Incarnation::zero()), 0, now(0)).unwrap();

  let suspecters: BTreeSet<SwimNode> = vec![peer("local").node().clone()].into_iter().collect();
  table
    .merge(member.node(), &MemberStatus::suspect(Incarnation::zero(), suspecters), 1, now(5))
    .unwrap();
  assert_eq!(table.member(member.node()).unwrap().suspicion_started_at, Some(now(5)));

  table.merge(member.node(), &MemberStatus::alive(Incarnation::new(1)), 2, now(6)).unwrap();
  assert_eq!(table.member(member.node()).unwrap().suspicion_started_at, None);
}

#[test]
fn growing_suspecter_union_keeps_the_original_window() {
  let mut table = table();
  let member = peer("b");
  table.insert(member.clone(), MemberStatus::alive(Incarnation::zero()), 0, now(0)).unwrap();

  let first: BTreeSet<SwimNode> = vec![peer("local").node().clone()].into_iter().collect();
  table.merge(member.node(), &MemberStatus::suspect(Incarnation::zero(), first), 1, now(5)).unwrap();

  let second: BTreeSet<SwimNode> = vec![peer("c").node().clone()].into_iter().collect();
  let result =
    table.merge(member.node(), &MemberStatus::suspect(Incarnation::zero(), second), 2, now(9)).unwrap();
  assert!(matches!(result, MarkResult::Applied { .. }));
  assert_eq!(table.member(member.node()).unwrap().suspicion_started_at, Some(now(5)));
  assert_eq!(table.member(member.node()).unwrap().suspecter_count(), 2);
}

#[test]
fn dead_members_stay_dead() {
  let mut table = table();
  let member = peer("b");
  table.insert(member.clone(), MemberStatus::alive(Incarnation::new(2)), 0, now(0)).unwrap();

  table.merge(member.node(), &MemberStatus::Dead, 1, now(1)).unwrap();
  let result = table.merge(member.node(), &MemberStatus::alive(Incarnation::new(9)), 2, now(2)).unwrap();
  assert_eq!(result, MarkResult::IgnoredDueToOlderStatus { current: MemberStatus::Dead });
}

#[test]
fn tombstones_survive_until_the_grace_period_elapses() {
  let mut table = table();
  let member = peer("b");
  table.insert(member.clone(), MemberStatus::alive(Incarnation::zero()), 0, now(0)).unwrap();
  table.merge(member.node(), &MemberStatus::Dead, 1, now(10)).unwrap();

  let ttl = Duration::from_secs(100);
  assert!(table.prune_tombstones(now(50), ttl).is_empty());
  assert!(table.contains(member.node()));

  let pruned = table.prune_tombstones(now(110), ttl);
  assert_eq!(pruned, vec![member.node().clone()]);
  assert!(!table.contains(member.node()));
}

#[test]
fn probe_targets_exclude_local_and_dead() {
  let mut table = table();
  table.insert(peer("b"), MemberStatus::alive(Incarnation::zero()), 0, now(0)).unwrap();
  table.insert(peer("c"), MemberStatus::Dead, 0, now(0)).unwrap();

  let targets = table.probe_targets();
  assert_eq!(targets, vec![peer("b").node().clone()]);
}

#[test]
fn helper_candidates_exclude_target_local_and_non_live() {
  let mut table = table();
  table.insert(peer("b"), MemberStatus::alive(Incarnation::zero()), 0, now(0)).unwrap();
  table.insert(peer("c"), MemberStatus::alive(Incarnation::zero()), 0, now(0)).unwrap();
  table
    .insert(peer("d"), MemberStatus::Unreachable { incarnation: Incarnation::zero() }, 0, now(0))
    .unwrap();

  let helpers = table.helper_candidates(peer("b").node());
  assert_eq!(helpers, vec![peer("c")]);
}

#[test]
fn refute_local_bumps_the_recorded_status() {
  let mut table = table();
  let change = table.refute_local(Incarnation::new(6), 3).unwrap();
  assert_eq!(
    change,
    StatusChange::new(
      peer("local"),
      Some(MemberStatus::alive(Incarnation::zero())),
      MemberStatus::alive(Incarnation::new(6)),
    )
  );
  assert_eq!(table.local_incarnation(), Incarnation::new(6));
}
