use alloc::{collections::BTreeSet, string::ToString};

use super::MemberStatus;
use crate::core::membership::{Incarnation, MergeOutcome, SwimNode};

fn node(name: &str) -> SwimNode {
  SwimNode::new(name.to_string(), 7001, 1)
}

fn suspecters(names: &[&str]) -> BTreeSet<SwimNode> {
  names.iter().map(|name| node(name)).collect()
}

#[test]
fn higher_incarnation_wins_outright() {
  let current = MemberStatus::suspect(Incarnation::new(3), suspecters(&["a", "b"]));
  let incoming = MemberStatus::alive(Incarnation::new(4));
  assert_eq!(current.merge(&incoming), MergeOutcome::Applied { status: incoming.clone() });
  assert_eq!(incoming.merge(&current), MergeOutcome::Unchanged);
}

#[test]
fn equal_incarnation_orders_by_precedence() {
  let incarnation = Incarnation::new(2);
  let alive = MemberStatus::alive(incarnation);
  let suspect = MemberStatus::suspect(incarnation, suspecters(&["a"]));
  let unreachable = MemberStatus::Unreachable { incarnation };

  assert!(matches!(alive.merge(&suspect), MergeOutcome::Applied { .. }));
  assert!(matches!(suspect.merge(&unreachable), MergeOutcome::Applied { .. }));
  assert_eq!(suspect.merge(&alive), MergeOutcome::Unchanged);
  assert_eq!(unreachable.merge(&suspect), MergeOutcome::Unchanged);
}

#[test]
fn suspicion_merge_unions_suspecters() {
  let incarnation = Incarnation::new(1);
  let current = MemberStatus::suspect(incarnation, suspecters(&["a"]));
  let incoming = MemberStatus::suspect(incarnation, suspecters(&["b"]));

  let MergeOutcome::Applied { status } = current.merge(&incoming) else {
    panic!("expected union to apply");
  };
  assert_eq!(status, MemberStatus::suspect(incarnation, suspecters(&["a", "b"])));
}

#[test]
fn suspicion_merge_with_subset_is_a_no_op() {
  let incarnation = Incarnation::new(1);
  let current = MemberStatus::suspect(incarnation, suspecters(&["a", "b"]));
  let incoming = MemberStatus::suspect(incarnation, suspecters(&["b"]));
  assert_eq!(current.merge(&incoming), MergeOutcome::Unchanged);
}

#[test]
fn merge_is_idempotent() {
  let incarnation = Incarnation::new(5);
  let current = MemberStatus::alive(incarnation);
  let incoming = MemberStatus::suspect(incarnation, suspecters(&["a"]));

  let MergeOutcome::Applied { status: once } = current.merge(&incoming) else {
    panic!("expected first merge to apply");
  };
  assert_eq!(once.merge(&incoming), MergeOutcome::Unchanged);
}

#[test]
fn suspicion_merge_commutes() {
  let incarnation = Incarnation::new(1);
  let left = MemberStatus::suspect(incarnation, suspecters(&["a", "c"]));
  let right = MemberStatus::suspect(incarnation, suspecters(&["b"]));

  let MergeOutcome::Applied { status: left_first } = left.merge(&right) else {
    panic!("expected merge to apply");
  };
  let MergeOutcome::Applied { status: right_first } = right.merge(&left) else {
    panic!("expected merge to apply");
  };
  assert_eq!(left_first, right_first);
}

#[test]
fn dead_is_terminal() {
  let dead = MemberStatus::Dead;
  assert_eq!(dead.merge(&MemberStatus::alive(Incarnation::new(99))), MergeOutcome::Unchanged);
  assert_eq!(dead.merge(&MemberStatus::Dead), MergeOutcome::Unchanged);

  let alive = MemberStatus::alive(Incarnation::new(2));
  assert_eq!(alive.merge(&MemberStatus::Dead), MergeOutcome::Applied { status: MemberStatus::Dead });
}
