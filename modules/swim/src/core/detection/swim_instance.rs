//! The SWIM protocol state machine.


use alloc::{collections::BTreeSet, vec::Vec};
use core::time::Duration;

use lifebuoy_utils_rs::core::time::TimerInstant;
use rand::{SeedableRng, rngs::SmallRng, seq::SliceRandom};

use super::{
  GossipDirective, LocalHealth, LocalHealthEvent, LogLevel, PingRequestOutcome, ProbeResult, ProbeSchedule,
  SwimMessage, SwimSettings,
};
use crate::core::{
  gossip::{GossipFact, GossipPayload, GossipSelector},
  membership::{
    Incarnation, MarkResult, MemberStatus, MembershipError, MembershipSnapshot, MembershipTable, PeerRef,
    SwimMember, SwimNode,
  },
};

/// The pure SWIM state machine.
///
/// Holds the membership table, the gossip dissemination state, the probe
/// schedule, and the local health multiplier. Every operation is
/// deterministic given its inputs and the seeded internal RNG; the
/// instance performs no I/O, owns no timers, and receives the current
/// instant from its driver.
pub struct SwimInstance {
  settings:        SwimSettings,
  local:           PeerRef,
  table:           MembershipTable,
  selector:        GossipSelector,
  schedule:        ProbeSchedule,
  health:          LocalHealth,
  protocol_period: u64,
  rng:             SmallRng,
}

impl SwimInstance {
  /// Creates an instance for the given local peer.
  ///
  /// The local member starts at `alive(0)` and is immediately queued for
  /// dissemination so the first outgoing payloads introduce this node.
  #[must_use]
  pub fn new(local: PeerRef, settings: SwimSettings) -> Self {
    let table = MembershipTable::new(local.clone());
    let mut selector = GossipSelector::new(
      settings.gossip_retransmit_factor,
      settings.max_gossip_bytes,
      settings.max_gossip_facts,
    );
    selector.record(&local, MemberStatus::alive(Incarnation::zero()));
    let rng = SmallRng::seed_from_u64(settings.rng_seed);
    Self {
      health: LocalHealth::new(settings.lhm_max),
      settings,
      local,
      table,
      selector,
      schedule: ProbeSchedule::new(),
      protocol_period: 0,
      rng,
    }
  }

  /// The local peer handle.
  #[must_use]
  pub const fn local_peer(&self) -> &PeerRef {
    &self.local
  }

  /// The local node identity.
  #[must_use]
  pub const fn local_node(&self) -> &SwimNode {
    self.local.node()
  }

  /// The local node's current incarnation.
  #[must_use]
  pub fn local_incarnation(&self) -> Incarnation {
    self.table.local_incarnation()
  }

  /// The current protocol period.
  #[must_use]
  pub const fn protocol_period(&self) -> u64 {
    self.protocol_period
  }

  /// The settings the instance runs with.
  #[must_use]
  pub const fn settings(&self) -> &SwimSettings {
    &self.settings
  }

  /// Answers a direct probe with an ack carrying the local incarnation
  /// and a fresh payload targeted at the caller.
  pub fn on_ping(&mut self, sender: &PeerRef) -> SwimMessage {
    let payload = self.make_gossip_payload(sender);
    SwimMessage::Ack { target: self.local.clone(), incarnation: self.local_incarnation(), payload }
  }

  /// Classifies the completion of an indirect probe round.
  ///
  /// A timeout moves the target towards suspect at its last known
  /// incarnation; acks and nacks are passed back for the driver to act
  /// on.
  pub fn on_ping_request_response(
    &mut self,
    result: &ProbeResult,
    pinged: &PeerRef,
    now: TimerInstant,
  ) -> PingRequestOutcome {
    match result {
      | ProbeResult::Ack { incarnation, payload } =>
        PingRequestOutcome::Alive { incarnation: *incarnation, payload: payload.clone() },
      | ProbeResult::Nack => PingRequestOutcome::NackReceived,
      | ProbeResult::Timeout => {
        let Some(member) = self.table.member(pinged.node()) else {
          return PingRequestOutcome::Ignored;
        };
        let Some(incarnation) = member.status.incarnation() else {
          return PingRequestOutcome::Ignored;
        };
        if member.status.is_unreachable() {
          return PingRequestOutcome::Ignored;
        }
        let suspicion = self.make_suspicion(incarnation);
        match self.mark(pinged, suspicion, now) {
          | Ok(MarkResult::Applied { .. }) => PingRequestOutcome::NewlySuspect,
          | _ => PingRequestOutcome::Ignored,
        }
      },
    }
  }

  /// Applies a status assertion to a known member.
  ///
  /// # Errors
  ///
  /// Returns [`MembershipError::UnknownMember`] when the peer is absent
  /// and [`MembershipError::LocalNodeImmutable`] for the local node.
  pub fn mark(
    &mut self,
    peer: &PeerRef,
    status: MemberStatus,
    now: TimerInstant,
  ) -> Result<MarkResult, MembershipError> {
    let result = self.table.merge(peer.node(), &status, self.protocol_period, now)?;
    if let MarkResult::Applied { change } = &result {
      self.selector.record(peer, change.current.clone());
      if change.current.is_dead() {
        self.schedule.note_member_removed(peer.node());
      }
    }
    Ok(result)
  }

  /// Applies a status assertion, creating the member when absent.
  ///
  /// # Errors
  ///
  /// Returns [`MembershipError::LocalNodeImmutable`] for the local node.
  pub fn add_member(
    &mut self,
    peer: PeerRef,
    status: MemberStatus,
    now: TimerInstant,
  ) -> Result<MarkResult, MembershipError> {
    if self.table.contains(peer.node()) {
      return self.mark(&peer, status, now);
    }
    let change = self.table.insert(peer.clone(), status, self.protocol_period, now)?;
    self.selector.record(&peer, change.current.clone());
    if change.current.is_probe_eligible() {
      self.schedule.note_member_added(peer.node().clone(), &mut self.rng);
    }
    Ok(MarkResult::Applied { change })
  }

  /// Current status of a peer, if known.
  #[must_use]
  pub fn status_of(&self, peer: &PeerRef) -> Option<&MemberStatus> {
    self.table.member(peer.node()).map(|member| &member.status)
  }

  /// Returns true when the peer is known, tombstones included.
  #[must_use]
  pub fn is_member(&self, peer: &PeerRef) -> bool {
    self.table.contains(peer.node())
  }

  /// Member record for a node, if known.
  #[must_use]
  pub fn member_for(&self, node: &SwimNode) -> Option<&SwimMember> {
    self.table.member(node)
  }

  /// Next member to probe this protocol period, absent when nobody is
  /// eligible.
  pub fn next_member_to_ping(&mut self) -> Option<PeerRef> {
    let node = self.schedule.next_member_to_ping(&self.table, &mut self.rng)?;
    self.table.member(&node).map(|member| member.peer.clone())
  }

  /// Up to `indirect_checks` random helpers for probing `target`.
  pub fn members_to_ping_request(&mut self, target: &PeerRef) -> Vec<PeerRef> {
    let mut candidates = self.table.helper_candidates(target.node());
    candidates.shuffle(&mut self.rng);
    candidates.truncate(self.settings.indirect_checks);
    candidates
  }

  /// Builds a gossip payload for the given recipient.
  pub fn make_gossip_payload(&mut self, to: &PeerRef) -> GossipPayload {
    let local = self.local.node().clone();
    self.selector.make_payload(to.node(), &local, self.table.live_count())
  }

  /// Applies one incoming gossip fact, returning what the driver must do
  /// with it.
  ///
  /// Facts about the local node at suspect or unreachable are refuted by
  /// bumping the local incarnation past the asserted one.
  pub fn on_gossip_payload(&mut self, sender: &PeerRef, fact: &GossipFact, now: TimerInstant) -> GossipDirective {
    self.selector.observe_recipient_view(sender.node(), fact.peer.node(), &fact.status);

    if fact.peer.node() == self.local.node() {
      return self.on_gossip_about_self(&fact.status);
    }

    if !self.table.contains(fact.peer.node()) {
      if fact.status.is_dead() {
        return GossipDirective::Ignored { level: LogLevel::Debug, message: "dead fact about an unknown member" };
      }
      return GossipDirective::Connect { node: fact.peer.node().clone(), status: fact.status.clone() };
    }

    match self.mark(&fact.peer, fact.status.clone(), now) {
      | Ok(MarkResult::Applied { change }) => GossipDirective::Applied { change },
      | Ok(MarkResult::IgnoredDueToOlderStatus { .. }) =>
        GossipDirective::Ignored { level: LogLevel::Trace, message: "fact is older than the local view" },
      | Err(_) =>
        GossipDirective::Ignored { level: LogLevel::Warn, message: "fact could not be applied" },
    }
  }

  /// Creates a suspicion at the given incarnation, suspected by the
  /// local node.
  #[must_use]
  pub fn make_suspicion(&self, incarnation: Incarnation) -> MemberStatus {
    let mut suspected_by = BTreeSet::new();
    suspected_by.insert(self.local.node().clone());
    MemberStatus::suspect(incarnation, suspected_by)
  }

  /// Advances the protocol period counter.
  pub const fn increment_protocol_period(&mut self) {
    self.protocol_period = self.protocol_period.saturating_add(1);
  }

  /// Applies a local health observation and returns the new score.
  pub const fn adjust_local_health(&mut self, event: LocalHealthEvent) -> u32 {
    self.health.apply(event)
  }

  /// Current local health score.
  #[must_use]
  pub const fn local_health_score(&self) -> u32 {
    self.health.score()
  }

  /// Suspicion window for a member with the given suspecter count.
  ///
  /// One suspecter leaves the full window; additional independent
  /// suspicions shrink it logarithmically down to the minimum.
  #[must_use]
  pub fn suspicion_timeout(&self, suspected_by_count: usize) -> Duration {
    let min = self.settings.min_suspicion_timeout();
    let max = self.settings.max_suspicion_timeout();
    let cap = self.settings.max_independent_suspicions;

    let confirmations =
      u32::try_from(suspected_by_count.saturating_sub(1)).unwrap_or(u32::MAX).min(cap);
    let shrink = f64::from(confirmations + 1).ln() / f64::from(cap + 1).ln();
    let scaled = max.mul_f64((1.0 - shrink).max(0.0));
    scaled.max(min)
  }

  /// Returns true when `now` has reached the deadline.
  #[must_use]
  pub fn is_expired(&self, deadline: TimerInstant, now: TimerInstant) -> bool {
    now >= deadline
  }

  /// Members currently in suspect status.
  pub fn suspects(&self) -> impl Iterator<Item = &SwimMember> {
    self.table.suspects()
  }

  /// All members, the local node included.
  pub fn all_members(&self) -> impl Iterator<Item = &SwimMember> {
    self.table.members()
  }

  /// Protocol interval stretched by the local health multiplier.
  #[must_use]
  pub fn dynamic_protocol_interval(&self) -> Duration {
    self.health.scale(self.settings.probe_interval)
  }

  /// Direct-probe timeout stretched by the local health multiplier.
  #[must_use]
  pub fn dynamic_ping_timeout(&self) -> Duration {
    self.health.scale(self.settings.ping_timeout)
  }

  /// Base interval between periodic probes.
  #[must_use]
  pub const fn probe_interval(&self) -> Duration {
    self.settings.probe_interval
  }

  /// Drops tombstones older than the configured grace period.
  pub fn prune_tombstones(&mut self, now: TimerInstant) -> Vec<SwimNode> {
    let pruned = self.table.prune_tombstones(now, self.settings.tombstone_ttl);
    for node in pruned.iter() {
      self.selector.forget(node);
      self.schedule.note_member_removed(node);
    }
    pruned
  }

  /// Stable-ordered snapshot of the node-to-status mapping.
  #[must_use]
  pub fn snapshot(&self) -> MembershipSnapshot {
    self.table.snapshot()
  }

  fn on_gossip_about_self(&mut self, status: &MemberStatus) -> GossipDirective {
    match status {
      | MemberStatus::Suspect { incarnation, .. } | MemberStatus::Unreachable { incarnation } => {
        let refuted = self.local_incarnation().max(*incarnation).succ();
        let Some(change) = self.table.refute_local(refuted, self.protocol_period) else {
          return GossipDirective::Ignored { level: LogLevel::Warn, message: "local member record is missing" };
        };
        let local = self.local.clone();
        self.selector.record(&local, MemberStatus::alive(refuted));
        self.health.apply(LocalHealthEvent::RefutingSuspectMessageAboutSelf);
        GossipDirective::Applied { change }
      },
      | MemberStatus::Dead => GossipDirective::LocalNodeDead,
      | MemberStatus::Alive { .. } =>
        GossipDirective::Ignored { level: LogLevel::Trace, message: "gossip about the local node carries no news" },
    }
  }
}
