//! Event-loop driver around the SWIM instance.


use alloc::{boxed::Box, sync::Arc, vec::Vec};
use core::time::Duration;

use hashbrown::HashMap;
use lifebuoy_utils_rs::core::{
  time::{MonotonicClock, TimerInstant},
  timing::TimerSlots,
};
use tokio::{sync::mpsc, task::JoinSet};

use super::{
  AssociationError, AssociationProvider, PingReqOrigin, SwimCommand, SwimEventListener, SwimShellEvent,
  SwimTransport,
};
use crate::core::{
  detection::{GossipDirective, LocalHealthEvent, LogLevel, PingRequestOutcome, ProbeResult, SwimInstance,
    SwimMessage, SwimSettings},
  gossip::{GossipFact, GossipPayload},
  membership::{Incarnation, MarkResult, MemberStatus, PeerRef, StatusChange, SwimNode},
};

/// Name of the protocol-period timer slot.
pub const PERIODIC_PING: &str = "periodic-ping";

/// Driver owning the event loop around a [`SwimInstance`].
///
/// All instance mutations happen on the loop that feeds
/// [`SwimShell::handle_command`], so no lock guards the instance. Probes
/// and association handshakes run as spawned tasks that report back
/// through the command queue; responses arriving after their timeout are
/// dropped in those tasks and never reach the instance.
pub struct SwimShell {
  instance:     SwimInstance,
  transport:    Arc<dyn SwimTransport>,
  associations: Arc<dyn AssociationProvider>,
  clock:        Arc<dyn MonotonicClock>,
  listener:     Box<dyn SwimEventListener>,
  commands:     mpsc::Sender<SwimCommand>,
  timer_slots:  TimerSlots,
  peers:        HashMap<SwimNode, PeerRef>,
}

impl SwimShell {
  /// Creates a shell for the given local node.
  #[must_use]
  pub fn new(
    local: SwimNode,
    settings: SwimSettings,
    transport: Arc<dyn SwimTransport>,
    associations: Arc<dyn AssociationProvider>,
    clock: Arc<dyn MonotonicClock>,
    listener: Box<dyn SwimEventListener>,
    commands: mpsc::Sender<SwimCommand>,
  ) -> Self {
    let local_peer = transport.peer(&local);
    Self {
      instance: SwimInstance::new(local_peer, settings),
      transport,
      associations,
      clock,
      listener,
      commands,
      timer_slots: TimerSlots::new(),
      peers: HashMap::new(),
    }
  }

  /// Arms the first protocol-period timer.
  pub fn start(&mut self) {
    self.schedule_periodic_ping(self.instance.probe_interval());
  }

  /// The instance driven by this shell.
  #[must_use]
  pub const fn instance(&self) -> &SwimInstance {
    &self.instance
  }

  /// Processes one command. Must be called from a tokio runtime context;
  /// probe work is spawned, never awaited inline.
  pub fn handle_command(&mut self, command: SwimCommand) {
    match command {
      | SwimCommand::TimerFired { name, key } => {
        if self.timer_slots.is_current(name, key) && name == PERIODIC_PING {
          self.handle_periodic_tick();
        }
      },
      | SwimCommand::Ping { reply_to, payload, respond } => {
        self.peers.insert(reply_to.node().clone(), reply_to.clone());
        self.process_gossip_payload(&reply_to, &payload);
        let ack = self.instance.on_ping(&reply_to);
        let _ = respond.send(ack);
      },
      | SwimCommand::PingRequest { target, reply_to, payload, respond } => {
        self.peers.insert(reply_to.node().clone(), reply_to.clone());
        self.process_gossip_payload(&reply_to, &payload);
        self.send_ping(target, Some(PingReqOrigin::new(reply_to, respond)));
      },
      | SwimCommand::Monitor { node } => self.handle_monitor(node),
      | SwimCommand::ConfirmDead { node } => self.handle_confirm_dead(&node),
      | SwimCommand::GetMembershipState { reply_to } => {
        let _ = reply_to.send(self.instance.snapshot());
      },
      | SwimCommand::ProbeCompleted { target, ping_req_origin, result } =>
        self.handle_ping_response(result, target, ping_req_origin),
      | SwimCommand::IndirectProbeCompleted { target, result } =>
        self.handle_ping_request_result(&result, target),
      | SwimCommand::AssociationResolved { status, result } =>
        self.handle_association_resolved(status, result),
    }
  }

  fn handle_periodic_tick(&mut self) {
    let now = self.now();
    self.check_suspicion_timeouts(now);
    self.instance.prune_tombstones(now);
    if let Some(target) = self.instance.next_member_to_ping() {
      self.send_ping(target, None);
    }
    self.instance.increment_protocol_period();
    tracing::trace!(swim.protocol_period = self.instance.protocol_period(), "protocol period advanced");
    self.schedule_periodic_ping(self.instance.dynamic_protocol_interval());
  }

  fn check_suspicion_timeouts(&mut self, now: TimerInstant) {
    let expired: Vec<(PeerRef, Incarnation)> = self
      .instance
      .suspects()
      .filter_map(|member| {
        let started_at = member.suspicion_started_at?;
        let incarnation = member.status.incarnation()?;
        let timeout = self.instance.suspicion_timeout(member.suspecter_count());
        let deadline = started_at.saturating_add(timeout);
        if self.instance.is_expired(deadline, now) {
          tracing::debug!(
            swim.suspect = %member.peer,
            swim.suspected_by = member.suspecter_count(),
            swim.suspicion_timeout = ?timeout,
            "suspicion expired without refutation"
          );
          Some((member.peer.clone(), incarnation))
        } else {
          None
        }
      })
      .collect();

    for (peer, incarnation) in expired {
      if let Ok(MarkResult::Applied { change }) =
        self.instance.mark(&peer, MemberStatus::Unreachable { incarnation }, now)
      {
        self.try_announce_member_reachability(&change);
      }
    }
  }

  fn send_ping(&mut self, target: PeerRef, ping_req_origin: Option<PingReqOrigin>) {
    let payload = self.instance.make_gossip_payload(&target);
    let message = SwimMessage::Ping { reply_to: self.instance.local_peer().clone(), payload };
    let timeout = self.instance.dynamic_ping_timeout();
    let transport = Arc::clone(&self.transport);
    let commands = self.commands.clone();
    tracing::trace!(swim.target = %target, "probing");
    tokio::spawn(async move {
      let result = match tokio::time::timeout(timeout, transport.request(&target, message)).await {
        | Ok(Ok(SwimMessage::Ack { incarnation, payload, .. })) => ProbeResult::Ack { incarnation, payload },
        | Ok(Ok(SwimMessage::Nack { .. })) => ProbeResult::Nack,
        | Ok(Ok(_)) | Ok(Err(_)) | Err(_) => ProbeResult::Timeout,
      };
      let _ = commands.send(SwimCommand::ProbeCompleted { target, ping_req_origin, result }).await;
    });
  }

  fn handle_ping_response(&mut self, result: ProbeResult, pinged: PeerRef, ping_req_origin: Option<PingReqOrigin>) {
    match result {
      | ProbeResult::Timeout => match ping_req_origin {
        | Some(origin) => {
          self.instance.adjust_local_health(LocalHealthEvent::ProbeWithMissedNack);
          let _ = origin.respond.send(SwimMessage::Nack { target: pinged });
        },
        | None => {
          self.instance.adjust_local_health(LocalHealthEvent::FailedProbe);
          self.send_ping_requests(pinged);
        },
      },
      | ProbeResult::Ack { incarnation, payload } => {
        self.process_gossip_payload(&pinged, &payload);
        self.mark_member_alive(&pinged, incarnation);
        match ping_req_origin {
          | Some(origin) => {
            let _ = origin.respond.send(SwimMessage::Ack { target: pinged, incarnation, payload });
          },
          | None => {
            self.instance.adjust_local_health(LocalHealthEvent::SuccessfulProbe);
          },
        }
      },
      | ProbeResult::Nack => {
        tracing::trace!(swim.target = %pinged, "direct probe answered with a nack");
      },
    }
  }

  fn send_ping_requests(&mut self, to_ping: PeerRef) {
    if !self.instance.is_member(&to_ping) {
      return;
    }
    let helpers = self.instance.members_to_ping_request(&to_ping);
    if helpers.is_empty() {
      // Nobody can relay; the timeout verdict stands as-is.
      self.handle_ping_request_result(&ProbeResult::Timeout, to_ping);
      return;
    }

    let timeout = self.instance.dynamic_ping_timeout();
    let reply_to = self.instance.local_peer().clone();
    let mut relays = JoinSet::new();
    for helper in helpers {
      let payload = self.instance.make_gossip_payload(&helper);
      let message = SwimMessage::PingReq { target: to_ping.clone(), reply_to: reply_to.clone(), payload };
      let transport = Arc::clone(&self.transport);
      relays.spawn(async move { tokio::time::timeout(timeout, transport.request(&helper, message)).await });
    }

    let commands = self.commands.clone();
    tokio::spawn(async move {
      // First ack wins; anything else counts towards an overall timeout.
      let mut result = ProbeResult::Timeout;
      while let Some(joined) = relays.join_next().await {
        if let Ok(Ok(Ok(SwimMessage::Ack { incarnation, payload, .. }))) = joined {
          result = ProbeResult::Ack { incarnation, payload };
          break;
        }
      }
      let _ = commands.send(SwimCommand::IndirectProbeCompleted { target: to_ping, result }).await;
    });
  }

  fn handle_ping_request_result(&mut self, result: &ProbeResult, pinged: PeerRef) {
    let now = self.now();
    match self.instance.on_ping_request_response(result, &pinged, now) {
      | PingRequestOutcome::Alive { incarnation, payload } => {
        self.process_gossip_payload(&pinged, &payload);
        self.mark_member_alive(&pinged, incarnation);
      },
      | PingRequestOutcome::NewlySuspect => {
        tracing::trace!(swim.suspect = %pinged, "member is now suspected");
      },
      | PingRequestOutcome::NackReceived => {
        tracing::trace!(swim.target = %pinged, "indirect probe answered with a nack");
      },
      | PingRequestOutcome::Ignored => {},
    }
  }

  fn mark_member_alive(&mut self, peer: &PeerRef, incarnation: Incarnation) {
    let now = self.now();
    match self.instance.mark(peer, MemberStatus::alive(incarnation), now) {
      | Ok(MarkResult::Applied { change }) => self.try_announce_member_reachability(&change),
      | Ok(MarkResult::IgnoredDueToOlderStatus { .. }) => {},
      | Err(_) => {
        tracing::trace!(swim.member = %peer, "ack from a peer that is not a member");
      },
    }
  }

  fn handle_monitor(&mut self, node: SwimNode) {
    if node.same_endpoint(self.instance.local_node()) {
      return;
    }
    let peer = self.transport.peer(&node);
    self.peers.insert(node, peer.clone());
    let now = self.now();
    match self.instance.add_member(peer.clone(), MemberStatus::alive(Incarnation::zero()), now) {
      | Ok(MarkResult::Applied { change }) => self.try_announce_member_reachability(&change),
      | Ok(MarkResult::IgnoredDueToOlderStatus { .. }) | Err(_) => return,
    }
    self.send_ping(peer, None);
  }

  fn handle_confirm_dead(&mut self, node: &SwimNode) {
    let Some(member) = self.instance.member_for(node) else {
      tracing::warn!(swim.member = %node, "confirm dead for an unknown member");
      return;
    };
    if member.status.is_dead() {
      return;
    }
    let peer = member.peer.clone();
    let now = self.now();
    match self.instance.mark(&peer, MemberStatus::Dead, now) {
      | Ok(MarkResult::Applied { change }) => self.try_announce_member_reachability(&change),
      | Ok(MarkResult::IgnoredDueToOlderStatus { .. }) => {
        // Dead is terminal; nothing in the status order may precede it.
        debug_assert!(false, "confirm dead was ignored");
        tracing::error!(swim.member = %node, "invariant violated: confirm dead was ignored");
      },
      | Err(_) => {
        tracing::warn!(swim.member = %node, "confirm dead could not be applied");
      },
    }
  }

  fn handle_association_resolved(&mut self, status: MemberStatus, result: Result<SwimNode, AssociationError>) {
    match result {
      | Ok(node) => {
        let peer = self.transport.peer(&node);
        self.peers.insert(node, peer.clone());
        let now = self.now();
        if let Ok(MarkResult::Applied { change }) = self.instance.add_member(peer, status, now) {
          self.try_announce_member_reachability(&change);
        }
      },
      | Err(error) => {
        // The member is not added now; the next gossip round retries.
        tracing::warn!(swim.member = %error.node, reason = %error.reason, "association failed");
      },
    }
  }

  fn process_gossip_payload(&mut self, sender: &PeerRef, payload: &GossipPayload) {
    let now = self.now();
    for fact in payload.entries() {
      match self.instance.on_gossip_payload(sender, fact, now) {
        | GossipDirective::Connect { node, status } => self.ensure_association(node, status),
        | GossipDirective::Applied { change } => self.try_announce_member_reachability(&change),
        | GossipDirective::LocalNodeDead => {
          tracing::warn!("gossip declared the local node dead");
          self.listener.on_event(&SwimShellEvent::LocalNodeDeclaredDead);
        },
        | GossipDirective::Ignored { level, message } => log_ignored(level, message, fact),
      }
    }
  }

  fn ensure_association(&mut self, node: SwimNode, status: MemberStatus) {
    let associations = Arc::clone(&self.associations);
    let commands = self.commands.clone();
    tokio::spawn(async move {
      let result = associations.ensure_association(&node).await;
      let _ = commands.send(SwimCommand::AssociationResolved { status, result }).await;
    });
  }

  fn try_announce_member_reachability(&mut self, change: &StatusChange) {
    let Some(reachability) = change.reachability_crossing() else {
      return;
    };
    tracing::debug!(
      swim.member = %change.peer,
      swim.protocol_period = self.instance.protocol_period(),
      "reachability changed to {reachability:?}"
    );
    self
      .listener
      .on_event(&SwimShellEvent::ReachabilityChanged { node: change.peer.node().clone(), reachability });
  }

  fn schedule_periodic_ping(&mut self, delay: Duration) {
    let key = self.timer_slots.arm(PERIODIC_PING);
    let commands = self.commands.clone();
    tokio::spawn(async move {
      tokio::time::sleep(delay).await;
      let _ = commands.send(SwimCommand::TimerFired { name: PERIODIC_PING, key }).await;
    });
  }

  fn now(&self) -> TimerInstant {
    self.clock.now()
  }
}

fn log_ignored(level: LogLevel, message: &'static str, fact: &GossipFact) {
  match level {
    | LogLevel::Trace => tracing::trace!(swim.member = %fact.peer, "{message}"),
    | LogLevel::Debug => tracing::debug!(swim.member = %fact.peer, "{message}"),
    | LogLevel::Warn => tracing::warn!(swim.member = %fact.peer, "{message}"),
  }
}
