#![cfg(feature = "std")]

use std::{
  collections::{BTreeSet, HashMap},
  sync::{Arc, Mutex},
  time::Duration,
};

use async_trait::async_trait;
use lifebuoy_swim_rs::{
  core::{
    detection::{SwimMessage, SwimSettings},
    gossip::{GossipFact, GossipPayload},
    membership::{Incarnation, MemberStatus, PeerRef, Reachability, SwimNode},
  },
  std::{
    DirectAssociations, SwimCommand, SwimShellError, SwimShellEvent, SwimTransport, TokioSwimRunner,
    TokioSwimRunnerConfig, TransportError,
  },
};
use lifebuoy_utils_rs::core::time::{ClockKind, MonotonicClock, TimerInstant};
use tokio::sync::oneshot;

/// Clock following tokio's (virtual) time so instance deadlines line up
/// with the runtime's sleeps under a paused test runtime.
struct TokioClock {
  anchor: tokio::time::Instant,
}

impl TokioClock {
  fn new() -> Self {
    Self { anchor: tokio::time::Instant::now() }
  }
}

impl MonotonicClock for TokioClock {
  fn now(&self) -> TimerInstant {
    let resolution = Duration::from_millis(1);
    TimerInstant::from_ticks(TimerInstant::ticks_for(self.anchor.elapsed(), resolution), resolution)
  }

  fn kind(&self) -> ClockKind {
    ClockKind::System
  }
}

/// In-memory message bus connecting the nodes of one test cluster.
#[derive(Default)]
struct InMemoryBus {
  routes:         Mutex<HashMap<SwimNode, tokio::sync::mpsc::Sender<SwimCommand>>>,
  blocked_routes: Mutex<BTreeSet<(SwimNode, SwimNode)>>,
}

impl InMemoryBus {
  fn register(&self, node: SwimNode, commands: tokio::sync::mpsc::Sender<SwimCommand>) {
    self.routes.lock().unwrap().insert(node, commands);
  }

  fn block(&self, source: &SwimNode, target: &SwimNode) {
    self.blocked_routes.lock().unwrap().insert((source.clone(), target.clone()));
  }

  /// Cuts a node off in both directions.
  fn partition(&self, node: &SwimNode) {
    let nodes: Vec<SwimNode> = self.routes.lock().unwrap().keys().cloned().collect();
    for other in nodes {
      self.block(&other, node);
      self.block(node, &other);
    }
  }

  fn is_blocked(&self, source: &SwimNode, target: &SwimNode) -> bool {
    self.blocked_routes.lock().unwrap().contains(&(source.clone(), target.clone()))
  }
}

struct BusTransport {
  source: SwimNode,
  bus:    Arc<InMemoryBus>,
}

#[async_trait]
impl SwimTransport for BusTransport {
  fn peer(&self, node: &SwimNode) -> PeerRef {
    PeerRef::new(node.clone())
  }

  async fn request(&self, target: &PeerRef, message: SwimMessage) -> Result<SwimMessage, TransportError> {
    if self.bus.is_blocked(&self.source, target.node()) {
      // A partitioned route neither delivers nor answers; the caller's
      // timeout decides.
      std::future::pending::<()>().await;
    }
    let route = self.bus.routes.lock().unwrap().get(target.node()).cloned();
    let Some(route) = route else {
      return Err(TransportError::ChannelClosed);
    };
    let (respond, reply) = oneshot::channel();
    let command = match message {
      SwimMessage::Ping { reply_to, payload } => SwimCommand::Ping { reply_to, payload, respond },
      SwimMessage::PingReq { target, reply_to, payload } =>
        SwimCommand::PingRequest { target, reply_to, payload, respond },
      other => {
        return Err(TransportError::SendFailed { reason: format!("not a request: {other:?}") });
      },
    };
    route.send(command).await.map_err(|_| TransportError::ChannelClosed)?;
    reply.await.map_err(|_| TransportError::ChannelClosed)
  }
}

struct TestNode {
  node:   SwimNode,
  runner: TokioSwimRunner,
  events: Arc<Mutex<Vec<SwimShellEvent>>>,
}

impl TestNode {
  fn start(name: &str, bus: &Arc<InMemoryBus>, settings: SwimSettings) -> Self {
    let node = SwimNode::new(name.to_string(), 7001, 1);
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    let transport = BusTransport { source: node.clone(), bus: Arc::clone(bus) };
    let runner = TokioSwimRunner::start(
      &TokioSwimRunnerConfig::new(),
      node.clone(),
      settings,
      Arc::new(transport),
      Arc::new(DirectAssociations),
      Arc::new(TokioClock::new()),
      Box::new(move |event: &SwimShellEvent| sink.lock().unwrap().push(event.clone())),
      tokio::runtime::Handle::current(),
    )
    .expect("runner must start");
    bus.register(node.clone(), runner.commands());
    TestNode { node, runner, events }
  }

  async fn status_of(&self, node: &SwimNode) -> Option<MemberStatus> {
    let snapshot = self.runner.membership_state().await.expect("snapshot must arrive");
    snapshot.status_of(node).cloned()
  }

  fn events(&self) -> Vec<SwimShellEvent> {
    self.events.lock().unwrap().clone()
  }

  fn unreachable_announcements_for(&self, node: &SwimNode) -> usize {
    self
      .events()
      .into_iter()
      .filter(|event| {
        matches!(
          event,
          SwimShellEvent::ReachabilityChanged { node: changed, reachability: Reachability::Unreachable }
            if changed == node
        )
      })
      .count()
  }

  /// Injects a gossip payload as if `from` had pinged this node.
  async fn inject_gossip(&self, from: &SwimNode, facts: Vec<GossipFact>) -> SwimMessage {
    let (respond, reply) = oneshot::channel();
    let command = SwimCommand::Ping {
      reply_to: PeerRef::new(from.clone()),
      payload: GossipPayload::from_entries(facts),
      respond,
    };
    self.runner.commands().send(command).await.expect("command must be accepted");
    reply.await.expect("the ping must be acked")
  }
}

fn settings() -> SwimSettings {
  SwimSettings::new()
    .with_probe_interval(Duration::from_secs(1))
    .with_ping_timeout(Duration::from_millis(300))
}

#[tokio::test(start_paused = true)]
async fn responsive_member_stays_alive_through_probe_rounds() {
  let bus = Arc::new(InMemoryBus::default());
  let a = TestNode::start("a", &bus, settings());
  let b = TestNode::start("b", &bus, settings());

  a.runner.monitor(b.node.clone()).await;
  tokio::time::sleep(Duration::from_secs(5)).await;

  assert_eq!(a.status_of(&b.node).await, Some(MemberStatus::alive(Incarnation::zero())));
  assert_eq!(a.unreachable_announcements_for(&b.node), 0);
  // B learned about A through the piggybacked gossip.
  assert_eq!(b.status_of(&a.node).await, Some(MemberStatus::alive(Incarnation::zero())));

  let mut a = a;
  a.runner.stop().expect("first stop succeeds");
  assert_eq!(a.runner.stop(), Err(SwimShellError::NotStarted));
}

#[tokio::test(start_paused = true)]
async fn silent_member_is_suspected_then_promoted_to_unreachable() {
  let bus = Arc::new(InMemoryBus::default());
  let a = TestNode::start("a", &bus, settings());
  let b = TestNode::start("b", &bus, settings());
  let c = TestNode::start("c", &bus, settings());
  let d = TestNode::start("d", &bus, settings());

  a.runner.monitor(b.node.clone()).await;
  a.runner.monitor(c.node.clone()).await;
  a.runner.monitor(d.node.clone()).await;
  tokio::time::sleep(Duration::from_secs(2)).await;

  bus.partition(&b.node);
  tokio::time::sleep(Duration::from_secs(6)).await;
  let mid_flight = a.status_of(&b.node).await.expect("b must still be a member");
  assert!(
    mid_flight.is_suspect() || mid_flight.is_unreachable(),
    "b should at least be suspected, got {mid_flight}"
  );

  tokio::time::sleep(Duration::from_secs(14)).await;
  let settled = a.status_of(&b.node).await.expect("b must still be a member");
  assert!(settled.is_unreachable(), "b should be unreachable, got {settled}");
  assert_eq!(a.unreachable_announcements_for(&b.node), 1);
}

#[tokio::test(start_paused = true)]
async fn suspicion_about_the_local_node_is_refuted_with_a_higher_incarnation() {
  let bus = Arc::new(InMemoryBus::default());
  let a = TestNode::start("a", &bus, settings());
  let b = TestNode::start("b", &bus, settings());
  a.runner.monitor(b.node.clone()).await;

  let suspecters: std::collections::BTreeSet<SwimNode> =
    [SwimNode::new("x".to_string(), 7009, 9)].into_iter().collect();
  let claim = GossipFact::new(
    PeerRef::new(a.node.clone()),
    MemberStatus::suspect(Incarnation::new(5), suspecters),
  );
  let ack = a.inject_gossip(&b.node, vec![claim]).await;

  // The ack already carries the refutation at the bumped incarnation.
  let SwimMessage::Ack { incarnation, payload, .. } = ack else {
    panic!("expected an ack");
  };
  assert_eq!(incarnation, Incarnation::new(6));
  let refutation = payload
    .entries()
    .iter()
    .find(|fact| fact.peer.node() == &a.node)
    .expect("the refutation must be gossiped first");
  assert_eq!(refutation.status, MemberStatus::alive(Incarnation::new(6)));

  assert_eq!(a.status_of(&a.node).await, Some(MemberStatus::alive(Incarnation::new(6))));
}

#[tokio::test(start_paused = true)]
async fn confirmed_dead_members_never_come_back() {
  let bus = Arc::new(InMemoryBus::default());
  let a = TestNode::start("a", &bus, settings());
  let b = TestNode::start("b", &bus, settings());

  a.runner.monitor(b.node.clone()).await;
  tokio::time::sleep(Duration::from_secs(2)).await;
  assert_eq!(a.status_of(&b.node).await, Some(MemberStatus::alive(Incarnation::zero())));

  a.runner.confirm_dead(b.node.clone()).await;
  tokio::time::sleep(Duration::from_millis(100)).await;
  assert_eq!(a.status_of(&b.node).await, Some(MemberStatus::Dead));
  assert_eq!(a.unreachable_announcements_for(&b.node), 1);

  // Gossip claiming b came back at a higher incarnation changes nothing.
  let zombie = GossipFact::new(PeerRef::new(b.node.clone()), MemberStatus::alive(Incarnation::new(9)));
  let _ack = a.inject_gossip(&b.node, vec![zombie]).await;
  assert_eq!(a.status_of(&b.node).await, Some(MemberStatus::Dead));
  assert_eq!(a.unreachable_announcements_for(&b.node), 1);
}

#[tokio::test(start_paused = true)]
async fn indirect_probe_rescues_a_member_behind_a_partial_partition() {
  let bus = Arc::new(InMemoryBus::default());
  let a = TestNode::start("a", &bus, settings());
  let b = TestNode::start("b", &bus, settings());
  let c = TestNode::start("c", &bus, settings());

  a.runner.monitor(b.node.clone()).await;
  a.runner.monitor(c.node.clone()).await;
  tokio::time::sleep(Duration::from_secs(2)).await;

  // A cannot reach B directly, but C still can.
  bus.block(&a.node, &b.node);
  tokio::time::sleep(Duration::from_secs(10)).await;

  let status = a.status_of(&b.node).await.expect("b must still be a member");
  assert!(
    status.is_alive() || status.is_suspect(),
    "relayed acks must keep b out of the unreachable class, got {status}"
  );
  assert_eq!(a.unreachable_announcements_for(&b.node), 0);
}

#[tokio::test(start_paused = true)]
async fn zero_probe_interval_is_rejected_at_startup() {
  let bus = Arc::new(InMemoryBus::default());
  let node = SwimNode::new("a".to_string(), 7001, 1);
  let transport = BusTransport { source: node.clone(), bus: Arc::clone(&bus) };
  let result = TokioSwimRunner::start(
    &TokioSwimRunnerConfig::new(),
    node,
    settings().with_probe_interval(Duration::ZERO),
    Arc::new(transport),
    Arc::new(DirectAssociations),
    Arc::new(TokioClock::new()),
    Box::new(|_event: &SwimShellEvent| {}),
    tokio::runtime::Handle::current(),
  );
  assert!(matches!(result, Err(SwimShellError::InvalidSettings { .. })));
}
