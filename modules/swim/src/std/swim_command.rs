//! Commands processed by the shell's event loop.

use lifebuoy_utils_rs::core::timing::TimerSlotKey;
use tokio::sync::oneshot;

use super::{AssociationError, PingReqOrigin};
use crate::core::{
  detection::{ProbeResult, SwimMessage},
  gossip::GossipPayload,
  membership::{MemberStatus, MembershipSnapshot, PeerRef, SwimNode},
};

/// One unit of work for the shell.
///
/// Wire ingress, local control messages, timer fires, and the shell's
/// own probe completions all funnel through this queue, which is what
/// serializes access to the instance.
#[derive(Debug)]
pub enum SwimCommand {
  /// A named single-shot timer fired.
  TimerFired {
    /// Timer name.
    name: &'static str,
    /// Schedule the fire belongs to; stale keys are dropped.
    key:  TimerSlotKey,
  },
  /// An inbound direct probe.
  Ping {
    /// Peer the ack should be addressed to.
    reply_to: PeerRef,
    /// Piggybacked gossip.
    payload:  GossipPayload,
    /// Channel the ack is delivered through.
    respond:  oneshot::Sender<SwimMessage>,
  },
  /// An inbound indirect-probe request.
  PingRequest {
    /// Peer to probe on the requester's behalf.
    target:   PeerRef,
    /// The requesting peer.
    reply_to: PeerRef,
    /// Piggybacked gossip.
    payload:  GossipPayload,
    /// Channel the ack or nack is delivered through.
    respond:  oneshot::Sender<SwimMessage>,
  },
  /// Begin monitoring a node.
  Monitor {
    /// Node to monitor.
    node: SwimNode,
  },
  /// Forced death declaration from a higher layer.
  ConfirmDead {
    /// Node to declare dead.
    node: SwimNode,
  },
  /// Snapshot request, used by tests and diagnostics.
  GetMembershipState {
    /// Channel the snapshot is delivered through.
    reply_to: oneshot::Sender<MembershipSnapshot>,
  },
  /// A direct probe resolved.
  ProbeCompleted {
    /// The probed peer.
    target:          PeerRef,
    /// Present when the probe ran on behalf of another node.
    ping_req_origin: Option<PingReqOrigin>,
    /// What the probe resolved to.
    result:          ProbeResult,
  },
  /// An aggregated indirect probe resolved.
  IndirectProbeCompleted {
    /// The probed peer.
    target: PeerRef,
    /// What the aggregation resolved to.
    result: ProbeResult,
  },
  /// An association request finished.
  AssociationResolved {
    /// Status to apply once the member is admitted.
    status: MemberStatus,
    /// The resolved node, or why the association failed.
    result: Result<SwimNode, AssociationError>,
  },
}
