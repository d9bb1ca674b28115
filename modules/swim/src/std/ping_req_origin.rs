//! Origin of a probe performed on behalf of another node.

use tokio::sync::oneshot;

use crate::core::{detection::SwimMessage, membership::PeerRef};

/// Tracks who asked for an indirect probe and how to answer them.
#[derive(Debug)]
pub struct PingReqOrigin {
  /// The node that asked for the probe.
  pub origin:  PeerRef,
  /// Channel the ack or nack is delivered through.
  pub respond: oneshot::Sender<SwimMessage>,
}

impl PingReqOrigin {
  /// Creates an origin record.
  #[must_use]
  pub const fn new(origin: PeerRef, respond: oneshot::Sender<SwimMessage>) -> Self {
    Self { origin, respond }
  }
}
