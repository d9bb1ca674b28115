//! Transport seam consumed by the shell.

use async_trait::async_trait;

use super::TransportError;
use crate::core::{
  detection::SwimMessage,
  membership::{PeerRef, SwimNode},
};

/// Message delivery seam between the shell and the network.
///
/// The shell applies its own per-operation timeouts around `request`;
/// implementations only need to deliver the message and hand back the
/// peer's response. Serialization framing and socket handling live
/// entirely behind this trait.
#[async_trait]
pub trait SwimTransport: Send + Sync + 'static {
  /// Mints the addressable handle for a node.
  fn peer(&self, node: &SwimNode) -> PeerRef;

  /// Delivers a request to `target` and resolves with its response.
  async fn request(&self, target: &PeerRef, message: SwimMessage) -> Result<SwimMessage, TransportError>;
}
