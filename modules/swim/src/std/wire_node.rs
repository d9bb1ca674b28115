//! Wire representation of a node identity.

use alloc::string::String;

use serde::{Deserialize, Serialize};

use crate::core::membership::SwimNode;

/// Wire representation of a node identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireNode {
  /// Host name or address.
  pub host: String,
  /// Port the node listens on.
  pub port: u16,
  /// Restart uid.
  pub uid:  u64,
}

impl WireNode {
  /// Converts from the core identity.
  #[must_use]
  pub fn from_node(node: &SwimNode) -> Self {
    Self { host: node.host.clone(), port: node.port, uid: node.uid }
  }

  /// Converts into the core identity.
  #[must_use]
  pub fn to_node(&self) -> SwimNode {
    SwimNode::new(self.host.clone(), self.port, self.uid)
  }
}
