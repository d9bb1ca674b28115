//! Association failure surface.

use alloc::string::String;

use crate::core::membership::SwimNode;

/// Failure to establish a transport association with a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssociationError {
  /// The node the association was attempted with.
  pub node:   SwimNode,
  /// Provider-specific description.
  pub reason: String,
}
