//! Association seam consumed by the shell.

use async_trait::async_trait;

use super::AssociationError;
use crate::core::membership::SwimNode;

/// Ensures a transport association exists before a gossiped node is
/// admitted to the membership.
#[async_trait]
pub trait AssociationProvider: Send + Sync + 'static {
  /// Resolves with the associated node, or fails when no association
  /// could be established.
  async fn ensure_association(&self, node: &SwimNode) -> Result<SwimNode, AssociationError>;
}
