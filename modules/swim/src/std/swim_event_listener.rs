//! Listener seam for shell events.

use super::SwimShellEvent;

/// Receives the shell's outbound events.
///
/// Invoked on the shell's event loop; implementations must not block.
pub trait SwimEventListener: Send + 'static {
  /// Handles one event.
  fn on_event(&mut self, event: &SwimShellEvent);
}

impl<F> SwimEventListener for F
where
  F: FnMut(&SwimShellEvent) + Send + 'static,
{
  fn on_event(&mut self, event: &SwimShellEvent) {
    self(event)
  }
}
