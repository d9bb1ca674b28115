//! Tokio runner configuration.

/// Configuration of the tokio-backed shell runner.
#[derive(Debug, Clone)]
pub struct TokioSwimRunnerConfig {
  /// Capacity of the command queue feeding the event loop.
  pub command_buffer: usize,
}

impl TokioSwimRunnerConfig {
  /// Returns the base configuration.
  #[must_use]
  pub const fn new() -> Self {
    Self { command_buffer: 1024 }
  }

  /// Replaces the command queue capacity.
  #[must_use]
  pub const fn with_command_buffer(mut self, capacity: usize) -> Self {
    self.command_buffer = capacity;
    self
  }
}

impl Default for TokioSwimRunnerConfig {
  fn default() -> Self {
    Self::new()
  }
}
