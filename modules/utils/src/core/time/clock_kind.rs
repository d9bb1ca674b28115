//! Clock flavor marker.

/// Identifies how a clock advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockKind {
  /// Advanced manually, typically by tests.
  Deterministic,
  /// Advanced by the host runtime.
  System,
}
