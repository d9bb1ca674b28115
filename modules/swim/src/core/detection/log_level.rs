//! Severity suggested for diagnostic directives.

/// Severity a driver should log an ignored directive at.
///
/// The instance never logs; it only suggests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
  /// Routine protocol noise.
  Trace,
  /// Unusual but harmless.
  Debug,
  /// Worth a look.
  Warn,
}
