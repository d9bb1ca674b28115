//! Transport failure surface.

use alloc::string::String;

/// Transient transport failures.
///
/// The shell treats every transport error like a probe timeout; SWIM's
/// periodic re-probing is the retry mechanism.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
  /// The message could not be sent.
  SendFailed {
    /// Transport-specific description.
    reason: String,
  },
  /// The peer's channel is gone.
  ChannelClosed,
}
