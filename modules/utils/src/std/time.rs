//! Runtime-backed clocks.

mod shared_manual_clock;
mod system_clock;

pub use shared_manual_clock::SharedManualClock;
pub use system_clock::SystemClock;
