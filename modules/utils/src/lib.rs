#![deny(missing_docs)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::redundant_clone))]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![deny(clippy::redundant_field_names)]
#![deny(clippy::redundant_pattern)]
#![deny(clippy::redundant_static_lifetimes)]
#![deny(clippy::unnecessary_to_owned)]
#![deny(clippy::needless_borrow)]
#![deny(clippy::manual_ok_or)]
#![deny(clippy::manual_map)]
#![deny(clippy::manual_let_else)]
#![deny(clippy::unused_async)]
#![deny(clippy::unnecessary_wraps)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
#![deny(clippy::print_stdout)]
#![deny(clippy::dbg_macro)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![deny(unreachable_pub)]
//! Time utilities shared across the lifebuoy runtimes.
//!
//! Provides a tick-based monotonic instant, clock abstractions with a
//! deterministic manual implementation for tests, and keyed single-shot
//! timer bookkeeping. The `core` half is `no_std`; runtime-backed clocks
//! live behind the `std` feature.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

pub mod core;
#[cfg(feature = "std")]
pub mod std;

pub use core::{
  time::{ClockKind, ManualClock, MonotonicClock, TimerInstant},
  timing::{TimerSlotKey, TimerSlotKeyAllocator, TimerSlots},
};
#[cfg(feature = "std")]
pub use std::time::{SharedManualClock, SystemClock};
