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
//! SWIM membership and failure detection.
//!
//! The `core` half is the pure protocol state machine: the membership
//! table, gossip dissemination state, probe scheduling, and the adaptive
//! local-health multiplier. It performs no I/O and owns no timers; every
//! operation takes the current instant and returns directives for a
//! driver to apply.
//!
//! The `std` half is the driver: a tokio-backed shell that owns the event
//! loop, performs direct and indirect probes over an injected transport,
//! enforces per-operation timeouts, and announces reachability changes.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

pub mod core;
#[cfg(feature = "std")]
pub mod std;

pub use core::{
  detection::{
    GossipDirective, LocalHealth, LocalHealthEvent, LogLevel, PingRequestOutcome, ProbeResult, ProbeSchedule,
    SwimInstance, SwimMessage, SwimSettings,
  },
  gossip::{GossipFact, GossipPayload, GossipSelector},
  membership::{
    Incarnation, MarkResult, MemberStatus, MembershipError, MembershipSnapshot, MembershipTable, MergeOutcome,
    PeerRef, Reachability, StatusChange, SwimMember, SwimNode,
  },
};
#[cfg(feature = "std")]
pub use std::{
  AssociationError, AssociationProvider, DirectAssociations, PingReqOrigin, SwimCommand, SwimEventListener,
  SwimShell, SwimShellError, SwimShellEvent, SwimTransport, TokioSwimRunner, TokioSwimRunnerConfig,
  TransportError, WireMemberEntry, WireMessage, WireNode, WirePayload, WireStatus,
};
