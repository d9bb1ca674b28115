#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_op_in_unsafe_fn)]
#![deny(unreachable_pub)]
//! Facade over the lifebuoy member crates.
//!
//! Re-exports the SWIM membership core and its supporting time
//! utilities so applications depend on a single crate.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

pub use lifebuoy_swim_rs as swim;
pub use lifebuoy_utils_rs as utils;
