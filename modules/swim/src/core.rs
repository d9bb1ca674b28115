//! SWIM core domain modules (no_std).

pub mod detection;
pub mod gossip;
pub mod membership;
