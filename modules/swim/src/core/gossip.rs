//! Gossip facts, payloads, and the dissemination selector.

mod gossip_fact;
mod gossip_payload;
mod gossip_selector;

pub use gossip_fact::GossipFact;
pub use gossip_payload::GossipPayload;
pub use gossip_selector::GossipSelector;
