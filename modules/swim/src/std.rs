//! std-only drivers for the SWIM core.

mod association_error;
mod association_provider;
mod direct_associations;
mod ping_req_origin;
mod swim_command;
mod swim_event_listener;
mod swim_shell;
mod swim_shell_error;
mod swim_shell_event;
mod swim_transport;
mod tokio_swim_runner;
mod tokio_swim_runner_config;
mod transport_error;
mod wire_member_entry;
mod wire_message;
mod wire_node;
mod wire_payload;
mod wire_status;

pub use association_error::AssociationError;
pub use association_provider::AssociationProvider;
pub use direct_associations::DirectAssociations;
pub use ping_req_origin::PingReqOrigin;
pub use swim_command::SwimCommand;
pub use swim_event_listener::SwimEventListener;
pub use swim_shell::{PERIODIC_PING, SwimShell};
pub use swim_shell_error::SwimShellError;
pub use swim_shell_event::SwimShellEvent;
pub use swim_transport::SwimTransport;
pub use tokio_swim_runner::TokioSwimRunner;
pub use tokio_swim_runner_config::TokioSwimRunnerConfig;
pub use transport_error::TransportError;
pub use wire_member_entry::WireMemberEntry;
pub use wire_message::WireMessage;
pub use wire_node::WireNode;
pub use wire_payload::WirePayload;
pub use wire_status::WireStatus;
