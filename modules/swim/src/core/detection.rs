//! The SWIM instance and its probing machinery.

mod gossip_directive;
mod local_health;
mod local_health_event;
mod log_level;
mod ping_request_outcome;
mod probe_result;
mod probe_schedule;
mod swim_instance;
mod swim_message;
mod swim_settings;

pub use gossip_directive::GossipDirective;
pub use local_health::LocalHealth;
pub use local_health_event::LocalHealthEvent;
pub use log_level::LogLevel;
pub use ping_request_outcome::PingRequestOutcome;
pub use probe_result::ProbeResult;
pub use probe_schedule::ProbeSchedule;
pub use swim_instance::SwimInstance;
pub use swim_message::SwimMessage;
pub use swim_settings::SwimSettings;
