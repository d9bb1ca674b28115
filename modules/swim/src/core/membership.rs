//! Member identity, status algebra, and the membership table.

mod incarnation;
mod mark_result;
mod member_status;
mod membership_error;
mod membership_snapshot;
mod membership_table;
mod merge_outcome;
mod peer_ref;
mod reachability;
mod status_change;
mod swim_member;
mod swim_node;

pub use incarnation::Incarnation;
pub use mark_result::MarkResult;
pub use member_status::MemberStatus;
pub use membership_error::MembershipError;
pub use membership_snapshot::MembershipSnapshot;
pub use membership_table::MembershipTable;
pub use merge_outcome::MergeOutcome;
pub use peer_ref::PeerRef;
pub use reachability::Reachability;
pub use status_change::StatusChange;
pub use swim_member::SwimMember;
pub use swim_node::SwimNode;
