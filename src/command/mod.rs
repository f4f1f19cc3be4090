//! Command construction, proposals and approval policy
//!
//! Intent -> Command -> Proposal -> (user decision). Commands are immutable
//! once built; proposals are recomputed on demand and never stored.

pub mod factory;
pub mod proposal;
pub mod types;

pub use factory::{command_from_intent, delete_command, update_command};
pub use proposal::{generate_proposal, should_require_approval, Proposal};
pub use types::{Command, CommandKind, CommandMetadata, CommandPayload};
