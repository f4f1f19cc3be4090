//! The approval gate
//!
//! Commands never execute directly: they wait in the [`queue::ApprovalQueue`]
//! until the user approves (issuing a signed [`token::ApprovalToken`]),
//! rejects, or the TTL evicts them.

pub mod queue;
pub mod token;

pub use queue::{Approval, ApprovalQueue};
pub use token::{verify_approval_token, ApprovalSecret, ApprovalToken};
