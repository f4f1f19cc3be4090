//! Pending-command queue
//!
//! State machine per command id: absent → pending → approved, rejected or
//! expired, all of which evict the entry. Approval evicts before returning,
//! so a second approve (or a racing expiry) on the same id fails the
//! absence check. That eviction-on-success is the at-most-once execution
//! guarantee.
//!
//! Expiry is evaluated against the injected clock at every operation
//! rather than by a timer; the observable outcome is the same, and tests
//! can drive it deterministically.

use crate::approval::token::{issue_token, verify_approval_token, ApprovalSecret, ApprovalToken};
use crate::command::types::Command;
use crate::core::clock::Clock;
use crate::core::error::{HomesteadError, Result};
use crate::core::types::CommandId;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;

/// A granted approval: the command, released from the queue, plus its token
#[derive(Debug)]
pub struct Approval {
    pub command: Command,
    pub token: ApprovalToken,
}

struct PendingCommand {
    command: Command,
    expires_at: DateTime<Utc>,
}

/// Queue of commands awaiting user approval
pub struct ApprovalQueue {
    pending: HashMap<CommandId, PendingCommand>,
    secret: ApprovalSecret,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl ApprovalQueue {
    pub fn new(secret: ApprovalSecret, ttl_secs: u64, clock: Arc<dyn Clock>) -> Self {
        Self {
            pending: HashMap::new(),
            secret,
            ttl: Duration::seconds(ttl_secs as i64),
            clock,
        }
    }

    /// Park a command until the user decides
    pub fn enqueue(&mut self, command: Command) -> CommandId {
        self.evict_expired();
        let id = command.id();
        let expires_at = self.clock.now() + self.ttl;
        tracing::debug!(command_id = %id, %expires_at, "command pending approval");
        self.pending.insert(id, PendingCommand { command, expires_at });
        id
    }

    /// Approve a pending command: evicts the entry and issues a token
    ///
    /// Fails with CommandNotFound when the id is absent, already resolved,
    /// or expired.
    pub fn approve(&mut self, id: CommandId) -> Result<Approval> {
        self.evict_expired();
        let entry = self
            .pending
            .remove(&id)
            .ok_or(HomesteadError::CommandNotFound(id))?;
        let token = issue_token(&self.secret, id, self.clock.now());
        tracing::info!(command_id = %id, "command approved");
        Ok(Approval {
            command: entry.command,
            token,
        })
    }

    /// Reject a pending command, discarding it
    pub fn reject(&mut self, id: CommandId) -> Result<Command> {
        self.evict_expired();
        let entry = self
            .pending
            .remove(&id)
            .ok_or(HomesteadError::CommandNotFound(id))?;
        tracing::info!(command_id = %id, "command rejected");
        Ok(entry.command)
    }

    /// Drop every entry past its deadline
    pub fn evict_expired(&mut self) -> Vec<CommandId> {
        let now = self.clock.now();
        let expired: Vec<CommandId> = self
            .pending
            .iter()
            .filter(|(_, entry)| entry.expires_at <= now)
            .map(|(id, _)| *id)
            .collect();
        for id in &expired {
            self.pending.remove(id);
            tracing::info!(command_id = %id, "pending command expired");
        }
        expired
    }

    /// Commands still awaiting a decision
    pub fn pending(&self) -> Vec<&Command> {
        let now = self.clock.now();
        self.pending
            .values()
            .filter(|entry| entry.expires_at > now)
            .map(|entry| &entry.command)
            .collect()
    }

    /// Recompute the token binding and compare
    pub fn verify(&self, token: &ApprovalToken) -> bool {
        verify_approval_token(&self.secret, token)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
