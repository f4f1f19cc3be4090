//! Approval tokens
//!
//! A token is proof that the user approved one specific command at one
//! specific moment. The signature is an HMAC-SHA256 over
//! (command id, approval time) keyed by a process-held secret, verified in
//! constant time. Tokens are capability-bearing: Debug output redacts the
//! signature and nothing here ever logs one.

use crate::core::types::CommandId;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Process-held signing key for approval tokens
pub struct ApprovalSecret([u8; 32]);

impl ApprovalSecret {
    /// Fresh random secret for this process
    pub fn generate() -> Self {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl std::fmt::Debug for ApprovalSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApprovalSecret(..)")
    }
}

/// Proof of approval for one command
#[derive(Clone)]
pub struct ApprovalToken {
    command_id: CommandId,
    approved_by: &'static str,
    approved_at: DateTime<Utc>,
    signature: Vec<u8>,
}

impl ApprovalToken {
    pub fn command_id(&self) -> CommandId {
        self.command_id
    }

    pub fn approved_by(&self) -> &str {
        self.approved_by
    }

    pub fn approved_at(&self) -> DateTime<Utc> {
        self.approved_at
    }
}

impl std::fmt::Debug for ApprovalToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApprovalToken")
            .field("command_id", &self.command_id)
            .field("approved_by", &self.approved_by)
            .field("approved_at", &self.approved_at)
            .field("signature", &"<redacted>")
            .finish()
    }
}

/// Issue a token bound to (command id, approval time)
pub(crate) fn issue_token(
    secret: &ApprovalSecret,
    command_id: CommandId,
    approved_at: DateTime<Utc>,
) -> ApprovalToken {
    ApprovalToken {
        command_id,
        approved_by: "user",
        approved_at,
        signature: sign(secret, command_id, approved_at),
    }
}

/// Check a token by recomputing its binding, in constant time
pub fn verify_approval_token(secret: &ApprovalSecret, token: &ApprovalToken) -> bool {
    let mut mac = mac_for(secret, token.command_id, token.approved_at);
    mac.verify_slice(&token.signature).is_ok()
}

fn sign(secret: &ApprovalSecret, command_id: CommandId, approved_at: DateTime<Utc>) -> Vec<u8> {
    mac_for(secret, command_id, approved_at).finalize().into_bytes().to_vec()
}

fn mac_for(secret: &ApprovalSecret, command_id: CommandId, approved_at: DateTime<Utc>) -> HmacSha256 {
    let mut mac = HmacSha256::new_from_slice(&secret.0).expect("hmac accepts any key length");
    mac.update(command_id.0.as_bytes());
    mac.update(&approved_at.timestamp_millis().to_be_bytes());
    mac
}
