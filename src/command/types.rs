//! Immutable command descriptors
//!
//! A `Command` records a proposed state change together with audit
//! metadata. Construction happens in the factory; after that the fields
//! are read-only and the command either gets discarded (rejected) or
//! consumed (approved and executed).

use crate::core::types::{CommandId, Entity, Operation, RecordId};
use crate::nlu::intent::Payload;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Command type: entity plus operation
///
/// The wire name is `<entity>.<operation>` with one irregularity kept for
/// compatibility with the stored vocabulary: shopping creates are
/// `shopping.add` and shopping deletes are `shopping.remove`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CommandKind {
    pub entity: Entity,
    pub operation: Operation,
}

impl CommandKind {
    pub fn new(entity: Entity, operation: Operation) -> Self {
        Self { entity, operation }
    }

    pub fn name(&self) -> String {
        match (self.entity, self.operation) {
            (Entity::Shopping, Operation::Create) => "shopping.add".to_string(),
            (Entity::Shopping, Operation::Delete) => "shopping.remove".to_string(),
            (entity, operation) => format!("{}.{}", entity, operation),
        }
    }
}

impl std::fmt::Display for CommandKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}

/// What the command carries: a typed payload for creates, a record id plus
/// field edits for updates, a record id for deletes
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum CommandPayload {
    Create(Payload),
    Update {
        id: RecordId,
        changes: serde_json::Map<String, serde_json::Value>,
    },
    Delete {
        id: RecordId,
    },
}

/// Audit trail attached to every command
#[derive(Debug, Clone, Serialize)]
pub struct CommandMetadata {
    pub confidence: f32,
    pub user_input: String,
    pub issued_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

/// An immutable descriptor of a proposed state change
#[derive(Debug, Clone, Serialize)]
pub struct Command {
    id: CommandId,
    entity: Entity,
    operation: Operation,
    payload: CommandPayload,
    metadata: CommandMetadata,
}

impl Command {
    pub(crate) fn new(
        entity: Entity,
        operation: Operation,
        payload: CommandPayload,
        metadata: CommandMetadata,
    ) -> Self {
        Self {
            id: CommandId::new(),
            entity,
            operation,
            payload,
            metadata,
        }
    }

    pub fn id(&self) -> CommandId {
        self.id
    }

    pub fn entity(&self) -> Entity {
        self.entity
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn kind(&self) -> CommandKind {
        CommandKind::new(self.entity, self.operation)
    }

    pub fn payload(&self) -> &CommandPayload {
        &self.payload
    }

    pub fn metadata(&self) -> &CommandMetadata {
        &self.metadata
    }
}
