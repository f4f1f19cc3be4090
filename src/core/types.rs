//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for commands
///
/// Assigned once at command creation and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommandId(pub Uuid);

impl CommandId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CommandId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CommandId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Unique identifier for persisted records (tasks, meals, shopping items, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(pub Uuid);

impl RecordId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Household entity enumeration
///
/// Each variant owns a named list of persisted records behind a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Entity {
    Task,
    Meal,
    Shopping,
    Reminder,
    Appointment,
    Family,
    Pet,
}

impl Entity {
    pub const ALL: [Entity; 7] = [
        Entity::Task,
        Entity::Meal,
        Entity::Shopping,
        Entity::Reminder,
        Entity::Appointment,
        Entity::Family,
        Entity::Pet,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Entity::Task => "task",
            Entity::Meal => "meal",
            Entity::Shopping => "shopping",
            Entity::Reminder => "reminder",
            Entity::Appointment => "appointment",
            Entity::Family => "family",
            Entity::Pet => "pet",
        }
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State-changing operations a command can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_ids_unique() {
        let a = CommandId::new();
        let b = CommandId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_entity_serialization() {
        let json = serde_json::to_string(&Entity::Shopping).unwrap();
        assert_eq!(json, "\"shopping\"");
        let back: Entity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Entity::Shopping);
    }

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Delete.to_string(), "delete");
    }
}
