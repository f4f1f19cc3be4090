//! Command construction
//!
//! The only place commands come into existence. Construction validates its
//! input synchronously and fails before anything reaches the approval
//! queue.

use crate::command::types::{Command, CommandMetadata, CommandPayload};
use crate::core::clock::Clock;
use crate::core::error::{HomesteadError, Result};
use crate::core::types::{Entity, Operation, RecordId};
use crate::nlu::intent::Intent;
use uuid::Uuid;

/// Build a create command from an actionable intent
///
/// Clarification and unknown intents are not actionable and fail
/// validation; so does a missing or mismatched payload.
pub fn command_from_intent(
    intent: &Intent,
    context: Option<String>,
    clock: &dyn Clock,
) -> Result<Command> {
    let entity = intent.kind.entity().ok_or_else(|| {
        HomesteadError::Validation(format!(
            "cannot build a command from a {} intent",
            intent.kind
        ))
    })?;
    let payload = intent
        .payload
        .clone()
        .ok_or_else(|| HomesteadError::Validation("intent has no payload".into()))?;
    if payload.entity() != entity {
        return Err(HomesteadError::Validation(format!(
            "payload entity {} does not match intent type {}",
            payload.entity(),
            intent.kind
        )));
    }

    Ok(Command::new(
        entity,
        Operation::Create,
        CommandPayload::Create(payload),
        CommandMetadata {
            confidence: intent.confidence,
            user_input: intent.raw.clone(),
            issued_at: clock.now(),
            context,
        },
    ))
}

/// Build an update command; the payload must carry the record id
pub fn update_command(
    entity: Entity,
    payload: serde_json::Value,
    user_input: &str,
    clock: &dyn Clock,
) -> Result<Command> {
    let (id, mut fields) = take_record_id(payload)?;
    fields.remove("id");
    Ok(Command::new(
        entity,
        Operation::Update,
        CommandPayload::Update { id, changes: fields },
        explicit_metadata(user_input, clock),
    ))
}

/// Build a delete command; the payload must carry the record id
pub fn delete_command(
    entity: Entity,
    payload: serde_json::Value,
    user_input: &str,
    clock: &dyn Clock,
) -> Result<Command> {
    let (id, _) = take_record_id(payload)?;
    Ok(Command::new(
        entity,
        Operation::Delete,
        CommandPayload::Delete { id },
        explicit_metadata(user_input, clock),
    ))
}

/// Updates and deletes come from explicit user actions, not classification
fn explicit_metadata(user_input: &str, clock: &dyn Clock) -> CommandMetadata {
    CommandMetadata {
        confidence: 1.0,
        user_input: user_input.to_string(),
        issued_at: clock.now(),
        context: None,
    }
}

fn take_record_id(
    payload: serde_json::Value,
) -> Result<(RecordId, serde_json::Map<String, serde_json::Value>)> {
    let serde_json::Value::Object(fields) = payload else {
        return Err(HomesteadError::Validation(
            "payload must be an object".into(),
        ));
    };
    let id = fields
        .get("id")
        .and_then(|v| v.as_str())
        .ok_or_else(|| HomesteadError::Validation("payload is missing the record id".into()))?;
    let id = Uuid::parse_str(id)
        .map_err(|e| HomesteadError::Validation(format!("invalid record id: {}", e)))?;
    Ok((RecordId(id), fields))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::FixedClock;
    use crate::nlu::intent::{IntentKind, Payload, TaskCategory, TaskPayload};
    use chrono::NaiveDate;
    use serde_json::json;

    fn clock() -> FixedClock {
        FixedClock::at_date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
    }

    fn task_intent() -> Intent {
        Intent::new(IntentKind::Task, 0.85, "clean the bathroom tomorrow").with_payload(
            Payload::Task(TaskPayload {
                title: "Clean the bathroom".into(),
                category: TaskCategory::Cleaning,
                due_date: NaiveDate::from_ymd_opt(2024, 3, 2),
                priority: None,
            }),
        )
    }

    #[test]
    fn test_create_command_carries_audit_metadata() {
        let command = command_from_intent(&task_intent(), Some("repl".into()), &clock()).unwrap();
        assert_eq!(command.kind().name(), "task.create");
        assert!((command.metadata().confidence - 0.85).abs() < 1e-6);
        assert_eq!(command.metadata().user_input, "clean the bathroom tomorrow");
        assert_eq!(command.metadata().context.as_deref(), Some("repl"));
    }

    #[test]
    fn test_command_ids_are_fresh() {
        let intent = task_intent();
        let a = command_from_intent(&intent, None, &clock()).unwrap();
        let b = command_from_intent(&intent, None, &clock()).unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_clarification_intent_rejected() {
        let intent = Intent::clarification("huh", 0.3, "which one?");
        let err = command_from_intent(&intent, None, &clock()).unwrap_err();
        assert!(matches!(err, HomesteadError::Validation(_)));
    }

    #[test]
    fn test_intent_without_payload_rejected() {
        let intent = Intent::new(IntentKind::Shopping, 0.85, "go shopping");
        assert!(command_from_intent(&intent, None, &clock()).is_err());
    }

    #[test]
    fn test_delete_without_id_fails_synchronously() {
        let err = delete_command(Entity::Task, json!({}), "delete it", &clock()).unwrap_err();
        assert!(matches!(err, HomesteadError::Validation(_)));
    }

    #[test]
    fn test_update_requires_valid_id() {
        assert!(update_command(Entity::Task, json!({"id": "not-a-uuid"}), "x", &clock()).is_err());

        let id = Uuid::new_v4();
        let command = update_command(
            Entity::Task,
            json!({"id": id.to_string(), "title": "New title"}),
            "rename it",
            &clock(),
        )
        .unwrap();
        assert_eq!(command.kind().name(), "task.update");
        match command.payload() {
            CommandPayload::Update { id: got, changes } => {
                assert_eq!(got.0, id);
                assert!(changes.contains_key("title"));
                assert!(!changes.contains_key("id"));
            }
            other => panic!("wrong payload: {:?}", other),
        }
    }

    #[test]
    fn test_shopping_delete_maps_to_remove() {
        let id = Uuid::new_v4();
        let command = delete_command(
            Entity::Shopping,
            json!({"id": id.to_string()}),
            "remove milk",
            &clock(),
        )
        .unwrap();
        assert_eq!(command.kind().name(), "shopping.remove");
    }
}
