//! Router/dispatcher
//!
//! Looks up the executor for a command and converts every outcome into a
//! uniform result. No handler error crosses this boundary as an error: the
//! interface layer always receives `{success, message | error}`.

use crate::command::factory::command_from_intent;
use crate::command::proposal::{humanize_date, humanize_time};
use crate::command::types::{Command, CommandPayload};
use crate::core::clock::Clock;
use crate::core::error::Result;
use crate::core::types::{Entity, Operation};
use crate::exec::handlers::EntityHandler;
use crate::exec::registry::{CommandExecutor, ExecutionOutcome, ExecutorRegistry};
use crate::nlu::intent::{Intent, Payload};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

/// Uniform result of a dispatch
#[derive(Debug, Clone, Serialize)]
pub struct DispatchResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DispatchResult {
    fn ok(message: String, payload: Option<serde_json::Value>) -> Self {
        Self {
            success: true,
            message: Some(message),
            payload,
            error: None,
        }
    }

    fn failure(error: String) -> Self {
        Self {
            success: false,
            message: None,
            payload: None,
            error: Some(error),
        }
    }
}

/// Routes commands to their executors
pub struct Dispatcher {
    registry: ExecutorRegistry,
}

impl Dispatcher {
    /// Takes ownership of a sealed registry; nothing registers after this
    pub fn new(registry: ExecutorRegistry) -> Self {
        Self { registry }
    }

    /// Execute an approved command
    pub async fn dispatch(&self, command: &Command) -> DispatchResult {
        let executor = match self.registry.get(command.kind()) {
            Ok(executor) => executor,
            Err(e) => {
                tracing::warn!(kind = %command.kind(), error = %e, "no executor for command");
                return DispatchResult::failure(e.to_string());
            }
        };
        match executor.execute(command).await {
            Ok(outcome) => {
                tracing::info!(command_id = %command.id(), kind = %command.kind(), "command executed");
                DispatchResult::ok(outcome.message, outcome.payload)
            }
            Err(e) => {
                tracing::warn!(command_id = %command.id(), error = %e, "command execution failed");
                DispatchResult::failure(e.to_string())
            }
        }
    }

    /// Legacy path: execute a final intent directly as a create
    ///
    /// Kept for callers that run without the approval gate; factory
    /// validation failures surface as ordinary dispatch failures.
    pub async fn dispatch_intent(&self, intent: &Intent, clock: &dyn Clock) -> DispatchResult {
        match command_from_intent(intent, None, clock) {
            Ok(command) => self.dispatch(&command).await,
            Err(e) => DispatchResult::failure(e.to_string()),
        }
    }
}

/// Adapter running one entity's handler for one operation
pub struct HandlerExecutor {
    entity: Entity,
    operation: Operation,
    handler: Arc<dyn EntityHandler>,
}

impl HandlerExecutor {
    pub fn new(entity: Entity, operation: Operation, handler: Arc<dyn EntityHandler>) -> Self {
        Self {
            entity,
            operation,
            handler,
        }
    }
}

#[async_trait]
impl CommandExecutor for HandlerExecutor {
    async fn execute(&self, command: &Command) -> Result<ExecutionOutcome> {
        match (self.operation, command.payload()) {
            (Operation::Create, CommandPayload::Create(payload))
                if payload.entity() == self.entity =>
            {
                let record = self.handler.create(payload).await?;
                Ok(ExecutionOutcome {
                    message: created_message(payload),
                    payload: Some(record),
                })
            }
            (Operation::Update, CommandPayload::Update { id, changes }) => {
                let record = self.handler.update(*id, changes).await?;
                Ok(ExecutionOutcome {
                    message: format!("Updated the {} record.", self.entity),
                    payload: Some(record),
                })
            }
            (Operation::Delete, CommandPayload::Delete { id }) => {
                self.handler.delete(*id).await?;
                Ok(ExecutionOutcome {
                    message: format!("Removed the {} record.", self.entity),
                    payload: None,
                })
            }
            _ => Err(crate::core::error::HomesteadError::Validation(format!(
                "command payload does not fit {}.{}",
                self.entity, self.operation
            ))),
        }
    }
}

/// Register create/update/delete executors for one entity's handler
pub fn register_entity(
    registry: &mut ExecutorRegistry,
    entity: Entity,
    handler: Arc<dyn EntityHandler>,
) -> Result<()> {
    for operation in [Operation::Create, Operation::Update, Operation::Delete] {
        registry.register(
            crate::command::types::CommandKind::new(entity, operation),
            Arc::new(HandlerExecutor::new(entity, operation, handler.clone())),
        )?;
    }
    Ok(())
}

fn created_message(payload: &Payload) -> String {
    match payload {
        Payload::Task(p) => {
            let mut message = format!("Added task \"{}\"", p.title);
            if let Some(due) = p.due_date {
                message.push_str(&format!(", due {}", humanize_date(due)));
            }
            message.push('.');
            message
        }
        Payload::Meal(p) => {
            let mut message = format!("Planned {} \"{}\"", p.meal_type.as_str(), p.name);
            if let Some(day) = p.day {
                message.push_str(&format!(" for {}", humanize_date(day)));
            }
            message.push('.');
            message
        }
        Payload::Shopping(p) => {
            format!("Added {} to the shopping list.", p.items.join(", "))
        }
        Payload::Reminder(p) => {
            let mut message = format!("Reminder set: \"{}\"", p.title);
            if let Some(date) = p.date {
                message.push_str(&format!(" on {}", humanize_date(date)));
            }
            if let Some(time) = p.time {
                message.push_str(&format!(" at {}", humanize_time(time)));
            }
            message.push('.');
            message
        }
        Payload::Appointment(p) => {
            let mut message = format!("Scheduled \"{}\"", p.title);
            if let Some(date) = p.date {
                message.push_str(&format!(" on {}", humanize_date(date)));
            }
            if let Some(time) = p.time {
                message.push_str(&format!(" at {}", humanize_time(time)));
            }
            message.push('.');
            message
        }
        Payload::Family(p) => format!("Added {} to the family.", p.name),
        Payload::Pet(p) => format!("Added your {} {}.", p.kind, p.name),
    }
}
