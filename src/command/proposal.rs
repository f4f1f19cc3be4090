//! Proposal derivation and approval policy
//!
//! A proposal is a pure view of a command: same command in, same proposal
//! out, nothing persisted. The approval policy is fail-safe: no settings
//! means everything waits for approval, and deletes always do.

use crate::command::types::{Command, CommandPayload};
use crate::core::config::{ApprovalSettings, ConfirmationStyle};
use crate::core::types::Operation;
use crate::nlu::intent::Payload;
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use serde_json::json;

/// Human-readable rendering of a command for user review
#[derive(Debug, Clone, Serialize)]
pub struct Proposal {
    pub command: Command,
    pub summary: ProposalSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<serde_json::Value>,
    pub risks: Vec<String>,
    pub requires_approval: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProposalSummary {
    pub title: String,
    pub description: String,
    pub impacts: Vec<String>,
}

/// Derive the proposal for a command
pub fn generate_proposal(command: &Command, requires_approval: bool) -> Proposal {
    Proposal {
        command: command.clone(),
        summary: ProposalSummary {
            title: title_for(command),
            description: description_for(command),
            impacts: impacts_for(command),
        },
        preview: preview_for(command),
        risks: risks_for(command),
        requires_approval,
    }
}

/// Whether this command may execute without an explicit approval
///
/// Deletes always require approval. Without settings the answer is always
/// yes. `JustDoIt` waives approval for non-destructive operations unless
/// the entity is listed in `always_confirm`.
pub fn should_require_approval(command: &Command, settings: Option<&ApprovalSettings>) -> bool {
    if command.operation() == Operation::Delete {
        return true;
    }
    let Some(settings) = settings else {
        return true;
    };
    match settings.confirmation_style {
        ConfirmationStyle::AlwaysAsk => true,
        ConfirmationStyle::JustDoIt => settings.always_confirm.contains(&command.entity()),
    }
}

fn title_for(command: &Command) -> String {
    match command.payload() {
        CommandPayload::Create(payload) => match payload {
            Payload::Task(p) => format!("Add task: {}", p.title),
            Payload::Meal(p) => format!("Plan meal: {}", p.name),
            Payload::Shopping(p) => format!("Add to shopping list: {}", p.items.join(", ")),
            Payload::Reminder(p) => format!("Set reminder: {}", p.title),
            Payload::Appointment(p) => format!("Schedule appointment: {}", p.title),
            Payload::Family(p) => format!("Add family member: {}", p.name),
            Payload::Pet(p) => format!("Add pet: {}", p.name),
        },
        CommandPayload::Update { .. } => format!("Update {}", command.entity()),
        CommandPayload::Delete { .. } => format!("Delete {}", command.entity()),
    }
}

fn description_for(command: &Command) -> String {
    match command.operation() {
        Operation::Create => format!(
            "This will add a new {} based on \"{}\".",
            command.entity(),
            command.metadata().user_input
        ),
        Operation::Update => format!("This will change an existing {} record.", command.entity()),
        Operation::Delete => format!("This will remove a {} record.", command.entity()),
    }
}

fn impacts_for(command: &Command) -> Vec<String> {
    let mut impacts = Vec::new();
    match command.payload() {
        CommandPayload::Create(payload) => match payload {
            Payload::Task(p) => {
                impacts.push(format!("Category: {}", p.category.as_str()));
                if let Some(due) = p.due_date {
                    impacts.push(format!("Due {}", humanize_date(due)));
                }
                if let Some(priority) = p.priority {
                    impacts.push(format!("Priority: {:?}", priority));
                }
            }
            Payload::Meal(p) => {
                impacts.push(format!("Meal type: {}", p.meal_type.as_str()));
                if let Some(day) = p.day {
                    impacts.push(format!("Planned for {}", humanize_date(day)));
                }
                if let Some(notes) = &p.dietary_notes {
                    impacts.push(format!("Dietary notes: {}", notes));
                }
            }
            Payload::Shopping(p) => {
                impacts.push(format!(
                    "{} item{}",
                    p.items.len(),
                    if p.items.len() == 1 { "" } else { "s" }
                ));
                if let Some(category) = p.category {
                    impacts.push(format!("Store section: {}", category.as_str()));
                }
            }
            Payload::Reminder(p) => {
                if let Some(date) = p.date {
                    impacts.push(format!("On {}", humanize_date(date)));
                }
                if let Some(time) = p.time {
                    impacts.push(format!("At {}", humanize_time(time)));
                }
            }
            Payload::Appointment(p) => {
                if let Some(date) = p.date {
                    impacts.push(format!("On {}", humanize_date(date)));
                }
                if let Some(time) = p.time {
                    impacts.push(format!("At {}", humanize_time(time)));
                }
                if let Some(location) = &p.location {
                    impacts.push(format!("Location: {}", location));
                }
            }
            Payload::Family(p) => {
                if let Some(relationship) = &p.relationship {
                    impacts.push(format!("Relationship: {}", relationship));
                }
            }
            Payload::Pet(p) => {
                impacts.push(format!("Type: {}", p.kind));
            }
        },
        CommandPayload::Update { changes, .. } => {
            impacts.push(format!(
                "{} field{} will change",
                changes.len(),
                if changes.len() == 1 { "" } else { "s" }
            ));
        }
        CommandPayload::Delete { .. } => {
            impacts.push("One record will be removed".to_string());
        }
    }
    impacts
}

/// Preview shaped like the record a create would persist
fn preview_for(command: &Command) -> Option<serde_json::Value> {
    let CommandPayload::Create(payload) = command.payload() else {
        return None;
    };
    let mut record = serde_json::to_value(payload).ok()?;
    if let Some(object) = record.as_object_mut() {
        object.remove("entity");
        object.insert("id".into(), json!(null));
        object.insert("created_at".into(), json!(null));
    }
    Some(record)
}

fn risks_for(command: &Command) -> Vec<String> {
    let mut risks = Vec::new();
    if command.operation() == Operation::Delete {
        risks.push("Deleting a record cannot be undone.".to_string());
    }
    if command.metadata().confidence < 0.6 {
        risks.push("The request was interpreted with low confidence.".to_string());
    }
    risks
}

pub(crate) fn humanize_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d").to_string()
}

pub(crate) fn humanize_time(time: NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::factory::{command_from_intent, delete_command};
    use crate::core::clock::FixedClock;
    use crate::core::types::Entity;
    use crate::nlu::intent::{Intent, IntentKind, ShoppingPayload, TaskCategory, TaskPayload};
    use chrono::NaiveDate;
    use serde_json::json;

    fn clock() -> FixedClock {
        FixedClock::at_date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
    }

    fn task_command() -> Command {
        let intent = Intent::new(IntentKind::Task, 0.85, "clean the bathroom tomorrow")
            .with_payload(Payload::Task(TaskPayload {
                title: "Clean the bathroom".into(),
                category: TaskCategory::Cleaning,
                due_date: NaiveDate::from_ymd_opt(2024, 3, 2),
                priority: None,
            }));
        command_from_intent(&intent, None, &clock()).unwrap()
    }

    #[test]
    fn test_proposal_is_idempotent() {
        let command = task_command();
        let a = generate_proposal(&command, true);
        let b = generate_proposal(&command, true);
        assert_eq!(
            serde_json::to_value(&a).unwrap(),
            serde_json::to_value(&b).unwrap()
        );
    }

    #[test]
    fn test_task_proposal_content() {
        let proposal = generate_proposal(&task_command(), true);
        assert_eq!(proposal.summary.title, "Add task: Clean the bathroom");
        assert!(proposal
            .summary
            .impacts
            .iter()
            .any(|i| i == "Category: cleaning"));
        assert!(proposal
            .summary
            .impacts
            .iter()
            .any(|i| i.contains("Saturday, March 2")));
        assert!(proposal.risks.is_empty());
    }

    #[test]
    fn test_preview_is_record_shaped() {
        let proposal = generate_proposal(&task_command(), true);
        let preview = proposal.preview.unwrap();
        assert_eq!(preview["title"], "Clean the bathroom");
        assert!(preview.get("id").is_some());
        assert!(preview.get("created_at").is_some());
    }

    #[test]
    fn test_delete_always_warns_and_requires_approval() {
        let command = delete_command(
            Entity::Task,
            json!({"id": uuid::Uuid::new_v4().to_string()}),
            "delete that task",
            &clock(),
        )
        .unwrap();
        let proposal = generate_proposal(&command, true);
        assert!(proposal.risks.iter().any(|r| r.contains("cannot be undone")));

        let relaxed = ApprovalSettings {
            confirmation_style: ConfirmationStyle::JustDoIt,
            always_confirm: Vec::new(),
            ttl_secs: 120,
        };
        assert!(should_require_approval(&command, Some(&relaxed)));
    }

    #[test]
    fn test_approval_policy_matrix() {
        let command = task_command();
        // fail-safe default with no settings
        assert!(should_require_approval(&command, None));

        let always = ApprovalSettings::default();
        assert!(should_require_approval(&command, Some(&always)));

        let relaxed = ApprovalSettings {
            confirmation_style: ConfirmationStyle::JustDoIt,
            always_confirm: Vec::new(),
            ttl_secs: 120,
        };
        assert!(!should_require_approval(&command, Some(&relaxed)));

        // entity override forces approval back on
        let override_shopping = ApprovalSettings {
            confirmation_style: ConfirmationStyle::JustDoIt,
            always_confirm: vec![Entity::Task],
            ttl_secs: 120,
        };
        assert!(should_require_approval(&command, Some(&override_shopping)));
    }
}
