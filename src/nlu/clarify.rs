//! Clarification policy
//!
//! Two deliberately separate entry points: [`generate_clarification`] writes
//! the user-facing sentence (a question when a payload is missing its
//! primary field, a confirmation when it is filled, since the same text
//! narrates proactive execution), while [`needs_clarification`] is the
//! boolean gate. Callers may accept an intent even when the gate says to
//! ask, depending on execution policy.

use crate::nlu::intent::{Intent, IntentKind, Payload};
use crate::nlu::matchers::appointment::APPOINTMENT_PLACEHOLDER;
use crate::nlu::matchers::meal::MEAL_PLACEHOLDER;
use crate::nlu::matchers::reminder::REMINDER_PLACEHOLDER;
use crate::nlu::matchers::task::TASK_PLACEHOLDER;

/// Below this confidence, clarification is always needed
pub const CLARIFY_THRESHOLD: f32 = 0.4;
/// Placeholder primary fields need clarification below this confidence
pub const PLACEHOLDER_THRESHOLD: f32 = 0.6;

/// The all-purpose question used when no category stands out
pub fn generic_question() -> String {
    "I can help with tasks, meals, shopping, reminders and appointments. \
     What would you like to do?"
        .to_string()
}

/// Whether the intent is complete enough to act on without asking
pub fn needs_clarification(intent: &Intent) -> bool {
    if !intent.kind.is_actionable() {
        return true;
    }
    if intent.confidence < CLARIFY_THRESHOLD {
        return true;
    }
    match primary_field(intent) {
        FieldState::Missing => true,
        FieldState::Placeholder => intent.confidence < PLACEHOLDER_THRESHOLD,
        FieldState::Filled => false,
    }
}

/// Category-specific follow-up question, or a confirmation sentence when
/// the payload is adequately filled
pub fn generate_clarification(intent: &Intent) -> String {
    match primary_field(intent) {
        FieldState::Missing | FieldState::Placeholder => question_for(intent),
        FieldState::Filled => confirmation_for(intent),
    }
}

enum FieldState {
    Missing,
    Placeholder,
    Filled,
}

/// State of the category's primary field
fn primary_field(intent: &Intent) -> FieldState {
    let Some(payload) = &intent.payload else {
        return FieldState::Missing;
    };
    let placeholder = |value: &str, default: &str| {
        if value.is_empty() {
            FieldState::Missing
        } else if value == default {
            FieldState::Placeholder
        } else {
            FieldState::Filled
        }
    };
    match payload {
        Payload::Task(p) => placeholder(&p.title, TASK_PLACEHOLDER),
        Payload::Meal(p) => placeholder(&p.name, MEAL_PLACEHOLDER),
        Payload::Shopping(p) => {
            if p.items.is_empty() {
                FieldState::Missing
            } else {
                FieldState::Filled
            }
        }
        Payload::Reminder(p) => placeholder(&p.title, REMINDER_PLACEHOLDER),
        Payload::Appointment(p) => placeholder(&p.title, APPOINTMENT_PLACEHOLDER),
        Payload::Family(p) => placeholder(&p.name, ""),
        Payload::Pet(p) => placeholder(&p.name, ""),
    }
}

fn question_for(intent: &Intent) -> String {
    match intent.kind {
        IntentKind::Task => "What task would you like to add?".into(),
        IntentKind::Meal => "What meal would you like to plan?".into(),
        IntentKind::Shopping => "What items should I add to the shopping list?".into(),
        IntentKind::Reminder => "What should I remind you about?".into(),
        IntentKind::Appointment => "What is the appointment for?".into(),
        IntentKind::Family => "Who would you like to add to the family?".into(),
        IntentKind::Pet => "What is your pet's name?".into(),
        IntentKind::Clarification | IntentKind::Unknown => intent
            .follow_up
            .clone()
            .unwrap_or_else(generic_question),
    }
}

fn confirmation_for(intent: &Intent) -> String {
    match &intent.payload {
        Some(Payload::Task(p)) => format!("Adding task: {}.", p.title),
        Some(Payload::Meal(p)) => format!("Planning {}: {}.", p.meal_type.as_str(), p.name),
        Some(Payload::Shopping(p)) => format!(
            "Adding to the shopping list: {}.",
            p.items.join(", ")
        ),
        Some(Payload::Reminder(p)) => format!("Setting a reminder: {}.", p.title),
        Some(Payload::Appointment(p)) => format!("Scheduling: {}.", p.title),
        Some(Payload::Family(p)) => format!("Adding {} to the family.", p.name),
        Some(Payload::Pet(p)) => format!("Adding your pet {}.", p.name),
        None => generic_question(),
    }
}
