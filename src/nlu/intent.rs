//! Classified intents and their structured payloads
//!
//! An `Intent` is the output of the understanding pipeline: a category, a
//! confidence score, and optionally a typed payload extracted from the
//! request. This shape is also the contract the LLM fallback must produce,
//! so everything here derives serde and externally produced values go
//! through [`Intent::validated`] before entering the pipeline.

use crate::core::types::Entity;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// The nine intent categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntentKind {
    Task,
    Meal,
    Shopping,
    Reminder,
    Appointment,
    Family,
    Pet,
    Clarification,
    Unknown,
}

impl IntentKind {
    /// Categories that map to a household entity and can become commands
    pub fn entity(&self) -> Option<Entity> {
        match self {
            IntentKind::Task => Some(Entity::Task),
            IntentKind::Meal => Some(Entity::Meal),
            IntentKind::Shopping => Some(Entity::Shopping),
            IntentKind::Reminder => Some(Entity::Reminder),
            IntentKind::Appointment => Some(Entity::Appointment),
            IntentKind::Family => Some(Entity::Family),
            IntentKind::Pet => Some(Entity::Pet),
            IntentKind::Clarification | IntentKind::Unknown => None,
        }
    }

    pub fn is_actionable(&self) -> bool {
        self.entity().is_some()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IntentKind::Task => "task",
            IntentKind::Meal => "meal",
            IntentKind::Shopping => "shopping",
            IntentKind::Reminder => "reminder",
            IntentKind::Appointment => "appointment",
            IntentKind::Family => "family",
            IntentKind::Pet => "pet",
            IntentKind::Clarification => "clarification",
            IntentKind::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for IntentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified user request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Intent {
    #[serde(rename = "type")]
    pub kind: IntentKind,
    /// Classification certainty in [0, 1]
    pub confidence: f32,
    /// The user's input as received
    pub raw: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Payload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up: Option<String>,
}

impl Intent {
    pub fn new(kind: IntentKind, confidence: f32, raw: impl Into<String>) -> Self {
        Self {
            kind,
            confidence: confidence.clamp(0.0, 1.0),
            raw: raw.into(),
            payload: None,
            follow_up: None,
        }
    }

    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn with_follow_up(mut self, question: impl Into<String>) -> Self {
        self.follow_up = Some(question.into());
        self
    }

    pub fn clarification(raw: impl Into<String>, confidence: f32, question: impl Into<String>) -> Self {
        Self::new(IntentKind::Clarification, confidence, raw).with_follow_up(question)
    }

    pub fn unknown(raw: impl Into<String>, question: impl Into<String>) -> Self {
        Self::new(IntentKind::Unknown, 0.0, raw).with_follow_up(question)
    }

    /// Validate an intent from an untrusted source (the LLM fallback, or any
    /// external producer of the intent contract)
    ///
    /// Clamps confidence into [0, 1] and rejects payloads whose entity does
    /// not match the declared kind. Unknown kinds are already rejected at
    /// deserialization by the closed enum.
    pub fn validated(mut self) -> Result<Self, String> {
        if !self.confidence.is_finite() {
            return Err("confidence is not a finite number".into());
        }
        self.confidence = self.confidence.clamp(0.0, 1.0);
        match (&self.kind, &self.payload) {
            (kind, Some(payload)) => {
                let expected = kind
                    .entity()
                    .ok_or_else(|| format!("{} intent cannot carry a payload", kind))?;
                if payload.entity() != expected {
                    return Err(format!(
                        "payload entity {} does not match intent type {}",
                        payload.entity(),
                        kind
                    ));
                }
                Ok(self)
            }
            _ => Ok(self),
        }
    }
}

/// Category-specific structured data, one shape per actionable category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "entity", rename_all = "lowercase")]
pub enum Payload {
    Task(TaskPayload),
    Meal(MealPayload),
    Shopping(ShoppingPayload),
    Reminder(ReminderPayload),
    Appointment(AppointmentPayload),
    Family(FamilyPayload),
    Pet(PetPayload),
}

impl Payload {
    pub fn entity(&self) -> Entity {
        match self {
            Payload::Task(_) => Entity::Task,
            Payload::Meal(_) => Entity::Meal,
            Payload::Shopping(_) => Entity::Shopping,
            Payload::Reminder(_) => Entity::Reminder,
            Payload::Appointment(_) => Entity::Appointment,
            Payload::Family(_) => Entity::Family,
            Payload::Pet(_) => Entity::Pet,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskPayload {
    pub title: String,
    pub category: TaskCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskCategory {
    Cleaning,
    Errands,
    Kids,
    HomeMaintenance,
    Other,
}

impl TaskCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskCategory::Cleaning => "cleaning",
            TaskCategory::Errands => "errands",
            TaskCategory::Kids => "kids",
            TaskCategory::HomeMaintenance => "home-maintenance",
            TaskCategory::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Normal,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPayload {
    pub name: String,
    pub meal_type: MealType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dietary_notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingPayload {
    /// Non-empty list of items to add
    pub items: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<ShoppingCategory>,
}

/// Store section, inferred from the first item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShoppingCategory {
    Produce,
    Dairy,
    Bakery,
    Meat,
    Pantry,
    Frozen,
    Household,
}

impl ShoppingCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShoppingCategory::Produce => "produce",
            ShoppingCategory::Dairy => "dairy",
            ShoppingCategory::Bakery => "bakery",
            ShoppingCategory::Meat => "meat",
            ShoppingCategory::Pantry => "pantry",
            ShoppingCategory::Frozen => "frozen",
            ShoppingCategory::Household => "household",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReminderPayload {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentPayload {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyPayload {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetPayload {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
