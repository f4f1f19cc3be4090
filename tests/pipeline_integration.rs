//! Integration tests for the intent-understanding pipeline

use homestead::core::clock::FixedClock;
use homestead::nlu::intent::{IntentKind, Payload, ShoppingCategory, TaskCategory};
use homestead::nlu::Interpreter;
use chrono::NaiveDate;
use proptest::prelude::*;
use std::sync::Arc;

fn interpreter() -> Interpreter {
    // a fixed Friday so day words resolve deterministically
    Interpreter::new(Arc::new(FixedClock::at_date(
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
    )))
}

/// Test 1: A dated chore classifies as a cleaning task
#[test]
fn test_dated_chore_classifies_as_task() {
    let intent = interpreter().interpret("clean the bathroom tomorrow");
    assert_eq!(intent.kind, IntentKind::Task);
    assert!((intent.confidence - 0.85).abs() < 1e-6);
    match intent.payload.expect("task payload") {
        Payload::Task(p) => {
            assert_eq!(p.title, "Clean the bathroom");
            assert_eq!(p.category, TaskCategory::Cleaning);
            assert_eq!(p.due_date, NaiveDate::from_ymd_opt(2024, 3, 2));
        }
        other => panic!("wrong payload: {:?}", other),
    }
}

/// Test 2: A list request splits items and infers the store section
#[test]
fn test_shopping_items_split_and_categorized() {
    let intent = interpreter().interpret("add milk, eggs, and bread to shopping");
    assert_eq!(intent.kind, IntentKind::Shopping);
    match intent.payload.expect("shopping payload") {
        Payload::Shopping(p) => {
            assert_eq!(p.items, vec!["milk", "eggs", "bread"]);
            assert_eq!(p.category, Some(ShoppingCategory::Dairy));
        }
        other => panic!("wrong payload: {:?}", other),
    }
}

/// Test 3: Vague phrasing short-circuits to a generic clarification
#[test]
fn test_vague_request_clarifies() {
    let intent = interpreter().interpret("handle that thing");
    assert_eq!(intent.kind, IntentKind::Clarification);
    assert!(intent.confidence < 0.5);
    let question = intent.follow_up.expect("follow-up question");
    assert!(question.contains("tasks"), "{}", question);
    assert!(question.contains("shopping"), "{}", question);
}

/// Test 4: Appointments win their overlap with reminders
#[test]
fn test_appointment_wins_reminder_overlap() {
    let intent = interpreter().interpret("remind me about the dentist appointment tomorrow");
    assert_eq!(intent.kind, IntentKind::Appointment);
    match intent.payload.expect("appointment payload") {
        Payload::Appointment(p) => {
            assert_eq!(p.title, "Dentist");
            assert_eq!(p.date, NaiveDate::from_ymd_opt(2024, 3, 2));
        }
        other => panic!("wrong payload: {:?}", other),
    }
}

/// Test 5: Appointment time parsing handles bare hours
#[test]
fn test_appointment_inline_time() {
    let intent = interpreter().interpret("dentist tomorrow at 3");
    assert_eq!(intent.kind, IntentKind::Appointment);
    match intent.payload.expect("appointment payload") {
        Payload::Appointment(p) => {
            assert_eq!(p.time, chrono::NaiveTime::from_hms_opt(15, 0, 0));
        }
        other => panic!("wrong payload: {:?}", other),
    }
}

/// Test 6: Inputs outside the vocabulary come back unknown, below the
/// acceptance threshold
#[test]
fn test_out_of_vocabulary_is_unknown() {
    for input in ["deal with the car", "launch the rocket", "qwerty"] {
        let intent = interpreter().interpret(input);
        assert!(
            matches!(intent.kind, IntentKind::Unknown | IntentKind::Clarification),
            "{} classified as {}",
            input,
            intent.kind
        );
        assert!(intent.confidence < 0.5, "{}", input);
        assert!(intent.follow_up.is_some(), "{}", input);
    }
}

/// Test 7: Normalization feeds the matchers ("don't" loses its apostrophe)
#[test]
fn test_normalized_contractions_still_match() {
    let intent = interpreter().interpret("Don't forget to water the plants tomorrow!");
    assert_eq!(intent.kind, IntentKind::Reminder);
    match intent.payload.expect("reminder payload") {
        Payload::Reminder(p) => {
            assert_eq!(p.title, "Water the plants");
            assert_eq!(p.date, NaiveDate::from_ymd_opt(2024, 3, 2));
        }
        other => panic!("wrong payload: {:?}", other),
    }
}

/// Test 8: Meal planning extracts the dish and the day
#[test]
fn test_meal_planning() {
    let intent = interpreter().interpret("plan spaghetti for dinner on monday");
    assert_eq!(intent.kind, IntentKind::Meal);
    match intent.payload.expect("meal payload") {
        Payload::Meal(p) => {
            assert_eq!(p.name, "Spaghetti");
            // next Monday after Friday March 1st
            assert_eq!(p.day, NaiveDate::from_ymd_opt(2024, 3, 4));
        }
        other => panic!("wrong payload: {:?}", other),
    }
}

proptest! {
    /// Every confidence the pipeline emits stays in [0, 1], whatever the input
    #[test]
    fn prop_confidence_in_range(input in "\\PC{0,60}") {
        let intent = interpreter().interpret(&input);
        prop_assert!((0.0..=1.0).contains(&intent.confidence));
    }

    /// Accepted actionable intents are never below the acceptance threshold
    #[test]
    fn prop_actionable_means_confident(input in "\\PC{0,60}") {
        let intent = interpreter().interpret(&input);
        if intent.kind.is_actionable() {
            prop_assert!(intent.confidence >= 0.5);
        }
    }
}
