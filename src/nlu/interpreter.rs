//! The intent-understanding pipeline
//!
//! Normalize, detect vagueness, run every category matcher, select, and
//! gate on confidence. This layer never returns an error: every failure
//! mode degrades to a clarification or unknown intent carrying a follow-up
//! question the interface can show directly.

use crate::core::clock::Clock;
use crate::nlu::clarify::{generate_clarification, generic_question};
use crate::nlu::intent::Intent;
use crate::nlu::matchers::{
    match_appointment, match_meal, match_reminder, match_shopping, match_task,
};
use crate::nlu::normalize::normalize;
use crate::nlu::score::detect_ambiguity;
use crate::nlu::select::{select_best, ACCEPT_THRESHOLD};
use std::sync::Arc;

/// Deterministic classifier over the fixed household vocabulary
pub struct Interpreter {
    clock: Arc<dyn Clock>,
}

impl Interpreter {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Classify one request
    pub fn interpret(&self, raw: &str) -> Intent {
        let input = normalize(raw);
        if input.is_empty() {
            return Intent::clarification(raw, 0.0, generic_question());
        }

        let ambiguity = detect_ambiguity(&input);
        if ambiguity.short_circuits() {
            tracing::debug!(
                score = ambiguity.score,
                phrases = ?ambiguity.matched,
                "input too vague to classify"
            );
            return Intent::clarification(raw, 0.0, generic_question());
        }

        let clock = self.clock.as_ref();
        let candidates: Vec<Intent> = [
            match_task(raw, &input, ambiguity.score, clock),
            match_meal(raw, &input, ambiguity.score, clock),
            match_shopping(raw, &input, ambiguity.score),
            match_reminder(raw, &input, ambiguity.score, clock),
            match_appointment(raw, &input, ambiguity.score, clock),
        ]
        .into_iter()
        .flatten()
        .collect();

        let best = select_best(candidates, raw);
        tracing::debug!(kind = %best.kind, confidence = best.confidence, "selected intent");

        if best.kind.is_actionable() && best.confidence < ACCEPT_THRESHOLD {
            let question = generate_clarification(&best);
            return Intent::clarification(raw, best.confidence, question);
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::FixedClock;
    use crate::nlu::intent::{IntentKind, Payload, ShoppingCategory, TaskCategory};
    use chrono::NaiveDate;

    fn interpreter() -> Interpreter {
        Interpreter::new(Arc::new(FixedClock::at_date(
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        )))
    }

    #[test]
    fn test_clean_the_bathroom_tomorrow() {
        let intent = interpreter().interpret("clean the bathroom tomorrow");
        assert_eq!(intent.kind, IntentKind::Task);
        assert!((intent.confidence - 0.85).abs() < 1e-6);
        match intent.payload.unwrap() {
            Payload::Task(p) => {
                assert_eq!(p.category, TaskCategory::Cleaning);
                assert_eq!(p.due_date, NaiveDate::from_ymd_opt(2024, 3, 2));
            }
            other => panic!("wrong payload: {:?}", other),
        }
    }

    #[test]
    fn test_shopping_list_request() {
        let intent = interpreter().interpret("add milk, eggs, and bread to shopping");
        assert_eq!(intent.kind, IntentKind::Shopping);
        match intent.payload.unwrap() {
            Payload::Shopping(p) => {
                assert_eq!(p.items, vec!["milk", "eggs", "bread"]);
                assert_eq!(p.category, Some(ShoppingCategory::Dairy));
            }
            other => panic!("wrong payload: {:?}", other),
        }
    }

    #[test]
    fn test_vague_input_short_circuits() {
        let intent = interpreter().interpret("handle that thing");
        assert_eq!(intent.kind, IntentKind::Clarification);
        assert!(intent.confidence < 0.5);
        assert!(intent.follow_up.unwrap().contains("tasks"));
    }

    #[test]
    fn test_gibberish_is_unknown() {
        let intent = interpreter().interpret("xylophone quartet zzz");
        assert_eq!(intent.kind, IntentKind::Unknown);
        assert!(intent.confidence < 0.5);
        assert!(intent.follow_up.is_some());
    }

    #[test]
    fn test_empty_input_clarifies() {
        let intent = interpreter().interpret("   !!!   ");
        assert_eq!(intent.kind, IntentKind::Clarification);
    }

    #[test]
    fn test_appointment_beats_reminder_on_overlap() {
        let intent = interpreter().interpret("remind me about the dentist appointment friday");
        assert_eq!(intent.kind, IntentKind::Appointment);
    }
}
