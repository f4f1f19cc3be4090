//! Best-match selection across category matchers
//!
//! All matchers run independently; this module merges their outputs into a
//! single intent or a clarification when the field is too close to call.

use crate::nlu::clarify::generic_question;
use crate::nlu::intent::Intent;

/// Top-two confidence gap below which the match is a tie
pub const TIE_MARGIN: f32 = 0.2;
/// Winners below this confidence are clarified instead of accepted
pub const ACCEPT_THRESHOLD: f32 = 0.5;
/// Categories above this confidence are worth naming in a tie question
pub const MENTION_THRESHOLD: f32 = 0.3;

/// Merge matcher outputs: the clear winner, a tie clarification, or unknown
///
/// A winner below [`ACCEPT_THRESHOLD`] is still returned as-is; the
/// interpreter decides between a generic and a category-aware clarification.
pub fn select_best(mut candidates: Vec<Intent>, raw: &str) -> Intent {
    candidates.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    if candidates.len() < 2 {
        return candidates
            .pop()
            .unwrap_or_else(|| Intent::unknown(raw, generic_question()));
    }

    let gap = candidates[0].confidence - candidates[1].confidence;
    if gap < TIE_MARGIN {
        let average = (candidates[0].confidence + candidates[1].confidence) / 2.0;
        let contenders: Vec<&str> = candidates
            .iter()
            .filter(|c| c.confidence > MENTION_THRESHOLD)
            .map(|c| c.kind.as_str())
            .collect();
        let question = format!(
            "That could mean a few things - did you want a {}?",
            join_or(&contenders)
        );
        return Intent::clarification(raw, average, question);
    }

    candidates.swap_remove(0)
}

/// ", "-join with the last item joined by " or "
pub fn join_or(items: &[&str]) -> String {
    match items {
        [] => String::new(),
        [only] => (*only).to_string(),
        [head @ .., last] => format!("{} or {}", head.join(", "), last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlu::intent::IntentKind;

    #[test]
    fn test_no_candidates_is_unknown() {
        let intent = select_best(Vec::new(), "gibberish");
        assert_eq!(intent.kind, IntentKind::Unknown);
        assert_eq!(intent.confidence, 0.0);
        assert!(intent.follow_up.is_some());
    }

    #[test]
    fn test_sole_candidate_returned_as_is() {
        let sole = Intent::new(IntentKind::Task, 0.45, "x");
        let intent = select_best(vec![sole], "x");
        assert_eq!(intent.kind, IntentKind::Task);
        assert!((intent.confidence - 0.45).abs() < 1e-6);
    }

    #[test]
    fn test_near_tie_becomes_clarification() {
        let task = Intent::new(IntentKind::Task, 0.60, "x");
        let reminder = Intent::new(IntentKind::Reminder, 0.55, "x");
        let intent = select_best(vec![reminder, task], "x");
        assert_eq!(intent.kind, IntentKind::Clarification);
        assert!((intent.confidence - 0.575).abs() < 1e-6);
        let question = intent.follow_up.unwrap();
        assert!(question.contains("task or reminder"), "{}", question);
    }

    #[test]
    fn test_clear_winner_selected() {
        let shopping = Intent::new(IntentKind::Shopping, 0.85, "x");
        let meal = Intent::new(IntentKind::Meal, 0.6, "x");
        let intent = select_best(vec![meal, shopping], "x");
        assert_eq!(intent.kind, IntentKind::Shopping);
    }

    #[test]
    fn test_tie_question_skips_weak_contenders() {
        let task = Intent::new(IntentKind::Task, 0.45, "x");
        let meal = Intent::new(IntentKind::Meal, 0.32, "x");
        let shopping = Intent::new(IntentKind::Shopping, 0.2, "x");
        let intent = select_best(vec![task, meal, shopping], "x");
        assert_eq!(intent.kind, IntentKind::Clarification);
        let question = intent.follow_up.unwrap();
        assert!(question.contains("task or meal"), "{}", question);
        assert!(!question.contains("shopping"), "{}", question);
    }

    #[test]
    fn test_join_or() {
        assert_eq!(join_or(&["task"]), "task");
        assert_eq!(join_or(&["task", "reminder"]), "task or reminder");
        assert_eq!(
            join_or(&["task", "reminder", "appointment"]),
            "task, reminder or appointment"
        );
    }
}
