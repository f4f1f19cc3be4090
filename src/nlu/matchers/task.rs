//! Task matching and extraction

use crate::core::clock::Clock;
use crate::nlu::intent::{Intent, IntentKind, Payload, TaskCategory, TaskPayload, TaskPriority};
use crate::nlu::matchers::clean_title;
use crate::nlu::score::{calculate_confidence, matched_keywords, score_keyword_match};
use crate::nlu::time::extract_time_reference;

/// Task vocabulary: action verbs plus the chores and places they act on
pub const TASK_KEYWORDS: [&str; 21] = [
    "task",
    "todo",
    "chore",
    "clean",
    "tidy",
    "vacuum",
    "mop",
    "dust",
    "laundry",
    "dishes",
    "trash",
    "bathroom",
    "kitchen",
    "garage",
    "yard",
    "mow",
    "fix",
    "repair",
    "organize",
    "errand",
    "homework",
];

/// Leading phrases stripped from task titles, in order
const TASK_PREFIXES: [&str; 12] = [
    "add a task to",
    "add a task",
    "add task to",
    "add task",
    "create a task to",
    "create a task",
    "new task",
    "i need to",
    "we need to",
    "need to",
    "add",
    "create",
];

pub const TASK_PLACEHOLDER: &str = "New task";

/// Match the input against the task vocabulary
///
/// The time bonus keys off an explicit clock time; a bare day word already
/// lands in `due_date` and does not raise confidence on its own.
pub fn match_task(raw: &str, input: &str, ambiguity: f32, clock: &dyn Clock) -> Option<Intent> {
    let lower = input.to_lowercase();
    let matched = matched_keywords(&lower, &TASK_KEYWORDS);
    if matched.is_empty() {
        return None;
    }

    let time = extract_time_reference(&lower, clock);
    let keyword_score = score_keyword_match(&lower, &matched);
    let confidence = calculate_confidence(keyword_score, ambiguity, time.time.is_some());

    let payload = TaskPayload {
        title: clean_title(&lower, &TASK_PREFIXES, TASK_PLACEHOLDER),
        category: infer_category(&lower),
        due_date: time.date,
        priority: if time.urgent {
            Some(TaskPriority::High)
        } else {
            None
        },
    };

    Some(Intent::new(IntentKind::Task, confidence, raw).with_payload(Payload::Task(payload)))
}

const CLEANING_WORDS: [&str; 10] = [
    "clean", "tidy", "vacuum", "mop", "dust", "laundry", "dishes", "trash", "bathroom", "kitchen",
];
const MAINTENANCE_WORDS: [&str; 8] = [
    "fix", "repair", "replace", "leak", "filter", "gutter", "mow", "garage",
];
const ERRAND_WORDS: [&str; 6] = ["errand", "pick up", "drop off", "post office", "bank", "return"];
const KIDS_WORDS: [&str; 6] = ["kids", "school", "homework", "daycare", "practice", "playdate"];

/// First matching category wins, checked cleaning → maintenance → errands → kids
fn infer_category(lower: &str) -> TaskCategory {
    let contains_any = |words: &[&str]| words.iter().any(|w| lower.contains(w));
    if contains_any(&CLEANING_WORDS) {
        TaskCategory::Cleaning
    } else if contains_any(&MAINTENANCE_WORDS) {
        TaskCategory::HomeMaintenance
    } else if contains_any(&ERRAND_WORDS) {
        TaskCategory::Errands
    } else if contains_any(&KIDS_WORDS) {
        TaskCategory::Kids
    } else {
        TaskCategory::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::FixedClock;
    use chrono::NaiveDate;

    fn clock() -> FixedClock {
        FixedClock::at_date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
    }

    #[test]
    fn test_clean_the_bathroom_tomorrow() {
        let intent = match_task(
            "clean the bathroom tomorrow",
            "clean the bathroom tomorrow",
            0.0,
            &clock(),
        )
        .unwrap();
        assert_eq!(intent.kind, IntentKind::Task);
        assert!((intent.confidence - 0.85).abs() < 1e-6);
        match intent.payload.unwrap() {
            Payload::Task(p) => {
                assert_eq!(p.title, "Clean the bathroom");
                assert_eq!(p.category, TaskCategory::Cleaning);
                assert_eq!(p.due_date, NaiveDate::from_ymd_opt(2024, 3, 2));
                assert_eq!(p.priority, None);
            }
            other => panic!("wrong payload: {:?}", other),
        }
    }

    #[test]
    fn test_urgent_maintenance_task() {
        let intent = match_task(
            "fix the leak asap",
            "fix the leak asap",
            0.0,
            &clock(),
        )
        .unwrap();
        match intent.payload.unwrap() {
            Payload::Task(p) => {
                assert_eq!(p.category, TaskCategory::HomeMaintenance);
                assert_eq!(p.priority, Some(TaskPriority::High));
            }
            other => panic!("wrong payload: {:?}", other),
        }
    }

    #[test]
    fn test_no_task_words_no_match() {
        assert!(match_task("buy milk", "buy milk", 0.0, &clock()).is_none());
    }

    #[test]
    fn test_prefix_stripping() {
        let intent = match_task(
            "add a task to organize the garage",
            "add a task to organize the garage",
            0.0,
            &clock(),
        )
        .unwrap();
        match intent.payload.unwrap() {
            Payload::Task(p) => assert_eq!(p.title, "Organize the garage"),
            other => panic!("wrong payload: {:?}", other),
        }
    }
}
