//! Reminder matching and extraction
//!
//! Defers to the appointment matcher on overlap: any input carrying an
//! appointment-signaling word is not a reminder, so "remind me about the
//! dentist appointment" classifies as an appointment.

use crate::core::clock::Clock;
use crate::nlu::intent::{Intent, IntentKind, Payload, ReminderPayload};
use crate::nlu::matchers::appointment::APPOINTMENT_KEYWORDS;
use crate::nlu::matchers::clean_title;
use crate::nlu::score::{calculate_confidence, matched_keywords, score_keyword_match};
use crate::nlu::time::extract_time_reference;

pub const REMINDER_KEYWORDS: [&str; 5] =
    ["remind", "reminder", "remember", "dont forget", "forget"];

const REMINDER_PREFIXES: [&str; 13] = [
    "remind me to",
    "remind me about",
    "remind me",
    "set a reminder to",
    "set a reminder for",
    "set a reminder",
    "add a reminder to",
    "add a reminder",
    "reminder to",
    "remember to",
    "remember",
    "dont forget to",
    "dont forget",
];

pub const REMINDER_PLACEHOLDER: &str = "New reminder";

pub fn match_reminder(raw: &str, input: &str, ambiguity: f32, clock: &dyn Clock) -> Option<Intent> {
    let lower = input.to_lowercase();
    if APPOINTMENT_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return None;
    }
    let matched = matched_keywords(&lower, &REMINDER_KEYWORDS);
    if matched.is_empty() {
        return None;
    }

    let time = extract_time_reference(&lower, clock);
    let keyword_score = score_keyword_match(&lower, &matched);
    let confidence = calculate_confidence(
        keyword_score,
        ambiguity,
        time.date.is_some() || time.time.is_some(),
    );

    let payload = ReminderPayload {
        title: clean_title(&lower, &REMINDER_PREFIXES, REMINDER_PLACEHOLDER),
        time: time.time,
        date: time.date,
    };

    Some(Intent::new(IntentKind::Reminder, confidence, raw).with_payload(Payload::Reminder(payload)))
}
