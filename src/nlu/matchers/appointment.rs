//! Appointment matching and extraction
//!
//! Has its own clock-time parsing, separate from the shared extractor: it
//! additionally accepts a bare "at 3" and decides the meridiem itself.

use crate::core::clock::Clock;
use crate::nlu::intent::{AppointmentPayload, Intent, IntentKind, Payload};
use crate::nlu::matchers::{capitalize, strip_prefixes};
use crate::nlu::score::{calculate_confidence, matched_keywords, score_keyword_match};
use crate::nlu::time::{extract_time_reference, parse_clock_time, strip_time_words};
use chrono::NaiveTime;

pub const APPOINTMENT_KEYWORDS: [&str; 10] = [
    "appointment",
    "dentist",
    "doctor",
    "meeting",
    "checkup",
    "check-up",
    "vet",
    "haircut",
    "salon",
    "interview",
];

const ACTION_VERBS: [&str; 10] = [
    "schedule an",
    "schedule a",
    "schedule",
    "book",
    "set up",
    "make an",
    "add",
    "remind me about",
    "remind me of",
    "remind me",
];

/// Filler dropped from the front of a derived title
const LEADING_FILLER: [&str; 9] = ["the", "a", "an", "my", "our", "for", "with", "about", "to"];

pub const APPOINTMENT_PLACEHOLDER: &str = "Appointment";

pub fn match_appointment(
    raw: &str,
    input: &str,
    ambiguity: f32,
    clock: &dyn Clock,
) -> Option<Intent> {
    let lower = input.to_lowercase();
    let matched = matched_keywords(&lower, &APPOINTMENT_KEYWORDS);
    if matched.is_empty() {
        return None;
    }

    let shared = extract_time_reference(&lower, clock);
    let time = parse_appointment_time(&lower).or(shared.time);
    let keyword_score = score_keyword_match(&lower, &matched);
    let confidence = calculate_confidence(
        keyword_score,
        ambiguity,
        shared.date.is_some() || time.is_some(),
    );

    let payload = AppointmentPayload {
        title: derive_title(&lower, &matched),
        date: shared.date,
        time,
        location: None,
    };

    Some(
        Intent::new(IntentKind::Appointment, confidence, raw)
            .with_payload(Payload::Appointment(payload)),
    )
}

/// Inline time parsing: 12-hour with am/pm, 24-hour HH:MM, and a bare
/// "at N" where 1-7 reads as afternoon/evening and 8-11 as morning
pub fn parse_appointment_time(lower: &str) -> Option<NaiveTime> {
    let tokens: Vec<&str> = lower.split_whitespace().collect();
    for (i, token) in tokens.iter().enumerate() {
        let token = token.trim_matches(|c| c == ',' || c == '.');
        if let Some(time) = parse_clock_time(token, tokens.get(i + 1).copied()) {
            return Some(time);
        }
        if i > 0 && tokens[i - 1] == "at" {
            if let Ok(hour) = token.parse::<u32>() {
                let hour24 = match hour {
                    1..=7 => hour + 12,
                    8..=12 => hour,
                    _ => continue,
                };
                return NaiveTime::from_hms_opt(hour24 % 24, 0, 0);
            }
        }
    }
    None
}

/// Title passes: leading action verbs, then every appointment keyword, then
/// time words. Falls back to the first matched keyword, or "Appointment".
fn derive_title(lower: &str, matched: &[&str]) -> String {
    let stripped = strip_prefixes(lower, &ACTION_VERBS);
    let without_keywords = stripped
        .split_whitespace()
        .filter(|t| {
            let t = t.trim_matches(|c| c == ',' || c == '.');
            !APPOINTMENT_KEYWORDS.contains(&t)
        })
        .collect::<Vec<_>>()
        .join(" ");
    let without_time = strip_time_words(&without_keywords);
    let token_vec: Vec<&str> = without_time.split_whitespace().collect();
    let mut tokens: &[&str] = &token_vec;
    while let Some((first, rest)) = tokens.split_first() {
        if LEADING_FILLER.contains(&first.trim_matches(|c| c == ',' || c == '.')) {
            tokens = rest;
        } else {
            break;
        }
    }
    let cleaned = tokens
        .join(" ")
        .trim_matches(|c: char| c.is_whitespace() || c == ',' || c == '.')
        .to_string();

    if !cleaned.is_empty() {
        return capitalize(&cleaned);
    }
    matched
        .iter()
        .find(|k| **k != "appointment")
        .map(|k| capitalize(k))
        .unwrap_or_else(|| APPOINTMENT_PLACEHOLDER.to_string())
}
