//! Meal matching and extraction

use crate::core::clock::Clock;
use crate::nlu::intent::{Intent, IntentKind, MealPayload, MealType, Payload};
use crate::nlu::matchers::{capitalize, strip_prefixes};
use crate::nlu::score::{calculate_confidence, matched_keywords, score_keyword_match};
use crate::nlu::time::{extract_time_reference, strip_time_words};

pub const MEAL_KEYWORDS: [&str; 9] = [
    "meal",
    "breakfast",
    "lunch",
    "dinner",
    "snack",
    "cook",
    "recipe",
    "menu",
    "eat",
];

const MEAL_PREFIXES: [&str; 11] = [
    "plan a meal for",
    "plan a meal",
    "plan meal",
    "add a meal",
    "add meal",
    "plan",
    "cook",
    "make",
    "have",
    "schedule",
    "add",
];

/// Words removed from the meal name after prefix stripping
const MEAL_NOISE_WORDS: [&str; 8] = [
    "meal",
    "breakfast",
    "lunch",
    "dinner",
    "snack",
    "for",
    "some",
    "a",
];

const DIETARY_NOTES: [&str; 5] = [
    "vegetarian",
    "vegan",
    "gluten free",
    "dairy free",
    "nut free",
];

pub const MEAL_PLACEHOLDER: &str = "New meal";

pub fn match_meal(raw: &str, input: &str, ambiguity: f32, clock: &dyn Clock) -> Option<Intent> {
    let lower = input.to_lowercase();
    let matched = matched_keywords(&lower, &MEAL_KEYWORDS);
    if matched.is_empty() {
        return None;
    }

    let time = extract_time_reference(&lower, clock);
    let keyword_score = score_keyword_match(&lower, &matched);
    let confidence = calculate_confidence(keyword_score, ambiguity, time.date.is_some());

    let notes: Vec<&str> = DIETARY_NOTES
        .iter()
        .filter(|n| lower.contains(*n))
        .copied()
        .collect();

    let payload = MealPayload {
        name: extract_name(&lower),
        meal_type: infer_meal_type(&lower),
        day: time.date,
        dietary_notes: if notes.is_empty() {
            None
        } else {
            Some(notes.join(", "))
        },
    };

    Some(Intent::new(IntentKind::Meal, confidence, raw).with_payload(Payload::Meal(payload)))
}

/// First meal-type word found wins; dinner when none is named
fn infer_meal_type(lower: &str) -> MealType {
    for (word, meal_type) in [
        ("breakfast", MealType::Breakfast),
        ("lunch", MealType::Lunch),
        ("dinner", MealType::Dinner),
        ("snack", MealType::Snack),
    ] {
        if lower.contains(word) {
            return meal_type;
        }
    }
    MealType::Dinner
}

/// Meal name: prefixes, then time words, then meal noise words
fn extract_name(lower: &str) -> String {
    let stripped = strip_prefixes(lower, &MEAL_PREFIXES);
    let without_time = strip_time_words(stripped);
    let name = without_time
        .split_whitespace()
        .filter(|t| {
            let t = t.trim_matches(|c| c == ',' || c == '.');
            !MEAL_NOISE_WORDS.contains(&t)
        })
        .collect::<Vec<_>>()
        .join(" ");
    let name = name.trim_matches(|c: char| c.is_whitespace() || c == ',' || c == '.');
    if name.is_empty() {
        MEAL_PLACEHOLDER.to_string()
    } else {
        capitalize(name)
    }
}
