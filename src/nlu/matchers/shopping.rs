//! Shopping matching and item extraction

use crate::nlu::intent::{Intent, IntentKind, Payload, ShoppingCategory, ShoppingPayload};
use crate::nlu::matchers::strip_leading_phrase;
use crate::nlu::score::{calculate_confidence, matched_keywords, score_keyword_match};

pub const SHOPPING_KEYWORDS: [&str; 7] = [
    "shopping",
    "shop",
    "buy",
    "grocery",
    "groceries",
    "store",
    "purchase",
];

/// Trailing phrases cut before item splitting
const LIST_SUFFIXES: [&str; 7] = [
    "to the shopping list",
    "to shopping list",
    "to the list",
    "to shopping",
    "to the store",
    "from the store",
    "at the store",
];

/// Leading verbs cut before item splitting, in order
const ITEM_PREFIXES: [&str; 9] = [
    "add",
    "buy",
    "get",
    "pick up",
    "purchase",
    "we need",
    "i need",
    "need",
    "put",
];

pub fn match_shopping(raw: &str, input: &str, ambiguity: f32) -> Option<Intent> {
    let lower = input.to_lowercase();
    let matched = matched_keywords(&lower, &SHOPPING_KEYWORDS);
    if matched.is_empty() {
        return None;
    }

    let keyword_score = score_keyword_match(&lower, &matched);
    let confidence = calculate_confidence(keyword_score, ambiguity, false);

    let items = extract_items(&lower);
    let mut intent = Intent::new(IntentKind::Shopping, confidence, raw);
    if !items.is_empty() {
        let category = infer_category(&items[0]);
        intent = intent.with_payload(Payload::Shopping(ShoppingPayload { items, category }));
    }
    Some(intent)
}

/// Split the request into items: comma-separated, else " and "-separated,
/// else a single item with its leading verb stripped
pub fn extract_items(lower: &str) -> Vec<String> {
    let mut working = lower.trim().trim_end_matches('.').trim();

    for suffix in LIST_SUFFIXES {
        if let Some(stripped) = working.strip_suffix(suffix) {
            working = stripped.trim_end();
            break;
        }
    }
    for prefix in ITEM_PREFIXES {
        if let Some(stripped) = strip_leading_phrase(working, prefix) {
            working = stripped;
        }
    }

    let parts: Vec<&str> = if working.contains(',') {
        working.split(',').collect()
    } else if working.contains(" and ") {
        working.split(" and ").collect()
    } else {
        vec![working]
    };

    parts
        .into_iter()
        .map(|part| {
            let part = part.trim();
            strip_leading_phrase(part, "and").unwrap_or(part)
        })
        .map(|part| part.trim_matches(|c: char| c.is_whitespace() || c == '.').to_string())
        .filter(|part| {
            // a remainder that still talks about shopping is not an item
            !part.is_empty() && !SHOPPING_KEYWORDS.iter().any(|k| part.contains(k))
        })
        .collect()
}

const SECTIONS: [(ShoppingCategory, &[&str]); 7] = [
    (
        ShoppingCategory::Dairy,
        &["milk", "cheese", "yogurt", "butter", "cream", "egg"],
    ),
    (
        ShoppingCategory::Produce,
        &[
            "apple", "banana", "lettuce", "tomato", "onion", "carrot", "spinach", "potato",
            "fruit", "vegetable",
        ],
    ),
    (
        ShoppingCategory::Bakery,
        &["bread", "bagel", "bun", "muffin", "tortilla"],
    ),
    (
        ShoppingCategory::Meat,
        &["chicken", "beef", "pork", "fish", "turkey", "bacon", "sausage"],
    ),
    (
        ShoppingCategory::Frozen,
        &["frozen", "ice cream", "pizza"],
    ),
    (
        ShoppingCategory::Household,
        &["soap", "detergent", "paper towel", "toilet paper", "sponge", "shampoo"],
    ),
    (
        ShoppingCategory::Pantry,
        &["pasta", "rice", "cereal", "flour", "sugar", "coffee", "tea", "oil", "salt"],
    ),
];

/// Store section inferred from the first item
pub fn infer_category(first_item: &str) -> Option<ShoppingCategory> {
    let lower = first_item.to_lowercase();
    SECTIONS
        .iter()
        .find(|(_, words)| words.iter().any(|w| lower.contains(w)))
        .map(|(section, _)| *section)
}
