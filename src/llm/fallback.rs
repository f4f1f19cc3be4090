//! LLM fallback parsing
//!
//! Consulted only when the heuristic pipeline wants clarification. The
//! system prompt pins the model to the intent contract, and the response is
//! untrusted input: it goes through the same validation as any external
//! intent before it may replace the heuristic result.

use crate::core::error::{HomesteadError, Result};
use crate::llm::client::LlmClient;
use crate::nlu::clarify::needs_clarification;
use crate::nlu::intent::{Intent, IntentKind};

/// Parse a request with the LLM, validating the result
pub async fn parse_with_llm(client: &LlmClient, input: &str) -> Result<Intent> {
    let user_prompt = format!("REQUEST:\n{}\n\nRespond with the intent JSON:", input);
    let response = client.complete(FALLBACK_SYSTEM_PROMPT, &user_prompt).await?;
    let json = extract_json(&response)?;
    let mut intent = validate_untrusted(json)?;
    // the model echoes raw; keep the actual input authoritative
    intent.raw = input.to_string();
    Ok(intent)
}

/// Validate intent JSON from an untrusted producer
///
/// Rejects unknown types explicitly, then applies the same payload and
/// confidence checks as any other intent source.
pub fn validate_untrusted(json: &str) -> Result<Intent> {
    let value: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| HomesteadError::Llm(format!("intent JSON did not parse: {}", e)))?;

    let declared = value
        .get("type")
        .and_then(|v| v.as_str())
        .unwrap_or("(missing)")
        .to_string();
    if serde_json::from_value::<IntentKind>(serde_json::Value::String(declared.clone())).is_err() {
        return Err(HomesteadError::UnknownIntentType(declared));
    }

    let intent: Intent = serde_json::from_value(value)
        .map_err(|e| HomesteadError::Llm(format!("intent JSON did not parse: {}", e)))?;
    intent
        .validated()
        .map_err(|e| HomesteadError::Llm(format!("invalid intent: {}", e)))
}

/// Use the fallback to improve a heuristic result when it is worth asking
///
/// Degrades gracefully: any fallback failure, and any fallback answer that
/// still needs clarification or is less confident, leaves the heuristic
/// result in place.
pub async fn refine_with_llm(client: &LlmClient, heuristic: Intent, input: &str) -> Intent {
    if !needs_clarification(&heuristic) {
        return heuristic;
    }
    match parse_with_llm(client, input).await {
        Ok(llm_intent) if llm_intent.confidence > heuristic.confidence => {
            tracing::debug!(
                kind = %llm_intent.kind,
                confidence = llm_intent.confidence,
                "fallback replaced heuristic result"
            );
            llm_intent
        }
        Ok(_) => heuristic,
        Err(e) => {
            tracing::warn!(error = %e, "LLM fallback failed, keeping heuristic result");
            heuristic
        }
    }
}

/// Extract the JSON object from a response that may carry surrounding text
fn extract_json(response: &str) -> Result<&str> {
    let start = response
        .find('{')
        .ok_or_else(|| HomesteadError::Llm("No JSON found in response".into()))?;
    let end = response
        .rfind('}')
        .ok_or_else(|| HomesteadError::Llm("No closing brace found in response".into()))?;
    Ok(&response[start..=end])
}

/// System prompt pinning the model to the intent contract
const FALLBACK_SYSTEM_PROMPT: &str = r#"You classify household requests into structured JSON.

TYPES: task, meal, shopping, reminder, appointment, family, pet, clarification, unknown

OUTPUT FORMAT (JSON only, no explanation):
{
  "type": "<one of the types above>",
  "confidence": 0.0-1.0,
  "raw": "<the request verbatim>",
  "payload": <see shapes below, or omit if nothing could be extracted>,
  "follow_up": "<a question for the user, only for clarification/unknown>"
}

PAYLOAD SHAPES (the "entity" field selects the shape):
- {"entity": "task", "title": "...", "category": "cleaning|errands|kids|home-maintenance|other", "due_date": "YYYY-MM-DD", "priority": "low|normal|high"}
- {"entity": "meal", "name": "...", "meal_type": "breakfast|lunch|dinner|snack", "day": "YYYY-MM-DD", "dietary_notes": "..."}
- {"entity": "shopping", "items": ["...", "..."], "category": "produce|dairy|bakery|meat|pantry|frozen|household"}
- {"entity": "reminder", "title": "...", "time": "HH:MM:SS", "date": "YYYY-MM-DD"}
- {"entity": "appointment", "title": "...", "date": "YYYY-MM-DD", "time": "HH:MM:SS", "location": "..."}
- {"entity": "family", "name": "...", "relationship": "...", "age": 0, "notes": "..."}
- {"entity": "pet", "name": "...", "type": "...", "breed": "...", "age": 0, "notes": "..."}

Optional fields may be omitted. Use "clarification" with a follow_up question
when the request is too vague to act on, and "unknown" when it is not a
household request at all.

Examples:
"add milk to shopping" -> {"type": "shopping", "confidence": 0.9, "raw": "add milk to shopping", "payload": {"entity": "shopping", "items": ["milk"], "category": "dairy"}}
"our new dog Rex is a 2 year old beagle" -> {"type": "pet", "confidence": 0.85, "raw": "our new dog Rex is a 2 year old beagle", "payload": {"entity": "pet", "name": "Rex", "type": "dog", "breed": "beagle", "age": 2}}
"do the thing" -> {"type": "clarification", "confidence": 0.2, "raw": "do the thing", "follow_up": "Could you say more about what you'd like me to do?"}
"#;
