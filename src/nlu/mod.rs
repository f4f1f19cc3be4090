//! Natural-language understanding pipeline
//!
//! text → normalize → category matchers (independent) → score/select →
//! intent or clarification. Deterministic over a fixed keyword vocabulary;
//! the optional LLM fallback lives in `crate::llm` and is validated against
//! the same intent contract.

pub mod clarify;
pub mod intent;
pub mod interpreter;
pub mod matchers;
pub mod normalize;
pub mod score;
pub mod select;
pub mod time;

pub use intent::{Intent, IntentKind, Payload};
pub use interpreter::Interpreter;
