//! Optional LLM fallback
//!
//! The heuristic pipeline is authoritative; the LLM is consulted only for
//! low-confidence requests and its output is validated like any other
//! untrusted intent source.

pub mod client;
pub mod fallback;

pub use client::LlmClient;
pub use fallback::{parse_with_llm, refine_with_llm, validate_untrusted};
