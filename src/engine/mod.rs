//! Local response engine.
//!
//! A rule-based fallback responder: when the external LLM is unconfigured or
//! unreachable, this engine turns a [`ConversationContext`] into a reply by
//! classifying the user message's theme and sentiment, assembling a weighted
//! candidate pool from the template tables, scoring candidates for word
//! overlap, and optionally appending a follow-up question and a name
//! personalization.
//!
//! The engine is a pure, synchronous computation: no I/O, no state between
//! calls, total over all string inputs. Randomness is injected as a
//! [`rand::Rng`] so tests can pin it down.

pub mod respond;
pub mod sentiment;
pub mod templates;
pub mod theme;
pub mod types;

pub use respond::{EngineConfig, ResponseEngine};
pub use sentiment::analyze_sentiment;
pub use templates::{TemplateError, TemplateSet};
pub use theme::classify_theme;
pub use types::{ConversationContext, Personality, Sentiment, Theme};
