//! Response selection — the core generation pipeline.
//!
//! [`ResponseEngine::generate`] is the single entry point. Given a
//! [`ConversationContext`] it classifies theme and sentiment, assembles the
//! candidate pool, scores candidates for word overlap with the user message,
//! picks one, and optionally appends a follow-up question and a name
//! personalization. The whole pipeline is pure computation over the template
//! tables; all randomness flows through the injected [`Rng`].

use rand::Rng;
use serde::Deserialize;

use crate::engine::sentiment::analyze_sentiment;
use crate::engine::templates::TemplateSet;
use crate::engine::theme::classify_theme;
use crate::engine::types::{ConversationContext, Personality};

/// Tunable generation knobs. Defaults match the shipped behavior; override
/// them from the `[engine]` config section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Messages shorter than this (in characters) are considered "short" and
    /// get the higher follow-up-question probability.
    pub short_message_len: usize,
    /// Probability of appending a follow-up question to a short message.
    pub short_question_probability: f64,
    /// Probability of appending a follow-up question otherwise.
    pub long_question_probability: f64,
    /// Probability of weaving the companion's name into a reply that does
    /// not already contain it.
    pub personalization_probability: f64,
    /// Characters of the user message quoted by the `{topic}` placeholder.
    pub topic_preview_len: usize,
    /// Tokens must be longer than this to count for relevance scoring.
    pub min_significant_len: usize,
    /// Name substituted for `{name}` when the companion has none.
    pub fallback_name: String,
    /// Optional path to a custom template table file. When unset, the
    /// compiled-in tables are used.
    pub templates_path: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            short_message_len: 20,
            short_question_probability: 0.7,
            long_question_probability: 0.3,
            personalization_probability: 0.3,
            topic_preview_len: 20,
            min_significant_len: 3,
            fallback_name: "Companion".into(),
            templates_path: None,
        }
    }
}

/// The local response engine: validated template tables plus generation knobs.
///
/// Holds no mutable state — every call operates only on its inputs, so a
/// single instance can be shared freely across request handlers.
#[derive(Debug, Clone)]
pub struct ResponseEngine {
    templates: TemplateSet,
    config: EngineConfig,
}

impl ResponseEngine {
    pub fn new(templates: TemplateSet, config: EngineConfig) -> Self {
        Self { templates, config }
    }

    pub fn templates(&self) -> &TemplateSet {
        &self.templates
    }

    /// Generate a reply. Total over all inputs: empty messages, unknown
    /// personalities, and empty names all degrade to defaults, and the
    /// returned string is never empty.
    pub fn generate<R: Rng>(&self, ctx: &ConversationContext, rng: &mut R) -> String {
        let cfg = &self.config;

        // 1. Resolve personality, theme, and sentiment.
        let personality = Personality::parse_or_default(ctx.personality.as_deref().unwrap_or(""));
        let theme = classify_theme(&self.templates, &ctx.last_message);
        let sentiment = analyze_sentiment(&self.templates, &ctx.last_message);
        tracing::debug!(
            personality = %personality,
            theme = %theme,
            sentiment = %sentiment,
            message_len = ctx.last_message.len(),
            "generating local response"
        );

        // 2. Build the candidate pool: theme prompts first, then personality
        //    responses, both in table order. Duplicates are retained.
        let profile = self.templates.personality(personality);
        let name = if ctx.name.is_empty() {
            cfg.fallback_name.as_str()
        } else {
            ctx.name.as_str()
        };
        let topic: String = ctx
            .last_message
            .chars()
            .take(cfg.topic_preview_len)
            .chain("...".chars())
            .collect();
        let pool: Vec<String> = self
            .templates
            .theme(theme)
            .prompts
            .iter()
            .chain(profile.responses.iter())
            .map(|candidate| candidate.replace("{name}", name).replace("{topic}", &topic))
            .collect();

        // 3. Relevance scoring: count significant user words that appear
        //    inside some candidate token. Ties keep the first-seen candidate.
        let significant = significant_words(&ctx.last_message, cfg.min_significant_len);

        let mut best: Option<&String> = None;
        let mut best_score = 0usize;
        for candidate in &pool {
            let candidate_words: Vec<String> = word_tokens(candidate).collect();
            let score = significant
                .iter()
                .filter(|word| candidate_words.iter().any(|cw| cw.contains(word.as_str())))
                .count();
            if score > best_score {
                best_score = score;
                best = Some(candidate);
            }
        }

        // 4. Take the best match, or a uniform random draw when nothing
        //    overlapped at all.
        let mut response = match best {
            Some(candidate) => candidate.clone(),
            None => pool[rng.gen_range(0..pool.len())].clone(),
        };

        // 5. Follow-up question, more likely after a short message.
        let question_probability = if ctx.last_message.chars().count() < cfg.short_message_len {
            cfg.short_question_probability
        } else {
            cfg.long_question_probability
        };
        if rng.gen::<f64>() < question_probability {
            let question = &profile.questions[rng.gen_range(0..profile.questions.len())];
            response.push(' ');
            response.push_str(question);
        }

        // 6. Name personalization. Uses the raw context name: an empty name
        //    is a substring of everything, so this step is skipped then.
        if !response.contains(&ctx.name) && rng.gen::<f64>() < cfg.personalization_probability {
            if rng.gen::<f64>() < 0.5 {
                response = format!("{}, {}", ctx.name, lowercase_first(&response));
            } else {
                response.push_str(&format!(" I'm here for you, {}.", ctx.name));
            }
        }

        response
    }
}

/// Tokens longer than `min_len` characters (not bytes, so short non-ASCII
/// words are excluded like any other short word).
fn significant_words(text: &str, min_len: usize) -> Vec<String> {
    word_tokens(text)
        .filter(|word| word.chars().count() > min_len)
        .collect()
}

/// Split into lower-cased word tokens on non-word-character runs.
fn word_tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| !token.is_empty())
        .map(|token| token.to_lowercase())
}

fn lowercase_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::Theme;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Engine with all random augmentation turned off.
    fn quiet_engine() -> ResponseEngine {
        ResponseEngine::new(
            TemplateSet::builtin().unwrap(),
            EngineConfig {
                short_question_probability: 0.0,
                long_question_probability: 0.0,
                personalization_probability: 0.0,
                ..EngineConfig::default()
            },
        )
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn tokenizer_splits_on_non_word_runs() {
        let tokens: Vec<String> = word_tokens("I miss her, so much!").collect();
        assert_eq!(tokens, ["i", "miss", "her", "so", "much"]);
    }

    #[test]
    fn significant_words_use_character_length() {
        // "你好" is two characters (six bytes) and must not count as significant.
        assert_eq!(significant_words("你好 together we met", 3), ["together"]);
        assert_eq!(significant_words("café au lait", 3), ["café", "lait"]);
    }

    #[test]
    fn lowercase_first_handles_empty_and_unicode() {
        assert_eq!(lowercase_first(""), "");
        assert_eq!(lowercase_first("Hello"), "hello");
        assert_eq!(lowercase_first("Éclair"), "éclair");
    }

    #[test]
    fn relevance_match_beats_random_draw() {
        let engine = quiet_engine();
        // "tapestry" appears in exactly one memories prompt.
        let ctx = ConversationContext {
            name: "Rose".into(),
            personality: Some("balanced".into()),
            last_message: "remember the tapestry of time together".into(),
            ..Default::default()
        };
        let reply = engine.generate(&ctx, &mut rng());
        assert!(
            reply.contains("tapestry"),
            "expected the overlapping candidate, got: {reply}"
        );
    }

    #[test]
    fn empty_message_still_produces_a_reply() {
        let engine = quiet_engine();
        let ctx = ConversationContext {
            name: "Rose".into(),
            last_message: String::new(),
            ..Default::default()
        };
        let reply = engine.generate(&ctx, &mut rng());
        assert!(!reply.is_empty());
        // Zero significant words: reply must come from the comfort + balanced pool.
        let pool: Vec<&String> = engine
            .templates()
            .theme(Theme::Comfort)
            .prompts
            .iter()
            .chain(
                engine
                    .templates()
                    .personality(Personality::Balanced)
                    .responses
                    .iter(),
            )
            .collect();
        assert!(pool.iter().any(|p| p.as_str() == reply));
    }

    #[test]
    fn question_is_appended_when_probability_is_one() {
        let engine = ResponseEngine::new(
            TemplateSet::builtin().unwrap(),
            EngineConfig {
                short_question_probability: 1.0,
                long_question_probability: 1.0,
                personalization_probability: 0.0,
                ..EngineConfig::default()
            },
        );
        let ctx = ConversationContext {
            name: "Rose".into(),
            personality: Some("warm".into()),
            last_message: "hi".into(),
            ..Default::default()
        };
        let reply = engine.generate(&ctx, &mut rng());
        let questions = &engine.templates().personality(Personality::Warm).questions;
        assert!(
            questions.iter().any(|q| reply.ends_with(q.as_str())),
            "expected a warm follow-up question, got: {reply}"
        );
    }

    #[test]
    fn personalization_uses_the_companion_name() {
        let engine = ResponseEngine::new(
            TemplateSet::builtin().unwrap(),
            EngineConfig {
                short_question_probability: 0.0,
                long_question_probability: 0.0,
                personalization_probability: 1.0,
                ..EngineConfig::default()
            },
        );
        let ctx = ConversationContext {
            name: "Zelda".into(),
            last_message: "xyzzy".into(),
            ..Default::default()
        };
        // Either branch mentions the name: "Zelda, ..." or "... I'm here for you, Zelda."
        let reply = engine.generate(&ctx, &mut rng());
        assert!(reply.contains("Zelda"), "got: {reply}");
    }

    #[test]
    fn empty_name_skips_personalization() {
        let engine = ResponseEngine::new(
            TemplateSet::builtin().unwrap(),
            EngineConfig {
                short_question_probability: 0.0,
                long_question_probability: 0.0,
                personalization_probability: 1.0,
                ..EngineConfig::default()
            },
        );
        let ctx = ConversationContext {
            name: String::new(),
            last_message: "xyzzy".into(),
            ..Default::default()
        };
        let reply = engine.generate(&ctx, &mut rng());
        assert!(!reply.starts_with(", "), "got: {reply}");
        assert!(!reply.contains("I'm here for you, ."), "got: {reply}");
    }
}
