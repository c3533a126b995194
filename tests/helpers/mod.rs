#![allow(dead_code)]

use memoria::engine::{EngineConfig, Personality, ResponseEngine, TemplateSet, Theme};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Engine with every random augmentation disabled: no follow-up questions,
/// no name personalization. The pool-fallback draw still fires when nothing
/// in the pool overlaps the message.
pub fn quiet_engine() -> ResponseEngine {
    engine_with(EngineConfig {
        short_question_probability: 0.0,
        long_question_probability: 0.0,
        personalization_probability: 0.0,
        ..EngineConfig::default()
    })
}

/// Engine with default (shipped) behavior.
pub fn default_engine() -> ResponseEngine {
    engine_with(EngineConfig::default())
}

pub fn engine_with(config: EngineConfig) -> ResponseEngine {
    ResponseEngine::new(TemplateSet::builtin().unwrap(), config)
}

/// Deterministic rng for tests.
pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// The candidate pool for a theme/personality pair, in assembly order.
pub fn combined_pool(engine: &ResponseEngine, theme: Theme, personality: Personality) -> Vec<String> {
    engine
        .templates()
        .theme(theme)
        .prompts
        .iter()
        .chain(engine.templates().personality(personality).responses.iter())
        .cloned()
        .collect()
}
