//! Template tables for the response engine.
//!
//! All canned text — personality responses and follow-up questions, theme
//! prompts, theme keywords, and the sentiment word lists — ships as data in
//! `templates/default.toml` rather than as string literals in code, so the
//! tables can be tuned without a rebuild. A custom table file can be pointed
//! at via the `[engine] templates_path` config key.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use crate::engine::types::{Personality, Theme};

/// Built-in table file, compiled into the binary.
const BUILTIN: &str = include_str!("../../templates/default.toml");

/// Canned material for one personality style.
#[derive(Debug, Clone, Deserialize)]
pub struct PersonalityTemplate {
    /// Reply candidates, in table order.
    pub responses: Vec<String>,
    /// Follow-up questions, in table order.
    pub questions: Vec<String>,
}

/// Canned material for one conversation theme.
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeTemplate {
    /// Lowercase trigger substrings used for classification. Keywords may
    /// overlap across themes.
    pub keywords: Vec<String>,
    /// Theme-appropriate reply candidates, in table order.
    pub prompts: Vec<String>,
}

/// Positive and negative word lists for sentiment analysis.
#[derive(Debug, Clone, Deserialize)]
pub struct SentimentLexicon {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}

/// Validation failures when loading a template table.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("failed to read template file: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse template TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("missing personality profile: {0}")]
    MissingPersonality(Personality),
    #[error("missing theme: {0}")]
    MissingTheme(Theme),
    #[error("personality {personality} has an empty {field} list")]
    EmptyPersonalityList {
        personality: Personality,
        field: &'static str,
    },
    #[error("theme {theme} has an empty {field} list")]
    EmptyThemeList { theme: Theme, field: &'static str },
    #[error("sentiment lexicon has an empty {0} list")]
    EmptyLexicon(&'static str),
}

/// The complete, validated table set the engine draws from.
///
/// Construction validates that every [`Personality`] and [`Theme`] is present
/// with non-empty lists, so the accessors below are infallible.
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateSet {
    personalities: HashMap<Personality, PersonalityTemplate>,
    themes: HashMap<Theme, ThemeTemplate>,
    sentiment: SentimentLexicon,
}

impl TemplateSet {
    /// Load the compiled-in default tables.
    pub fn builtin() -> Result<Self, TemplateError> {
        Self::from_toml_str(BUILTIN)
    }

    /// Load tables from a TOML file on disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TemplateError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate a TOML table definition.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, TemplateError> {
        let set: TemplateSet = toml::from_str(toml_str)?;
        set.validate()?;
        Ok(set)
    }

    fn validate(&self) -> Result<(), TemplateError> {
        for personality in Personality::ALL {
            let template = self
                .personalities
                .get(&personality)
                .ok_or(TemplateError::MissingPersonality(personality))?;
            if template.responses.is_empty() {
                return Err(TemplateError::EmptyPersonalityList {
                    personality,
                    field: "responses",
                });
            }
            if template.questions.is_empty() {
                return Err(TemplateError::EmptyPersonalityList {
                    personality,
                    field: "questions",
                });
            }
        }
        for theme in Theme::ALL {
            let template = self
                .themes
                .get(&theme)
                .ok_or(TemplateError::MissingTheme(theme))?;
            if template.prompts.is_empty() {
                return Err(TemplateError::EmptyThemeList {
                    theme,
                    field: "prompts",
                });
            }
            if template.keywords.is_empty() {
                return Err(TemplateError::EmptyThemeList {
                    theme,
                    field: "keywords",
                });
            }
        }
        if self.sentiment.positive.is_empty() {
            return Err(TemplateError::EmptyLexicon("positive"));
        }
        if self.sentiment.negative.is_empty() {
            return Err(TemplateError::EmptyLexicon("negative"));
        }
        Ok(())
    }

    /// Tables for one personality. Presence is guaranteed by validation.
    pub fn personality(&self, personality: Personality) -> &PersonalityTemplate {
        &self.personalities[&personality]
    }

    /// Tables for one theme. Presence is guaranteed by validation.
    pub fn theme(&self, theme: Theme) -> &ThemeTemplate {
        &self.themes[&theme]
    }

    pub fn sentiment(&self) -> &SentimentLexicon {
        &self.sentiment
    }
}
