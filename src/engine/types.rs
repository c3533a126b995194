//! Core engine type definitions.
//!
//! Defines [`Personality`] (the five conversational styles), [`Theme`]
//! (subject-matter buckets for user messages), [`Sentiment`], and
//! [`ConversationContext`] (the per-call input to the response engine).

use serde::{Deserialize, Serialize};

/// The five conversational personality styles a companion can be given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Personality {
    /// Empathic and affirming — leans on emotional validation.
    Warm,
    /// Meaning-seeking — mirrors the user's own framing back at them.
    Reflective,
    /// Neutral middle ground, also the fallback for unknown styles.
    Balanced,
    /// Lighthearted — reaches for shared jokes and levity.
    Humorous,
    /// Measured and philosophical.
    Wise,
}

impl Personality {
    /// All personalities, in table order.
    pub const ALL: [Personality; 5] = [
        Self::Warm,
        Self::Reflective,
        Self::Balanced,
        Self::Humorous,
        Self::Wise,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warm => "warm",
            Self::Reflective => "reflective",
            Self::Balanced => "balanced",
            Self::Humorous => "humorous",
            Self::Wise => "wise",
        }
    }

    /// Case-insensitive parse that never fails: anything unrecognized
    /// (including the empty string) resolves to [`Personality::Balanced`].
    pub fn parse_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "warm" => Self::Warm,
            "reflective" => Self::Reflective,
            "balanced" => Self::Balanced,
            "humorous" => Self::Humorous,
            "wise" => Self::Wise,
            _ => Self::Balanced,
        }
    }
}

impl std::fmt::Display for Personality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Subject-matter classification for a user message.
///
/// Themes drive which canned prompts are eligible for a reply. Classification
/// counts keyword hits per theme; ties and the zero-match case resolve to
/// [`Theme::Comfort`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    /// Loss, mourning, missing someone.
    Grief,
    /// Shared past experiences and recollection.
    Memories,
    /// Distress and struggle — the default bucket.
    Comfort,
    /// Bonds and relationships.
    Connection,
}

impl Theme {
    /// All themes, in classification scan order. Order matters: with a
    /// strictly-greater comparison, the earlier theme wins a non-default tie.
    pub const ALL: [Theme; 4] = [Self::Grief, Self::Memories, Self::Comfort, Self::Connection];

    /// Theme used when no keywords match or counts tie.
    pub const DEFAULT: Theme = Self::Comfort;

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Grief => "grief",
            Self::Memories => "memories",
            Self::Comfort => "comfort",
            Self::Connection => "connection",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse sentiment of a user message.
///
/// Computed on every engine call and surfaced for callers and tests, but
/// deliberately not fed back into response selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the engine needs to know about one conversational turn.
///
/// Built fresh per call and discarded — the engine keeps no state between
/// invocations.
#[derive(Debug, Clone, Default)]
pub struct ConversationContext {
    /// Companion display name. May be empty; placeholder substitution then
    /// falls back to a configured default.
    pub name: String,
    /// Free-text companion description. Reserved for future scoring use.
    pub description: Option<String>,
    /// Personality key, resolved via [`Personality::parse_or_default`].
    pub personality: Option<String>,
    /// Recent prior message content. Reserved for future scoring use.
    pub history: Option<String>,
    /// The user's latest message — drives classification and scoring.
    pub last_message: String,
}
