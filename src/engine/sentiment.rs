//! Keyword-list sentiment analysis.
//!
//! The result is computed on every engine call and logged, but by design it
//! does not feed back into response selection.

use crate::engine::templates::TemplateSet;
use crate::engine::types::Sentiment;

/// Score a message against the positive and negative word lists.
///
/// Same counting semantics as theme classification: each list word counts
/// once if it appears as a substring of the lower-cased message. The larger
/// count wins; equal counts (including zero-zero) are [`Sentiment::Neutral`].
pub fn analyze_sentiment(templates: &TemplateSet, message: &str) -> Sentiment {
    let normalized = message.to_lowercase();
    let lexicon = templates.sentiment();

    let positive = lexicon
        .positive
        .iter()
        .filter(|word| normalized.contains(word.as_str()))
        .count();
    let negative = lexicon
        .negative
        .iter()
        .filter(|word| normalized.contains(word.as_str()))
        .count();

    match positive.cmp(&negative) {
        std::cmp::Ordering::Greater => Sentiment::Positive,
        std::cmp::Ordering::Less => Sentiment::Negative,
        std::cmp::Ordering::Equal => Sentiment::Neutral,
    }
}
