//! Theme classification for user messages.

use crate::engine::templates::TemplateSet;
use crate::engine::types::Theme;

/// Classify a message into a [`Theme`] by keyword hit count.
///
/// Each theme's count is the number of its *distinct* keywords found as a
/// substring of the lower-cased message — a keyword counts once no matter how
/// often it occurs. The running best starts at [`Theme::DEFAULT`] with count
/// zero and is only replaced on a strictly greater count, so both ties and
/// the zero-match case resolve to the default.
pub fn classify_theme(templates: &TemplateSet, message: &str) -> Theme {
    let normalized = message.to_lowercase();

    let mut best = Theme::DEFAULT;
    let mut best_count = 0usize;

    for theme in Theme::ALL {
        let count = templates
            .theme(theme)
            .keywords
            .iter()
            .filter(|keyword| normalized.contains(keyword.as_str()))
            .count();
        if count > best_count {
            best_count = count;
            best = theme;
        }
    }

    best
}
