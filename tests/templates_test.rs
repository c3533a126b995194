use memoria::engine::{Personality, TemplateSet, Theme};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn builtin_tables_cover_every_personality_and_theme() {
    let templates = TemplateSet::builtin().unwrap();
    for personality in Personality::ALL {
        let profile = templates.personality(personality);
        assert!(!profile.responses.is_empty(), "{personality} has no responses");
        assert!(!profile.questions.is_empty(), "{personality} has no questions");
    }
    for theme in Theme::ALL {
        let table = templates.theme(theme);
        assert!(!table.prompts.is_empty(), "{theme} has no prompts");
        assert!(!table.keywords.is_empty(), "{theme} has no keywords");
    }
}

#[test]
fn theme_keywords_are_lowercase() {
    let templates = TemplateSet::builtin().unwrap();
    for theme in Theme::ALL {
        for keyword in &templates.theme(theme).keywords {
            assert_eq!(
                keyword,
                &keyword.to_lowercase(),
                "{theme} keyword {keyword:?} is not lowercase"
            );
        }
    }
}

#[test]
fn keywords_may_overlap_across_themes() {
    // "hurt" is deliberately in both grief and comfort.
    let templates = TemplateSet::builtin().unwrap();
    let grief = &templates.theme(Theme::Grief).keywords;
    let comfort = &templates.theme(Theme::Comfort).keywords;
    assert!(grief.contains(&"hurt".to_string()));
    assert!(comfort.contains(&"hurt".to_string()));
}

#[test]
fn load_from_disk_round_trips_the_builtin_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(include_bytes!("../templates/default.toml"))
        .unwrap();

    let templates = TemplateSet::load(file.path()).unwrap();
    assert!(!templates.personality(Personality::Warm).responses.is_empty());
}

#[test]
fn load_missing_file_is_an_error() {
    assert!(TemplateSet::load("/nonexistent/templates.toml").is_err());
}
