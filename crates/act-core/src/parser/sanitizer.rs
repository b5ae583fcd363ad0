//! Dictionary-based substitution of disallowed vocabulary.
//!
//! Substitution never adds or removes line breaks, and no replacement
//! contains a mapped phrase, so sanitizing twice gives the same text as
//! sanitizing once.

use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use tracing::info;

use crate::models::config::SanitizerConfig;

/// Disallowed phrase (lower case) -> neutral replacement.
const REPLACEMENTS: &[(&str, &str)] = &[
    // Not "Девушки": "девушк" would rewrite it on a second pass
    ("шлюх", "персонал"),
    ("проститутк", "персонал"),
    ("кальян", "оборудование"),
    ("по 10ке", "по договорённости"),
    ("за ночь", "за смену"),
    ("за сутки", "за период"),
    ("три ночи", "три смены"),
    ("ночей", "смен"),
    ("ночь", "смена"),
    ("девушек", "ассистентов"),
    ("девочек", "ассистентов"),
    ("девушк", "ассистент"),
    ("девочк", "ассистент"),
    ("мальчиков", "ассистентов"),
    ("мальчик", "ассистент"),
    ("по вызову", "по заявке"),
    ("выезд", "визит"),
];

lazy_static! {
    static ref PHRASES: Regex = {
        let mut phrases: Vec<&str> = REPLACEMENTS.iter().map(|(phrase, _)| *phrase).collect();
        // Longest first: "девушек" must win over "девушк".
        phrases.sort_by_key(|phrase| std::cmp::Reverse(phrase.chars().count()));
        let alternation = phrases
            .iter()
            .map(|phrase| regex::escape(phrase))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&format!("(?i){}", alternation)).unwrap()
    };
}

fn replacement_for(matched: &str) -> Option<&'static str> {
    let lower = matched.to_lowercase();
    REPLACEMENTS
        .iter()
        .find(|(phrase, _)| *phrase == lower)
        .map(|(_, replacement)| *replacement)
}

/// Vocabulary sanitizer.
#[derive(Debug, Clone)]
pub struct Sanitizer {
    enabled: bool,
    annotation: String,
}

impl Sanitizer {
    /// Create an enabled sanitizer with the default annotation.
    pub fn new() -> Self {
        Self::from_config(&SanitizerConfig::default())
    }

    /// Create a sanitizer from configuration.
    pub fn from_config(config: &SanitizerConfig) -> Self {
        Self {
            enabled: config.enabled,
            annotation: config.annotation.clone(),
        }
    }

    /// A sanitizer that leaves all text untouched.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            annotation: String::new(),
        }
    }

    /// Whether `text` contains any disallowed phrase.
    pub fn needs_sanitizing(&self, text: &str) -> bool {
        self.enabled && PHRASES.is_match(text)
    }

    /// Replace every disallowed phrase, without the annotation.
    pub fn replace_phrases<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if !self.enabled {
            return Cow::Borrowed(text);
        }

        PHRASES.replace_all(text, |caps: &Captures<'_>| {
            let matched = &caps[0];
            replacement_for(matched)
                .map(str::to_string)
                .unwrap_or_else(|| matched.to_string())
        })
    }

    /// Replace every disallowed phrase and append the annotation when
    /// anything was replaced. Clean text is returned unchanged.
    pub fn sanitize(&self, text: &str) -> String {
        match self.replace_phrases(text) {
            Cow::Borrowed(unchanged) => unchanged.to_string(),
            Cow::Owned(mut cleaned) => {
                info!("sanitized disallowed vocabulary");
                if !cleaned.trim_end().ends_with('.') {
                    cleaned.push('.');
                }
                if !self.annotation.is_empty() {
                    cleaned.push(' ');
                    cleaned.push_str(&self.annotation);
                }
                cleaned
            }
        }
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_replaces_case_insensitively() {
        let sanitizer = Sanitizer::new();
        assert_eq!(
            sanitizer.replace_phrases("Кальян и КАЛЬЯН за ночь"),
            "оборудование и оборудование за смену"
        );
    }

    #[test]
    fn test_appends_annotation_once() {
        let sanitizer = Sanitizer::new();
        assert_eq!(
            sanitizer.sanitize("Аренда: кальян"),
            "Аренда: оборудование. (названия скорректированы)"
        );
        assert_eq!(
            sanitizer.sanitize("Выезд мастера."),
            "визит мастера. (названия скорректированы)"
        );
    }

    #[test]
    fn test_clean_text_is_unchanged() {
        let sanitizer = Sanitizer::new();
        let text = "Обычный текст без запрещенных слов";
        assert_eq!(sanitizer.sanitize(text), text);
        assert!(matches!(sanitizer.replace_phrases(text), Cow::Borrowed(_)));
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let sanitizer = Sanitizer::new();
        let samples = [
            "4 девушки по 10ке за ночь, три ночи в целом",
            "Выездная бригада по вызову\nМальчиков 2 шт. × 100",
            "Кальян 3 × 500\n\nНочей: 2",
            "ничего особенного",
            "",
        ];

        for sample in samples {
            let once = sanitizer.sanitize(sample);
            assert_eq!(sanitizer.sanitize(&once), once, "{sample}");
            assert!(!sanitizer.needs_sanitizing(&once), "{sample}");
        }
    }

    #[test]
    fn test_preserves_line_count() {
        let sanitizer = Sanitizer::new();
        let text = "#АКТ 01.01.2024 | Объект: Лофт\nКальян 2 шт. × 500\nУборка за сутки 1 × 3000";
        let cleaned = sanitizer.replace_phrases(text);
        assert_eq!(cleaned.lines().count(), text.lines().count());
        assert_eq!(cleaned.matches('\n').count(), text.matches('\n').count());
    }

    #[test]
    fn test_replacements_contain_no_phrases() {
        for (_, replacement) in REPLACEMENTS {
            assert!(!PHRASES.is_match(replacement), "{replacement}");
        }
    }

    #[test]
    fn test_disabled_sanitizer() {
        let sanitizer = Sanitizer::disabled();
        assert_eq!(sanitizer.sanitize("Кальян"), "Кальян");
        assert!(!sanitizer.needs_sanitizing("Кальян"));
    }
}
