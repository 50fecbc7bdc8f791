//! Keyword-based event classification.

use serde::{Deserialize, Serialize};

use crate::season::EventKind;

pub const DEFAULT_HOLIDAY_KEYWORDS: &[&str] = &[
    "feriado",
    "natal",
    "ano novo",
    "paixão",
    "independência",
    "padroeira",
];

pub const DEFAULT_SPECIAL_KEYWORDS: &[&str] =
    &["festa", "face a face", "conferência", "encontro", "acamp"];

/// Keyword lists as they appear in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordConfig {
    #[serde(default = "default_holiday_keywords")]
    pub holiday: Vec<String>,
    #[serde(default = "default_special_keywords")]
    pub special: Vec<String>,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        KeywordConfig {
            holiday: default_holiday_keywords(),
            special: default_special_keywords(),
        }
    }
}

fn default_holiday_keywords() -> Vec<String> {
    DEFAULT_HOLIDAY_KEYWORDS.iter().map(|k| k.to_string()).collect()
}

fn default_special_keywords() -> Vec<String> {
    DEFAULT_SPECIAL_KEYWORDS.iter().map(|k| k.to_string()).collect()
}

/// One classification rule: a title containing any of `keywords` is `kind`.
#[derive(Debug, Clone)]
pub struct KeywordRule {
    pub kind: EventKind,
    keywords: Vec<String>,
}

impl KeywordRule {
    pub fn new<S: AsRef<str>>(kind: EventKind, keywords: &[S]) -> Self {
        KeywordRule {
            kind,
            keywords: keywords
                .iter()
                .map(|k| k.as_ref().trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    fn matches(&self, lowered_title: &str) -> bool {
        self.keywords.iter().any(|k| lowered_title.contains(k.as_str()))
    }
}

/// Ordered rule list; the first matching rule wins, otherwise `fallback`.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<KeywordRule>,
    fallback: EventKind,
}

impl Default for Classifier {
    fn default() -> Self {
        Classifier::from_keywords(&KeywordConfig::default())
    }
}

impl Classifier {
    pub fn new(rules: Vec<KeywordRule>, fallback: EventKind) -> Self {
        Classifier { rules, fallback }
    }

    /// Holiday keywords take priority over special ones; anything else is
    /// an ordinary church activity.
    pub fn from_keywords(keywords: &KeywordConfig) -> Self {
        Classifier::new(
            vec![
                KeywordRule::new(EventKind::Holiday, &keywords.holiday),
                KeywordRule::new(EventKind::Special, &keywords.special),
            ],
            EventKind::Church,
        )
    }

    pub fn classify(&self, title: &str) -> EventKind {
        let lowered = title.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&lowered))
            .map(|rule| rule.kind)
            .unwrap_or(self.fallback)
    }
}
