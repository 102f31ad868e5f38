//! Languages a card can be written in.
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Es,
    Fr,
    De,
    Ja,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::En,
        Language::Es,
        Language::Fr,
        Language::De,
        Language::Ja,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
            Language::Fr => "fr",
            Language::De => "de",
            Language::Ja => "ja",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Es => "Spanish",
            Language::Fr => "French",
            Language::De => "German",
            Language::Ja => "Japanese",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lang| lang.code() == code)
    }

    /// Picks a target language for a new card.
    /// Keeps `target` unless it collides with `source`, in which case the first
    /// other language in `ALL` is used.
    pub fn adjust_target(source: Language, target: Language) -> Language {
        if source != target {
            return target;
        }
        Self::ALL
            .into_iter()
            .find(|&lang| lang != source)
            .unwrap_or(target)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Source-language selector used by the card list and the quiz.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LanguageFilter {
    #[default]
    All,
    Only(Language),
}

impl LanguageFilter {
    pub fn matches(self, language: Language) -> bool {
        match self {
            LanguageFilter::All => true,
            LanguageFilter::Only(selected) => selected == language,
        }
    }

    pub fn label(self) -> String {
        match self {
            LanguageFilter::All => "All Languages".to_string(),
            LanguageFilter::Only(lang) => lang.name().to_string(),
        }
    }
}
