/// Detail key vocabulary for lesson records
///
/// The portal labels each detail line in Japanese. This module maps that closed
/// set of labels onto canonical English keys.
use serde::Serialize;
use std::fmt;

/// Canonical name of a detail line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailKey {
    /// 教材
    Textbook,
    /// 長所・強み
    Strength,
    /// セクション
    Section,
    /// 単語
    Words,
    /// フレーズ
    Phrases,
    /// 発音
    Pronunciation,
    /// 課題点
    Problems,
}

impl DetailKey {
    /// Translates a portal label into its canonical key
    ///
    /// Returns None for any label outside the vocabulary. Callers must treat
    /// that as an error rather than skipping the line.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "教材" => Some(Self::Textbook),
            "長所・強み" => Some(Self::Strength),
            "セクション" => Some(Self::Section),
            "単語" => Some(Self::Words),
            "フレーズ" => Some(Self::Phrases),
            "発音" => Some(Self::Pronunciation),
            "課題点" => Some(Self::Problems),
            _ => None,
        }
    }

    /// Returns the portal label for this key
    pub fn label(&self) -> &'static str {
        match self {
            Self::Textbook => "教材",
            Self::Strength => "長所・強み",
            Self::Section => "セクション",
            Self::Words => "単語",
            Self::Phrases => "フレーズ",
            Self::Pronunciation => "発音",
            Self::Problems => "課題点",
        }
    }

    /// Returns the canonical English name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Textbook => "textbook",
            Self::Strength => "strength",
            Self::Section => "section",
            Self::Words => "words",
            Self::Phrases => "phrases",
            Self::Pronunciation => "pronunciation",
            Self::Problems => "problems",
        }
    }

    /// Returns true if values under this key are `|`-separated token lists
    pub fn is_multi_valued(&self) -> bool {
        matches!(self, Self::Words | Self::Phrases)
    }

    /// Returns all keys in the vocabulary
    pub fn all_keys() -> Vec<Self> {
        vec![
            Self::Textbook,
            Self::Strength,
            Self::Section,
            Self::Words,
            Self::Phrases,
            Self::Pronunciation,
            Self::Problems,
        ]
    }
}

impl fmt::Display for DetailKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
