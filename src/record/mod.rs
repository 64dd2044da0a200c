//! Lesson record model
//!
//! This module defines the typed record produced for every lesson block and the
//! closed vocabulary of detail keys a record may carry.

mod vocabulary;

pub use vocabulary::DetailKey;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::collections::BTreeMap;

/// Value stored under a detail key
///
/// `words` and `phrases` hold token lists, every other key holds one string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DetailValue {
    Text(String),
    List(Vec<String>),
}

impl DetailValue {
    /// Returns the scalar text, if this is a scalar value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::List(_) => None,
        }
    }

    /// Returns the token list, if this is a multi-valued entry
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::Text(_) => None,
            Self::List(tokens) => Some(tokens),
        }
    }
}

/// One past lesson, as shown in a single lesson record block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LessonRecord {
    /// Instructor display name (may be empty)
    pub instructor_name: String,

    /// Lesson start time in the portal's local offset
    pub lesson_time: DateTime<FixedOffset>,

    /// Sequential lesson number, when the page shows one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lesson_no: Option<u32>,

    /// Translated detail lines
    #[serde(flatten)]
    pub details: BTreeMap<DetailKey, DetailValue>,
}

impl LessonRecord {
    /// Creates a record with no detail lines
    pub fn new(instructor_name: impl Into<String>, lesson_time: DateTime<FixedOffset>) -> Self {
        Self {
            instructor_name: instructor_name.into(),
            lesson_time,
            lesson_no: None,
            details: BTreeMap::new(),
        }
    }

    /// Returns the value stored under `key`
    pub fn detail(&self, key: DetailKey) -> Option<&DetailValue> {
        self.details.get(&key)
    }

    /// Returns the vocabulary words of this lesson (empty if none)
    pub fn words(&self) -> &[String] {
        self.tokens(DetailKey::Words)
    }

    /// Returns the phrases of this lesson (empty if none)
    pub fn phrases(&self) -> &[String] {
        self.tokens(DetailKey::Phrases)
    }

    fn tokens(&self, key: DetailKey) -> &[String] {
        self.details
            .get(&key)
            .and_then(DetailValue::as_list)
            .unwrap_or_default()
    }
}
