//! Quote model

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation failures when creating a quote from user input
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Text is empty after trimming whitespace
    #[error("Quote text must not be empty")]
    EmptyText,

    /// Category is empty after trimming whitespace
    #[error("Quote category must not be empty")]
    EmptyCategory,

    /// A quote with the same text already exists in the collection
    #[error("A quote with this text already exists")]
    DuplicateText,
}

/// A quote in the collection
///
/// Two quotes are considered the same entry when their `text` fields are
/// equal; `category` is a display label and carries no identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// The quote body
    pub text: String,
    /// Category label
    pub category: String,
}

impl Quote {
    /// Create a quote from user input, trimming both fields.
    ///
    /// Fails when either field is empty after trimming. Duplicate detection
    /// against an existing collection is the store's concern, not this
    /// constructor's.
    pub fn new(text: &str, category: &str) -> Result<Self, ValidationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyText);
        }

        let category = category.trim();
        if category.is_empty() {
            return Err(ValidationError::EmptyCategory);
        }

        Ok(Self {
            text: text.to_string(),
            category: category.to_string(),
        })
    }

    /// Check whether this quote shares its text with `other_text`
    #[must_use]
    pub fn has_text(&self, other_text: &str) -> bool {
        self.text == other_text
    }
}

impl std::fmt::Display for Quote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\" — [{}]", self.text, self.category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_fields() {
        let quote = Quote::new("  Do or do not  ", " Yoda ").unwrap();
        assert_eq!(quote.text, "Do or do not");
        assert_eq!(quote.category, "Yoda");
    }

    #[test]
    fn test_new_rejects_empty_text() {
        assert_eq!(Quote::new("   ", "Life"), Err(ValidationError::EmptyText));
        assert_eq!(Quote::new("", "Life"), Err(ValidationError::EmptyText));
    }

    #[test]
    fn test_new_rejects_empty_category() {
        assert_eq!(
            Quote::new("Do or do not", " \t "),
            Err(ValidationError::EmptyCategory)
        );
    }

    #[test]
    fn test_display_format() {
        let quote = Quote::new("Do or do not", "Yoda").unwrap();
        assert_eq!(quote.to_string(), "\"Do or do not\" — [Yoda]");
    }

    #[test]
    fn test_serde_round_trip() {
        let quote = Quote::new("Do or do not", "Yoda").unwrap();
        let json = serde_json::to_string(&quote).unwrap();
        assert_eq!(json, r#"{"text":"Do or do not","category":"Yoda"}"#);

        let parsed: Quote = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, quote);
    }
}
