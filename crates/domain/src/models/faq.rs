//! FAQ entry domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::text::normalize_keywords;
use shared::validation::validate_not_blank;
use validator::Validate;

/// A question/answer pair matched against chat messages by keyword.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqEntry {
    pub id: i64,
    pub question: String,
    pub answer: String,
    /// Normalized keywords: trimmed, lowercased, non-empty.
    pub keywords: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FaqEntry {
    /// Returns true if any keyword appears in the already-lowercased message.
    /// Keywords are compared trimmed and lowercased; blank ones never match.
    pub fn matches(&self, message_lower: &str) -> bool {
        self.keywords
            .iter()
            .map(|keyword| keyword.trim().to_lowercase())
            .any(|keyword| !keyword.is_empty() && message_lower.contains(&keyword))
    }
}

/// Keywords may arrive as a list or as comma-separated text.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum KeywordsInput {
    List(Vec<String>),
    Text(String),
}

impl KeywordsInput {
    pub fn normalize(&self) -> Vec<String> {
        match self {
            KeywordsInput::List(items) => normalize_keywords(items),
            KeywordsInput::Text(text) => shared::text::split_keywords(text),
        }
    }
}

impl Default for KeywordsInput {
    fn default() -> Self {
        KeywordsInput::List(Vec::new())
    }
}

/// Request payload for creating an FAQ entry.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateFaqRequest {
    #[validate(length(min = 1, max = 255, message = "Question must be 1-255 characters"))]
    pub question: String,

    #[validate(custom(function = "validate_not_blank"))]
    pub answer: String,

    #[serde(default)]
    pub keywords: KeywordsInput,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Request payload for updating an FAQ entry.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateFaqRequest {
    #[validate(length(min = 1, max = 255, message = "Question must be 1-255 characters"))]
    pub question: Option<String>,

    #[validate(custom(function = "validate_not_blank"))]
    pub answer: Option<String>,

    pub keywords: Option<KeywordsInput>,
    pub is_active: Option<bool>,
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(keywords: &[&str]) -> FaqEntry {
        FaqEntry {
            id: 1,
            question: "What is a jab?".to_string(),
            answer: "A jab is a straight punch.".to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_matches_substring() {
        let faq = entry(&["jab", "cross"]);
        assert!(faq.matches("what's a jab?"));
        assert!(faq.matches("double cross-check"));
        assert!(!faq.matches("what's footwork?"));
    }

    #[test]
    fn test_stored_keyword_case_ignored() {
        let faq = entry(&["Jab", " HOOK "]);
        assert!(faq.matches("what's a jab?"));
        assert!(faq.matches("left hook"));
    }

    #[test]
    fn test_blank_keyword_never_matches() {
        assert!(!entry(&[" "]).matches("anything at all"));
    }

    #[test]
    fn test_empty_keywords_never_match() {
        assert!(!entry(&[]).matches("anything at all"));
    }

    #[test]
    fn test_keywords_input_forms() {
        let text: CreateFaqRequest = serde_json::from_value(serde_json::json!({
            "question": "Q",
            "answer": "A",
            "keywords": " Jab , CROSS,,"
        }))
        .unwrap();
        assert_eq!(text.keywords.normalize(), vec!["jab", "cross"]);

        let list: CreateFaqRequest = serde_json::from_value(serde_json::json!({
            "question": "Q",
            "answer": "A",
            "keywords": ["Hook", "hook", " "]
        }))
        .unwrap();
        assert_eq!(list.keywords.normalize(), vec!["hook"]);
    }

    #[test]
    fn test_blank_answer_rejected() {
        let request = CreateFaqRequest {
            question: "Q".to_string(),
            answer: "   ".to_string(),
            keywords: KeywordsInput::default(),
            is_active: true,
        };
        assert!(request.validate().is_err());
    }
}
