//! Input and result types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Task fields submitted for scoring
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreInput {
    /// Task title
    pub title: String,

    /// Free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// ISO-8601 deadline text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
}

impl ScoreInput {
    /// Create input with only a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            deadline: None,
        }
    }

    /// Attach a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach deadline text
    pub fn with_deadline(mut self, deadline: impl Into<String>) -> Self {
        self.deadline = Some(deadline.into());
        self
    }
}

/// Suggested priority tier, ordered from lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    /// Deferrable
    Low,

    /// Routine
    Medium,

    /// Needs attention soon
    High,
}

impl Priority {
    /// Label as sent over the wire
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scoring outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Suggested priority tier
    pub suggested_priority: Priority,

    /// Triggered rules joined with `"; "`
    pub reason: String,

    /// Strength of the suggestion, rounded to two decimals
    pub confidence: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::Low < Priority::Medium);
        assert!(Priority::Medium < Priority::High);
    }

    #[test]
    fn test_priority_serializes_as_label() {
        let json = serde_json::to_string(&Priority::Medium).unwrap();
        assert_eq!(json, "\"Medium\"");
        assert_eq!(Priority::High.to_string(), "High");
    }

    #[test]
    fn test_score_result_field_names() {
        let result = ScoreResult {
            suggested_priority: Priority::Low,
            reason: "Based on general analysis".to_string(),
            confidence: 0.6,
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["suggested_priority"], "Low");
        assert_eq!(value["reason"], "Based on general analysis");
        assert_eq!(value["confidence"], 0.6);
    }

    #[test]
    fn test_score_input_builder() {
        let input = ScoreInput::new("Ship release")
            .with_description("tag and publish")
            .with_deadline("2024-01-15T10:00:00Z");
        assert_eq!(input.title, "Ship release");
        assert_eq!(input.description.as_deref(), Some("tag and publish"));
        assert_eq!(input.deadline.as_deref(), Some("2024-01-15T10:00:00Z"));
    }

    #[test]
    fn test_score_input_optional_fields_default() {
        let input: ScoreInput = serde_json::from_str(r#"{"title":"Plan"}"#).unwrap();
        assert_eq!(input, ScoreInput::new("Plan"));
    }
}
