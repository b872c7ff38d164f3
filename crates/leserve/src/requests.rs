//! Request body for the analyze endpoint

use lepriorite::ScoreInput;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ApiError, ApiResult};

/// Body of `POST /analyze`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    /// Task title, required and non-blank
    pub title: String,

    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Optional ISO-8601 deadline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
}

impl AnalyzeRequest {
    /// Validate a raw JSON body into scorer input
    ///
    /// A missing title is a client error. Fields of the wrong type are
    /// reported as analysis failures. A deadline that is not a string is
    /// handed to the scorer as text and ends up unparsed.
    pub fn from_json(body: &Value) -> ApiResult<ScoreInput> {
        let Some(fields) = body.as_object() else {
            return Err(ApiError::bad_request("Title is required"));
        };

        let title = match fields.get("title") {
            None => return Err(ApiError::bad_request("Title is required")),
            Some(Value::String(title)) => title.trim(),
            Some(other) => {
                return Err(ApiError::analysis_failed(format!(
                    "title must be a string, got {}",
                    json_type(other)
                )))
            }
        };

        if title.is_empty() {
            return Err(ApiError::bad_request("Title cannot be empty"));
        }

        let description = match fields.get("description") {
            None | Some(Value::Null) => None,
            Some(Value::String(text)) => Some(text.clone()),
            Some(other) => {
                return Err(ApiError::analysis_failed(format!(
                    "description must be a string, got {}",
                    json_type(other)
                )))
            }
        };

        let deadline = match fields.get("deadline") {
            None | Some(Value::Null) => None,
            Some(Value::String(text)) => Some(text.clone()),
            Some(other) => Some(other.to_string()),
        };

        Ok(ScoreInput {
            title: title.to_string(),
            description,
            deadline,
        })
    }
}

impl From<&ScoreInput> for AnalyzeRequest {
    fn from(input: &ScoreInput) -> Self {
        Self {
            title: input.title.clone(),
            description: input.description.clone(),
            deadline: input.deadline.clone(),
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
