//! Result helpers for MCP tool responses
//!
//! Tools in this workspace answer every call with a success envelope. A
//! failed operation is reported as text starting with [`ERROR_PREFIX`], so
//! callers distinguish results from failures by inspecting the content.

use std::fmt::Display;

use rmcp::model::{CallToolResult, Content};
use serde::Serialize;

/// Prefix of every error payload returned through [`error_text`]
pub const ERROR_PREFIX: &str = "Error: ";

/// Serialize any data as indented JSON text
///
/// ```rust,ignore
/// let text = json_text(&serde_json::json!({"id": "a"}))?;
/// assert_eq!(text, "{\n  \"id\": \"a\"\n}");
/// ```
pub fn json_text<T: Serialize>(data: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(data)
}

/// Create a successful plain text response
pub fn text_success(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.into())])
}

/// Create an error payload wrapped in a success envelope
///
/// The text is `Error: <message>`.
pub fn error_text(message: impl Display) -> CallToolResult {
    text_success(format!("{}{}", ERROR_PREFIX, message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct TestData {
        name: String,
        value: i32,
    }

    fn first_text(result: &CallToolResult) -> &str {
        match &result.content[0].raw {
            rmcp::model::RawContent::Text(t) => t.text.as_str(),
            _ => panic!("expected text content"),
        }
    }

    #[test]
    fn test_json_text_is_indented() {
        let data = TestData {
            name: "test".to_string(),
            value: 42,
        };
        let text = json_text(&data).unwrap();
        assert_eq!(text, "{\n  \"name\": \"test\",\n  \"value\": 42\n}");
    }

    #[test]
    fn test_text_success() {
        let result = text_success("hello world");
        assert!(!result.is_error.unwrap_or(false));
        assert_eq!(result.content.len(), 1);
        assert_eq!(first_text(&result), "hello world");
    }

    #[test]
    fn test_error_text_stays_in_success_envelope() {
        let result = error_text("Unknown tool: nope");
        assert!(!result.is_error.unwrap_or(false));
        assert_eq!(result.content.len(), 1);
        assert_eq!(first_text(&result), "Error: Unknown tool: nope");
    }
}
