//! Coercion of free-form model output into a typed result.

use unsaid_schema::AnalysisResult;

use crate::error::AnalysisError;

/// Models habitually wrap JSON answers in Markdown code fences. Remove the
/// markers and surrounding whitespace before parsing.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// Fence-strip, then parse in two steps so a non-JSON body and a JSON body
/// with missing fields are reported as distinct failures.
pub fn parse_result(text: &str) -> Result<AnalysisResult, AnalysisError> {
    let cleaned = strip_code_fences(text);
    let value: serde_json::Value =
        serde_json::from_str(&cleaned).map_err(|e| AnalysisError::Malformed(e.to_string()))?;
    serde_json::from_value(value).map_err(|e| AnalysisError::Shape(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_RESULT: &str = r#"{
        "powerDynamics": {"leader": "A", "follower": "B", "analysis": "A leads."},
        "emotionalInvestment": {"moreInvested": "B", "analysis": "B cares."},
        "patterns": {"repeated": "x", "changed": "y", "neverCame": "z"},
        "unsaid": {"avoided": "a", "implied": "b", "known": "c"}
    }"#;

    #[test]
    fn strips_json_fence_markers() {
        let fenced = format!("```json\n{FULL_RESULT}\n```");
        let result = parse_result(&fenced).unwrap();
        assert_eq!(result.power_dynamics.leader, "A");
    }

    #[test]
    fn strips_bare_fence_markers() {
        let fenced = format!("```\n{FULL_RESULT}\n```\n");
        assert!(parse_result(&fenced).is_ok());
    }

    #[test]
    fn parses_unfenced_json() {
        assert!(parse_result(FULL_RESULT).is_ok());
    }

    #[test]
    fn non_json_is_malformed() {
        let err = parse_result("I could not analyze this conversation.").unwrap_err();
        assert!(matches!(err, AnalysisError::Malformed(_)));
    }

    #[test]
    fn json_with_missing_section_is_shape_error() {
        let partial = r#"{"powerDynamics": {"leader": "A", "follower": "B", "analysis": "x"}}"#;
        let err = parse_result(partial).unwrap_err();
        assert!(matches!(err, AnalysisError::Shape(_)));
    }
}
