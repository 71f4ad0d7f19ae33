//! JSON serialization for analysis results.
//!
//! Non-finite numbers (the upper confidence limit of an uninformative pool)
//! are written as `null`.

use tsa_core::TsaResult;

/// Serialize a TsaResult to a compact JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails (should not happen for TsaResult).
pub fn to_json(result: &TsaResult) -> Result<String, serde_json::Error> {
    serde_json::to_string(result)
}

/// Serialize a TsaResult to a pretty-printed JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails (should not happen for TsaResult).
pub fn to_json_pretty(result: &TsaResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::fixtures::benefit_result;

    #[test]
    fn test_to_json() {
        let json = to_json(&benefit_result()).unwrap();
        assert!(json.contains("\"conclusion\":\"conclusive-benefit\""));
        assert!(json.contains("\"state\":\"boundary-crossed-benefit\""));
        assert!(json.contains("\"study_id\":\"a\""));
        assert!(json.contains("\"futility\":\"obrien-fleming\""));
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json_pretty(&benefit_result()).unwrap();
        assert!(json.contains('\n')); // Pretty print has newlines
        assert!(json.contains("required_information_size"));
    }

    #[test]
    fn test_json_is_parseable() {
        let json = to_json(&benefit_result()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["records"].as_array().map(|r| r.len()), Some(2));
    }
}
