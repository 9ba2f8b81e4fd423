use serde::{Deserialize, Serialize};

/// Body returned by the `siteverify` endpoint
///
/// ## Example JSON
/// ```json
/// {
///   "success": false,
///   "error-codes": ["invalid-input-response"]
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteVerifyResponse {
    /// Whether the token was valid for this site
    pub success: bool,

    /// Timestamp of the challenge load (ISO format)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenge_ts: Option<String>,

    /// Hostname of the site where the challenge was solved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,

    /// Reasons for a rejection
    #[serde(rename = "error-codes", default, skip_serializing_if = "Vec::is_empty")]
    pub error_codes: Vec<String>,
}

#[cfg(test)]
impl SiteVerifyResponse {
    pub fn accepted() -> Self {
        Self {
            success: true,
            ..Self::default()
        }
    }

    pub fn rejected(code: &str) -> Self {
        Self {
            success: false,
            error_codes: vec![code.to_string()],
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_google_rejection() {
        let body = r#"{"success": false, "error-codes": ["invalid-input-response", "timeout-or-duplicate"]}"#;
        let parsed: SiteVerifyResponse = serde_json::from_str(body).unwrap();

        assert!(!parsed.success);
        assert_eq!(parsed.error_codes.len(), 2);
        assert_eq!(parsed.error_codes[1], "timeout-or-duplicate");
    }

    #[test]
    fn parses_google_acceptance() {
        let body = r#"{"success": true, "challenge_ts": "2024-01-15T10:30:00Z", "hostname": "localhost"}"#;
        let parsed: SiteVerifyResponse = serde_json::from_str(body).unwrap();

        assert!(parsed.success);
        assert_eq!(parsed.hostname.as_deref(), Some("localhost"));
        assert!(parsed.error_codes.is_empty());
    }
}
