use std::collections::BTreeMap;

use crate::config::SopApiConfig;

pub const HEADER_ACCEPT: &str = "accept";
pub const HEADER_CONTENT_TYPE: &str = "content-type";
pub const HEADER_AUTHORIZATION: &str = "authorization";
pub const HEADER_USER_AGENT: &str = "user-agent";

const DEFAULT_USER_AGENT: &str = "safety-chat/0.1";

/// Build a deterministic header map for backend requests.
///
/// The bearer token is optional; the development backend accepts anonymous
/// requests. Extra headers are merged last with lowercased keys and may
/// override the defaults.
#[must_use]
pub fn build_headers(config: &SopApiConfig) -> BTreeMap<String, String> {
    let mut headers = BTreeMap::new();

    headers.insert(HEADER_ACCEPT.to_owned(), "application/json".to_owned());
    headers.insert(HEADER_CONTENT_TYPE.to_owned(), "application/json".to_owned());

    if let Some(token) = config.api_token.as_deref().map(str::trim) {
        if !token.is_empty() {
            headers.insert(HEADER_AUTHORIZATION.to_owned(), format!("Bearer {token}"));
        }
    }

    let user_agent = config
        .user_agent
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_USER_AGENT);
    headers.insert(HEADER_USER_AGENT.to_owned(), user_agent.to_owned());

    for (key, value) in &config.extra_headers {
        headers.insert(key.trim().to_ascii_lowercase(), value.trim().to_owned());
    }

    headers
}

#[cfg(test)]
mod tests {
    use super::{build_headers, HEADER_AUTHORIZATION, HEADER_USER_AGENT};
    use crate::config::SopApiConfig;

    #[test]
    fn anonymous_config_omits_authorization() {
        let headers = build_headers(&SopApiConfig::default());

        assert!(!headers.contains_key(HEADER_AUTHORIZATION));
        assert_eq!(headers.get("accept").map(String::as_str), Some("application/json"));
        assert_eq!(
            headers.get("content-type").map(String::as_str),
            Some("application/json")
        );
    }

    #[test]
    fn bearer_token_is_trimmed_and_prefixed() {
        let headers = build_headers(&SopApiConfig::default().with_api_token("  token-123  "));

        assert_eq!(
            headers.get(HEADER_AUTHORIZATION).map(String::as_str),
            Some("Bearer token-123")
        );
    }

    #[test]
    fn blank_token_is_treated_as_absent() {
        let headers = build_headers(&SopApiConfig::default().with_api_token("   "));

        assert!(!headers.contains_key(HEADER_AUTHORIZATION));
    }

    #[test]
    fn user_agent_override_beats_the_default() {
        let default_headers = build_headers(&SopApiConfig::default());
        assert_eq!(
            default_headers.get(HEADER_USER_AGENT).map(String::as_str),
            Some("safety-chat/0.1")
        );

        let overridden = build_headers(&SopApiConfig::default().with_user_agent("floor-kiosk/2.0"));
        assert_eq!(
            overridden.get(HEADER_USER_AGENT).map(String::as_str),
            Some("floor-kiosk/2.0")
        );
    }

    #[test]
    fn extra_headers_merge_with_lowercased_keys() {
        let headers = build_headers(
            &SopApiConfig::default().insert_header("X-Plant-Id", " line-7 "),
        );

        assert_eq!(headers.get("x-plant-id").map(String::as_str), Some("line-7"));
    }
}
