use std::collections::BTreeMap;
use std::time::Duration;

use crate::url::DEFAULT_SOP_BASE_URL;

/// Transport configuration for assistant backend requests.
#[derive(Debug, Clone)]
pub struct SopApiConfig {
    /// Base URL for backend endpoints.
    pub base_url: String,
    /// Optional bearer token passed to `Authorization`.
    pub api_token: Option<String>,
    /// Optional `User-Agent` override.
    pub user_agent: Option<String>,
    /// Additional headers merged into request headers.
    pub extra_headers: BTreeMap<String, String>,
    /// Optional request timeout.
    pub timeout: Option<Duration>,
}

impl Default for SopApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SOP_BASE_URL.to_string(),
            api_token: None,
            user_agent: None,
            extra_headers: BTreeMap::new(),
            timeout: None,
        }
    }
}

impl SopApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_api_token(mut self, api_token: impl Into<String>) -> Self {
        self.api_token = Some(api_token.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn insert_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.insert(key.into(), value.into());
        self
    }

    pub fn with_headers(mut self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        self.extra_headers.extend(headers);
        self
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::SopApiConfig;
    use crate::url::DEFAULT_SOP_BASE_URL;

    #[test]
    fn default_points_at_the_development_backend() {
        let config = SopApiConfig::default();

        assert_eq!(config.base_url, DEFAULT_SOP_BASE_URL);
        assert!(config.api_token.is_none());
        assert!(config.extra_headers.is_empty());
        assert!(config.timeout.is_none());
    }

    #[test]
    fn builders_compose() {
        let config = SopApiConfig::new("https://safety.example")
            .with_api_token("token-123")
            .with_timeout(Duration::from_secs(30))
            .insert_header("x-plant-id", "line-7");

        assert_eq!(config.base_url, "https://safety.example");
        assert_eq!(config.api_token.as_deref(), Some("token-123"));
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
        assert_eq!(
            config.extra_headers.get("x-plant-id").map(String::as_str),
            Some("line-7")
        );
    }
}
