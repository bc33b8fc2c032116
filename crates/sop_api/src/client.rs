use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::config::SopApiConfig;
use crate::error::{parse_error_detail, SopApiError};
use crate::headers::build_headers;
use crate::payload::{ChatRequestBody, ChatResponseBody, SopInfo, SopRecord};
use crate::retry::{is_retryable_http_error, retry_delay, MAX_RETRIES};
use crate::url::{chat_url, sop_url, sops_url};

/// HTTP client for the assistant backend.
#[derive(Debug)]
pub struct SopApiClient {
    http: Client,
    config: SopApiConfig,
}

impl SopApiClient {
    pub fn new(config: SopApiConfig) -> Result<Self, SopApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(SopApiError::from)?;
        Ok(Self { http, config })
    }

    #[must_use]
    pub fn config(&self) -> &SopApiConfig {
        &self.config
    }

    /// Ask one question, with SOP context when a document is selected.
    pub async fn ask(&self, request: &ChatRequestBody) -> Result<ChatResponseBody, SopApiError> {
        let headers = self.request_headers()?;
        let url = chat_url(&self.config.base_url);
        let response = self
            .execute_with_retry(|| self.http.post(&url).headers(headers.clone()).json(request))
            .await?;
        decode_json(response).await
    }

    /// List available SOP documents (id and title only).
    pub async fn list_sops(&self) -> Result<Vec<SopInfo>, SopApiError> {
        let headers = self.request_headers()?;
        let url = sops_url(&self.config.base_url);
        let response = self
            .execute_with_retry(|| self.http.get(&url).headers(headers.clone()))
            .await?;
        decode_json(response).await
    }

    /// Fetch one SOP document, including its full content.
    pub async fn fetch_sop(&self, sop_id: &str) -> Result<SopRecord, SopApiError> {
        let headers = self.request_headers()?;
        let url = sop_url(&self.config.base_url, sop_id);
        let response = self
            .execute_with_retry(|| self.http.get(&url).headers(headers.clone()))
            .await?;
        decode_json(response).await
    }

    fn request_headers(&self) -> Result<HeaderMap, SopApiError> {
        let mut out = HeaderMap::new();
        for (key, value) in build_headers(&self.config) {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|_| SopApiError::InvalidHeader(key.clone()))?;
            let value =
                HeaderValue::from_str(&value).map_err(|_| SopApiError::InvalidHeader(key))?;
            out.insert(name, value);
        }
        Ok(out)
    }

    async fn execute_with_retry<F>(&self, build: F) -> Result<Response, SopApiError>
    where
        F: Fn() -> RequestBuilder,
    {
        let mut last_status: Option<StatusCode> = None;
        let mut last_error: Option<String> = None;

        for attempt in 0..=MAX_RETRIES {
            match build().send().await {
                Ok(response) if response.status().is_success() => return Ok(response),
                Ok(response) => {
                    let status = response.status();
                    last_status = Some(status);
                    let body = response.text().await.unwrap_or_default();
                    let message = parse_error_detail(status, &body);
                    last_error = Some(message.clone());

                    if attempt < MAX_RETRIES && is_retryable_http_error(status.as_u16(), &body) {
                        log::debug!(
                            "retrying after HTTP {status} (attempt {attempt}): {message}"
                        );
                        tokio::time::sleep(retry_delay(attempt)).await;
                        continue;
                    }

                    return Err(SopApiError::Status { status, message });
                }
                Err(error) => {
                    let message = error.to_string();
                    last_error = Some(message.clone());

                    if attempt < MAX_RETRIES {
                        log::debug!("retrying after request error (attempt {attempt}): {message}");
                        tokio::time::sleep(retry_delay(attempt)).await;
                        continue;
                    }
                }
            }
        }

        Err(SopApiError::RetryExhausted {
            status: last_status,
            last_error,
        })
    }
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, SopApiError> {
    let body = response.text().await.map_err(SopApiError::from)?;
    serde_json::from_str(&body).map_err(SopApiError::from)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::SopApiClient;
    use crate::config::SopApiConfig;
    use crate::headers::HEADER_AUTHORIZATION;

    #[test]
    fn new_accepts_a_timeout() {
        let client = SopApiClient::new(SopApiConfig::default().with_timeout(Duration::from_secs(5)))
            .expect("client should build");

        assert_eq!(client.config().timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn request_headers_carry_the_bearer_token() {
        let client = SopApiClient::new(SopApiConfig::default().with_api_token("token-123"))
            .expect("client should build");
        let headers = client.request_headers().expect("headers should build");

        assert_eq!(
            headers
                .get(HEADER_AUTHORIZATION)
                .and_then(|value| value.to_str().ok()),
            Some("Bearer token-123")
        );
    }

    #[test]
    fn request_headers_reject_values_with_control_characters() {
        let client = SopApiClient::new(SopApiConfig::default().insert_header("x-note", "a\nb"))
            .expect("client should build");

        assert!(client.request_headers().is_err());
    }
}
