//! HTTP transport abstraction

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::config::ClientConfig;
use crate::error::Result;

/// Status and headers returned by an inbox
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
}

impl HttpResponse {
    #[must_use]
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Look up a header by case-insensitive name
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Transport used to deliver notifications
#[async_trait]
pub trait HttpLayer: Send + Sync {
    /// POST `body` to `url` with the given request headers
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Transport` when no response is received.
    async fn post(&self, url: &str, body: String, headers: &[(String, String)]) -> Result<HttpResponse>;
}

/// [`HttpLayer`] backed by a `reqwest` client
#[derive(Debug, Clone)]
pub struct ReqwestHttpLayer {
    client: Client,
}

impl ReqwestHttpLayer {
    /// Build a transport honouring the configured timeout and user agent
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Transport` if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client })
    }

    #[must_use]
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpLayer for ReqwestHttpLayer {
    async fn post(&self, url: &str, body: String, headers: &[(String, String)]) -> Result<HttpResponse> {
        let mut header_map = HeaderMap::new();
        for (name, value) in headers {
            if let Ok(header_name) = HeaderName::from_bytes(name.as_bytes())
                && let Ok(header_value) = HeaderValue::from_str(value)
            {
                header_map.insert(header_name, header_value);
            }
        }

        let response = self.client.post(url).headers(header_map).body(body).send().await?;

        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();

        Ok(HttpResponse {
            status: response.status().as_u16(),
            headers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_ignores_case() {
        let response = HttpResponse::new(201).with_header("Location", "https://example.com/n/1");
        assert_eq!(response.header("location"), Some("https://example.com/n/1"));
        assert_eq!(response.header("LOCATION"), Some("https://example.com/n/1"));
        assert_eq!(response.header("content-type"), None);
    }

    #[test]
    fn transport_builds_from_default_config() {
        assert!(ReqwestHttpLayer::new(&ClientConfig::default()).is_ok());
    }
}
