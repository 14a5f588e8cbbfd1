//! Page fetch adapter
//!
//! Builds the shared HTTP client and retrieves pages as [`PageSnapshot`]
//! values. Network failures and error statuses become the
//! [`FetchOutcome::Unreachable`] sentinel rather than errors, so a failed
//! fetch degrades the audit instead of aborting it.

use crate::config::FetchConfig;
use reqwest::Client;
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;

/// A fetched page, owned by a single audit pass and discarded afterward
#[derive(Debug, Clone, Serialize)]
pub struct PageSnapshot {
    /// URL the fetch was issued for
    pub requested_url: String,

    /// Redirect target, present only when it differs from the request URL
    pub final_url: Option<String>,

    /// HTTP status code
    pub status: u16,

    /// Response headers, keys lowercased for case-insensitive lookup
    pub headers: HashMap<String, String>,

    /// Raw markup
    pub body: String,
}

impl PageSnapshot {
    /// Case-insensitive response header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }

    /// The URL analyzers should treat as the page's own address
    pub fn effective_url(&self) -> &str {
        self.final_url.as_deref().unwrap_or(&self.requested_url)
    }
}

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchOutcome {
    /// Successfully fetched the page
    Fetched(PageSnapshot),

    /// The target could not be retrieved (network failure, timeout, or an
    /// error status)
    Unreachable { reason: String },
}

/// Builds the HTTP client shared by one audit run
///
/// The client carries a realistic user agent, compression support, and both
/// connect and total timeouts. Redirects are followed automatically; the
/// final resolved URL is reported on the snapshot.
pub fn build_http_client(config: &FetchConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a single page
///
/// | Condition | Outcome |
/// |-----------|---------|
/// | 2xx response | `Fetched` snapshot |
/// | 3xx chain | followed; final URL recorded when it differs |
/// | 4xx / 5xx | `Unreachable` with `HTTP <code>` |
/// | Timeout | `Unreachable` with `request timeout` |
/// | Connection failure | `Unreachable` with `connection failed` |
pub async fn fetch_page(client: &Client, url: &str) -> FetchOutcome {
    match client.get(url).send().await {
        Ok(response) => {
            let status = response.status();
            let final_url = response.url().to_string();

            if !status.is_success() {
                return FetchOutcome::Unreachable {
                    reason: format!("HTTP {}", status.as_u16()),
                };
            }

            let headers: HashMap<String, String> = response
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    value
                        .to_str()
                        .ok()
                        .map(|v| (name.as_str().to_lowercase(), v.to_string()))
                })
                .collect();

            match response.text().await {
                Ok(body) => FetchOutcome::Fetched(PageSnapshot {
                    requested_url: url.to_string(),
                    final_url: (final_url != url).then_some(final_url),
                    status: status.as_u16(),
                    headers,
                    body,
                }),
                Err(e) => FetchOutcome::Unreachable {
                    reason: format!("failed to read response body: {}", e),
                },
            }
        }
        Err(e) => {
            let reason = if e.is_timeout() {
                "request timeout".to_string()
            } else if e.is_connect() {
                "connection failed".to_string()
            } else {
                e.to_string()
            };
            FetchOutcome::Unreachable { reason }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot_with_headers(pairs: &[(&str, &str)]) -> PageSnapshot {
        PageSnapshot {
            requested_url: "https://example.com/".to_string(),
            final_url: None,
            status: 200,
            headers: pairs
                .iter()
                .map(|(k, v)| (k.to_lowercase(), v.to_string()))
                .collect(),
            body: String::new(),
        }
    }

    #[test]
    fn test_build_http_client() {
        let config = FetchConfig::default();
        assert!(build_http_client(&config).is_ok());
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let snapshot = snapshot_with_headers(&[("Content-Type", "text/html")]);
        assert_eq!(snapshot.header("content-type"), Some("text/html"));
        assert_eq!(snapshot.header("Content-Type"), Some("text/html"));
        assert_eq!(snapshot.header("CONTENT-TYPE"), Some("text/html"));
        assert_eq!(snapshot.header("x-missing"), None);
    }

    #[test]
    fn test_effective_url_prefers_final() {
        let mut snapshot = snapshot_with_headers(&[]);
        assert_eq!(snapshot.effective_url(), "https://example.com/");

        snapshot.final_url = Some("https://example.com/landing".to_string());
        assert_eq!(snapshot.effective_url(), "https://example.com/landing");
    }
}
