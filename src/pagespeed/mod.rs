//! Performance metrics API client
//!
//! Queries a PageSpeed-style endpoint for lab scores. The whole module is
//! best-effort: a missing key disables the step upstream, and any API
//! failure degrades to `None` with a warning instead of failing the audit.

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

const ENDPOINT: &str = "https://www.googleapis.com/pagespeedonline/v5/runPagespeed";

/// Analysis strategy for the performance run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    Mobile,
    Desktop,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Mobile => "mobile",
            Strategy::Desktop => "desktop",
        }
    }
}

/// Lab scores reported by the performance API, each 0-100
#[derive(Debug, Clone, Serialize)]
pub struct PerformanceScores {
    pub performance: Option<f64>,
    pub accessibility: Option<f64>,
    pub best_practices: Option<f64>,
    pub seo: Option<f64>,
    pub strategy: Strategy,
}

/// Fetches lab scores for a URL
///
/// Returns `None` on any failure - transport error, error status, or an
/// unexpected response shape.
pub async fn fetch_scores(
    client: &Client,
    api_key: &str,
    url: &str,
    strategy: Strategy,
) -> Option<PerformanceScores> {
    let response = client
        .get(ENDPOINT)
        .query(&[
            ("url", url),
            ("strategy", strategy.as_str()),
            ("key", api_key),
            ("category", "performance"),
            ("category", "accessibility"),
            ("category", "best-practices"),
            ("category", "seo"),
        ])
        .send()
        .await;

    let response = match response {
        Ok(r) if r.status().is_success() => r,
        Ok(r) => {
            tracing::warn!("performance API returned HTTP {} for {}", r.status(), url);
            return None;
        }
        Err(e) => {
            tracing::warn!("performance API request failed for {}: {}", url, e);
            return None;
        }
    };

    let body: Value = match response.json().await {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!("performance API response unreadable for {}: {}", url, e);
            return None;
        }
    };

    Some(parse_scores(&body, strategy))
}

/// Extracts the category scores from the API response body
///
/// The API reports each category score in [0, 1]; they are rescaled to
/// 0-100 here. Missing categories stay `None`.
fn parse_scores(body: &Value, strategy: Strategy) -> PerformanceScores {
    let category = |name: &str| {
        body.pointer(&format!("/lighthouseResult/categories/{}/score", name))
            .and_then(Value::as_f64)
            .map(|score| score * 100.0)
    };

    PerformanceScores {
        performance: category("performance"),
        accessibility: category("accessibility"),
        best_practices: category("best-practices"),
        seo: category("seo"),
        strategy,
    }
}
