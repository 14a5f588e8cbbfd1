//! Broken-link probe
//!
//! Sends HEAD requests to a bounded sample of the discovered internal pages
//! and records the ones that answer with an error status or fail to answer
//! at all.

use crate::crawl::graph::SiteGraph;
use reqwest::Client;
use serde::Serialize;

/// A link that failed its HEAD probe
#[derive(Debug, Clone, Serialize)]
pub struct BrokenLink {
    pub url: String,

    /// Status code when the server answered, absent on network failures
    pub status: Option<u16>,

    pub reason: String,
}

/// Outcome of the broken-link probe
#[derive(Debug, Clone, Serialize)]
pub struct LinkCheck {
    /// Number of links actually probed (bounded by the configured cap)
    pub checked: u32,

    pub broken: Vec<BrokenLink>,
}

/// Probes up to `cap` discovered pages with HEAD requests
///
/// The root page is skipped - it was already fetched. Probes run
/// sequentially to stay polite toward the audited host.
pub async fn check_links(client: &Client, graph: &SiteGraph, cap: u32) -> LinkCheck {
    let mut checked = 0u32;
    let mut broken = Vec::new();

    for node in graph.nodes() {
        if node.depth == 0 {
            continue;
        }
        if checked >= cap {
            break;
        }
        checked += 1;

        match client.head(&node.url).send().await {
            Ok(response) => {
                let status = response.status();
                if status.is_client_error() || status.is_server_error() {
                    broken.push(BrokenLink {
                        url: node.url.clone(),
                        status: Some(status.as_u16()),
                        reason: format!("HTTP {}", status.as_u16()),
                    });
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
                broken.push(BrokenLink {
                    url: node.url.clone(),
                    status: None,
                    reason,
                });
            }
        }
    }

    LinkCheck { checked, broken }
}
