//! Breadth-first site structure crawler
//!
//! Discovers same-host pages starting from the root, with an explicit
//! frontier queue and a visited set keyed by normalized URL. The crawl is
//! bounded by both `max-pages` and `max-depth`; depth is the true hop
//! distance from the root.

use crate::config::CrawlConfig;
use crate::crawl::graph::{SiteGraph, SiteNode};
use crate::fetch::{fetch_page, FetchOutcome, PageSnapshot};
use crate::url::{canonical_key, path_segment_count, AuditTarget};
use reqwest::Client;
use scraper::{Html, Selector};
use std::collections::{HashSet, VecDeque};
use url::Url;

/// A same-host link discovered on a page
#[derive(Debug, Clone)]
pub struct DiscoveredLink {
    pub url: Url,
    pub anchor_text: String,
}

/// Crawls a site's structure starting from the target's root page
///
/// Fetches the root itself; when that fetch fails the result is an empty
/// [`SiteGraph`] carrying the failure reason - never an error.
pub async fn crawl_site(client: &Client, target: &AuditTarget, config: &CrawlConfig) -> SiteGraph {
    match fetch_page(client, target.url.as_str()).await {
        FetchOutcome::Fetched(snapshot) => {
            crawl_from_root(client, target, &snapshot, config).await
        }
        FetchOutcome::Unreachable { reason } => {
            tracing::warn!("crawl root {} unreachable: {}", target.url, reason);
            SiteGraph::unreachable(target.url.as_str(), reason)
        }
    }
}

/// Crawls a site's structure from an already-fetched root snapshot
///
/// Breadth-first: the frontier holds `(url, depth)` pairs, and every
/// discovered link is deduplicated against a visited set of normalized
/// URLs before it may join the graph. Sub-page fetch failures are skipped
/// with a warning; discovery stops once `max-pages` unique nodes exist,
/// and pages at `max-depth` are collected but not expanded.
pub async fn crawl_from_root(
    client: &Client,
    target: &AuditTarget,
    root: &PageSnapshot,
    config: &CrawlConfig,
) -> SiteGraph {
    let mut graph = SiteGraph::new(target.url.as_str());
    let mut visited: HashSet<String> = HashSet::new();
    let mut frontier: VecDeque<(Url, u32)> = VecDeque::new();

    visited.insert(canonical_key(&target.url));
    graph.insert(root_node(target));
    frontier.push_back((target.url.clone(), 0));

    while let Some((page_url, depth)) = frontier.pop_front() {
        if depth >= config.max_depth {
            continue;
        }
        if graph.unique_pages >= config.max_pages {
            break;
        }

        let body = if depth == 0 {
            root.body.clone()
        } else {
            match fetch_page(client, page_url.as_str()).await {
                FetchOutcome::Fetched(snapshot) => snapshot.body,
                FetchOutcome::Unreachable { reason } => {
                    tracing::warn!("skipping {} during crawl: {}", page_url, reason);
                    continue;
                }
            }
        };

        let links = extract_site_links(&body, &page_url, &target.host);
        graph.total_links_found += links.len() as u32;

        for link in links {
            if graph.unique_pages >= config.max_pages {
                break;
            }

            let key = canonical_key(&link.url);
            if !visited.insert(key) {
                continue;
            }

            let node_depth = depth + 1;
            graph.insert(page_node(&link, node_depth));
            frontier.push_back((link.url, node_depth));
        }
    }

    tracing::debug!(
        "crawl of {} collected {} pages from {} links",
        target.url,
        graph.unique_pages,
        graph.total_links_found
    );

    graph
}

/// Extracts the same-host links from a page body
///
/// Resolution rules:
/// - hrefs resolve against the page's own URL (relative paths work)
/// - fragment-only links (`#...`) are skipped
/// - `javascript:`, `mailto:`, `tel:` and `data:` links are skipped
/// - only links whose resolved host equals the target host are kept
pub fn extract_site_links(body: &str, page_url: &Url, host: &str) -> Vec<DiscoveredLink> {
    let document = Html::parse_document(body);
    let mut links = Vec::new();

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            let href = match element.value().attr("href") {
                Some(h) => h.trim(),
                None => continue,
            };

            if href.is_empty()
                || href.starts_with('#')
                || href.starts_with("javascript:")
                || href.starts_with("mailto:")
                || href.starts_with("tel:")
                || href.starts_with("data:")
            {
                continue;
            }

            let resolved = match page_url.join(href) {
                Ok(u) => u,
                Err(_) => continue,
            };

            if resolved.scheme() != "http" && resolved.scheme() != "https" {
                continue;
            }

            let same_host = resolved
                .host_str()
                .map(|h| h.eq_ignore_ascii_case(host))
                .unwrap_or(false);
            if !same_host {
                continue;
            }

            let anchor_text = element.text().collect::<String>().trim().to_string();
            links.push(DiscoveredLink {
                url: resolved,
                anchor_text,
            });
        }
    }

    links
}

fn root_node(target: &AuditTarget) -> SiteNode {
    SiteNode {
        url: target.url.to_string(),
        path: target.url.path().to_string(),
        label: target.host.clone(),
        depth: 0,
        path_segments: path_segment_count(&target.url),
    }
}

fn page_node(link: &DiscoveredLink, depth: u32) -> SiteNode {
    let label = if link.anchor_text.is_empty() {
        label_from_path(&link.url)
    } else {
        link.anchor_text.clone()
    };

    SiteNode {
        url: link.url.to_string(),
        path: link.url.path().to_string(),
        label,
        depth,
        path_segments: path_segment_count(&link.url),
    }
}

/// Derives a display label from the last non-empty path segment
fn label_from_path(url: &Url) -> String {
    url.path()
        .split('/')
        .filter(|s| !s.is_empty())
        .next_back()
        .map(|segment| segment.replace(['-', '_'], " "))
        .unwrap_or_else(|| url.host_str().unwrap_or("page").to_string())
}
