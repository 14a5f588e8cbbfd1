//! Link and anchor quality analysis
//!
//! Classifies a page's anchors as internal or external, grades anchor text,
//! and computes authority, diversity, and nofollow ratios plus an aggregate
//! 0-100 link score. Every ratio defaults to zero when its denominator is
//! zero.

use crate::config::HeuristicsConfig;
use crate::url::{brand_term, host_matches, AuditTarget};
use scraper::{Html, Selector};
use serde::Serialize;
use std::collections::BTreeMap;

/// Number of entries kept in the top-domains table
const TOP_DOMAIN_COUNT: usize = 5;

/// Anchor-text class counts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnchorCounts {
    /// Anchors with no visible text
    pub empty: u32,

    /// Anchors matching the generic-text table ("click here", ...)
    pub generic: u32,

    /// Anchors containing the site's brand term
    pub branded: u32,

    /// Everything else, including exact-match anchors
    pub other: u32,
}

/// A referenced external domain and how often it appears
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainCount {
    pub domain: String,
    pub count: u32,
}

/// Link quality profile for one page
#[derive(Debug, Clone, Serialize)]
pub struct LinkProfile {
    pub total_links: u32,
    pub internal_links: u32,
    pub external_links: u32,
    pub nofollow_external: u32,
    pub nofollow_ratio: f64,
    pub authority_matches: u32,
    pub authority_ratio: f64,
    pub anchors: AnchorCounts,
    pub top_external_domains: Vec<DomainCount>,
    pub link_score: u8,
}

/// Analyzes the link and anchor quality of a page
pub fn analyze_links(
    document: &Html,
    target: &AuditTarget,
    heuristics: &HeuristicsConfig,
) -> LinkProfile {
    let brand = brand_term(&target.host);

    let mut internal = 0u32;
    let mut external = 0u32;
    let mut nofollow_external = 0u32;
    let mut authority_matches = 0u32;
    let mut anchors = AnchorCounts::default();
    let mut domains: BTreeMap<String, u32> = BTreeMap::new();

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            let href = match element.value().attr("href") {
                Some(h) => h.trim(),
                None => continue,
            };
            if href.starts_with("javascript:")
                || href.starts_with("mailto:")
                || href.starts_with("tel:")
                || href.starts_with("data:")
            {
                continue;
            }

            let resolved = match target.url.join(href) {
                Ok(u) => u,
                Err(_) => continue,
            };
            if resolved.scheme() != "http" && resolved.scheme() != "https" {
                continue;
            }

            let host = match resolved.host_str() {
                Some(h) => h.to_lowercase(),
                None => continue,
            };
            let is_internal = host.eq_ignore_ascii_case(&target.host);

            if is_internal {
                internal += 1;
            } else {
                external += 1;

                let rel = element.value().attr("rel").unwrap_or("");
                if rel
                    .split_whitespace()
                    .any(|token| token.eq_ignore_ascii_case("nofollow"))
                {
                    nofollow_external += 1;
                }

                if heuristics
                    .authority_domains
                    .iter()
                    .any(|entry| host_matches(&host, entry))
                {
                    authority_matches += 1;
                }

                *domains.entry(host).or_insert(0) += 1;
            }

            classify_anchor(&element.text().collect::<String>(), &brand, heuristics, &mut anchors);
        }
    }

    let total = internal + external;
    let nofollow_ratio = ratio(nofollow_external, external);
    let authority_ratio = ratio(authority_matches, external);

    let mut top_external_domains: Vec<DomainCount> = domains
        .into_iter()
        .map(|(domain, count)| DomainCount { domain, count })
        .collect();
    top_external_domains
        .sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.domain.cmp(&b.domain)));
    top_external_domains.truncate(TOP_DOMAIN_COUNT);

    let link_score = link_score(
        total,
        internal,
        external,
        authority_ratio,
        nofollow_ratio,
        &anchors,
    );

    LinkProfile {
        total_links: total,
        internal_links: internal,
        external_links: external,
        nofollow_external,
        nofollow_ratio,
        authority_matches,
        authority_ratio,
        anchors,
        top_external_domains,
        link_score,
    }
}

fn ratio(numerator: u32, denominator: u32) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

fn classify_anchor(
    raw_text: &str,
    brand: &str,
    heuristics: &HeuristicsConfig,
    counts: &mut AnchorCounts,
) {
    let text = raw_text.trim().to_lowercase();

    if text.is_empty() {
        counts.empty += 1;
    } else if heuristics
        .generic_anchors
        .iter()
        .any(|generic| text.contains(generic.as_str()))
    {
        counts.generic += 1;
    } else if !brand.is_empty() && text.contains(brand) {
        counts.branded += 1;
    } else {
        counts.other += 1;
    }
}

/// Aggregates the 0-100 link score
///
/// Rewards an external-link share in the 10-30% band, a high authority
/// ratio, a balanced nofollow ratio, descriptive anchor text, and a healthy
/// internal-link count; penalizes generic-heavy and empty-heavy anchor
/// profiles. The sum is clamped so it never goes negative.
fn link_score(
    total: u32,
    internal: u32,
    external: u32,
    authority_ratio: f64,
    nofollow_ratio: f64,
    anchors: &AnchorCounts,
) -> u8 {
    let mut score = 0.0f64;

    if total > 0 {
        let external_ratio = external as f64 / total as f64;
        if (0.10..=0.30).contains(&external_ratio) {
            score += 20.0;
        } else if external > 0 {
            score += 8.0;
        }

        let generic_ratio = anchors.generic as f64 / total as f64;
        if generic_ratio < 0.20 {
            score += 15.0;
        } else if generic_ratio > 0.60 {
            score -= 10.0;
        } else {
            score += 5.0;
        }

        let empty_ratio = anchors.empty as f64 / total as f64;
        if empty_ratio > 0.25 {
            score -= 10.0;
        } else {
            score += 5.0;
        }
    }

    if external > 0 {
        if authority_ratio >= 0.20 {
            score += 20.0;
        } else {
            score += authority_ratio / 0.20 * 20.0;
        }

        if (0.30..=0.70).contains(&nofollow_ratio) {
            score += 15.0;
        } else {
            score += 5.0;
        }
    }

    score += match internal {
        0 => 0.0,
        20..=100 => 15.0,
        5..=19 => 8.0,
        _ => 3.0,
    };

    score.clamp(0.0, 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::url::normalize_target;

    fn profile_for(html: &str) -> LinkProfile {
        let document = Html::parse_document(html);
        let target = normalize_target("https://example.com/").unwrap();
        analyze_links(&document, &target, &HeuristicsConfig::default())
    }

    #[test]
    fn test_no_external_links_means_zero_ratios() {
        let profile = profile_for(
            r#"<html><body>
                <a href="/a">First page</a>
                <a href="/b">Second page</a>
            </body></html>"#,
        );

        assert_eq!(profile.external_links, 0);
        assert_eq!(profile.nofollow_ratio, 0.0);
        assert_eq!(profile.authority_ratio, 0.0);
    }

    #[test]
    fn test_no_anchors_at_all() {
        let profile = profile_for("<html><body><p>No links.</p></body></html>");
        assert_eq!(profile.total_links, 0);
        assert_eq!(profile.link_score, 0);
        assert!(profile.top_external_domains.is_empty());
    }

    #[test]
    fn test_internal_external_classification() {
        let profile = profile_for(
            r#"<html><body>
                <a href="/internal">page</a>
                <a href="https://example.com/other">page</a>
                <a href="https://elsewhere.org/ref">reference</a>
            </body></html>"#,
        );

        assert_eq!(profile.internal_links, 2);
        assert_eq!(profile.external_links, 1);
        assert_eq!(profile.total_links, 3);
    }

    #[test]
    fn test_nofollow_counted_on_external_only() {
        let profile = profile_for(
            r#"<html><body>
                <a href="/internal" rel="nofollow">page</a>
                <a href="https://a.org/x" rel="nofollow noopener">ref one</a>
                <a href="https://b.org/y">ref two</a>
            </body></html>"#,
        );

        assert_eq!(profile.nofollow_external, 1);
        assert!((profile.nofollow_ratio - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_authority_ratio_uses_allow_list() {
        let profile = profile_for(
            r#"<html><body>
                <a href="https://en.wikipedia.org/wiki/Widget">source</a>
                <a href="https://randomblog.net/post">post</a>
            </body></html>"#,
        );

        assert_eq!(profile.authority_matches, 1);
        assert!((profile.authority_ratio - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_anchor_classification() {
        let profile = profile_for(
            r#"<html><body>
                <a href="/a"></a>
                <a href="/b">Click here</a>
                <a href="/c">Example widgets catalog</a>
                <a href="/d">Industrial fasteners</a>
            </body></html>"#,
        );

        assert_eq!(profile.anchors.empty, 1);
        assert_eq!(profile.anchors.generic, 1);
        assert_eq!(profile.anchors.branded, 1);
        assert_eq!(profile.anchors.other, 1);
    }

    #[test]
    fn test_top_external_domains_ordered_by_frequency() {
        let profile = profile_for(
            r#"<html><body>
                <a href="https://a.org/1">one</a>
                <a href="https://b.org/1">two</a>
                <a href="https://b.org/2">three</a>
            </body></html>"#,
        );

        assert_eq!(profile.top_external_domains[0].domain, "b.org");
        assert_eq!(profile.top_external_domains[0].count, 2);
        assert_eq!(profile.top_external_domains[1].domain, "a.org");
    }

    #[test]
    fn test_link_score_never_negative() {
        // Every anchor empty and generic-heavy; penalties dominate
        let profile = profile_for(
            r#"<html><body>
                <a href="https://a.org/1"></a>
                <a href="https://b.org/2"></a>
                <a href="https://c.org/3"></a>
            </body></html>"#,
        );
        assert!(profile.link_score <= 100);
    }

    #[test]
    fn test_healthy_profile_scores_well() {
        let mut body = String::new();
        for i in 0..25 {
            body.push_str(&format!(r#"<a href="/page-{}">Detailed topic {}</a>"#, i, i));
        }
        body.push_str(r#"<a href="https://en.wikipedia.org/wiki/A" rel="nofollow">Reference study</a>"#);
        body.push_str(r#"<a href="https://www.w3.org/TR/html52/">Standards document</a>"#);
        body.push_str(r#"<a href="https://nature.com/article">Journal article</a>"#);

        let profile = profile_for(&format!("<html><body>{}</body></html>", body));

        // 25 internal + 3 external: ~11% external, 100% authority, 33% nofollow
        assert!(profile.link_score >= 80);
    }

    #[test]
    fn test_analysis_is_idempotent() {
        let html = r#"<html><body>
            <a href="/a">First</a>
            <a href="https://a.org/x">Ref</a>
        </body></html>"#;
        let a = profile_for(html);
        let b = profile_for(html);

        assert_eq!(a.total_links, b.total_links);
        assert_eq!(a.link_score, b.link_score);
        assert_eq!(a.anchors, b.anchors);
        assert_eq!(a.top_external_domains, b.top_external_domains);
    }
}
