//! Audit orchestration
//!
//! Runs the full pipeline - fetch, crawl, analyze, score - for one target,
//! and coordinates comparative runs over a primary target plus a bounded
//! set of competitors. Targets are processed sequentially, one at a time,
//! to stay inside external API rate limits.

use crate::analyze::{
    analyze_content, analyze_links, audit_schema, extract_facts, ContentMetrics, LinkProfile,
    PageFacts, SchemaReport,
};
use crate::audit::findings::{derive_findings, Finding};
use crate::config::AuditConfig;
use crate::crawl::{check_links, crawl_from_root, LinkCheck, SiteGraph};
use crate::fetch::{build_http_client, fetch_page, FetchOutcome};
use crate::pagespeed::{self, PerformanceScores, Strategy};
use crate::score::{composite_score, CompositeScore};
use crate::url::{normalize_target, AuditTarget};
use crate::{AuditError, Result};
use reqwest::Client;
use scraper::Html;
use serde::Serialize;

/// Maximum number of competitor targets processed per comparison
///
/// Bounds external API usage and total run time; extra URLs are reported
/// as not analyzed rather than rejected.
pub const COMPETITOR_CAP: usize = 3;

/// Complete audit result for one target
#[derive(Debug, Serialize)]
pub struct SiteAudit {
    pub target: AuditTarget,

    /// Redirect destination when the fetch landed elsewhere
    pub final_url: Option<String>,

    pub status: u16,
    pub graph: SiteGraph,
    pub facts: PageFacts,
    pub content: ContentMetrics,
    pub links: LinkProfile,
    pub schema: SchemaReport,
    pub performance: Option<PerformanceScores>,
    pub composite: CompositeScore,
    pub findings: Vec<Finding>,
    pub link_check: Option<LinkCheck>,
}

/// One ranked row of a comparative report
#[derive(Debug, Clone, Serialize)]
pub struct ComparativeEntry {
    pub url: String,

    /// Marks the primary target for downstream highlighting
    pub is_primary: bool,

    pub composite_total: u8,
    pub content_score: u8,
    pub link_score: u8,
    pub schema_score: u8,
    pub performance: Option<f64>,
}

/// A competitor that could not be audited
#[derive(Debug, Clone, Serialize)]
pub struct SkippedTarget {
    pub url: String,
    pub warning: String,
}

/// Rank-ordered comparison of a primary target against its competitors
///
/// Entries are sorted by descending composite total; equal totals keep
/// input order, with the primary target first among its peers.
#[derive(Debug, Serialize)]
pub struct ComparativeReport {
    pub entries: Vec<ComparativeEntry>,
    pub skipped: Vec<SkippedTarget>,

    /// Competitor URLs beyond the processing cap
    pub not_analyzed: Vec<String>,
}

/// Runs audits with one shared HTTP client and configuration
pub struct Auditor {
    config: AuditConfig,
    client: Client,
}

impl Auditor {
    /// Creates an auditor from a validated configuration
    pub fn new(config: AuditConfig) -> Result<Self> {
        let client = build_http_client(&config.fetch)?;
        Ok(Self { config, client })
    }

    /// Audits a raw address end-to-end
    ///
    /// Validation failures and an unreachable root page are reported as
    /// errors; everything downstream of a successful root fetch degrades
    /// softly instead of failing.
    pub async fn audit_url(&self, raw: &str) -> Result<SiteAudit> {
        let target = normalize_target(raw)?;
        self.audit(&target).await
    }

    /// Audits a validated target end-to-end
    pub async fn audit(&self, target: &AuditTarget) -> Result<SiteAudit> {
        tracing::info!("auditing {}", target.url);

        let snapshot = match fetch_page(&self.client, target.url.as_str()).await {
            FetchOutcome::Fetched(snapshot) => snapshot,
            FetchOutcome::Unreachable { reason } => {
                return Err(AuditError::Unreachable {
                    url: target.url.to_string(),
                    reason,
                })
            }
        };

        let graph =
            crawl_from_root(&self.client, target, &snapshot, &self.config.crawl).await;

        let link_check = if self.config.crawl.link_check_cap > 0 {
            Some(check_links(&self.client, &graph, self.config.crawl.link_check_cap).await)
        } else {
            None
        };

        let performance = match &self.config.keys.pagespeed_api_key {
            Some(key) => {
                pagespeed::fetch_scores(
                    &self.client,
                    key,
                    target.url.as_str(),
                    Strategy::Mobile,
                )
                .await
            }
            None => {
                tracing::debug!("no performance API key configured, skipping lab scores");
                None
            }
        };

        let document = Html::parse_document(&snapshot.body);
        let facts = extract_facts(&document, target);
        let content = analyze_content(&document, &self.config.heuristics);
        let links = analyze_links(&document, target, &self.config.heuristics);
        let schema = audit_schema(&document, &self.config.heuristics);
        drop(document);

        let mobile_performance = performance.as_ref().and_then(|p| p.performance);
        let composite = composite_score(&facts, mobile_performance, &schema);
        let findings = derive_findings(&facts, &content, &links, &schema, link_check.as_ref());

        tracing::info!(
            "{} scored {}/100 ({} findings)",
            target.url,
            composite.total,
            findings.len()
        );

        Ok(SiteAudit {
            target: target.clone(),
            final_url: snapshot.final_url.clone(),
            status: snapshot.status,
            graph,
            facts,
            content,
            links,
            schema,
            performance,
            composite,
            findings,
            link_check,
        })
    }

    /// Audits the primary target and up to [`COMPETITOR_CAP`] competitors
    ///
    /// A failed competitor is skipped with a warning while the rest of the
    /// comparison proceeds; a failed primary target aborts the run.
    pub async fn compare(
        &self,
        primary: &str,
        competitors: &[String],
    ) -> Result<ComparativeReport> {
        let primary_audit = self.audit_url(primary).await?;

        let (analyzed, overflow) =
            competitors.split_at(competitors.len().min(COMPETITOR_CAP));
        if !overflow.is_empty() {
            tracing::warn!(
                "competitor cap is {}, leaving {} URLs unanalyzed",
                COMPETITOR_CAP,
                overflow.len()
            );
        }

        let mut entries = vec![entry_from(&primary_audit, true)];
        let mut skipped = Vec::new();

        for raw in analyzed {
            match self.audit_url(raw).await {
                Ok(audit) => entries.push(entry_from(&audit, false)),
                Err(e) => {
                    tracing::warn!("skipping competitor {}: {}", raw, e);
                    skipped.push(SkippedTarget {
                        url: raw.clone(),
                        warning: e.to_string(),
                    });
                }
            }
        }

        // Stable sort: equal totals retain input order
        entries.sort_by(|a, b| b.composite_total.cmp(&a.composite_total));

        Ok(ComparativeReport {
            entries,
            skipped,
            not_analyzed: overflow.to_vec(),
        })
    }
}

fn entry_from(audit: &SiteAudit, is_primary: bool) -> ComparativeEntry {
    ComparativeEntry {
        url: audit.target.url.to_string(),
        is_primary,
        composite_total: audit.composite.total,
        content_score: audit.content.quality_score,
        link_score: audit.links.link_score,
        schema_score: audit.schema.coverage_score,
        performance: audit.performance.as_ref().and_then(|p| p.performance),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_competitor_cap_is_three() {
        assert_eq!(COMPETITOR_CAP, 3);
    }

    #[test]
    fn test_auditor_builds_from_default_config() {
        assert!(Auditor::new(AuditConfig::default()).is_ok());
    }

    #[test]
    fn test_entries_sort_is_stable_on_ties() {
        let mut entries = vec![
            ComparativeEntry {
                url: "https://first.example/".to_string(),
                is_primary: true,
                composite_total: 70,
                content_score: 0,
                link_score: 0,
                schema_score: 0,
                performance: None,
            },
            ComparativeEntry {
                url: "https://second.example/".to_string(),
                is_primary: false,
                composite_total: 70,
                content_score: 0,
                link_score: 0,
                schema_score: 0,
                performance: None,
            },
            ComparativeEntry {
                url: "https://third.example/".to_string(),
                is_primary: false,
                composite_total: 90,
                content_score: 0,
                link_score: 0,
                schema_score: 0,
                performance: None,
            },
        ];

        entries.sort_by(|a, b| b.composite_total.cmp(&a.composite_total));

        assert_eq!(entries[0].url, "https://third.example/");
        assert_eq!(entries[1].url, "https://first.example/");
        assert_eq!(entries[2].url, "https://second.example/");
    }
}
