//! Plain-text rendering of audit results
//!
//! Produces a deterministic, human-readable summary of one audit or one
//! comparison. The single-site summary doubles as the input document for
//! the external recommendation service, so its shape must stay stable.

use crate::audit::{ComparativeReport, SiteAudit};
use std::fmt::Write;

/// Renders the full summary of one site audit
pub fn render_summary(audit: &SiteAudit) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "=== Site Audit: {} ===", audit.target.url);
    if let Some(final_url) = &audit.final_url {
        let _ = writeln!(out, "Redirected to: {}", final_url);
    }
    let _ = writeln!(out);

    let _ = writeln!(
        out,
        "Composite score: {}/100 ({})",
        audit.composite.total,
        audit.composite.band()
    );
    for category in &audit.composite.breakdown {
        let _ = writeln!(
            out,
            "  {:<17} {:>5.1} / {:.0}",
            category.category, category.points, category.ceiling
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Site structure:");
    let _ = writeln!(
        out,
        "  {} unique pages from {} links (max depth {})",
        audit.graph.unique_pages,
        audit.graph.total_links_found,
        audit.graph.max_depth()
    );
    if let Some(failure) = &audit.graph.failure {
        let _ = writeln!(out, "  crawl failed: {}", failure);
    }
    if let Some(check) = &audit.link_check {
        let _ = writeln!(
            out,
            "  {} links probed, {} broken",
            check.checked,
            check.broken.len()
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(
        out,
        "Content: quality {}/100, {} words, {} sentences, readability {}",
        audit.content.quality_score,
        audit.content.word_count,
        audit.content.sentence_count,
        readability_text(audit)
    );
    if !audit.content.hierarchy_issues.is_empty() {
        let _ = writeln!(
            out,
            "  heading issues: {}",
            audit.content.hierarchy_issues.join("; ")
        );
    }

    let _ = writeln!(
        out,
        "Links: score {}/100, {} internal / {} external, authority {:.0}%, nofollow {:.0}%",
        audit.links.link_score,
        audit.links.internal_links,
        audit.links.external_links,
        audit.links.authority_ratio * 100.0,
        audit.links.nofollow_ratio * 100.0
    );

    let _ = writeln!(
        out,
        "Structured data: coverage {}/100, detected type {}, {} JSON-LD blocks, {} microdata items",
        audit.schema.coverage_score,
        audit.schema.detected_category.key(),
        audit.schema.json_ld_blocks,
        audit.schema.microdata_items
    );
    if !audit.schema.missing_recommended.is_empty() {
        let _ = writeln!(
            out,
            "  missing recommended: {}",
            audit.schema.missing_recommended.join(", ")
        );
    }

    if let Some(performance) = &audit.performance {
        let fmt = |v: Option<f64>| {
            v.map(|s| format!("{:.0}", s))
                .unwrap_or_else(|| "-".to_string())
        };
        let _ = writeln!(
            out,
            "Performance ({}): performance {} / accessibility {} / best-practices {} / seo {}",
            performance.strategy.as_str(),
            fmt(performance.performance),
            fmt(performance.accessibility),
            fmt(performance.best_practices),
            fmt(performance.seo)
        );
    }

    if !audit.findings.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Findings ({}):", audit.findings.len());
        for finding in &audit.findings {
            let _ = writeln!(
                out,
                "  [{}] {}: {}",
                finding.priority.label(),
                finding.title,
                finding.detail
            );
            let _ = writeln!(out, "       -> {}", finding.recommendation);
        }
    }

    out
}

fn readability_text(audit: &SiteAudit) -> String {
    use crate::analyze::Readability;
    match &audit.content.readability {
        Readability::Scored { score, band } => format!("{:.1} ({})", score, band.label()),
        Readability::NotApplicable => "n/a".to_string(),
    }
}

/// Renders the ranked comparison table
pub fn render_comparison(report: &ComparativeReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "=== Competitive Comparison ===");
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{:<4} {:<40} {:>9} {:>8} {:>6} {:>7} {:>5}",
        "Rank", "Target", "Composite", "Content", "Links", "Schema", "Perf"
    );

    for (index, entry) in report.entries.iter().enumerate() {
        let marker = if entry.is_primary { " *" } else { "" };
        let perf = entry
            .performance
            .map(|p| format!("{:.0}", p))
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "{:<4} {:<40} {:>9} {:>8} {:>6} {:>7} {:>5}",
            index + 1,
            format!("{}{}", entry.url, marker),
            entry.composite_total,
            entry.content_score,
            entry.link_score,
            entry.schema_score,
            perf
        );
    }

    if !report.skipped.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Skipped:");
        for skipped in &report.skipped {
            let _ = writeln!(out, "  {} ({})", skipped.url, skipped.warning);
        }
    }

    if !report.not_analyzed.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Not analyzed (over the competitor cap): {}",
            report.not_analyzed.join(", ")
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "* primary target");

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{ComparativeEntry, ComparativeReport, SkippedTarget};

    fn report() -> ComparativeReport {
        ComparativeReport {
            entries: vec![
                ComparativeEntry {
                    url: "https://leader.example/".to_string(),
                    is_primary: false,
                    composite_total: 88,
                    content_score: 70,
                    link_score: 60,
                    schema_score: 50,
                    performance: Some(91.0),
                },
                ComparativeEntry {
                    url: "https://mine.example/".to_string(),
                    is_primary: true,
                    composite_total: 74,
                    content_score: 61,
                    link_score: 44,
                    schema_score: 20,
                    performance: None,
                },
            ],
            skipped: vec![SkippedTarget {
                url: "https://down.example/".to_string(),
                warning: "Target unreachable".to_string(),
            }],
            not_analyzed: vec!["https://extra.example/".to_string()],
        }
    }

    #[test]
    fn test_comparison_marks_primary() {
        let text = render_comparison(&report());
        assert!(text.contains("https://mine.example/ *"));
        assert!(!text.contains("https://leader.example/ *"));
    }

    #[test]
    fn test_comparison_lists_skipped_and_overflow() {
        let text = render_comparison(&report());
        assert!(text.contains("https://down.example/"));
        assert!(text.contains("Not analyzed"));
        assert!(text.contains("https://extra.example/"));
    }

    #[test]
    fn test_comparison_is_deterministic() {
        assert_eq!(render_comparison(&report()), render_comparison(&report()));
    }
}
