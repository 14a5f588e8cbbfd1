//! Prioritized findings checklist
//!
//! Converts the analyzer outputs into a flat list of actionable findings,
//! each carrying a priority from P0 (critical) to P3 (nice-to-have).

use crate::analyze::{ContentMetrics, LinkProfile, PageFacts, SchemaReport};
use crate::crawl::LinkCheck;
use serde::Serialize;

/// Finding priority, critical first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Priority {
    P0,
    P1,
    P2,
    P3,
}

impl Priority {
    pub fn label(&self) -> &'static str {
        match self {
            Priority::P0 => "P0",
            Priority::P1 => "P1",
            Priority::P2 => "P2",
            Priority::P3 => "P3",
        }
    }
}

/// One actionable audit finding
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub priority: Priority,
    pub title: String,
    pub detail: String,
    pub recommendation: String,
}

impl Finding {
    fn new(priority: Priority, title: &str, detail: String, recommendation: &str) -> Self {
        Self {
            priority,
            title: title.to_string(),
            detail,
            recommendation: recommendation.to_string(),
        }
    }
}

/// Derives the findings checklist from one page's analyzer outputs
///
/// The returned list is sorted by priority; findings of equal priority
/// keep derivation order.
pub fn derive_findings(
    facts: &PageFacts,
    content: &ContentMetrics,
    links: &LinkProfile,
    schema: &SchemaReport,
    link_check: Option<&LinkCheck>,
) -> Vec<Finding> {
    let mut findings = Vec::new();

    match &facts.title {
        None => findings.push(Finding::new(
            Priority::P0,
            "Missing title tag",
            "The page has no title tag".to_string(),
            "Add a unique, descriptive title of 30-60 characters",
        )),
        Some(_) if facts.title_length < 30 => findings.push(Finding::new(
            Priority::P1,
            "Title too short",
            format!("The title is only {} characters", facts.title_length),
            "Expand the title toward 30-60 characters with the main topic up front",
        )),
        Some(_) if facts.title_length > 60 => findings.push(Finding::new(
            Priority::P2,
            "Title too long",
            format!("The title is {} characters", facts.title_length),
            "Shorten the title so it displays fully in search results",
        )),
        _ => {}
    }

    match &facts.meta_description {
        None => findings.push(Finding::new(
            Priority::P1,
            "Missing meta description",
            "The page has no meta description".to_string(),
            "Add a compelling meta description of 140-160 characters",
        )),
        Some(_) if facts.meta_description_length < 120 => findings.push(Finding::new(
            Priority::P2,
            "Meta description too short",
            format!(
                "The meta description is only {} characters",
                facts.meta_description_length
            ),
            "Expand the description toward 140-160 characters",
        )),
        Some(_) if facts.meta_description_length > 180 => findings.push(Finding::new(
            Priority::P3,
            "Meta description too long",
            format!(
                "The meta description is {} characters",
                facts.meta_description_length
            ),
            "Shorten the description to prevent truncation in search results",
        )),
        _ => {}
    }

    if facts.h1_count == 0 {
        findings.push(Finding::new(
            Priority::P0,
            "Missing H1 heading",
            "The page has no H1 heading".to_string(),
            "Add exactly one H1 naming the page's main topic",
        ));
    } else if facts.h1_count > 1 {
        findings.push(Finding::new(
            Priority::P1,
            "Multiple H1 headings",
            format!("The page has {} H1 headings", facts.h1_count),
            "Keep a single H1 and demote the others to H2",
        ));
    }

    for issue in &content.hierarchy_issues {
        if issue.starts_with("skipped heading level") {
            findings.push(Finding::new(
                Priority::P2,
                "Broken heading hierarchy",
                issue.clone(),
                "Step heading levels down one at a time",
            ));
        }
    }

    if facts.word_count < 300 {
        findings.push(Finding::new(
            Priority::P1,
            "Thin content",
            format!("The page has only {} words", facts.word_count),
            "Expand the page toward 500+ words of substantive content",
        ));
    }

    if content.duplication_ratio > 0.3 {
        findings.push(Finding::new(
            Priority::P2,
            "Repetitive content",
            format!(
                "{:.0}% of sentences are repeated",
                content.duplication_ratio * 100.0
            ),
            "Rewrite or remove duplicated passages",
        ));
    }

    if facts.images_missing_alt > 0 {
        findings.push(Finding::new(
            Priority::P2,
            "Images missing alt text",
            format!(
                "{} of {} images have no alt attribute",
                facts.images_missing_alt, facts.image_count
            ),
            "Add descriptive alt text for accessibility and indexing",
        ));
    }

    if links.total_links > 0 {
        let generic_ratio = links.anchors.generic as f64 / links.total_links as f64;
        if generic_ratio > 0.6 {
            findings.push(Finding::new(
                Priority::P2,
                "Generic anchor text overused",
                format!("{:.0}% of anchors use generic text", generic_ratio * 100.0),
                "Replace generic anchors with descriptive link text",
            ));
        }

        let empty_ratio = links.anchors.empty as f64 / links.total_links as f64;
        if empty_ratio > 0.25 {
            findings.push(Finding::new(
                Priority::P2,
                "Empty anchor text",
                format!("{:.0}% of anchors have no text", empty_ratio * 100.0),
                "Give every link visible, descriptive text",
            ));
        }
    }

    if facts.internal_link_count == 0 {
        findings.push(Finding::new(
            Priority::P2,
            "No internal links",
            "The page links to no other page on the site".to_string(),
            "Add relevant internal links to strengthen site structure",
        ));
    }

    if facts.canonical_url.is_none() {
        findings.push(Finding::new(
            Priority::P3,
            "Missing canonical tag",
            "The page declares no canonical URL".to_string(),
            "Add a canonical link to guard against duplicate-content issues",
        ));
    }

    if let Some(check) = link_check {
        if !check.broken.is_empty() {
            findings.push(Finding::new(
                Priority::P0,
                "Broken internal links",
                format!(
                    "{} of {} probed internal links failed",
                    check.broken.len(),
                    check.checked
                ),
                "Fix or remove the broken links",
            ));
        }
    }

    for missing in &schema.missing_recommended {
        findings.push(Finding::new(
            Priority::P3,
            "Missing recommended structured data",
            format!("No {} markup was found", missing),
            "Add the markup so machine consumers can interpret the page",
        ));
    }

    findings.sort_by_key(|f| f.priority);
    findings
}
