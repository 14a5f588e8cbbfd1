//! Composite score aggregation
//!
//! A pure function of the on-page facts, the structured-data report, and an
//! optionally supplied external performance score. Each category has a
//! fixed ceiling; the ceilings sum to 100 and the rounded total is always
//! clamped into [0, 100]. No side effects, no network access.

use crate::analyze::{PageFacts, SchemaReport};
use serde::Serialize;

/// Partial credit substituted when no performance score is available, so
/// keyed and keyless runs stay comparable
const PERFORMANCE_FALLBACK: f64 = 12.5;

/// One category's contribution to the composite score
#[derive(Debug, Clone, Serialize)]
pub struct CategoryScore {
    pub category: &'static str,
    pub points: f64,
    pub ceiling: f64,
}

/// The aggregate 0-100 score with its per-category breakdown
#[derive(Debug, Clone, Serialize)]
pub struct CompositeScore {
    pub breakdown: Vec<CategoryScore>,
    pub total: u8,
}

impl CompositeScore {
    /// Qualitative optimization band for the total
    pub fn band(&self) -> &'static str {
        match self.total {
            80..=100 => "well-optimized",
            60..=79 => "moderately optimized",
            40..=59 => "needs work",
            _ => "poorly optimized",
        }
    }
}

/// Computes the composite score for one page
///
/// `performance` is the external mobile performance score (0-100) when the
/// metrics API was available; `None` substitutes flat partial credit.
pub fn composite_score(
    facts: &PageFacts,
    performance: Option<f64>,
    schema: &SchemaReport,
) -> CompositeScore {
    let breakdown = vec![
        CategoryScore {
            category: "title",
            points: title_points(facts),
            ceiling: 15.0,
        },
        CategoryScore {
            category: "headings",
            points: heading_points(facts),
            ceiling: 10.0,
        },
        CategoryScore {
            category: "content-length",
            points: content_length_points(facts),
            ceiling: 25.0,
        },
        CategoryScore {
            category: "performance",
            points: performance_points(performance),
            ceiling: 25.0,
        },
        CategoryScore {
            category: "meta-description",
            points: meta_points(facts),
            ceiling: 10.0,
        },
        CategoryScore {
            category: "internal-links",
            points: internal_link_points(facts),
            ceiling: 5.0,
        },
        CategoryScore {
            category: "image-alt",
            points: image_alt_points(facts),
            ceiling: 5.0,
        },
        CategoryScore {
            category: "structured-data",
            points: schema_points(schema),
            ceiling: 5.0,
        },
    ];

    let total = breakdown
        .iter()
        .map(|c| c.points)
        .sum::<f64>()
        .round()
        .clamp(0.0, 100.0) as u8;

    CompositeScore { breakdown, total }
}

fn title_points(facts: &PageFacts) -> f64 {
    match facts.title {
        Some(_) if (30..=60).contains(&facts.title_length) => 15.0,
        Some(_) => 7.0,
        None => 0.0,
    }
}

fn heading_points(facts: &PageFacts) -> f64 {
    match facts.h1_count {
        1 => 10.0,
        0 => 0.0,
        _ => 5.0,
    }
}

fn content_length_points(facts: &PageFacts) -> f64 {
    match facts.word_count {
        0..=149 => 5.0,
        150..=299 => 10.0,
        300..=499 => 15.0,
        500..=999 => 20.0,
        _ => 25.0,
    }
}

fn performance_points(performance: Option<f64>) -> f64 {
    match performance {
        Some(score) => score.clamp(0.0, 100.0) / 100.0 * 25.0,
        None => PERFORMANCE_FALLBACK,
    }
}

fn meta_points(facts: &PageFacts) -> f64 {
    match facts.meta_description {
        Some(_) if (140..=160).contains(&facts.meta_description_length) => 10.0,
        Some(_) if (120..=180).contains(&facts.meta_description_length) => 6.0,
        Some(_) => 3.0,
        None => 0.0,
    }
}

fn internal_link_points(facts: &PageFacts) -> f64 {
    match facts.internal_link_count {
        0 => 0.0,
        1..=4 => 2.0,
        _ => 5.0,
    }
}

fn image_alt_points(facts: &PageFacts) -> f64 {
    if facts.image_count == 0 {
        return 2.0;
    }
    let coverage =
        (facts.image_count - facts.images_missing_alt) as f64 / facts.image_count as f64;
    if coverage >= 0.9 {
        5.0
    } else if coverage >= 0.5 {
        3.0
    } else {
        1.0
    }
}

fn schema_points(schema: &SchemaReport) -> f64 {
    if schema.schemas.is_empty() {
        0.0
    } else {
        5.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::{audit_schema, PageCategory, SchemaEntry, SchemaMechanism};
    use crate::config::HeuristicsConfig;
    use scraper::Html;

    fn facts(
        title_length: u32,
        h1_count: u32,
        word_count: u32,
        meta_length: u32,
        internal_links: u32,
        images: (u32, u32),
    ) -> PageFacts {
        PageFacts {
            title: (title_length > 0).then(|| "t".repeat(title_length as usize)),
            title_length,
            meta_description: (meta_length > 0).then(|| "m".repeat(meta_length as usize)),
            meta_description_length: meta_length,
            canonical_url: None,
            h1_count,
            h2_count: 0,
            h3_count: 0,
            word_count,
            internal_link_count: internal_links,
            external_link_count: 0,
            image_count: images.0,
            images_missing_alt: images.1,
        }
    }

    fn schema_with(entries: Vec<SchemaEntry>) -> SchemaReport {
        SchemaReport {
            json_ld_blocks: entries.len() as u32,
            microdata_items: 0,
            schemas: entries,
            parse_errors: vec![],
            detected_category: PageCategory::Website,
            recommended: vec![],
            missing_recommended: vec![],
            opportunities: vec![],
            coverage_score: 0,
        }
    }

    fn article_entry() -> SchemaEntry {
        SchemaEntry {
            schema_type: "Article".to_string(),
            mechanism: SchemaMechanism::JsonLd,
            completeness: 100.0,
        }
    }

    #[test]
    fn test_well_optimized_page_totals_91() {
        // Title 45 chars, one H1, 600 words, meta 150 chars, 8 internal
        // links, 10 images all with alt, an Article schema, mobile
        // performance 85: 15 + 10 + 20 + 21.25 + 10 + 5 + 5 + 5 = 91.25
        let facts = facts(45, 1, 600, 150, 8, (10, 0));
        let schema = schema_with(vec![article_entry()]);

        let score = composite_score(&facts, Some(85.0), &schema);

        assert_eq!(score.total, 91);
        assert_eq!(score.band(), "well-optimized");
    }

    #[test]
    fn test_missing_performance_uses_partial_credit() {
        let facts = facts(45, 1, 600, 150, 8, (10, 0));
        let schema = schema_with(vec![article_entry()]);

        let score = composite_score(&facts, None, &schema);

        // 15 + 10 + 20 + 12.5 + 10 + 5 + 5 + 5 = 82.5
        assert_eq!(score.total, 83);
    }

    #[test]
    fn test_empty_page_scores_low_but_valid() {
        let facts = facts(0, 0, 0, 0, 0, (0, 0));
        let schema = schema_with(vec![]);

        let score = composite_score(&facts, None, &schema);

        // content floor 5 + performance fallback 12.5 + image neutral 2
        assert_eq!(score.total, 20);
        assert_eq!(score.band(), "poorly optimized");
    }

    #[test]
    fn test_total_never_exceeds_100() {
        let facts = facts(45, 1, 2000, 150, 50, (10, 0));
        let schema = schema_with(vec![article_entry()]);

        let score = composite_score(&facts, Some(100.0), &schema);

        assert!(score.total <= 100);
        // All ceilings hit: 15 + 10 + 25 + 25 + 10 + 5 + 5 + 5
        assert_eq!(score.total, 100);
    }

    #[test]
    fn test_every_category_capped_and_non_negative() {
        let facts = facts(8, 3, 250, 200, 2, (4, 3));
        let schema = schema_with(vec![]);

        let score = composite_score(&facts, Some(40.0), &schema);

        for category in &score.breakdown {
            assert!(category.points >= 0.0, "{} went negative", category.category);
            assert!(
                category.points <= category.ceiling,
                "{} exceeded its ceiling",
                category.category
            );
        }
        let ceilings: f64 = score.breakdown.iter().map(|c| c.ceiling).sum();
        assert!((ceilings - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_deterministic_for_fixed_inputs() {
        let document = Html::parse_document(
            r#"<html><body><script type="application/ld+json">{"@type":"WebSite","name":"n","url":"u"}</script></body></html>"#,
        );
        let schema = audit_schema(&document, &HeuristicsConfig::default());
        let facts = facts(40, 1, 400, 150, 10, (2, 0));

        let a = composite_score(&facts, Some(70.0), &schema);
        let b = composite_score(&facts, Some(70.0), &schema);

        assert_eq!(a.total, b.total);
    }
}
