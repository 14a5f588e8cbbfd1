//! Structured-data auditing
//!
//! Parses embedded machine-readable metadata (JSON-LD script blocks and
//! inline microdata attributes), scores completeness against per-type
//! required fields, classifies the page's content type from surface
//! signals, and recommends the schema types the page is missing.

use crate::analyze::text::visible_text;
use crate::config::HeuristicsConfig;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use serde::Serialize;
use serde_json::Value;

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\+?\d[\d\s().-]{7,}\d").expect("phone pattern"));

static PRICE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[$€£]\s*\d+(?:[.,]\d{2})?").expect("price pattern"));

/// How a structured-data block was embedded in the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SchemaMechanism {
    JsonLd,
    Microdata,
}

/// One structured-data entity found on the page
#[derive(Debug, Clone, Serialize)]
pub struct SchemaEntry {
    pub schema_type: String,
    pub mechanism: SchemaMechanism,

    /// Completeness against the required-field table, 0-100. Microdata
    /// entries have no fixed denominator, so this holds the raw property
    /// count instead and is only used for display.
    pub completeness: f64,
}

/// Detected page category, used to look up the recommended schema set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageCategory {
    Ecommerce,
    Article,
    LocalBusiness,
    Organization,
    Website,
}

impl PageCategory {
    pub fn key(&self) -> &'static str {
        match self {
            PageCategory::Ecommerce => "ecommerce",
            PageCategory::Article => "article",
            PageCategory::LocalBusiness => "local-business",
            PageCategory::Organization => "organization",
            PageCategory::Website => "website",
        }
    }
}

/// Structured-data audit result for one page
#[derive(Debug, Clone, Serialize)]
pub struct SchemaReport {
    /// JSON-LD script blocks found, including unparseable ones
    pub json_ld_blocks: u32,

    /// Elements carrying `itemscope`
    pub microdata_items: u32,

    pub schemas: Vec<SchemaEntry>,

    /// Parse failures, keyed by block position
    pub parse_errors: Vec<String>,

    pub detected_category: PageCategory,

    /// Schema types expected for the detected category
    pub recommended: Vec<String>,

    /// Recommended types with no matching schema on the page
    pub missing_recommended: Vec<String>,

    /// Concrete markup opportunities spotted on the page
    pub opportunities: Vec<String>,

    pub coverage_score: u8,
}

/// Audits the structured data of a page
pub fn audit_schema(document: &Html, heuristics: &HeuristicsConfig) -> SchemaReport {
    let blocks = json_ld_blocks(document);
    let json_ld_count = blocks.len() as u32;

    let mut schemas = Vec::new();
    let mut parse_errors = Vec::new();

    for (index, block) in blocks.iter().enumerate() {
        match serde_json::from_str::<Value>(block) {
            Ok(value) => {
                for entity in entities(&value) {
                    if let Some(schema_type) = entity_type(entity) {
                        let completeness = completeness(entity, &schema_type, heuristics);
                        schemas.push(SchemaEntry {
                            schema_type,
                            mechanism: SchemaMechanism::JsonLd,
                            completeness,
                        });
                    }
                }
            }
            Err(e) => parse_errors.push(format!("block {}: {}", index + 1, e)),
        }
    }

    let microdata = microdata_entries(document);
    let microdata_items = microdata.len() as u32;
    schemas.extend(microdata);

    let text = visible_text(document).to_lowercase();
    let detected_category = detect_category(document, &text, heuristics);
    let recommended = heuristics.recommended_for(detected_category.key());

    let missing_recommended: Vec<String> = recommended
        .iter()
        .filter(|r| !has_schema_type(&schemas, r.as_str()))
        .cloned()
        .collect();

    let opportunities = detect_opportunities(document, &text, &schemas);

    let coverage_score = coverage_score(&schemas, &recommended, &missing_recommended);

    SchemaReport {
        json_ld_blocks: json_ld_count,
        microdata_items,
        schemas,
        parse_errors,
        detected_category,
        recommended,
        missing_recommended,
        opportunities,
        coverage_score,
    }
}

/// Collects the text of every JSON-LD script block
fn json_ld_blocks(document: &Html) -> Vec<String> {
    let mut blocks = Vec::new();
    if let Ok(selector) = Selector::parse("script") {
        for element in document.select(&selector) {
            let script_type = element
                .value()
                .attr("type")
                .map(|t| t.trim().to_ascii_lowercase())
                .unwrap_or_default();
            // catches variants like "application/ld+json; charset=utf-8"
            if script_type.contains("ld+json") {
                let text = element.text().collect::<String>().trim().to_string();
                if !text.is_empty() {
                    blocks.push(text);
                }
            }
        }
    }
    blocks
}

/// Flattens a parsed JSON-LD value into its entity objects
///
/// Handles a top-level object, a top-level array, and the `@graph` wrapper.
fn entities(value: &Value) -> Vec<&serde_json::Map<String, Value>> {
    match value {
        Value::Object(map) => match map.get("@graph") {
            Some(Value::Array(graph)) => graph.iter().filter_map(Value::as_object).collect(),
            _ => vec![map],
        },
        Value::Array(items) => items.iter().filter_map(Value::as_object).collect(),
        _ => Vec::new(),
    }
}

fn entity_type(entity: &serde_json::Map<String, Value>) -> Option<String> {
    match entity.get("@type") {
        Some(Value::String(t)) => Some(t.clone()),
        Some(Value::Array(types)) => types.first().and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}

/// Completeness percentage against the required-field table
///
/// Unknown types default to a neutral 50%.
fn completeness(
    entity: &serde_json::Map<String, Value>,
    schema_type: &str,
    heuristics: &HeuristicsConfig,
) -> f64 {
    match heuristics.required_for(schema_type) {
        Some(required) if !required.is_empty() => {
            let present = required
                .iter()
                .filter(|field| entity.contains_key(field.as_str()))
                .count();
            present as f64 / required.len() as f64 * 100.0
        }
        _ => 50.0,
    }
}

/// Collects inline microdata items with their property counts
fn microdata_entries(document: &Html) -> Vec<SchemaEntry> {
    let mut entries = Vec::new();

    let scope_selector = match Selector::parse("[itemscope]") {
        Ok(s) => s,
        Err(_) => return entries,
    };
    let prop_selector = match Selector::parse("[itemprop]") {
        Ok(s) => s,
        Err(_) => return entries,
    };

    for element in document.select(&scope_selector) {
        let schema_type = element
            .value()
            .attr("itemtype")
            .and_then(|t| t.rsplit('/').next())
            .unwrap_or("Thing")
            .to_string();
        let property_count = element.select(&prop_selector).count();

        entries.push(SchemaEntry {
            schema_type,
            mechanism: SchemaMechanism::Microdata,
            completeness: property_count as f64,
        });
    }

    entries
}

/// Classifies the page's content type from surface signals
fn detect_category(document: &Html, text: &str, heuristics: &HeuristicsConfig) -> PageCategory {
    let hits = |signals: &[String]| signals.iter().filter(|s| text.contains(s.as_str())).count();

    let mut ecommerce = hits(&heuristics.ecommerce_signals);
    if PRICE_RE.is_match(text) {
        ecommerce += 1;
    }

    let mut article = hits(&heuristics.article_signals);
    if has_element(document, "article") {
        article += 1;
    }
    if has_element(document, "time") {
        article += 1;
    }

    let mut local = hits(&heuristics.local_business_signals);
    if PHONE_RE.is_match(text) {
        local += 1;
    }

    let organization = hits(&heuristics.organization_signals);

    if ecommerce >= 2 {
        PageCategory::Ecommerce
    } else if article >= 2 {
        PageCategory::Article
    } else if local >= 2 {
        PageCategory::LocalBusiness
    } else if organization >= 2 {
        PageCategory::Organization
    } else {
        PageCategory::Website
    }
}

/// Flags visible page features with no matching structured-data markup
fn detect_opportunities(document: &Html, text: &str, schemas: &[SchemaEntry]) -> Vec<String> {
    let mut opportunities = Vec::new();

    let has_breadcrumb_nav = [
        ".breadcrumb",
        ".breadcrumbs",
        r#"nav[aria-label="breadcrumb"]"#,
        r#"nav[aria-label="Breadcrumb"]"#,
    ]
    .iter()
    .any(|css| matches_selector(document, css));
    if has_breadcrumb_nav && !has_schema_type(schemas, "BreadcrumbList") {
        opportunities
            .push("breadcrumb navigation is visible but has no BreadcrumbList markup".to_string());
    }

    if PHONE_RE.is_match(text)
        && !has_schema_type(schemas, "Organization")
        && !has_schema_type(schemas, "LocalBusiness")
    {
        opportunities.push(
            "a phone number is visible but no Organization or LocalBusiness markup exists"
                .to_string(),
        );
    }

    if PRICE_RE.is_match(text) && !has_schema_type(schemas, "Product") {
        opportunities.push("price markers are visible but no Product markup exists".to_string());
    }

    let has_date_markers = has_element(document, "time") || text.contains("published");
    if has_date_markers && !has_schema_type(schemas, "Article") {
        opportunities
            .push("date or byline markers are visible but no Article markup exists".to_string());
    }

    opportunities
}

fn has_schema_type(schemas: &[SchemaEntry], wanted: &str) -> bool {
    schemas
        .iter()
        .any(|s| s.schema_type.eq_ignore_ascii_case(wanted))
}

fn has_element(document: &Html, tag: &str) -> bool {
    matches_selector(document, tag)
}

fn matches_selector(document: &Html, css: &str) -> bool {
    match Selector::parse(css) {
        Ok(selector) => document.select(&selector).next().is_some(),
        Err(_) => false,
    }
}

/// Coverage score: schema count (up to 30), recommended-set coverage (up
/// to 30), and mean JSON-LD completeness (up to 10), clamped to [0, 100]
fn coverage_score(schemas: &[SchemaEntry], recommended: &[String], missing: &[String]) -> u8 {
    let mut score = 0.0f64;

    score += (schemas.len() as f64 * 10.0).min(30.0);

    if !recommended.is_empty() {
        let present = recommended.len() - missing.len();
        score += present as f64 / recommended.len() as f64 * 30.0;
    }

    let json_ld: Vec<&SchemaEntry> = schemas
        .iter()
        .filter(|s| s.mechanism == SchemaMechanism::JsonLd)
        .collect();
    if !json_ld.is_empty() {
        let mean: f64 =
            json_ld.iter().map(|s| s.completeness).sum::<f64>() / json_ld.len() as f64;
        score += mean / 100.0 * 10.0;
    }

    score.clamp(0.0, 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_for(html: &str) -> SchemaReport {
        let document = Html::parse_document(html);
        audit_schema(&document, &HeuristicsConfig::default())
    }

    #[test]
    fn test_complete_article_schema() {
        let report = report_for(
            r#"<html><body>
                <script type="application/ld+json">
                {"@type": "Article", "headline": "H", "author": "A", "datePublished": "2024-01-01"}
                </script>
            </body></html>"#,
        );

        assert_eq!(report.json_ld_blocks, 1);
        assert_eq!(report.schemas.len(), 1);
        assert_eq!(report.schemas[0].schema_type, "Article");
        assert!((report.schemas[0].completeness - 100.0).abs() < 1e-9);
        assert!(report.parse_errors.is_empty());
    }

    #[test]
    fn test_partial_completeness() {
        let report = report_for(
            r#"<html><body>
                <script type="application/ld+json">
                {"@type": "Article", "headline": "Only the headline"}
                </script>
            </body></html>"#,
        );

        // 1 of 3 required Article fields
        assert!((report.schemas[0].completeness - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_type_gets_neutral_completeness() {
        let report = report_for(
            r#"<html><body>
                <script type="application/ld+json">
                {"@type": "VideoObject", "name": "Clip"}
                </script>
            </body></html>"#,
        );

        assert!((report.schemas[0].completeness - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_parse_error_recorded_without_aborting() {
        let report = report_for(
            r#"<html><body>
                <script type="application/ld+json">{not valid json</script>
                <script type="application/ld+json">{"@type": "WebSite", "name": "S", "url": "https://s.example"}</script>
            </body></html>"#,
        );

        assert_eq!(report.json_ld_blocks, 2);
        assert_eq!(report.parse_errors.len(), 1);
        assert!(report.parse_errors[0].starts_with("block 1:"));
        assert_eq!(report.schemas.len(), 1);
        assert_eq!(report.schemas[0].schema_type, "WebSite");
    }

    #[test]
    fn test_graph_wrapper_flattened() {
        let report = report_for(
            r#"<html><body>
                <script type="application/ld+json">
                {"@context": "https://schema.org", "@graph": [
                    {"@type": "Organization", "name": "Acme", "url": "https://acme.example", "logo": "l.png"},
                    {"@type": "WebSite", "name": "Acme", "url": "https://acme.example"}
                ]}
                </script>
            </body></html>"#,
        );

        assert_eq!(report.schemas.len(), 2);
    }

    #[test]
    fn test_type_array_uses_first_entry() {
        let report = report_for(
            r#"<html><body>
                <script type="application/ld+json">
                {"@type": ["Organization", "Brand"], "name": "Acme", "url": "u", "logo": "l"}
                </script>
            </body></html>"#,
        );

        assert_eq!(report.schemas[0].schema_type, "Organization");
    }

    #[test]
    fn test_microdata_collected_with_property_counts() {
        let report = report_for(
            r#"<html><body>
                <div itemscope itemtype="https://schema.org/Person">
                    <span itemprop="name">Jo</span>
                    <span itemprop="jobTitle">Engineer</span>
                </div>
            </body></html>"#,
        );

        assert_eq!(report.microdata_items, 1);
        let entry = report
            .schemas
            .iter()
            .find(|s| s.mechanism == SchemaMechanism::Microdata)
            .unwrap();
        assert_eq!(entry.schema_type, "Person");
        assert!((entry.completeness - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_ecommerce_category_detection() {
        let report = report_for(
            r#"<html><body>
                <p>Add to cart today. Free shipping on orders over $50.00.</p>
            </body></html>"#,
        );
        assert_eq!(report.detected_category, PageCategory::Ecommerce);
        assert!(report.recommended.contains(&"Product".to_string()));
    }

    #[test]
    fn test_generic_page_falls_back_to_website() {
        let report = report_for("<html><body><p>Hello world content.</p></body></html>");
        assert_eq!(report.detected_category, PageCategory::Website);
    }

    #[test]
    fn test_price_without_product_schema_is_an_opportunity() {
        let report = report_for(
            r#"<html><body><p>Only $19.99 while stocks last.</p></body></html>"#,
        );
        assert!(report
            .opportunities
            .iter()
            .any(|o| o.contains("Product")));
    }

    #[test]
    fn test_breadcrumb_without_markup_is_an_opportunity() {
        let report = report_for(
            r#"<html><body><nav class="breadcrumbs"><a href="/">Home</a></nav></body></html>"#,
        );
        assert!(report
            .opportunities
            .iter()
            .any(|o| o.contains("BreadcrumbList")));
    }

    #[test]
    fn test_coverage_score_bounds() {
        let empty = report_for("<html><body></body></html>");
        assert!(empty.coverage_score <= 100);

        let rich = report_for(
            r#"<html><body>
                <script type="application/ld+json">
                {"@graph": [
                    {"@type": "WebSite", "name": "S", "url": "u"},
                    {"@type": "Organization", "name": "O", "url": "u", "logo": "l"}
                ]}
                </script>
            </body></html>"#,
        );
        assert!(rich.coverage_score > empty.coverage_score);
        assert!(rich.coverage_score <= 100);
    }

    #[test]
    fn test_missing_recommended_listed() {
        let report = report_for(
            r#"<html><body>
                <script type="application/ld+json">{"@type": "WebSite", "name": "S", "url": "u"}</script>
            </body></html>"#,
        );

        assert!(!report.missing_recommended.contains(&"WebSite".to_string()));
        assert!(report.missing_recommended.contains(&"Organization".to_string()));
    }
}
