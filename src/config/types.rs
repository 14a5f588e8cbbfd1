use serde::Deserialize;
use std::collections::BTreeMap;

/// Main configuration structure for Sitegauge
///
/// Every section has working defaults, so the engine runs without a config
/// file at all. The heuristic keyword tables are configuration rather than
/// hard-coded literals so the engine can be retargeted to another language
/// or locale by supplying a different table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AuditConfig {
    pub fetch: FetchConfig,
    pub crawl: CrawlConfig,
    pub keys: KeyConfig,
    pub heuristics: HeuristicsConfig,
}

/// HTTP fetch behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FetchConfig {
    /// User agent header sent with every request
    pub user_agent: String,

    /// Total per-request timeout in seconds
    pub timeout_secs: u64,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: format!(
                "Mozilla/5.0 (compatible; Sitegauge/{}; +https://github.com/sitegauge/sitegauge)",
                env!("CARGO_PKG_VERSION")
            ),
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// Site structure crawl bounds
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlConfig {
    /// Maximum number of unique pages collected per crawl
    pub max_pages: u32,

    /// Maximum link depth from the root page
    pub max_depth: u32,

    /// Maximum number of discovered internal links probed with HEAD
    /// requests for broken-link detection (0 disables the probe)
    pub link_check_cap: u32,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_pages: 20,
            max_depth: 3,
            link_check_cap: 10,
        }
    }
}

/// External service credentials
///
/// A missing key disables the corresponding analysis step; it never fails
/// the pipeline.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct KeyConfig {
    /// API key for the external performance metrics service
    pub pagespeed_api_key: Option<String>,

    /// API key for the external recommendation service
    pub llm_api_key: Option<String>,
}

/// Language/locale-specific keyword tables used by the analyzers
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct HeuristicsConfig {
    /// Words excluded from term-frequency and vocabulary analysis
    pub stop_words: Vec<String>,

    /// Anchor texts considered non-descriptive
    pub generic_anchors: Vec<String>,

    /// High-trust domains counted toward the authority ratio
    pub authority_domains: Vec<String>,

    /// Surface signals suggesting an e-commerce page
    pub ecommerce_signals: Vec<String>,

    /// Surface signals suggesting an article or blog post
    pub article_signals: Vec<String>,

    /// Surface signals suggesting a local business page
    pub local_business_signals: Vec<String>,

    /// Surface signals suggesting an organization/company page
    pub organization_signals: Vec<String>,

    /// Required properties per structured-data type, used for
    /// completeness percentages
    pub required_fields: BTreeMap<String, Vec<String>>,

    /// Recommended structured-data types per detected page category
    pub recommended_schemas: BTreeMap<String, Vec<String>>,
}

impl HeuristicsConfig {
    pub fn required_for(&self, schema_type: &str) -> Option<&[String]> {
        self.required_fields
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(schema_type))
            .map(|(_, fields)| fields.as_slice())
    }

    pub fn recommended_for(&self, category: &str) -> Vec<String> {
        self.recommended_schemas
            .get(category)
            .cloned()
            .unwrap_or_default()
    }
}

impl Default for HeuristicsConfig {
    fn default() -> Self {
        let to_vec = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        let mut required_fields = BTreeMap::new();
        required_fields.insert(
            "Article".to_string(),
            to_vec(&["headline", "author", "datePublished"]),
        );
        required_fields.insert(
            "Product".to_string(),
            to_vec(&["name", "description", "image", "offers"]),
        );
        required_fields.insert("Organization".to_string(), to_vec(&["name", "url", "logo"]));
        required_fields.insert(
            "LocalBusiness".to_string(),
            to_vec(&["name", "address", "telephone"]),
        );
        required_fields.insert("WebSite".to_string(), to_vec(&["name", "url"]));
        required_fields.insert("BreadcrumbList".to_string(), to_vec(&["itemListElement"]));
        required_fields.insert("FAQPage".to_string(), to_vec(&["mainEntity"]));
        required_fields.insert("Person".to_string(), to_vec(&["name"]));

        let mut recommended_schemas = BTreeMap::new();
        recommended_schemas.insert(
            "ecommerce".to_string(),
            to_vec(&["Product", "BreadcrumbList", "Organization", "WebSite"]),
        );
        recommended_schemas.insert(
            "article".to_string(),
            to_vec(&["Article", "Person", "BreadcrumbList", "WebSite"]),
        );
        recommended_schemas.insert(
            "local-business".to_string(),
            to_vec(&["LocalBusiness", "Organization", "WebSite"]),
        );
        recommended_schemas.insert(
            "organization".to_string(),
            to_vec(&["Organization", "WebSite"]),
        );
        recommended_schemas.insert("website".to_string(), to_vec(&["WebSite", "Organization"]));

        Self {
            stop_words: to_vec(&[
                "the", "and", "for", "are", "but", "not", "you", "all", "can", "had", "her",
                "was", "one", "our", "out", "this", "that", "with", "have", "from", "they",
                "will", "would", "there", "their", "what", "about", "which", "when", "your",
                "said", "each", "she", "how", "them", "than", "its", "were", "been", "has",
                "more", "also", "into", "only", "other", "some", "such",
            ]),
            generic_anchors: to_vec(&[
                "click here",
                "learn more",
                "read more",
                "find out more",
                "see more",
                "more info",
                "here",
                "link",
                "this page",
                "check it out",
            ]),
            authority_domains: to_vec(&[
                "wikipedia.org",
                "github.com",
                "mozilla.org",
                "w3.org",
                "google.com",
                "nytimes.com",
                "bbc.co.uk",
                "harvard.edu",
                "nature.com",
                "who.int",
                "gov.uk",
            ]),
            ecommerce_signals: to_vec(&[
                "add to cart",
                "add to basket",
                "checkout",
                "free shipping",
                "buy now",
                "in stock",
            ]),
            article_signals: to_vec(&[
                "posted on",
                "published",
                "written by",
                "min read",
                "continue reading",
            ]),
            local_business_signals: to_vec(&[
                "opening hours",
                "visit us",
                "get directions",
                "our location",
                "call us",
            ]),
            organization_signals: to_vec(&["about us", "our team", "our mission", "careers"]),
            required_fields,
            recommended_schemas,
        }
    }
}
