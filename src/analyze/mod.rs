//! Page analyzers
//!
//! All analysis here is synchronous, CPU-only, and side-effect-free: each
//! analyzer reads a parsed page and returns an immutable metrics object.
//!
//! # Components
//!
//! - `facts`: plain on-page facts (title, meta, headings, links, images)
//! - `content`: readability, hierarchy, vocabulary, quality score
//! - `links`: internal/external and anchor-text quality, link score
//! - `schema`: structured-data completeness and coverage score
//! - `text`: shared tokenization helpers

pub mod content;
pub mod facts;
pub mod links;
pub mod schema;
pub mod text;

pub use content::{
    analyze_content, ContentMetrics, HeadingCounts, Readability, ReadabilityBand, TermCount,
};
pub use facts::{extract_facts, PageFacts};
pub use links::{analyze_links, AnchorCounts, DomainCount, LinkProfile};
pub use schema::{audit_schema, PageCategory, SchemaEntry, SchemaMechanism, SchemaReport};
