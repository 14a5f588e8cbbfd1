//! Site structure discovery
//!
//! A bounded breadth-first crawl over same-host links, producing a
//! [`SiteGraph`] grouped by link depth, plus a HEAD-request probe for
//! broken internal links.

mod crawler;
mod graph;
mod link_check;

pub use crawler::{crawl_from_root, crawl_site, extract_site_links, DiscoveredLink};
pub use graph::{SiteGraph, SiteNode};
pub use link_check::{check_links, BrokenLink, LinkCheck};
