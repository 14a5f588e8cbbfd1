//! On-page fact extraction
//!
//! Collects the plain observable facts the composite aggregator and the
//! findings checklist consume: title, meta description, canonical link,
//! heading counts, word count, link counts, and image alt coverage.

use crate::analyze::text::visible_text;
use crate::url::AuditTarget;
use scraper::{Html, Selector};
use serde::Serialize;

/// Observable facts about one page
#[derive(Debug, Clone, Serialize)]
pub struct PageFacts {
    pub title: Option<String>,
    pub title_length: u32,
    pub meta_description: Option<String>,
    pub meta_description_length: u32,
    pub canonical_url: Option<String>,
    pub h1_count: u32,
    pub h2_count: u32,
    pub h3_count: u32,
    pub word_count: u32,
    pub internal_link_count: u32,
    pub external_link_count: u32,
    pub image_count: u32,
    pub images_missing_alt: u32,
}

/// Extracts the on-page facts from a parsed document
pub fn extract_facts(document: &Html, target: &AuditTarget) -> PageFacts {
    let title = extract_title(document);
    let meta_description = extract_meta(document, "description");
    let (internal_link_count, external_link_count) = count_links(document, target);
    let (image_count, images_missing_alt) = analyze_images(document);

    PageFacts {
        title_length: title.as_deref().map(text_len).unwrap_or(0),
        title,
        meta_description_length: meta_description.as_deref().map(text_len).unwrap_or(0),
        meta_description,
        canonical_url: extract_canonical(document),
        h1_count: count_tag(document, "h1"),
        h2_count: count_tag(document, "h2"),
        h3_count: count_tag(document, "h3"),
        word_count: visible_text(document).split_whitespace().count() as u32,
        internal_link_count,
        external_link_count,
        image_count,
        images_missing_alt,
    }
}

fn text_len(s: &str) -> u32 {
    s.chars().count() as u32
}

fn extract_title(document: &Html) -> Option<String> {
    let selector = Selector::parse("title").ok()?;
    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

fn extract_meta(document: &Html, name: &str) -> Option<String> {
    let selector = Selector::parse(&format!(r#"meta[name="{}"]"#, name)).ok()?;
    document
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn extract_canonical(document: &Html) -> Option<String> {
    let selector = Selector::parse(r#"link[rel="canonical"]"#).ok()?;
    document
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr("href"))
        .map(|s| s.to_string())
}

fn count_tag(document: &Html, tag: &str) -> u32 {
    match Selector::parse(tag) {
        Ok(selector) => document.select(&selector).count() as u32,
        Err(_) => 0,
    }
}

fn count_links(document: &Html, target: &AuditTarget) -> (u32, u32) {
    let mut internal = 0;
    let mut external = 0;

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                if let Ok(resolved) = target.url.join(href.trim()) {
                    if resolved.scheme() != "http" && resolved.scheme() != "https" {
                        continue;
                    }
                    let same_host = resolved
                        .host_str()
                        .map(|h| h.eq_ignore_ascii_case(&target.host))
                        .unwrap_or(false);
                    if same_host {
                        internal += 1;
                    } else {
                        external += 1;
                    }
                }
            }
        }
    }

    (internal, external)
}

fn analyze_images(document: &Html) -> (u32, u32) {
    let mut count = 0;
    let mut missing_alt = 0;

    if let Ok(selector) = Selector::parse("img") {
        for img in document.select(&selector) {
            count += 1;
            let alt_present = img
                .value()
                .attr("alt")
                .map(|alt| !alt.trim().is_empty())
                .unwrap_or(false);
            if !alt_present {
                missing_alt += 1;
            }
        }
    }

    (count, missing_alt)
}
