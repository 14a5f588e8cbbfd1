//! Content quality analysis
//!
//! Derives readability, heading-hierarchy validity, vocabulary richness,
//! duplication, and an aggregate 0-100 content quality score from a page's
//! text and markup structure. Metrics are computed once per page and never
//! mutated afterward.

use crate::analyze::text::{
    count_syllables, filter_stop_words, flesch_score, split_sentences, tokenize_words,
    visible_text,
};
use crate::config::HeuristicsConfig;
use scraper::{Html, Selector};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Minimum extracted-text length for readability to be meaningful
const MIN_READABLE_CHARS: usize = 50;

/// Number of entries kept in the term-frequency table
const TOP_TERM_COUNT: usize = 10;

/// Qualitative readability band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReadabilityBand {
    VeryEasy,
    Easy,
    Medium,
    Difficult,
}

impl ReadabilityBand {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            ReadabilityBand::VeryEasy
        } else if score >= 65.0 {
            ReadabilityBand::Easy
        } else if score >= 50.0 {
            ReadabilityBand::Medium
        } else {
            ReadabilityBand::Difficult
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReadabilityBand::VeryEasy => "very easy",
            ReadabilityBand::Easy => "easy",
            ReadabilityBand::Medium => "medium",
            ReadabilityBand::Difficult => "difficult",
        }
    }
}

/// Readability result, or an explicit not-applicable marker for pages with
/// too little text to score meaningfully
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum Readability {
    Scored { score: f64, band: ReadabilityBand },
    NotApplicable,
}

impl Readability {
    pub fn band_label(&self) -> &'static str {
        match self {
            Readability::Scored { band, .. } => band.label(),
            Readability::NotApplicable => "n/a",
        }
    }
}

/// A term-frequency table entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermCount {
    pub term: String,
    pub count: u32,
}

/// Heading tag counts per level
#[derive(Debug, Clone, Default, Serialize)]
pub struct HeadingCounts {
    pub h1: u32,
    pub h2: u32,
    pub h3: u32,
    pub h4: u32,
    pub h5: u32,
    pub h6: u32,
}

/// Content quality metrics for one page
#[derive(Debug, Clone, Serialize)]
pub struct ContentMetrics {
    pub word_count: u32,
    pub sentence_count: u32,
    pub paragraph_count: u32,
    pub headings: HeadingCounts,
    pub hierarchy_issues: Vec<String>,
    pub has_proper_hierarchy: bool,
    pub top_terms: Vec<TermCount>,
    pub vocabulary_richness: f64,
    pub readability: Readability,
    pub duplication_ratio: f64,
    pub quality_score: u8,
}

/// Analyzes a page's content quality
pub fn analyze_content(document: &Html, heuristics: &HeuristicsConfig) -> ContentMetrics {
    let text = visible_text(document);

    let sentences = split_sentences(&text);
    let words = tokenize_words(&text);
    let word_count = words.len() as u32;
    let sentence_count = sentences.len() as u32;
    let paragraph_count = count_paragraphs(document);

    let heading_levels = heading_sequence(document);
    let headings = heading_counts(&heading_levels);
    let (hierarchy_issues, has_proper_hierarchy) =
        validate_hierarchy(&heading_levels, word_count);

    let filtered = filter_stop_words(&words, &heuristics.stop_words);
    let vocabulary_richness = if filtered.is_empty() {
        0.0
    } else {
        let unique: HashSet<&String> = filtered.iter().collect();
        unique.len() as f64 / filtered.len() as f64
    };
    let top_terms = term_frequencies(&filtered);

    let readability = if text.chars().count() < MIN_READABLE_CHARS
        || word_count == 0
        || sentence_count == 0
    {
        Readability::NotApplicable
    } else {
        let syllables: u32 = words.iter().map(|w| count_syllables(w)).sum();
        let score = flesch_score(word_count, sentence_count, syllables);
        Readability::Scored {
            score,
            band: ReadabilityBand::from_score(score),
        }
    };

    let duplication_ratio = duplication(&sentences);

    let quality_score = quality_score(
        word_count,
        &readability,
        &headings,
        paragraph_count,
        vocabulary_richness,
        duplication_ratio,
    );

    ContentMetrics {
        word_count,
        sentence_count,
        paragraph_count,
        headings,
        hierarchy_issues,
        has_proper_hierarchy,
        top_terms,
        vocabulary_richness,
        readability,
        duplication_ratio,
        quality_score,
    }
}

/// Heading levels in document order (1 for `<h1>` .. 6 for `<h6>`)
fn heading_sequence(document: &Html) -> Vec<u8> {
    let mut sequence = Vec::new();
    if let Ok(selector) = Selector::parse("h1, h2, h3, h4, h5, h6") {
        for element in document.select(&selector) {
            if let Some(level) = element.value().name().strip_prefix('h') {
                if let Ok(level) = level.parse::<u8>() {
                    sequence.push(level);
                }
            }
        }
    }
    sequence
}

fn heading_counts(sequence: &[u8]) -> HeadingCounts {
    let mut counts = HeadingCounts::default();
    for level in sequence {
        match level {
            1 => counts.h1 += 1,
            2 => counts.h2 += 1,
            3 => counts.h3 += 1,
            4 => counts.h4 += 1,
            5 => counts.h5 += 1,
            6 => counts.h6 += 1,
            _ => {}
        }
    }
    counts
}

/// Validates the heading hierarchy
///
/// A hierarchy is proper only when it starts at H1 and never skips more
/// than one level deeper between consecutive headings.
pub fn validate_hierarchy(sequence: &[u8], word_count: u32) -> (Vec<String>, bool) {
    let mut issues = Vec::new();

    let h1_count = sequence.iter().filter(|&&l| l == 1).count();
    let h2_count = sequence.iter().filter(|&&l| l == 2).count();

    if h1_count == 0 {
        issues.push("missing H1".to_string());
    } else if h1_count > 1 {
        issues.push("multiple H1".to_string());
    }

    if word_count > 500 && h2_count == 0 {
        issues.push("missing H2 in long content".to_string());
    }

    let mut proper = !sequence.is_empty() && sequence[0] == 1;
    for pair in sequence.windows(2) {
        if pair[1] > pair[0] + 1 {
            issues.push(format!("skipped heading level (h{} to h{})", pair[0], pair[1]));
            proper = false;
        }
    }

    (issues, proper)
}

fn count_paragraphs(document: &Html) -> u32 {
    match Selector::parse("p") {
        Ok(selector) => document
            .select(&selector)
            .filter(|p| !p.text().collect::<String>().trim().is_empty())
            .count() as u32,
        Err(_) => 0,
    }
}

/// Term frequencies over the stop-word-filtered words
///
/// Ties break alphabetically so the table is stable across runs.
fn term_frequencies(filtered: &[String]) -> Vec<TermCount> {
    let mut counts: BTreeMap<&String, u32> = BTreeMap::new();
    for word in filtered {
        *counts.entry(word).or_insert(0) += 1;
    }

    let mut terms: Vec<TermCount> = counts
        .into_iter()
        .map(|(term, count)| TermCount {
            term: term.clone(),
            count,
        })
        .collect();
    terms.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.term.cmp(&b.term)));
    terms.truncate(TOP_TERM_COUNT);
    terms
}

/// Duplication ratio: `1 - unique_sentences / total_sentences`
fn duplication(sentences: &[String]) -> f64 {
    if sentences.is_empty() {
        return 0.0;
    }
    let unique: HashSet<String> = sentences.iter().map(|s| s.to_lowercase()).collect();
    1.0 - unique.len() as f64 / sentences.len() as f64
}

/// Aggregates the 0-100 content quality score
///
/// Weighted sum: length band (10/15/20/25), readability band (5/15/20/25),
/// heading structure (up to 25), vocabulary richness (up to 10), minus a
/// flat 10 points when more than 30% of sentences repeat.
fn quality_score(
    word_count: u32,
    readability: &Readability,
    headings: &HeadingCounts,
    paragraph_count: u32,
    richness: f64,
    duplication_ratio: f64,
) -> u8 {
    let mut score = 0.0f64;

    score += match word_count {
        0..=149 => 10.0,
        150..=299 => 15.0,
        300..=499 => 20.0,
        _ => 25.0,
    };

    score += match readability {
        Readability::Scored { score: r, .. } => {
            if *r >= 80.0 {
                25.0
            } else if *r >= 65.0 {
                20.0
            } else if *r >= 50.0 {
                15.0
            } else {
                5.0
            }
        }
        Readability::NotApplicable => 5.0,
    };

    if headings.h1 == 1 {
        score += 10.0;
    }
    if headings.h2 >= 2 {
        score += 8.0;
    }
    if paragraph_count >= 3 {
        score += 7.0;
    }

    score += (richness * 10.0).min(10.0);

    if duplication_ratio > 0.3 {
        score -= 10.0;
    }

    score.clamp(0.0, 100.0).round() as u8
}
