//! Text extraction and tokenization helpers
//!
//! Pure string logic shared by the content analyzer: visible-text
//! extraction, sentence and word tokenization, syllable approximation, and
//! the readability formula.

use scraper::Html;

/// Tags whose subtrees never contribute to visible content
const NON_CONTENT_TAGS: &[&str] = &[
    "script", "style", "noscript", "template", "head", "nav", "footer",
];

/// Extracts the visible text of a document
///
/// Walks the parse tree in document order, skipping script, style,
/// navigation, and footer regions entirely.
pub fn visible_text(document: &Html) -> String {
    let mut out = String::new();
    let mut stack = vec![document.tree.root()];

    while let Some(node) = stack.pop() {
        if let Some(element) = node.value().as_element() {
            if NON_CONTENT_TAGS.contains(&element.name()) {
                continue;
            }
        }

        if let Some(text) = node.value().as_text() {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                if !out.is_empty() {
                    out.push(' ');
                }
                out.push_str(trimmed);
            }
        }

        let children: Vec<_> = node.children().collect();
        for child in children.into_iter().rev() {
            stack.push(child);
        }
    }

    out
}

/// Splits text into sentences
///
/// Sentence boundaries are `.`, `!` and `?`; candidates with fewer than
/// three whitespace-delimited tokens are discarded as fragments.
pub fn split_sentences(text: &str) -> Vec<String> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|candidate| candidate.split_whitespace().count() >= 3)
        .map(str::to_string)
        .collect()
}

/// Tokenizes text into lowercase words
///
/// Punctuation is stripped from token edges and tokens shorter than two
/// characters are discarded.
pub fn tokenize_words(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|token| {
            token
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|token| token.chars().count() >= 2)
        .collect()
}

/// Removes stop words before frequency analysis
pub fn filter_stop_words(words: &[String], stop_words: &[String]) -> Vec<String> {
    words
        .iter()
        .filter(|word| !stop_words.iter().any(|s| s == *word))
        .cloned()
        .collect()
}

/// Approximates the syllable count of a word
///
/// Counts maximal vowel runs (`aeiouy`), with a minimum of one per word.
pub fn count_syllables(word: &str) -> u32 {
    let mut runs = 0u32;
    let mut in_run = false;

    for c in word.chars() {
        let is_vowel = matches!(
            c.to_ascii_lowercase(),
            'a' | 'e' | 'i' | 'o' | 'u' | 'y'
        );
        if is_vowel && !in_run {
            runs += 1;
        }
        in_run = is_vowel;
    }

    runs.max(1)
}

/// Flesch-style readability score, clamped to [0, 100]
///
/// `206.835 - 1.015 * (words/sentences) - 84.6 * (syllables/words)`
pub fn flesch_score(words: u32, sentences: u32, syllables: u32) -> f64 {
    if words == 0 || sentences == 0 {
        return 0.0;
    }

    let words_per_sentence = words as f64 / sentences as f64;
    let syllables_per_word = syllables as f64 / words as f64;
    let raw = 206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word;

    raw.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_text_skips_non_content_regions() {
        let html = r#"<html><head><title>T</title></head><body>
            <nav>Home About</nav>
            <p>Visible paragraph.</p>
            <script>var hidden = 1;</script>
            <style>.x { color: red }</style>
            <footer>Copyright</footer>
        </body></html>"#;

        let document = Html::parse_document(html);
        let text = visible_text(&document);

        assert!(text.contains("Visible paragraph."));
        assert!(!text.contains("hidden"));
        assert!(!text.contains("color: red"));
        assert!(!text.contains("Copyright"));
        assert!(!text.contains("Home About"));
    }

    #[test]
    fn test_split_sentences_discards_fragments() {
        let text = "This is a full sentence. Ok. Another proper sentence here! What?";
        let sentences = split_sentences(text);
        assert_eq!(
            sentences,
            vec![
                "This is a full sentence".to_string(),
                "Another proper sentence here".to_string()
            ]
        );
    }

    #[test]
    fn test_tokenize_strips_punctuation_and_short_tokens() {
        let words = tokenize_words("The quick, brown fox (a vulpine) jumped!");
        assert_eq!(
            words,
            vec!["the", "quick", "brown", "fox", "vulpine", "jumped"]
        );
    }

    #[test]
    fn test_filter_stop_words() {
        let words = vec!["the".to_string(), "engine".to_string(), "and".to_string()];
        let stop = vec!["the".to_string(), "and".to_string()];
        assert_eq!(filter_stop_words(&words, &stop), vec!["engine".to_string()]);
    }

    #[test]
    fn test_syllable_runs() {
        assert_eq!(count_syllables("cat"), 1);
        assert_eq!(count_syllables("idea"), 2); // i + ea
        assert_eq!(count_syllables("readability"), 5);
        assert_eq!(count_syllables("strength"), 1);
    }

    #[test]
    fn test_syllable_minimum_one() {
        assert_eq!(count_syllables("hmm"), 1);
    }

    #[test]
    fn test_flesch_formula() {
        // 206.835 - 1.015 * 20 - 84.6 * 1.5 = 59.635
        let score = flesch_score(100, 5, 150);
        assert!((score - 59.635).abs() < 1e-9);
    }

    #[test]
    fn test_flesch_clamped() {
        assert_eq!(flesch_score(1000, 1, 5000), 0.0);
        assert!(flesch_score(10, 10, 10) <= 100.0);
    }

    #[test]
    fn test_flesch_zero_denominators() {
        assert_eq!(flesch_score(0, 5, 10), 0.0);
        assert_eq!(flesch_score(5, 0, 10), 0.0);
    }
}
