//! Evidence matcher: case-insensitive keyword search over page text.
//!
//! Matching is deliberately shallow. There is no stemming and no semantic
//! similarity; the catalogue compensates by listing multiple phrasings per
//! check. Every verdict stays traceable to a literal substring of the source
//! text, and identical inputs always produce identical matches in identical
//! order.

use shared_types::{KeywordMatch, PageText};

use crate::catalog::Check;

/// Characters of context kept on each side of a keyword hit.
pub const SNIPPET_CONTEXT: usize = 80;

/// Find every keyword occurrence for one check across the document.
///
/// Matches are deduplicated by (keyword, page): only the first occurrence of
/// a keyword on a page is recorded. Results come back in document order,
/// pages first, then byte offset within the page.
pub fn find_matches(pages: &[PageText], check: &Check) -> Vec<KeywordMatch> {
    let mut matches = Vec::new();

    for page in pages {
        let haystack = page.text.to_lowercase();

        let mut hits: Vec<(usize, usize, &str)> = Vec::new();
        for keyword in &check.keywords {
            let needle = keyword.to_lowercase();
            if needle.is_empty() {
                continue;
            }
            if let Some(pos) = haystack.find(&needle) {
                hits.push((pos, needle.len(), keyword.as_str()));
            }
        }
        // Stable: equal offsets keep the catalogue's keyword order.
        hits.sort_by_key(|&(pos, ..)| pos);

        for (pos, len, keyword) in hits {
            matches.push(KeywordMatch {
                check_id: check.id.clone(),
                keyword: keyword.to_string(),
                snippet: snippet_around(&haystack, pos, pos + len),
                page: Some(page.page),
            });
        }
    }

    matches
}

/// Extract a bounded window around a hit, trimmed to whole words where
/// feasible, with whitespace collapsed.
fn snippet_around(text: &str, start: usize, end: usize) -> String {
    let mut lo = start.saturating_sub(SNIPPET_CONTEXT);
    while lo > 0 && !text.is_char_boundary(lo) {
        lo -= 1;
    }
    let mut hi = end.saturating_add(SNIPPET_CONTEXT).min(text.len());
    while hi < text.len() && !text.is_char_boundary(hi) {
        hi += 1;
    }

    let mut window = &text[lo..hi];
    if lo > 0 {
        // The left edge likely cut a word in half; drop the fragment.
        if let Some(ws) = window.find(char::is_whitespace) {
            window = &window[ws..];
        }
    }
    if hi < text.len() {
        if let Some(ws) = window.rfind(char::is_whitespace) {
            window = &window[..ws];
        }
    }

    window.split_whitespace().collect::<Vec<_>>().join(" ")
}
