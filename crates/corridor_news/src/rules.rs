//! Pure feed rules: categorization, near-duplicate filtering and ordering.

use corridor_core::{Article, Category};
use std::collections::HashSet;

const ANALYSIS_KEYWORDS: &[&str] = &["analysis", "study", "research", "assess"];
const POLICY_KEYWORDS: &[&str] = &["policy", "agreement", "summit", "bilateral"];
const OPINION_KEYWORDS: &[&str] = &["opinion", "editorial", "commentary"];

/// Number of characters of the lowercased title used as the dedup key.
pub const DEDUP_KEY_CHARS: usize = 60;

/// Files a headline under a category. Checked in order, first match wins.
pub fn categorize(title: &str) -> Category {
    let lower = title.to_lowercase();
    let mentions = |keywords: &[&str]| keywords.iter().any(|k| lower.contains(k));

    if mentions(ANALYSIS_KEYWORDS) {
        Category::Analysis
    } else if mentions(POLICY_KEYWORDS) {
        Category::Policy
    } else if mentions(OPINION_KEYWORDS) {
        Category::Opinion
    } else {
        Category::News
    }
}

pub fn dedup_key(title: &str) -> String {
    title.to_lowercase().chars().take(DEDUP_KEY_CHARS).collect()
}

/// Keeps the first article for each dedup key, preserving order.
///
/// Titles that only differ after the first 60 characters collide on purpose;
/// syndicated copies of one story usually differ only in their tails.
pub fn dedup_by_title(articles: Vec<Article>) -> Vec<Article> {
    let mut seen = HashSet::new();
    articles
        .into_iter()
        .filter(|a| seen.insert(dedup_key(&a.title)))
        .collect()
}

/// Newest first. Stable, so same-day articles keep their relative order.
pub fn sort_by_date_desc(articles: &mut [Article]) {
    articles.sort_by(|a, b| b.published_date.cmp(&a.published_date));
}
