// src/services/catalog.rs

use std::collections::BTreeSet;

use serde::Serialize;

use crate::{config::DEFAULT_PAGE_SIZE, models::quiz::Quiz};

/// One window of the filtered catalog.
#[derive(Debug, Serialize)]
pub struct CatalogPage<'a> {
    pub items: Vec<&'a Quiz>,
    pub total_matching: usize,
    /// 1-based page actually served.
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

/// Filters quizzes by search term and tags, then cuts out one page.
///
/// * Search is a case-insensitive substring match on title or description.
/// * Tags match when none are selected or the quiz carries any of them.
/// * Matching quizzes keep their catalog order.
/// * A page past the end is empty.
pub fn filter_quizzes<'a>(
    quizzes: &'a [Quiz],
    search_term: &str,
    selected_tags: &[String],
    page: usize,
    page_size: usize,
) -> CatalogPage<'a> {
    let page = page.max(1);
    let page_size = if page_size == 0 { DEFAULT_PAGE_SIZE } else { page_size };
    let needle = search_term.to_lowercase();

    let matching: Vec<&Quiz> = quizzes
        .iter()
        .filter(|quiz| matches_search(quiz, &needle) && matches_tags(quiz, selected_tags))
        .collect();

    let total_matching = matching.len();
    let items = matching
        .into_iter()
        .skip((page - 1).saturating_mul(page_size))
        .take(page_size)
        .collect();

    CatalogPage {
        items,
        total_matching,
        page,
        page_size,
        total_pages: total_matching.div_ceil(page_size),
    }
}

fn matches_search(quiz: &Quiz, needle: &str) -> bool {
    needle.is_empty()
        || quiz.title.to_lowercase().contains(needle)
        || quiz.description.to_lowercase().contains(needle)
}

fn matches_tags(quiz: &Quiz, selected_tags: &[String]) -> bool {
    selected_tags.is_empty() || selected_tags.iter().any(|tag| quiz.has_tag(tag))
}

/// Every tag used in the catalog, sorted and without repeats.
pub fn all_tags(quizzes: &[Quiz]) -> Vec<String> {
    quizzes
        .iter()
        .flat_map(|quiz| quiz.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
