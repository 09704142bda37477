//! Derived presentation: sort by name and slice into pages.
//!
//! Pure functions over the record slice; the underlying insertion order is
//! never touched.
//!
use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::store::User;

/// Rows shown per table page.
pub const PAGE_SIZE: usize = 5;

/// Direction of the name column sort.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }

    /// Arrow shown next to the column title.
    pub fn indicator(self) -> &'static str {
        match self {
            SortOrder::Ascending => "▲",
            SortOrder::Descending => "▼",
        }
    }
}

/// Locale-aware name ordering in the manner of a root-locale collator.
///
/// Compared level by level:
/// 1. base letters: canonical decomposition with combining marks dropped, case-folded
/// 2. accents: the decomposed, case-folded text with its marks
/// 3. case: lowercase sorts before uppercase at the same position
///
/// Raw code points break any remaining tie so the order is total.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| accented(a).cmp(accented(b)))
        .then_with(|| case_bits(a).cmp(case_bits(b)))
        .then_with(|| a.cmp(b))
}

fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn accented(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}

fn case_bits(s: &str) -> impl Iterator<Item = bool> + '_ {
    s.nfd().filter(|c| !is_combining_mark(*c)).map(char::is_uppercase)
}

pub fn sorted_users(users: &[User], order: SortOrder) -> Vec<&User> {
    let mut sorted: Vec<&User> = users.iter().collect();
    sorted.sort_by(|a, b| match order {
        SortOrder::Ascending => compare_names(&a.name, &b.name),
        SortOrder::Descending => compare_names(&b.name, &a.name),
    });
    sorted
}

pub fn total_pages(count: usize) -> usize {
    count.div_ceil(PAGE_SIZE)
}

/// Window `[(page-1)*PAGE_SIZE, page*PAGE_SIZE)` of `sorted`, clipped to its length.
pub fn visible_users<'a>(sorted: &[&'a User], page: usize) -> Vec<&'a User> {
    let start = page.saturating_sub(1).saturating_mul(PAGE_SIZE).min(sorted.len());
    let end = start.saturating_add(PAGE_SIZE).min(sorted.len());
    sorted[start..end].to_vec()
}
