//! Page and page request types

use serde::{Deserialize, Serialize};

/// Request for one page of results
///
/// Pages are 1-based. An empty or whitespace-only search is stored as `None`
/// so fetchers never see a blank filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-based)
    pub page: u32,
    /// Maximum number of items in the page
    pub page_size: usize,
    /// Optional search text
    pub search: Option<String>,
}

impl PageRequest {
    /// Create request without search
    #[inline]
    #[must_use]
    pub fn new(page: u32, page_size: usize) -> Self {
        Self {
            page,
            page_size,
            search: None,
        }
    }

    /// Attach search text
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = normalize_search(search.into());
        self
    }

    /// Attach optional search text
    #[must_use]
    pub fn with_optional_search(mut self, search: Option<&str>) -> Self {
        self.search = search.and_then(|s| normalize_search(s.to_string()));
        self
    }

    /// Number of items preceding this page
    #[inline]
    #[must_use]
    pub fn offset(&self) -> usize {
        (self.page.saturating_sub(1) as usize).saturating_mul(self.page_size)
    }
}

fn normalize_search(search: String) -> Option<String> {
    if search.trim().is_empty() {
        None
    } else {
        Some(search)
    }
}

/// One page of results
///
/// `items` is the ordered slice for exactly one page. Its order is the
/// display order and is preserved when pages are merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items of this page
    pub items: Vec<T>,
    /// Whether another page follows
    pub has_next_page: bool,
    /// Total number of items across all pages
    pub total_items: usize,
}

impl<T> Page<T> {
    /// Create page
    #[inline]
    #[must_use]
    pub fn new(items: Vec<T>, has_next_page: bool, total_items: usize) -> Self {
        Self {
            items,
            has_next_page,
            total_items,
        }
    }

    /// Page with no items and nothing after it
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            has_next_page: false,
            total_items: 0,
        }
    }

    /// Check if page has no items
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Map items into another type, keeping page metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            has_next_page: self.has_next_page,
            total_items: self.total_items,
        }
    }
}

impl<T: Clone> Page<T> {
    /// Offset-slice a fully available sequence
    ///
    /// Takes `(page-1)*page_size .. page*page_size`, clamped to the sequence.
    /// `has_next_page` is `end < all.len()`. A zero page size yields an empty
    /// page that reports no successor.
    #[must_use]
    pub fn slice(all: &[T], page: u32, page_size: usize) -> Self {
        let total = all.len();
        if page_size == 0 {
            return Self::new(Vec::new(), false, total);
        }

        let start = PageRequest::new(page, page_size).offset().min(total);
        let end = start.saturating_add(page_size).min(total);

        Self::new(all[start..end].to_vec(), end < total, total)
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty()
    }
}
