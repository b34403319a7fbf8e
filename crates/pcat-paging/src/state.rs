//! Pagination state, load outcomes and display views

use pcat_option::FetchError;

/// Accumulated state of one pagination engine
///
/// Items are ordered first-loaded-first. While `is_loading` is set no other
/// page request may start, and once `has_more` is cleared no further load
/// changes `items`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationState<T> {
    /// Accumulated items
    pub items: Vec<T>,
    /// Page cursor
    ///
    /// Server mode: the next page to request. Client mode: the number of
    /// pages currently revealed.
    pub current_page: u32,
    /// Whether another page can be loaded
    pub has_more: bool,
    /// Whether a page request is in flight
    pub is_loading: bool,
    /// Total items reported by the last page (0 until known)
    pub total_items: usize,
    /// Search text every page request carries
    pub query: Option<String>,
    /// Load tag, bumped on reset and on every query change
    pub generation: u64,
}

impl<T> PaginationState<T> {
    pub(crate) fn fresh(initial_page: u32) -> Self {
        Self {
            items: Vec::new(),
            current_page: initial_page,
            has_more: true,
            is_loading: false,
            total_items: 0,
            query: None,
            generation: 0,
        }
    }
}

/// Result of a load request
///
/// Only `Loaded` changed the visible items. Every other variant leaves them
/// untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A page was applied
    Loaded {
        /// Number of items added to the visible list
        appended: usize,
    },
    /// Another load was already in flight
    Busy,
    /// No further pages exist
    Exhausted,
    /// Response arrived for a superseded query or a reset engine
    Stale,
    /// Fetch failed; previous state kept
    Failed(FetchError),
}

impl LoadOutcome {
    /// Check if a page was applied
    #[inline]
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded { .. })
    }

    /// Check if the call was ignored without touching the fetcher
    #[inline]
    #[must_use]
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Busy | Self::Exhausted)
    }
}

/// Immutable snapshot handed to a display component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionListView<T> {
    /// Items to render
    pub items: Vec<T>,
    /// Whether scrolling further may load more
    pub has_more: bool,
    /// Whether a spinner should be shown
    pub is_loading: bool,
    /// Total item count, if known
    pub total_items: usize,
}

impl<T: Clone> From<&PaginationState<T>> for OptionListView<T> {
    fn from(state: &PaginationState<T>) -> Self {
        Self {
            items: state.items.clone(),
            has_more: state.has_more,
            is_loading: state.is_loading,
            total_items: state.total_items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_expects_more() {
        let state: PaginationState<u8> = PaginationState::fresh(1);
        assert!(state.has_more);
        assert!(!state.is_loading);
        assert_eq!(state.current_page, 1);
        assert_eq!(state.total_items, 0);
    }

    #[test]
    fn outcome_classification() {
        assert!(LoadOutcome::Loaded { appended: 0 }.is_loaded());
        assert!(LoadOutcome::Busy.is_skipped());
        assert!(LoadOutcome::Exhausted.is_skipped());
        assert!(!LoadOutcome::Stale.is_skipped());
        assert!(!LoadOutcome::Failed(FetchError::transport("x")).is_loaded());
    }
}
