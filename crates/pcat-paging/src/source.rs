//! Display-facing option source

use crate::engine::PaginationEngine;
use crate::search::SearchableLoader;
use crate::state::{LoadOutcome, OptionListView};
use async_trait::async_trait;

/// What a dropdown or table needs from its data source
///
/// A view to render plus a callback for "scrolled to the bottom".
#[async_trait]
pub trait OptionSource<T>: Send + Sync {
    /// Snapshot to render
    fn view(&self) -> OptionListView<T>;

    /// Load the next page, if any
    async fn load_more(&self) -> LoadOutcome;
}

#[async_trait]
impl<T: Clone + Send + Sync + 'static> OptionSource<T> for PaginationEngine<T> {
    fn view(&self) -> OptionListView<T> {
        PaginationEngine::view(self)
    }

    async fn load_more(&self) -> LoadOutcome {
        PaginationEngine::load_more(self).await
    }
}

#[async_trait]
impl<T: Clone + Send + Sync + 'static> OptionSource<T> for SearchableLoader<T> {
    fn view(&self) -> OptionListView<T> {
        SearchableLoader::view(self)
    }

    async fn load_more(&self) -> LoadOutcome {
        self.load_more_for_current_query().await
    }
}
