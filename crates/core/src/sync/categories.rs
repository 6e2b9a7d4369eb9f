//! Category derivation service
//!
//! Caches the category collection behind a watch channel: the latest
//! value replays to late subscribers and the fetch runs once per
//! refresh, not once per reader. Fetch failures degrade to an empty
//! collection so the task join never hard-fails on this source.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::api::CategoriesApi;
use crate::category::{Category, CategoryOption, CategorySummary};
use crate::Result;

pub struct CategoryService {
    api: Arc<dyn CategoriesApi>,
    categories: watch::Sender<Vec<Category>>,
}

impl CategoryService {
    pub fn new(api: Arc<dyn CategoriesApi>) -> Self {
        let (categories, _) = watch::channel(Vec::new());
        Self { api, categories }
    }

    /// Re-fetch the category collection. Called on the manual trigger
    /// and whenever a task mutation lands, since the backend-supplied
    /// aggregate counts may shift with task assignment.
    pub async fn refresh(&self) {
        let categories = match self.api.fetch_all().await {
            Ok(categories) => categories,
            Err(error) => {
                warn!(%error, "category fetch failed, substituting empty collection");
                Vec::new()
            }
        };
        debug!(count = categories.len(), "category cache refreshed");
        self.categories.send_replace(categories);
    }

    /// Latest cached collection
    pub fn snapshot(&self) -> Vec<Category> {
        self.categories.borrow().clone()
    }

    /// Subscribe to cache updates; the current value is available
    /// immediately via `borrow`.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Category>> {
        self.categories.subscribe()
    }

    /// Picker entries derived from the cached collection
    pub fn options(&self) -> Vec<CategoryOption> {
        self.categories.borrow().iter().map(CategoryOption::from).collect()
    }

    /// Backend aggregate summary, passed through unchanged
    pub async fn totals(&self) -> Result<CategorySummary> {
        self.api.totals().await
    }
}
