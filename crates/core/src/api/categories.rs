//! Category resource client

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;

use crate::category::{Category, CategorySummary};
use crate::transport::ApiTransport;
use crate::Result;

const MODULE_ROUTE: &str = "categories";

/// Remote category operations
#[async_trait]
pub trait CategoriesApi: Send + Sync {
    /// Fetch the full category collection
    async fn fetch_all(&self) -> Result<Vec<Category>>;

    /// Fetch the backend's aggregate category summary
    async fn totals(&self) -> Result<CategorySummary>;
}

/// HTTP implementation over the shared transport
pub struct HttpCategoriesApi {
    transport: Arc<ApiTransport>,
}

impl HttpCategoriesApi {
    pub fn new(transport: Arc<ApiTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl CategoriesApi for HttpCategoriesApi {
    async fn fetch_all(&self) -> Result<Vec<Category>> {
        self.transport
            .request(MODULE_ROUTE, Method::GET, None, None::<&()>, true)
            .await
    }

    async fn totals(&self) -> Result<CategorySummary> {
        let endpoint = format!("{MODULE_ROUTE}/total_categories");
        self.transport
            .request(&endpoint, Method::GET, None, None::<&()>, true)
            .await
    }
}
