//! Task resource client

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;

use super::ApiStatus;
use crate::task::Task;
use crate::transport::ApiTransport;
use crate::Result;

const MODULE_ROUTE: &str = "tasks";

/// Remote task operations, kept behind a trait so the synchronization
/// service can be exercised without a network.
#[async_trait]
pub trait TasksApi: Send + Sync {
    /// Fetch the full task collection
    async fn fetch_all(&self) -> Result<Vec<Task>>;

    /// Create a task; the response may carry the server-issued id
    async fn create(&self, task: &Task) -> Result<ApiStatus>;

    /// Replace the task stored under `id`
    async fn update(&self, id: &str, task: &Task) -> Result<ApiStatus>;

    /// Delete the entire collection
    async fn remove_all(&self) -> Result<ApiStatus>;

    /// Delete a single task
    async fn remove_one(&self, id: &str) -> Result<ApiStatus>;
}

/// HTTP implementation over the shared transport
pub struct HttpTasksApi {
    transport: Arc<ApiTransport>,
}

impl HttpTasksApi {
    pub fn new(transport: Arc<ApiTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl TasksApi for HttpTasksApi {
    async fn fetch_all(&self) -> Result<Vec<Task>> {
        self.transport
            .request(MODULE_ROUTE, Method::GET, None, None::<&()>, true)
            .await
    }

    async fn create(&self, task: &Task) -> Result<ApiStatus> {
        self.transport
            .request(MODULE_ROUTE, Method::POST, None, Some(task), true)
            .await
    }

    async fn update(&self, id: &str, task: &Task) -> Result<ApiStatus> {
        let endpoint = format!("{MODULE_ROUTE}/{id}");
        self.transport
            .request(&endpoint, Method::PUT, None, Some(task), true)
            .await
    }

    async fn remove_all(&self) -> Result<ApiStatus> {
        let endpoint = format!("{MODULE_ROUTE}/remove_all");
        self.transport
            .request(&endpoint, Method::DELETE, None, None::<&()>, true)
            .await
    }

    async fn remove_one(&self, id: &str) -> Result<ApiStatus> {
        let endpoint = format!("{MODULE_ROUTE}/{id}");
        self.transport
            .request(&endpoint, Method::DELETE, None, None::<&()>, true)
            .await
    }
}
