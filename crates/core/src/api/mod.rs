//! Resource API clients
//!
//! Stateless mappings from domain operations to transport calls. No
//! business logic lives here; errors pass through untouched.

mod categories;
mod tasks;

use serde::{Deserialize, Serialize};

pub use categories::{CategoriesApi, HttpCategoriesApi};
pub use tasks::{HttpTasksApi, TasksApi};

/// Envelope returned by the mutating endpoints. The synchronization
/// service branches on `status == "success"` before refreshing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiStatus {
    pub status: String,
    #[serde(default)]
    pub id: Option<String>,
}

impl ApiStatus {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_success() {
        let ok = ApiStatus {
            status: "success".into(),
            id: Some("42".into()),
        };
        assert!(ok.is_success());

        let failed = ApiStatus {
            status: "error".into(),
            id: None,
        };
        assert!(!failed.is_success());
    }

    #[test]
    fn test_status_decodes_without_id() {
        let status: ApiStatus = serde_json::from_str(r#"{"status":"success"}"#).unwrap();
        assert!(status.is_success());
        assert!(status.id.is_none());
    }
}
