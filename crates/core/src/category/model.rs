//! Category model definitions

use serde::{Deserialize, Serialize};

use crate::task::Task;

/// A user-defined grouping for tasks. `count` is an aggregate supplied
/// by the backend, never computed here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub count: u32,
}

/// Backend aggregate over all categories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub categories: Vec<Category>,
}

/// Display attributes resolved from a task's category reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryDetails {
    pub label: String,
    pub color: String,
}

/// A selection entry for category pickers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryOption {
    pub label: String,
    pub value: String,
    pub disabled: bool,
}

impl From<&Category> for CategoryOption {
    fn from(category: &Category) -> Self {
        Self {
            label: category.title.clone(),
            value: category.id.clone(),
            disabled: false,
        }
    }
}

/// A task joined with its resolved category, the shape the display
/// layer consumes. A dangling `category_id` leaves `category` unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskView {
    #[serde(flatten)]
    pub task: Task,
    pub category: Option<CategoryDetails>,
}

impl TaskView {
    /// Join one task against a category snapshot
    pub fn resolve(task: Task, categories: &[Category]) -> Self {
        let category = task.category_id.as_deref().and_then(|id| {
            categories.iter().find(|c| c.id == id).map(|c| CategoryDetails {
                label: c.title.clone(),
                color: c.color.clone(),
            })
        });
        Self { task, category }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories() -> Vec<Category> {
        vec![
            Category {
                id: "1".into(),
                title: "Work".into(),
                color: "#ff0000".into(),
                count: 3,
            },
            Category {
                id: "2".into(),
                title: "Home".into(),
                color: "#00ff00".into(),
                count: 1,
            },
        ]
    }

    #[test]
    fn test_resolve_known_category() {
        let task = Task::new("Review PR").with_category("1");
        let view = TaskView::resolve(task, &categories());
        let details = view.category.unwrap();
        assert_eq!(details.label, "Work");
        assert_eq!(details.color, "#ff0000");
    }

    #[test]
    fn test_resolve_dangling_category_is_none() {
        let task = Task::new("Orphan").with_category("99");
        let view = TaskView::resolve(task, &categories());
        assert!(view.category.is_none());
    }

    #[test]
    fn test_resolve_without_category() {
        let view = TaskView::resolve(Task::new("Loose end"), &categories());
        assert!(view.category.is_none());
    }

    #[test]
    fn test_option_from_category() {
        let option = CategoryOption::from(&categories()[1]);
        assert_eq!(option.label, "Home");
        assert_eq!(option.value, "2");
        assert!(!option.disabled);
    }
}
