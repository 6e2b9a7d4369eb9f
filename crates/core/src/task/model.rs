//! Task model definitions

use serde::{Deserialize, Serialize};

/// A checklist item embedded in a task. Subtasks have no identity of
/// their own; they round-trip inside the parent task payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubTask {
    pub id: u32,
    pub name: String,
    pub completed: bool,
}

/// A user-created to-do item.
///
/// An empty `id` marks a task the backend has not issued an identifier
/// for yet. Such a task is never sent on the update path; it must go
/// through create first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub sub_tasks: Vec<SubTask>,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Create a new, not-yet-persisted task with the given title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            title: title.into(),
            description: None,
            category_id: None,
            sub_tasks: Vec::new(),
            completed: false,
        }
    }

    /// The default selection: an empty, unpersisted task
    pub fn placeholder() -> Self {
        Self::new("")
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the category reference
    pub fn with_category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    /// Whether the backend has issued an id for this task
    pub fn is_persisted(&self) -> bool {
        !self.id.is_empty()
    }

    /// Append a subtask. Ids are assigned as `len + 1`, so an id can
    /// repeat after deletions; they are positional labels, not keys.
    pub fn add_subtask(&mut self, name: impl Into<String>) -> &SubTask {
        let sub = SubTask {
            id: self.sub_tasks.len() as u32 + 1,
            name: name.into(),
            completed: false,
        };
        self.sub_tasks.push(sub);
        self.sub_tasks.last().unwrap()
    }

    /// Remove every subtask with the given id
    pub fn remove_subtask(&mut self, id: u32) {
        self.sub_tasks.retain(|s| s.id != id);
    }

    /// Flip completion on every subtask with the given id
    pub fn toggle_subtask(&mut self, id: u32) {
        for sub in self.sub_tasks.iter_mut().filter(|s| s.id == id) {
            sub.completed = !sub.completed;
        }
    }
}

impl Default for Task {
    fn default() -> Self {
        Self::placeholder()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_is_unpersisted() {
        let task = Task::new("Test task");
        assert_eq!(task.title, "Test task");
        assert!(!task.is_persisted());
        assert!(task.description.is_none());
        assert!(task.sub_tasks.is_empty());
        assert!(!task.completed);
    }

    #[test]
    fn test_task_with_category() {
        let task = Task::new("Test task").with_category("cat-1");
        assert_eq!(task.category_id.as_deref(), Some("cat-1"));
    }

    #[test]
    fn test_subtask_ids_follow_length() {
        let mut task = Task::new("Groceries");
        task.add_subtask("Milk");
        let sub = task.add_subtask("Eggs");
        assert_eq!(sub.id, 2);
        assert_eq!(task.sub_tasks.len(), 2);
    }

    #[test]
    fn test_subtask_ids_can_repeat_after_removal() {
        let mut task = Task::new("Groceries");
        task.add_subtask("Milk");
        task.add_subtask("Eggs");
        task.remove_subtask(1);
        let sub = task.add_subtask("Bread");
        // len was 1, so the new id collides with the surviving subtask
        assert_eq!(sub.id, 2);
    }

    #[test]
    fn test_toggle_subtask() {
        let mut task = Task::new("Groceries");
        task.add_subtask("Milk");
        task.toggle_subtask(1);
        assert!(task.sub_tasks[0].completed);
        task.toggle_subtask(1);
        assert!(!task.sub_tasks[0].completed);
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let task = Task::new("Buy milk").with_category("7");
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["categoryId"], "7");
        assert!(json["subTasks"].as_array().unwrap().is_empty());
    }
}
