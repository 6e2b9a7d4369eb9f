//! Plain-text rendering for the terminal views

use tabled::{Table, Tabled};

use taskdeck_core::category::{Category, CategoryOption, TaskView};
use taskdeck_core::task::Task;

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Done")]
    done: &'static str,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Subtasks")]
    subtasks: String,
}

impl From<&TaskView> for TaskRow {
    fn from(view: &TaskView) -> Self {
        let task = &view.task;
        let done_subtasks = task.sub_tasks.iter().filter(|s| s.completed).count();
        Self {
            id: task.id.clone(),
            done: if task.completed { "x" } else { " " },
            title: task.title.clone(),
            category: view
                .category
                .as_ref()
                .map(|c| c.label.clone())
                .unwrap_or_else(|| "-".into()),
            subtasks: format!("{}/{}", done_subtasks, task.sub_tasks.len()),
        }
    }
}

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Color")]
    color: String,
    #[tabled(rename = "Tasks")]
    count: u32,
}

impl From<&Category> for CategoryRow {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id.clone(),
            title: category.title.clone(),
            color: category.color.clone(),
            count: category.count,
        }
    }
}

pub fn task_table(views: &[TaskView]) -> String {
    if views.is_empty() {
        return "no tasks".into();
    }
    Table::new(views.iter().map(TaskRow::from)).to_string()
}

pub fn category_table(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "no categories".into();
    }
    Table::new(categories.iter().map(CategoryRow::from)).to_string()
}

pub fn option_list(options: &[CategoryOption]) -> String {
    options
        .iter()
        .map(|o| format!("{} ({})", o.label, o.value))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn task_details(task: &Task) -> String {
    let mut out = format!(
        "[{}] {} ({})",
        if task.completed { "x" } else { " " },
        task.title,
        if task.is_persisted() { task.id.as_str() } else { "unsaved" },
    );
    if let Some(description) = &task.description {
        out.push_str(&format!("\n  {description}"));
    }
    if let Some(category_id) = &task.category_id {
        out.push_str(&format!("\n  category: {category_id}"));
    }
    for sub in &task.sub_tasks {
        out.push_str(&format!(
            "\n  {}. [{}] {}",
            sub.id,
            if sub.completed { "x" } else { " " },
            sub.name
        ));
    }
    out
}
