//! Task state synchronization service
//!
//! Owns the canonical task snapshots and the refresh-on-mutation
//! contract: every successful create/update/remove/clear bumps the
//! refresh counter and re-fetches the full collection, then rebuilds
//! the category-joined view that display code subscribes to. There is
//! no incremental patching and no optimistic update beyond moving the
//! selection, so racing mutations simply settle on whichever refresh
//! lands last.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};
use uuid::Uuid;

use super::categories::CategoryService;
use crate::api::TasksApi;
use crate::category::TaskView;
use crate::task::Task;
use crate::{Error, Result};

pub struct TaskSyncService {
    api: Arc<dyn TasksApi>,
    categories: CategoryService,
    tasks: watch::Sender<Vec<Task>>,
    views: watch::Sender<Vec<TaskView>>,
    current: watch::Sender<Task>,
    refresh_tick: watch::Sender<u64>,
}

impl TaskSyncService {
    pub fn new(api: Arc<dyn TasksApi>, categories: CategoryService) -> Self {
        let (tasks, _) = watch::channel(Vec::new());
        let (views, _) = watch::channel(Vec::new());
        let (current, _) = watch::channel(Task::placeholder());
        let (refresh_tick, _) = watch::channel(0);
        Self {
            api,
            categories,
            tasks,
            views,
            current,
            refresh_tick,
        }
    }

    /// Create a task on the backend and select it.
    ///
    /// A blank title is rejected locally, before any network call.
    /// Edits staged on the placeholder selection while composing a new
    /// task (description, category, subtasks) are merged in.
    pub async fn create_task(&self, mut task: Task) -> Result<Task> {
        if task.title.trim().is_empty() {
            warn!("rejected create: task title is blank");
            return Err(Error::InvalidInput("task title must not be blank".into()));
        }

        let staged = self.current.borrow().clone();
        if !staged.is_persisted() {
            if task.description.is_none() {
                task.description = staged.description;
            }
            if task.category_id.is_none() {
                task.category_id = staged.category_id;
            }
            if task.sub_tasks.is_empty() {
                task.sub_tasks = staged.sub_tasks;
            }
        }

        let response = self.api.create(&task).await?;
        if !response.is_success() {
            return Err(Error::Backend(response.status));
        }

        task.id = response.id.unwrap_or_else(|| {
            // May diverge from the id the server actually assigned;
            // the next refresh brings the authoritative collection.
            let fallback = Uuid::new_v4().to_string();
            warn!(%fallback, "create response omitted id, selecting under local fallback");
            fallback
        });

        self.current.send_replace(task.clone());
        self.bump_refresh();
        self.refresh().await;
        Ok(task)
    }

    /// Persist changes to an existing task and select the new payload.
    /// An unpersisted task (empty id) must go through `create_task`.
    pub async fn update_task(&self, id: &str, mut task: Task) -> Result<()> {
        if id.is_empty() {
            return Err(Error::InvalidInput(
                "cannot update a task without a server-issued id".into(),
            ));
        }

        let response = self.api.update(id, &task).await?;
        if !response.is_success() {
            return Err(Error::Backend(response.status));
        }

        task.id = id.to_string();
        self.current.send_replace(task);
        self.bump_refresh();
        self.refresh().await;
        Ok(())
    }

    /// Delete one task; the selection falls back to the placeholder.
    pub async fn remove_task(&self, id: &str) -> Result<()> {
        let response = self.api.remove_one(id).await?;
        if !response.is_success() {
            return Err(Error::Backend(response.status));
        }

        self.reset_current_task();
        self.bump_refresh();
        self.refresh().await;
        Ok(())
    }

    /// Delete the entire collection and reset the selection.
    pub async fn clear_all(&self) -> Result<()> {
        let response = self.api.remove_all().await?;
        if !response.is_success() {
            return Err(Error::Backend(response.status));
        }

        self.reset_current_task();
        self.bump_refresh();
        self.refresh().await;
        Ok(())
    }

    /// Select a task for viewing or stage edits on it. Local only.
    pub fn set_current_task(&self, task: Task) {
        self.current.send_replace(task);
    }

    /// Reset the selection to the empty placeholder. Local only.
    pub fn reset_current_task(&self) {
        self.current.send_replace(Task::placeholder());
    }

    /// Stage a new subtask on the current selection; returns its id.
    pub fn stage_subtask(&self, name: impl Into<String>) -> u32 {
        let name = name.into();
        let mut id = 0;
        self.current.send_modify(|task| {
            id = task.add_subtask(name).id;
        });
        id
    }

    /// Flip completion of a staged subtask on the current selection.
    pub fn toggle_staged_subtask(&self, id: u32) {
        self.current.send_modify(|task| task.toggle_subtask(id));
    }

    /// Drop a staged subtask from the current selection.
    pub fn remove_staged_subtask(&self, id: u32) {
        self.current.send_modify(|task| task.remove_subtask(id));
    }

    /// Re-fetch the full collection and rebuild the joined view. A
    /// failed fetch degrades to an empty collection; the error is
    /// logged, never surfaced to subscribers.
    pub async fn refresh(&self) {
        let tasks = match self.api.fetch_all().await {
            Ok(tasks) => tasks,
            Err(error) => {
                warn!(%error, "task fetch failed, substituting empty collection");
                Vec::new()
            }
        };

        // Task mutations can shift the backend's category aggregates,
        // so the category cache is invalidated alongside.
        self.categories.refresh().await;
        let categories = self.categories.snapshot();

        let views: Vec<TaskView> = tasks
            .iter()
            .cloned()
            .map(|task| TaskView::resolve(task, &categories))
            .collect();

        debug!(tasks = tasks.len(), "task snapshot refreshed");
        self.tasks.send_replace(tasks);
        self.views.send_replace(views);
    }

    fn bump_refresh(&self) {
        self.refresh_tick.send_modify(|tick| *tick += 1);
    }

    /// Latest raw task collection
    pub fn tasks(&self) -> Vec<Task> {
        self.tasks.borrow().clone()
    }

    /// Latest category-joined view
    pub fn views(&self) -> Vec<TaskView> {
        self.views.borrow().clone()
    }

    /// Currently selected task
    pub fn current_task(&self) -> Task {
        self.current.borrow().clone()
    }

    /// How many mutations have triggered a refresh this session
    pub fn refresh_count(&self) -> u64 {
        *self.refresh_tick.borrow()
    }

    /// Shared access to the category cache
    pub fn categories(&self) -> &CategoryService {
        &self.categories
    }

    pub fn subscribe_tasks(&self) -> watch::Receiver<Vec<Task>> {
        self.tasks.subscribe()
    }

    pub fn subscribe_views(&self) -> watch::Receiver<Vec<TaskView>> {
        self.views.subscribe()
    }

    pub fn subscribe_current(&self) -> watch::Receiver<Task> {
        self.current.subscribe()
    }

    pub fn subscribe_refresh(&self) -> watch::Receiver<u64> {
        self.refresh_tick.subscribe()
    }
}
