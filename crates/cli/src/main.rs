//! Terminal client for the taskdeck backend
//!
//! Thin presentation layer: parses a subcommand, drives the
//! synchronization service and renders the result. All state and
//! network handling lives in taskdeck-core.

mod render;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use taskdeck_core::api::{HttpCategoriesApi, HttpTasksApi};
use taskdeck_core::sync::{CategoryService, SubscriptionScope, TaskSyncService};
use taskdeck_core::task::Task;
use taskdeck_core::transport::{ApiConfig, ApiTransport};

#[derive(Parser, Debug)]
#[command(name = "taskdeck", version, about = "Task-management client", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all tasks with their resolved categories
    List,
    /// Show one task in detail
    Show { id: String },
    /// Create a new task
    ///
    /// Example: taskdeck add "Buy milk" --category 7
    Add {
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },
    /// Append a subtask to an existing task
    Subtask { id: String, name: String },
    /// Flip a task's completion state
    Toggle { id: String },
    /// Delete one task
    Remove { id: String },
    /// Delete every task
    Clear,
    /// List categories
    Categories {
        /// Render as picker options
        #[arg(long)]
        options: bool,
        /// Show the backend aggregate summary
        #[arg(long)]
        totals: bool,
    },
    /// Follow the task view, re-rendering as the collection changes
    Watch,
}

fn find_task(service: &TaskSyncService, id: &str) -> anyhow::Result<Task> {
    service
        .tasks()
        .into_iter()
        .find(|t| t.id == id)
        .ok_or_else(|| taskdeck_core::Error::TaskNotFound(id.to_string()).into())
}

async fn run(cli: Cli, service: Arc<TaskSyncService>) -> anyhow::Result<()> {
    match cli.command {
        Command::List => {
            service.refresh().await;
            println!("{}", render::task_table(&service.views()));
        }
        Command::Show { id } => {
            service.refresh().await;
            let task = find_task(&service, &id)?;
            service.set_current_task(task.clone());
            println!("{}", render::task_details(&task));
        }
        Command::Add {
            title,
            description,
            category,
        } => {
            let mut task = Task::new(title);
            task.description = description;
            task.category_id = category;
            let created = service.create_task(task).await?;
            println!("created task {}", created.id);
        }
        Command::Subtask { id, name } => {
            service.refresh().await;
            let mut task = find_task(&service, &id)?;
            let subtask_id = task.add_subtask(name).id;
            service.update_task(&id, task).await?;
            println!("added subtask {subtask_id} to task {id}");
        }
        Command::Toggle { id } => {
            service.refresh().await;
            let mut task = find_task(&service, &id)?;
            task.completed = !task.completed;
            service.update_task(&id, task).await?;
            println!("toggled task {id}");
        }
        Command::Remove { id } => {
            service.remove_task(&id).await?;
            println!("removed task {id}");
        }
        Command::Clear => {
            service.clear_all().await?;
            println!("cleared all tasks");
        }
        Command::Categories { options, totals } => {
            if totals {
                let summary = service.categories().totals().await?;
                println!("{} categories in use", summary.total);
                println!("{}", render::category_table(&summary.categories));
            } else {
                service.categories().refresh().await;
                if options {
                    println!("{}", render::option_list(&service.categories().options()));
                } else {
                    println!("{}", render::category_table(&service.categories().snapshot()));
                }
            }
        }
        Command::Watch => {
            service.refresh().await;
            println!("{}", render::task_table(&service.views()));

            let scope = SubscriptionScope::new();
            let mut views = service.subscribe_views();
            scope.spawn(async move {
                while views.changed().await.is_ok() {
                    let snapshot = views.borrow_and_update().clone();
                    println!("{}", render::task_table(&snapshot));
                }
            });
            let refresher = Arc::clone(&service);
            scope.spawn(async move {
                let mut interval = tokio::time::interval(Duration::from_secs(5));
                interval.tick().await; // the immediate first tick
                loop {
                    interval.tick().await;
                    refresher.refresh().await;
                }
            });

            tokio::signal::ctrl_c()
                .await
                .context("waiting for interrupt")?;
            scope.close();
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskdeck_cli=info,taskdeck_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = ApiConfig::from_env();
    tracing::debug!(base_url = %config.base_url, "using API endpoint");

    let transport = Arc::new(ApiTransport::new(&config));
    let tasks_api = Arc::new(HttpTasksApi::new(Arc::clone(&transport)));
    let categories_api = Arc::new(HttpCategoriesApi::new(transport));
    let service = Arc::new(TaskSyncService::new(
        tasks_api,
        CategoryService::new(categories_api),
    ));

    run(cli, service).await
}
