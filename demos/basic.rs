//! Logs into a real backend, mirrors the task list, and prints it along with the
//! dashboard totals.
//!
//! Point it at a server with
//! `TASKSYNC_URL=http://localhost:5000/api TASKSYNC_EMAIL=... TASKSYNC_PASSWORD=... cargo run --example basic`

use tasksync::client::Client;
use tasksync::TaskStore;

#[tokio::main]
async fn main() {
    env_logger::init();

    let base_url = std::env::var("TASKSYNC_URL").expect("TASKSYNC_URL must point at the backend");
    let email = std::env::var("TASKSYNC_EMAIL").expect("TASKSYNC_EMAIL must be set");
    let password = std::env::var("TASKSYNC_PASSWORD").expect("TASKSYNC_PASSWORD must be set");

    let session = Client::log_in(&base_url, &email, &password).await.unwrap();
    let client = Client::new(&base_url, session.clone()).unwrap();
    let user_id = session.user_id();

    let mut store = TaskStore::new(client, session);
    if store.load().await == false {
        log::error!("Unable to load the task list");
        return;
    }

    println!("---- unfinished ----");
    for task in store.unfinished() {
        println!("  #{} {} (due {:?})", task.id(), task.name(), task.due_date());
    }
    println!("---- completed ----");
    for task in store.completed() {
        println!("  #{} {}", task.id(), task.name());
    }

    match store.source().dashboard_summary(user_id).await {
        Err(err) => log::error!("Unable to fetch the dashboard summary: {}", err),
        Ok(summary) => {
            println!(
                "{} tasks, {} completed, {} remaining, {} overdue",
                summary.total_task,
                summary.total_completed_tasks,
                summary.total_remaining_tasks,
                summary.total_overdue_tasks
            );
        }
    }
}
