//! Drives a [`TaskStore`] against the in-memory source, so it runs without a backend:
//! create a few tasks, toggle some, and print the derived views.

use tasksync::memory::InMemorySource;
use tasksync::{Session, Task, TaskDraft, TaskStore};

const USER_ID: i64 = 1;

#[tokio::main]
async fn main() {
    env_logger::init();

    let session = Session::new(USER_ID, "offline-token");
    let mut store = TaskStore::new(InMemorySource::new(), session);

    for (name, description) in [
        ("Water the plants", "Kitchen and balcony"),
        ("Write report", "Q3 summary"),
        ("Book dentist appointment", "Ask for a morning slot"),
    ]
    .iter()
    {
        let draft = TaskDraft {
            name: name.to_string(),
            description: description.to_string(),
            due_date: Some(chrono::Local::now().date_naive() + chrono::Duration::days(7)),
            user_id: Some(USER_ID),
            ..TaskDraft::default()
        };
        if store.create(draft).await == false {
            log::error!("Unable to create task {:?}", name);
        }
    }

    print_tasks(&store.tasks().iter().collect::<Vec<_>>(), "after creation");

    let first_id = match store.unfinished().first() {
        Some(task) => task.id(),
        None => {
            println!("No unfinished task to toggle");
            return;
        }
    };
    if store.toggle_status(first_id).await == false {
        log::error!("Unable to toggle task {}", first_id);
    }

    print_tasks(&store.unfinished(), "unfinished after toggling");
    print_tasks(&store.completed(), "completed after toggling");
}

fn print_tasks(tasks: &[&Task], title: &str) {
    println!("---- {} ----", title);
    for task in tasks {
        let marker = if task.status() { "✓" } else { " " };
        println!("  [{}] #{} {} ({})", marker, task.id(), task.name(), task.priority());
    }
}
