mod menu;
mod render;

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Result;
use clap::Parser;
use taskman_core::{JsonFileBackend, ListFilter, TaskStore};

#[derive(Parser)]
#[command(name = "taskman")]
#[command(about = "A file-backed personal task tracker", long_about = None)]
struct Cli {
    /// Tasks file to use (default: ~/.taskman/tasks.json)
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Add a new task
    Add {
        /// Task title
        title: String,
        /// Free-text description
        #[arg(short, long, default_value = "")]
        description: String,
        /// Due date in YYYY-MM-DD form
        #[arg(long)]
        due: String,
    },
    /// List tasks
    List {
        /// all, pending or completed
        #[arg(long, default_value = "all")]
        filter: String,
    },
    /// Mark a task as completed
    Done {
        /// Task id, e.g. TASK001
        id: String,
    },
    /// Delete a task
    Delete {
        /// Task id, e.g. TASK001
        id: String,
    },
    /// Search tasks by keyword and/or exact due date
    Search {
        /// Case-insensitive substring of title or description
        #[arg(short, long)]
        keyword: Option<String>,
        /// Exact due date in YYYY-MM-DD form
        #[arg(long)]
        due: Option<String>,
    },
    /// Show aggregate statistics
    Stats,
    /// Run the interactive menu
    Menu,
}

fn main() -> Result<()> {
    // Keeps the handle alive for the whole run; RUST_LOG overrides the
    // default level, which is quiet apart from store warnings.
    let _logger = flexi_logger::Logger::try_with_env_or_str("warn")?.start()?;

    let cli = Cli::parse();
    let backend = match cli.file {
        Some(path) => JsonFileBackend::from_path(path),
        None => JsonFileBackend::new(None)?,
    };
    let mut store = TaskStore::open(backend);

    match cli.command {
        Some(Commands::Add {
            title,
            description,
            due,
        }) => match store.add(&title, &description, &due) {
            Ok(task) => println!("Task added: {} ({})", task.title, task.id),
            Err(e) => println!("Error: {e}"),
        },
        Some(Commands::List { filter }) => match ListFilter::from_str(&filter) {
            Ok(filter) => render::print_tasks(&store.list(filter)),
            Err(e) => println!("Error: {e}"),
        },
        Some(Commands::Done { id }) => match store.complete(&id) {
            Ok(done) if done.was_already_completed => {
                println!("Task {} was already completed.", done.task.id)
            }
            Ok(done) => println!("Task {} marked as completed.", done.task.id),
            Err(e) => println!("Error: {e}"),
        },
        Some(Commands::Delete { id }) => match store.delete(&id) {
            Ok(removed) => println!("Deleted task {} ({}).", removed.id, removed.title),
            Err(e) => println!("Error: {e}"),
        },
        Some(Commands::Search { keyword, due }) => {
            render::print_tasks(&store.search(keyword.as_deref(), due.as_deref()));
        }
        Some(Commands::Stats) => render::print_stats(&store.statistics()),
        Some(Commands::Menu) | None => menu::MenuSession::new(store).run()?,
    }

    Ok(())
}
