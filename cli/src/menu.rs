use std::io::{self, BufRead, Write};

use anyhow::Result;
use taskman_core::{JsonFileBackend, ListFilter, StoreError, TaskStore};

use crate::render;

/// Interactive numbered menu over one store instance. The session owns the
/// store for its whole lifetime; there is no shared or global state behind
/// it.
pub struct MenuSession {
    store: TaskStore<JsonFileBackend>,
}

impl MenuSession {
    pub fn new(store: TaskStore<JsonFileBackend>) -> Self {
        Self { store }
    }

    pub fn run(&mut self) -> Result<()> {
        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();

        loop {
            print_menu();
            let Some(choice) = prompt(&mut lines, "Choose an option")? else {
                break;
            };
            match choice.as_str() {
                "1" => self.add(&mut lines)?,
                "2" => render::print_tasks(&self.store.list(ListFilter::All)),
                "3" => render::print_tasks(&self.store.list(ListFilter::Pending)),
                "4" => render::print_tasks(&self.store.list(ListFilter::Completed)),
                "5" => self.complete(&mut lines)?,
                "6" => self.delete(&mut lines)?,
                "7" => self.search(&mut lines)?,
                "8" => render::print_stats(&self.store.statistics()),
                "9" | "q" | "quit" | "exit" => break,
                "" => {}
                other => println!("Unknown option: {other}"),
            }
        }

        println!("Bye.");
        Ok(())
    }

    fn add(&mut self, lines: &mut impl LineSource) -> Result<()> {
        println!("\n-- Add a task --");
        let Some(title) = prompt(lines, "Title")? else {
            return Ok(());
        };
        let Some(description) = prompt(lines, "Description (optional)")? else {
            return Ok(());
        };
        let Some(due) = prompt(lines, "Due date (YYYY-MM-DD)")? else {
            return Ok(());
        };

        match self.store.add(&title, &description, &due) {
            Ok(task) => println!("Task added: {} ({})", task.title, task.id),
            Err(e) => report(e),
        }
        Ok(())
    }

    fn complete(&mut self, lines: &mut impl LineSource) -> Result<()> {
        println!("\n-- Complete a task --");
        let pending = self.store.list(ListFilter::Pending);
        if pending.is_empty() {
            println!("No pending tasks.");
            return Ok(());
        }
        render::print_tasks(&pending);

        let Some(id) = prompt(lines, "Task id")? else {
            return Ok(());
        };
        match self.store.complete(&id) {
            Ok(done) if done.was_already_completed => {
                println!("Task {} was already completed.", done.task.id)
            }
            Ok(done) => println!("Task {} marked as completed.", done.task.id),
            Err(e) => report(e),
        }
        Ok(())
    }

    fn delete(&mut self, lines: &mut impl LineSource) -> Result<()> {
        println!("\n-- Delete a task --");
        if self.store.is_empty() {
            println!("No tasks found.");
            return Ok(());
        }
        render::print_tasks(&self.store.list(ListFilter::All));

        let Some(id) = prompt(lines, "Task id")? else {
            return Ok(());
        };
        let Some(confirm) = prompt(lines, &format!("Really delete {id}? (y/n)"))? else {
            return Ok(());
        };
        if !matches!(confirm.to_lowercase().as_str(), "y" | "yes") {
            println!("Delete cancelled.");
            return Ok(());
        }

        match self.store.delete(&id) {
            Ok(removed) => println!("Deleted task {} ({}).", removed.id, removed.title),
            Err(e) => report(e),
        }
        Ok(())
    }

    fn search(&mut self, lines: &mut impl LineSource) -> Result<()> {
        println!("\n-- Search tasks --");
        let Some(keyword) = prompt(lines, "Keyword (blank for any)")? else {
            return Ok(());
        };
        let Some(due) = prompt(lines, "Due date YYYY-MM-DD (blank for any)")? else {
            return Ok(());
        };

        let keyword = if keyword.is_empty() { None } else { Some(keyword) };
        let due = if due.is_empty() { None } else { Some(due) };
        let results = self.store.search(keyword.as_deref(), due.as_deref());
        println!("{} task(s) found.", results.len());
        render::print_tasks(&results);
        Ok(())
    }
}

trait LineSource: Iterator<Item = io::Result<String>> {}
impl<T: Iterator<Item = io::Result<String>>> LineSource for T {}

fn print_menu() {
    println!();
    println!("==================== taskman ====================");
    println!("1. Add a task          5. Complete a task");
    println!("2. View all tasks      6. Delete a task");
    println!("3. View pending tasks  7. Search tasks");
    println!("4. View completed      8. Statistics");
    println!("9. Quit");
    println!("=================================================");
}

/// Prints the prompt and reads one line, trimmed. `None` means stdin was
/// closed and the session should wind down.
fn prompt(lines: &mut impl LineSource, text: &str) -> Result<Option<String>> {
    print!("{text}: ");
    io::stdout().flush()?;
    match lines.next() {
        Some(line) => Ok(Some(line?.trim().to_string())),
        None => Ok(None),
    }
}

fn report(err: StoreError) {
    match &err {
        StoreError::Storage(_) => {
            println!("Error: {err}");
            println!("The change is applied in this session but may not be on disk.");
        }
        _ => println!("Error: {err}"),
    }
}
