use tabled::settings::Style;
use tabled::{Table, Tabled};
use taskman_core::{Task, TaskStats};

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl TaskRow {
    fn from_task(task: &Task) -> Self {
        TaskRow {
            id: task.id.clone(),
            title: task.title.clone(),
            due: task.due_date.clone(),
            status: if task.completed { "done" } else { "pending" }.to_string(),
            description: task.description.clone(),
        }
    }
}

pub fn print_tasks(tasks: &[&Task]) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }

    let rows: Vec<TaskRow> = tasks.iter().map(|t| TaskRow::from_task(t)).collect();
    let mut table = Table::new(rows);
    table.with(Style::modern());
    println!("{table}");
}

pub fn print_stats(stats: &TaskStats) {
    println!("Total:      {}", stats.total);
    println!("Completed:  {}", stats.completed);
    println!("Pending:    {}", stats.pending);
    println!("Completion: {:.1}%", stats.completion_rate);
}
