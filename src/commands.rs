use std::io::{self, Write};

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::error::Result;
use crate::models::{Task, TaskStatus};
use crate::theme::{status_color, ROW_TEXT};
use crate::view::TaskView;

/// Column headers shared by the CLI table and the TUI.
pub const HEADERS: [&str; 4] = ["ID", "Name", "Status", "Last Modified"];

/// Builds the color-coded task table.
///
/// Every cell of a row gets the background of the task's status.
pub fn task_table(tasks: &[Task]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(HEADERS.iter().map(|h| Cell::new(h).add_attribute(Attribute::Bold)));

    for t in tasks {
        let bg = Color::from(status_color(t.status));
        let fg = Color::from(ROW_TEXT);
        let cells = [t.id.to_string(), t.name.clone(), t.status.to_string(), t.last_modified()];
        table.add_row(cells.into_iter().map(|c| Cell::new(c).bg(bg).fg(fg)));
    }
    table
}

fn print_tasks(out: &mut impl Write, tasks: &[Task]) -> io::Result<()> {
    if tasks.is_empty() {
        return writeln!(out, "No tasks found.");
    }
    writeln!(out, "{}", task_table(tasks))
}

/// Fetches every task and prints the table.
pub async fn cmd_list(view: &mut TaskView, out: &mut impl Write) -> Result<()> {
    view.fetch_all().await?;
    print_tasks(out, view.tasks())?;
    Ok(())
}

/// Fetches the current tasks, generates a new one and prints the result.
pub async fn cmd_generate(view: &mut TaskView, out: &mut impl Write) -> Result<()> {
    view.fetch_all().await?;
    let id = view.generate().await?.id;
    print_tasks(out, view.tasks())?;
    writeln!(out, "Task generated (id = {})", id)?;
    Ok(())
}

/// Updates a task's status and prints the re-fetched table.
pub async fn cmd_status(
    view: &mut TaskView,
    id: u64,
    status: TaskStatus,
    out: &mut impl Write,
) -> Result<()> {
    view.update_status(id, status).await?;
    print_tasks(out, view.tasks())?;
    writeln!(out, "Task {} set to '{}'.", id, status)?;
    Ok(())
}
