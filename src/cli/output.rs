use serde::Serialize;

use crate::model::task::Task;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson {
    /// 1-based position in the full list (the `td rm` target).
    pub position: usize,
    pub text: String,
    pub priority: u8,
    pub priority_label: &'static str,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub due_date: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub due_time: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub category: String,
}

#[derive(Serialize)]
pub struct TaskListJson {
    pub list: String,
    pub tasks: Vec<TaskJson>,
}

pub fn task_to_json(position: usize, task: &Task) -> TaskJson {
    TaskJson {
        position,
        text: task.text.clone(),
        priority: task.priority.value(),
        priority_label: task.priority.label(),
        due_date: task.due_date.clone(),
        due_time: task.due_time.clone(),
        category: task.category.clone(),
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// Format a single task as a one-line listing row.
pub fn format_task_row(position: usize, task: &Task) -> String {
    let mut row = format!(
        "{:>3}. {} {:<6} {}",
        position,
        task.priority.indicator(),
        task.priority.label(),
        task.text
    );
    let due = task.due_display();
    if !due.is_empty() {
        row.push_str(&format!("  (due {})", due));
    }
    if !task.category.is_empty() {
        row.push_str(&format!("  [{}]", task.category));
    }
    row
}

/// Format the listing header
pub fn format_list_header(name: &str) -> String {
    format!("== {} ==", name)
}
