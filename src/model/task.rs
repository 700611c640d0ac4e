use serde::{Deserialize, Serialize};

/// Task urgency, stored on the wire as the integers 1–3.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Priority {
    #[default]
    Low = 1,
    Medium = 2,
    High = 3,
}

impl Priority {
    /// Map a human-readable label to a priority.
    /// Unrecognized labels fall back to `Low`.
    pub fn from_label(label: &str) -> Priority {
        match label {
            "High" => Priority::High,
            "Medium" => Priority::Medium,
            _ => Priority::Low,
        }
    }

    /// The display label for this priority.
    pub fn label(self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    /// The direction indicator shown next to the label:
    /// high points up, medium forward, low down.
    pub fn indicator(self) -> char {
        match self {
            Priority::High => '\u{2191}',   // ↑
            Priority::Medium => '\u{2192}', // →
            Priority::Low => '\u{2193}',    // ↓
        }
    }

    /// The stored integer value (1–3).
    pub fn value(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Priority {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Priority::Low),
            2 => Ok(Priority::Medium),
            3 => Ok(Priority::High),
            other => Err(format!("priority out of range: {}", other)),
        }
    }
}

impl From<Priority> for u8 {
    fn from(p: Priority) -> u8 {
        p as u8
    }
}

/// A single to-do entry.
///
/// Field names are fixed by the persisted format: the `"tasks"` slot is a
/// JSON array of these objects, and saved data from older lists must keep
/// loading unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Task text as the user typed it.
    pub text: String,
    /// Urgency tier.
    pub priority: Priority,
    /// Due date as `YYYY-MM-DD`, or empty when the task has none.
    #[serde(rename = "dueDate", default)]
    pub due_date: String,
    /// Due time as `HH:MM`, or empty.
    #[serde(rename = "dueTime", default)]
    pub due_time: String,
    /// Free-form category, or empty.
    #[serde(default)]
    pub category: String,
}

impl Task {
    /// The due date and time as one display string, empty when the task
    /// has neither.
    pub fn due_display(&self) -> String {
        match (self.due_date.is_empty(), self.due_time.is_empty()) {
            (false, false) => format!("{} {}", self.due_date, self.due_time),
            (false, true) => self.due_date.clone(),
            (true, false) => self.due_time.clone(),
            (true, true) => String::new(),
        }
    }
}

/// User input for a new task, before validation and priority mapping.
#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    pub text: String,
    /// Priority label ("Low", "Medium", "High"); anything else maps to Low.
    pub priority: String,
    pub due_date: String,
    pub due_time: String,
    pub category: String,
}

impl TaskDraft {
    /// A draft with just text, everything else default.
    pub fn with_text(text: impl Into<String>) -> TaskDraft {
        TaskDraft {
            text: text.into(),
            ..TaskDraft::default()
        }
    }
}
