use std::io;
use std::time::Duration;

use chrono::NaiveDate;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::list_io::{ListDir, discover_list, load_list};
use crate::io::storage::{FileStorage, Storage};
use crate::model::task::{Priority, TaskDraft};
use crate::store::TaskStore;
use crate::store::view::visible_indices;
use crate::util::unicode::{next_grapheme_boundary, prev_grapheme_boundary};

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Moving through the list
    Navigate,
    /// Editing the add form
    Add,
    /// Editing the search text
    Search,
    /// Editing the category filter
    Filter,
}

/// Fields of the add form, in Tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Text,
    Priority,
    DueDate,
    DueTime,
    Category,
}

impl FormField {
    pub fn next(self) -> FormField {
        match self {
            FormField::Text => FormField::Priority,
            FormField::Priority => FormField::DueDate,
            FormField::DueDate => FormField::DueTime,
            FormField::DueTime => FormField::Category,
            FormField::Category => FormField::Text,
        }
    }

    pub fn prev(self) -> FormField {
        match self {
            FormField::Text => FormField::Category,
            FormField::Priority => FormField::Text,
            FormField::DueDate => FormField::Priority,
            FormField::DueTime => FormField::DueDate,
            FormField::Category => FormField::DueTime,
        }
    }
}

/// A single-line editable text field with a byte-offset cursor.
///
/// The cursor always sits on a grapheme boundary; movement and deletion
/// step whole graphemes, not bytes or chars.
#[derive(Debug, Clone, Default)]
pub struct TextField {
    pub value: String,
    pub cursor: usize,
}

impl TextField {
    pub fn insert(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = prev_grapheme_boundary(&self.value, self.cursor) {
            self.value.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if let Some(next) = next_grapheme_boundary(&self.value, self.cursor) {
            self.value.replace_range(self.cursor..next, "");
        }
    }

    pub fn left(&mut self) {
        if let Some(prev) = prev_grapheme_boundary(&self.value, self.cursor) {
            self.cursor = prev;
        }
    }

    pub fn right(&mut self) {
        if let Some(next) = next_grapheme_boundary(&self.value, self.cursor) {
            self.cursor = next;
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.value.len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

/// The add form: one text field per draft field, plus a three-value
/// priority selector.
#[derive(Debug, Clone)]
pub struct AddForm {
    pub focus: FormField,
    pub text: TextField,
    pub priority: Priority,
    pub due_date: TextField,
    pub due_time: TextField,
    pub category: TextField,
}

impl AddForm {
    pub fn new() -> AddForm {
        AddForm {
            focus: FormField::Text,
            text: TextField::default(),
            priority: Priority::Low,
            due_date: TextField::default(),
            due_time: TextField::default(),
            category: TextField::default(),
        }
    }

    /// The draft this form currently describes.
    pub fn draft(&self) -> TaskDraft {
        TaskDraft {
            text: self.text.value.clone(),
            priority: self.priority.label().to_string(),
            due_date: self.due_date.value.clone(),
            due_time: self.due_time.value.clone(),
            category: self.category.value.clone(),
        }
    }

    /// Back to the defaults (empty fields, Low), focus on the text.
    pub fn reset(&mut self) {
        *self = AddForm::new();
    }

    /// The focused text field, or `None` when the priority selector has
    /// focus.
    pub fn focused_field_mut(&mut self) -> Option<&mut TextField> {
        match self.focus {
            FormField::Text => Some(&mut self.text),
            FormField::Priority => None,
            FormField::DueDate => Some(&mut self.due_date),
            FormField::DueTime => Some(&mut self.due_time),
            FormField::Category => Some(&mut self.category),
        }
    }

    pub fn cycle_priority_up(&mut self) {
        self.priority = match self.priority {
            Priority::Low => Priority::Medium,
            Priority::Medium => Priority::High,
            Priority::High => Priority::Low,
        };
    }

    pub fn cycle_priority_down(&mut self) {
        self.priority = match self.priority {
            Priority::Low => Priority::High,
            Priority::Medium => Priority::Low,
            Priority::High => Priority::Medium,
        };
    }
}

impl Default for AddForm {
    fn default() -> Self {
        AddForm::new()
    }
}

/// Main application state
pub struct App<S: Storage> {
    pub store: TaskStore<S>,
    pub list_name: String,
    pub theme: Theme,
    pub show_key_hints: bool,
    pub mode: Mode,
    pub should_quit: bool,
    /// Cursor index into the visible rows (not the full list)
    pub cursor: usize,
    /// First visible row
    pub scroll_offset: usize,
    pub search: TextField,
    pub category_filter: TextField,
    pub form: AddForm,
    /// One-shot status message, cleared on the next key press
    pub notice: Option<String>,
    /// Today's date, for overdue emphasis
    pub today: NaiveDate,
}

impl<S: Storage> App<S> {
    pub fn new(list: &ListDir, store: TaskStore<S>, today: NaiveDate) -> App<S> {
        App {
            store,
            list_name: list.config.list.name.clone(),
            theme: Theme::from_config(&list.config.ui),
            show_key_hints: list.config.ui.show_key_hints,
            mode: Mode::Navigate,
            should_quit: false,
            cursor: 0,
            scroll_offset: 0,
            search: TextField::default(),
            category_filter: TextField::default(),
            form: AddForm::new(),
            notice: None,
            today,
        }
    }

    /// Positions (into the full list) of the rows currently visible under
    /// the search and category filters. Recomputed from scratch on every
    /// call; nothing is cached.
    pub fn visible_rows(&self) -> Vec<usize> {
        visible_indices(
            self.store.tasks(),
            &self.search.value,
            &self.category_filter.value,
        )
    }

    /// Keep the cursor inside the visible rows after a mutation or filter
    /// change.
    pub fn clamp_cursor(&mut self) {
        let rows = self.visible_rows().len();
        if rows == 0 {
            self.cursor = 0;
        } else if self.cursor >= rows {
            self.cursor = rows - 1;
        }
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        let rows = self.visible_rows().len();
        if rows > 0 && self.cursor + 1 < rows {
            self.cursor += 1;
        }
    }

    /// Submit the add form. On success the form resets so the next task
    /// can be typed immediately; a rejected draft (empty text) leaves the
    /// form as-is.
    pub fn submit_form(&mut self) {
        match self.store.add(&self.form.draft()) {
            Ok(true) => {
                let text = self.store.tasks()[self.store.len() - 1].text.clone();
                self.form.reset();
                self.notice = Some(format!("added: {}", text));
            }
            Ok(false) => {
                self.notice = Some("nothing to add: task text is empty".to_string());
            }
            Err(e) => {
                self.notice = Some(format!("error: {}", e));
            }
        }
    }

    /// Delete the task under the cursor, mapping through the filtered view
    /// to the right position in the full list.
    pub fn delete_under_cursor(&mut self) {
        let rows = self.visible_rows();
        let Some(&index) = rows.get(self.cursor) else {
            return;
        };
        match self.store.remove(index) {
            Ok(_) => self.clamp_cursor(),
            Err(e) => self.notice = Some(format!("error: {}", e)),
        }
    }
}

/// Run the TUI application
pub fn run(dir: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let start = match dir {
        Some(d) => std::fs::canonicalize(d)?,
        None => std::env::current_dir()?,
    };
    let root = discover_list(&start)?;
    let list = load_list(&root)?;
    let store = TaskStore::open(FileStorage::new(&list.tick_dir));
    let today = chrono::Local::now().date_naive();
    let mut app = App::new(&list, store, today);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<FileStorage>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
