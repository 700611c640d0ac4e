use chrono::NaiveDate;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::io::storage::Storage;
use crate::model::task::Task;
use crate::util::unicode::{display_width, truncate_to_width};

use super::app::{App, FormField, Mode, TextField};

/// Main render function: title, add form, filters, list, status row
pub fn render<S: Storage>(frame: &mut Frame, app: &mut App<S>) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Length(2), // add form
            Constraint::Length(1), // filters
            Constraint::Min(1),    // task list
            Constraint::Length(1), // status row
        ])
        .split(area);

    render_title(frame, app, chunks[0]);
    render_form(frame, app, chunks[1]);
    render_filters(frame, app, chunks[2]);
    render_list(frame, app, chunks[3]);
    render_status(frame, app, chunks[4]);
}

fn render_title<S: Storage>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let bg = app.theme.background;
    let shown = app.visible_rows().len();
    let total = app.store.len();

    let left = format!(" {}", app.list_name);
    let right = if shown == total {
        format!("{} tasks ", total)
    } else {
        format!("{}/{} tasks ", shown, total)
    };

    let width = area.width as usize;
    let pad = width.saturating_sub(display_width(&left) + display_width(&right));
    let line = Line::from(vec![
        Span::styled(left, Style::default().fg(app.theme.highlight).bg(bg)),
        Span::styled(" ".repeat(pad), Style::default().bg(bg)),
        Span::styled(right, Style::default().fg(app.theme.dim).bg(bg)),
    ]);
    frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), area);
}

/// Spans for one labelled form field: `label: value`, with a cursor bar
/// when the field is being edited.
fn field_spans<'a>(
    label: &'a str,
    field: &'a TextField,
    focused: bool,
    editing: bool,
    theme: &super::theme::Theme,
) -> Vec<Span<'a>> {
    let bg = theme.background;
    let label_fg = if focused { theme.highlight } else { theme.dim };
    let mut spans = vec![Span::styled(
        format!("{}: ", label),
        Style::default().fg(label_fg).bg(bg),
    )];

    let value_style = Style::default().fg(theme.text_bright).bg(bg);
    if editing && focused {
        spans.push(Span::styled(&field.value[..field.cursor], value_style));
        spans.push(Span::styled(
            "\u{258C}",
            Style::default().fg(theme.highlight).bg(bg),
        ));
        spans.push(Span::styled(&field.value[field.cursor..], value_style));
    } else {
        spans.push(Span::styled(field.value.as_str(), value_style));
    }
    spans
}

fn render_form<S: Storage>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let theme = &app.theme;
    let bg = theme.background;
    let editing = app.mode == Mode::Add;
    let focus = app.form.focus;

    let mut first = vec![Span::styled(" add  ", Style::default().fg(theme.dim).bg(bg))];
    first.extend(field_spans(
        "text",
        &app.form.text,
        focus == FormField::Text,
        editing,
        theme,
    ));
    first.push(Span::styled("   ", Style::default().bg(bg)));
    let priority_focused = focus == FormField::Priority;
    first.push(Span::styled(
        "priority: ",
        Style::default()
            .fg(if priority_focused { theme.highlight } else { theme.dim })
            .bg(bg),
    ));
    let selector = format!(
        "{} {}",
        app.form.priority.indicator(),
        app.form.priority.label()
    );
    let selector = if editing && priority_focused {
        format!("\u{2039}{}\u{203A}", selector) // ‹ ›
    } else {
        selector
    };
    first.push(Span::styled(
        selector,
        Style::default()
            .fg(theme.priority_color(app.form.priority))
            .bg(bg),
    ));

    let mut second = vec![Span::styled("      ", Style::default().bg(bg))];
    second.extend(field_spans(
        "due",
        &app.form.due_date,
        focus == FormField::DueDate,
        editing,
        theme,
    ));
    second.push(Span::styled("   ", Style::default().bg(bg)));
    second.extend(field_spans(
        "at",
        &app.form.due_time,
        focus == FormField::DueTime,
        editing,
        theme,
    ));
    second.push(Span::styled("   ", Style::default().bg(bg)));
    second.extend(field_spans(
        "category",
        &app.form.category,
        focus == FormField::Category,
        editing,
        theme,
    ));

    let paragraph = Paragraph::new(vec![Line::from(first), Line::from(second)])
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn render_filters<S: Storage>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let theme = &app.theme;
    let bg = theme.background;

    let mut spans = vec![Span::styled(" ", Style::default().bg(bg))];
    spans.extend(field_spans(
        "search",
        &app.search,
        app.mode == Mode::Search,
        app.mode == Mode::Search,
        theme,
    ));
    spans.push(Span::styled("   ", Style::default().bg(bg)));
    spans.extend(field_spans(
        "category",
        &app.category_filter,
        app.mode == Mode::Filter,
        app.mode == Mode::Filter,
        theme,
    ));

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        area,
    );
}

/// Whether a task's due date has passed.
fn overdue(task: &Task, today: NaiveDate) -> bool {
    !task.due_date.is_empty()
        && NaiveDate::parse_from_str(&task.due_date, "%Y-%m-%d")
            .map(|d| d < today)
            .unwrap_or(false)
}

fn render_list<S: Storage>(frame: &mut Frame, app: &mut App<S>, area: Rect) {
    let theme = app.theme.clone();
    let bg = theme.background;
    let rows = app.visible_rows();

    if rows.is_empty() {
        let message = if app.store.is_empty() {
            "no tasks yet (a to add one)"
        } else {
            "no tasks match the current filters"
        };
        let line = Line::from(Span::styled(
            format!(" {}", message),
            Style::default().fg(theme.dim).bg(bg),
        ));
        frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), area);
        return;
    }

    // Keep the cursor row on screen
    let height = area.height as usize;
    if height > 0 {
        if app.cursor < app.scroll_offset {
            app.scroll_offset = app.cursor;
        } else if app.cursor >= app.scroll_offset + height {
            app.scroll_offset = app.cursor + 1 - height;
        }
    }

    let text_budget = (area.width as usize).saturating_sub(46).max(16);
    let mut lines = Vec::new();
    for (row, &index) in rows.iter().enumerate().skip(app.scroll_offset).take(height) {
        let task = &app.store.tasks()[index];
        let selected = row == app.cursor && app.mode == Mode::Navigate;
        let row_bg = if selected { theme.selection_bg } else { bg };

        let mut spans = vec![Span::styled(
            format!("{:>4}. ", index + 1),
            Style::default().fg(theme.dim).bg(row_bg),
        )];
        spans.push(Span::styled(
            format!("{} {:<6} ", task.priority.indicator(), task.priority.label()),
            Style::default()
                .fg(theme.priority_color(task.priority))
                .bg(row_bg),
        ));
        spans.push(Span::styled(
            truncate_to_width(&task.text, text_budget),
            Style::default().fg(theme.text_bright).bg(row_bg),
        ));

        let due = task.due_display();
        if !due.is_empty() {
            let due_fg = if overdue(task, app.today) {
                theme.red
            } else {
                theme.dim
            };
            spans.push(Span::styled(
                format!("  (due {})", due),
                Style::default().fg(due_fg).bg(row_bg),
            ));
        }
        if !task.category.is_empty() {
            spans.push(Span::styled(
                format!("  [{}]", task.category),
                Style::default().fg(theme.text).bg(row_bg),
            ));
        }

        // Pad the selection background to the edge of the row
        if selected {
            let used: usize = spans.iter().map(|s| display_width(&s.content)).sum();
            let pad = (area.width as usize).saturating_sub(used);
            spans.push(Span::styled(
                " ".repeat(pad),
                Style::default().bg(row_bg),
            ));
        }

        lines.push(Line::from(spans));
    }

    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(bg)),
        area,
    );
}

fn render_status<S: Storage>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let theme = &app.theme;
    let bg = theme.background;

    let line = if let Some(notice) = &app.notice {
        Line::from(Span::styled(
            format!(" {}", notice),
            Style::default().fg(theme.yellow).bg(bg),
        ))
    } else if app.show_key_hints {
        let hint = match app.mode {
            Mode::Navigate => "a add  / search  c category  d delete  j/k move  q quit",
            Mode::Add => "Tab next field  Space/←/→ priority  Enter add  Esc done",
            Mode::Search | Mode::Filter => "Enter keep  Esc clear",
        };
        Line::from(Span::styled(
            format!(" {}", hint),
            Style::default().fg(theme.dim).bg(bg),
        ))
    } else {
        Line::from(Span::styled(String::new(), Style::default().bg(bg)))
    };

    frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), area);
}
