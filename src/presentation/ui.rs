use crate::application::{App, AppMode};
use crate::domain::{FieldDescriptor, FieldKind, FieldValue};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Clear, Gauge, Paragraph, Row, Table, Tabs},
    Frame,
};

const VALUE_COLUMN_WIDTH: u16 = 32;

pub fn render_ui(f: &mut Frame, app: &App) {
    let field_rows = app.schema.fields.len() as u16;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(field_rows + 2),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_form_selector(f, app, chunks[0]);
    render_fields(f, app, chunks[1]);
    render_progress(f, app, chunks[2]);
    if !app.ledger.is_empty() {
        render_ledger(f, app, chunks[3]);
    }
    render_status_bar(f, app, chunks[4]);

    if matches!(app.mode, AppMode::Help) {
        render_help_popup(f, app.help_scroll);
    }
}

fn render_form_selector(f: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = app
        .registry
        .schemas()
        .iter()
        .map(|schema| Line::from(schema.title.clone()))
        .collect();
    let selected = app.registry.position(&app.schema.key).unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .block(Block::default().borders(Borders::ALL).title("dynform - Form Type (Tab to switch)"))
        .style(Style::default().fg(Color::Cyan))
        .highlight_style(Style::default().fg(Color::Black).bg(Color::Cyan));
    f.render_widget(tabs, area);
}

/// Text shown for a field's current value.
///
/// Each field kind decides its own presentation here; this is the only place
/// the UI distinguishes between kinds.
pub fn display_value(field: &FieldDescriptor, value: Option<&FieldValue>) -> String {
    let text = value.map(|value| value.to_string()).unwrap_or_default();
    match &field.kind {
        FieldKind::Text | FieldKind::Number => text,
        FieldKind::Date => {
            if text.is_empty() {
                "YYYY-MM-DD".to_string()
            } else {
                text
            }
        }
        FieldKind::Password => "*".repeat(text.chars().count()),
        FieldKind::Dropdown { options } => match options.iter().position(|option| *option == text) {
            Some(index) => format!("< {} > ({}/{})", text, index + 1, options.len()),
            None if text.is_empty() => format!("< Select {} >", field.label),
            None => format!("< {} >", text),
        },
    }
}

fn edit_buffer_display(field: &FieldDescriptor, input: &str) -> String {
    match &field.kind {
        FieldKind::Password => "*".repeat(input.chars().count()),
        FieldKind::Text | FieldKind::Number | FieldKind::Date | FieldKind::Dropdown { .. } => {
            input.to_string()
        }
    }
}

fn field_label(field: &FieldDescriptor) -> String {
    if field.required {
        format!("{} *", field.label)
    } else {
        field.label.clone()
    }
}

fn render_fields(f: &mut Frame, app: &App, area: Rect) {
    let label_width = app
        .schema
        .fields
        .iter()
        .map(|field| field_label(field).chars().count())
        .max()
        .unwrap_or(0) as u16;

    let rows: Vec<Row> = app
        .schema
        .fields
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let focused = index == app.focused_field && !matches!(app.mode, AppMode::Ledger);
            let editing = focused && matches!(app.mode, AppMode::Editing);

            let value = if editing {
                edit_buffer_display(field, &app.input)
            } else {
                display_value(field, app.values.get(&field.name))
            };
            let value_style = if editing {
                Style::default().fg(Color::Green)
            } else if focused {
                Style::default().bg(Color::Blue).fg(Color::White)
            } else if app.values.get(&field.name).is_none() && matches!(field.kind, FieldKind::Date) {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default()
            };
            let error = app.errors.get(&field.name).cloned().unwrap_or_default();

            Row::new(vec![
                Cell::from(field_label(field)).style(Style::default().fg(Color::Yellow)),
                Cell::from(value).style(value_style),
                Cell::from(error).style(Style::default().fg(Color::Red)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(label_width),
        Constraint::Length(VALUE_COLUMN_WIDTH),
        Constraint::Min(0),
    ];
    let table = Table::new(rows, widths)
        .block(Block::default().borders(Borders::ALL).title(app.schema.title.clone()))
        .column_spacing(1);
    f.render_widget(table, area);

    if matches!(app.mode, AppMode::Editing) {
        let offset = (app.cursor_position as u16).min(VALUE_COLUMN_WIDTH.saturating_sub(1));
        f.set_cursor_position((
            area.x + 1 + label_width + 1 + offset,
            area.y + 1 + app.focused_field as u16,
        ));
    }
}

fn render_progress(f: &mut Frame, app: &App, area: Rect) {
    let percent = app.progress_percent();
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Progress (Ctrl+S to submit)"))
        .gauge_style(Style::default().fg(Color::Green).bg(Color::Black))
        .percent(percent)
        .label(format!("{}%", percent));
    f.render_widget(gauge, area);
}

fn render_ledger(f: &mut Frame, app: &App, area: Rect) {
    let mut headers: Vec<Cell> = app
        .schema
        .fields
        .iter()
        .map(|field| Cell::from(field.label.clone()))
        .collect();
    headers.push(Cell::from("Actions"));
    let header_row = Row::new(headers).style(Style::default().fg(Color::Yellow)).height(1);

    let rows: Vec<Row> = app
        .ledger
        .entries()
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let mut cells: Vec<Cell> = app
                .schema
                .fields
                .iter()
                .map(|field| match entry.values.get(&field.name) {
                    Some(value) => Cell::from(display_value(field, Some(value))),
                    None => Cell::from(""),
                })
                .collect();
            cells.push(Cell::from("[e]dit [d]elete"));

            let style = if matches!(app.mode, AppMode::Ledger) && index == app.ledger_selected {
                Style::default().bg(Color::Blue).fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Row::new(cells).style(style).height(1)
        })
        .collect();

    let mut widths: Vec<Constraint> = app
        .schema
        .fields
        .iter()
        .map(|_| Constraint::Min(8))
        .collect();
    widths.push(Constraint::Length(15));

    let table = Table::new(rows, widths)
        .header(header_row)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Submitted ({}) - l: select", app.ledger.len())),
        )
        .column_spacing(1);
    f.render_widget(table, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let input_text = match app.mode {
        AppMode::Normal => {
            if let Some(ref status) = app.status_message {
                status.clone()
            } else {
                "↑↓: field | Enter: edit | ←→: option | Ctrl+S: submit | l: submissions | Ctrl+E: export CSV | ?: help | q: quit".to_string()
            }
        }
        AppMode::Editing => "Editing (Enter to save, Esc to cancel)".to_string(),
        AppMode::Ledger => {
            if let Some(ref status) = app.status_message {
                format!("{} | ↑↓: row | e: edit | d: delete | Esc: back", status)
            } else {
                "↑↓: row | e: edit | d: delete | Esc: back".to_string()
            }
        }
        AppMode::Help => "↑↓/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/q: close help".to_string(),
        AppMode::ExportCsv => format!("Export CSV as: {} (Enter to export, Esc to cancel)", app.filename_input),
    };

    let input = Paragraph::new(input_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            AppMode::Normal => Style::default(),
            AppMode::Editing => Style::default().fg(Color::Green),
            AppMode::Ledger => Style::default().fg(Color::Yellow),
            AppMode::Help => Style::default().fg(Color::Cyan),
            AppMode::ExportCsv => Style::default().fg(Color::Magenta),
        });
    f.render_widget(input, area);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_text = get_help_text();
    let help_lines: Vec<&str> = help_text.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(format!("dynform Help (Line {}/{})", start_line + 1, help_lines.len()))
            .style(Style::default().fg(Color::Cyan)))
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

fn get_help_text() -> &'static str {
    r#"DYNFORM REFERENCE

=== FORMS ===
Tab / Shift+Tab Switch form type (unsaved input is discarded)
↑↓ or k/j       Move between fields
Enter / F2      Edit the focused field
←→ (h for ←)    Pick the previous/next option of a dropdown
Backspace       Clear the focused field
Ctrl+S          Submit the form

Fields marked * are required. Progress shows the share of
required fields that hold a value; a form without required
fields is always complete.

=== EDITING ===
Enter           Save the value and move to the next field
Esc             Discard the change
←→ Home End     Move the cursor
Number fields store the typed text as a number when it parses.

=== SUBMISSIONS ===
l               Select a row of the submissions table
↑↓ or k/j       Move the selection
e               Load the row back into the form (it leaves the table
                until you submit again)
d               Delete the row
Esc             Back to the form

=== FILES ===
Ctrl+E          Export submissions of the current form type to CSV

=== HELP NAVIGATION ===
↑↓ or j/k       Scroll help text up/down one line
Page Up/Down    Scroll help text up/down 5 lines
Home            Jump to top of help text
Esc/F1/?/q      Close this help window

q               Quit (submissions are kept only for this session)"#
}
