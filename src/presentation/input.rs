use crate::application::{App, AppMode};
use crate::infrastructure::CsvExporter;
use crossterm::event::{KeyCode, KeyModifiers};
use std::path::Path;

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match app.mode {
            AppMode::Normal => Self::handle_normal_mode(app, key, modifiers),
            AppMode::Editing => Self::handle_editing_mode(app, key, modifiers),
            AppMode::Ledger => Self::handle_ledger_mode(app, key),
            AppMode::Help => Self::handle_help_mode(app, key),
            AppMode::ExportCsv => Self::handle_export_mode(app, key),
        }
    }

    fn handle_normal_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            match key {
                KeyCode::Char('s') => {
                    app.submit_form();
                    return;
                }
                KeyCode::Char('e') => {
                    app.start_csv_export();
                    return;
                }
                _ => {}
            }
        }

        app.status_message = None;

        match key {
            KeyCode::Tab => app.cycle_form_type(true),
            KeyCode::BackTab => app.cycle_form_type(false),
            KeyCode::Up | KeyCode::Char('k') => app.focus_previous(),
            KeyCode::Down | KeyCode::Char('j') => app.focus_next(),
            KeyCode::Left | KeyCode::Char('h') => app.cycle_dropdown(false),
            KeyCode::Right => app.cycle_dropdown(true),
            KeyCode::Enter | KeyCode::F(2) => app.start_editing(),
            KeyCode::Backspace | KeyCode::Delete => app.clear_focused_field(),
            KeyCode::Char('l') => app.start_ledger(),
            KeyCode::F(1) | KeyCode::Char('?') => {
                app.mode = AppMode::Help;
                app.help_scroll = 0;
            }
            KeyCode::Char('q') => {
                // Will be handled by main loop
            }
            _ => {}
        }
    }

    fn handle_editing_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            if key == KeyCode::Char('s') {
                app.finish_editing();
                app.submit_form();
            }
            return;
        }

        match key {
            KeyCode::Enter => app.finish_editing(),
            KeyCode::Esc => app.cancel_editing(),
            KeyCode::Backspace => app.delete_char_before_cursor(),
            KeyCode::Delete => app.delete_char_at_cursor(),
            KeyCode::Left => app.move_cursor_left(),
            KeyCode::Right => app.move_cursor_right(),
            KeyCode::Home => app.move_cursor_home(),
            KeyCode::End => app.move_cursor_end(),
            KeyCode::Char(c) => app.insert_char(c),
            _ => {}
        }
    }

    fn handle_ledger_mode(app: &mut App, key: KeyCode) {
        app.status_message = None;
        match key {
            KeyCode::Up | KeyCode::Char('k') => app.ledger_previous(),
            KeyCode::Down | KeyCode::Char('j') => app.ledger_next(),
            KeyCode::Char('e') | KeyCode::Enter => app.edit_selected_entry(),
            KeyCode::Char('d') | KeyCode::Delete => app.delete_selected_entry(),
            KeyCode::Esc | KeyCode::Char('l') | KeyCode::Char('q') => app.leave_ledger(),
            _ => {}
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.mode = AppMode::Normal;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if app.help_scroll > 0 {
                    app.help_scroll -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll += 1;
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll += 5;
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }

    fn handle_export_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => {
                let filename = app.get_export_filename();
                let result = CsvExporter::export_to_csv(&app.schema, &app.ledger, Path::new(&filename))
                    .map_err(|err| err.to_string());
                app.set_csv_export_result(&filename, result);
            }
            KeyCode::Esc => app.cancel_filename_input(),
            KeyCode::Backspace => app.delete_char_before_cursor(),
            KeyCode::Delete => app.delete_char_at_cursor(),
            KeyCode::Left => app.move_cursor_left(),
            KeyCode::Right => app.move_cursor_right(),
            KeyCode::Home => app.move_cursor_home(),
            KeyCode::End => app.move_cursor_end(),
            KeyCode::Char(c) => app.insert_char(c),
            _ => {}
        }
    }
}
