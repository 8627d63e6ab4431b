//! Application state management for the dynamic form.
//!
//! [`App`] owns the active schema, the in-progress values, the validation
//! errors, the derived progress and the submission ledger. Every operation
//! runs to completion on `&mut self`, so callers never observe a half-applied
//! submit or edit.

use crate::application::ledger::{LedgerEntry, SubmissionLedger};
use crate::domain::{
    compute_errors, compute_progress, rounded_progress, DomainError, DomainResult, ErrorMap,
    FieldDescriptor, FieldKind, FieldValue, FormValues, Schema, SchemaRegistry,
};
use log::{debug, info, warn};
use std::fmt;

pub const DEFAULT_FORM_TYPE: &str = "userInfo";
pub const DEFAULT_EXPORT_FILENAME: &str = "submissions.csv";

/// Represents the current mode of the application.
///
/// The mode decides how key presses are interpreted and which hints the
/// status bar shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Moving between fields, switching form type, submitting
    Normal,
    /// Typing into the focused field
    Editing,
    /// Selecting a row of the submissions table
    Ledger,
    /// Help screen is displayed
    Help,
    /// CSV export dialog is open
    ExportCsv,
}

/// User-facing confirmation raised by a successful submit or delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    Submitted,
    Deleted,
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notification::Submitted => write!(f, "Form submitted successfully!"),
            Notification::Deleted => write!(f, "Entry deleted successfully."),
        }
    }
}

/// Main application state containing the form, its ledger and UI state.
///
/// # Examples
///
/// ```
/// use dynform::application::App;
/// use dynform::domain::FieldValue;
///
/// let mut app = App::default();
/// app.set_field_value("firstName", FieldValue::from("Ada")).unwrap();
/// assert_eq!(app.progress, 50.0);
///
/// app.set_field_value("lastName", FieldValue::from("Lovelace")).unwrap();
/// assert!(app.submit().is_ok());
/// assert_eq!(app.ledger.len(), 1);
/// assert!(app.values.is_empty());
/// ```
#[derive(Debug)]
pub struct App {
    /// Every form type the selector offers
    pub registry: SchemaRegistry,
    /// The currently active schema
    pub schema: Schema,
    /// In-progress values for the active schema
    pub values: FormValues,
    /// Errors from the last failed submit attempt
    pub errors: ErrorMap,
    /// Percentage of required fields filled, in `[0, 100]`
    pub progress: f64,
    /// Previously submitted records
    pub ledger: SubmissionLedger,
    /// Confirmations raised so far, oldest first
    pub notifications: Vec<Notification>,
    /// Current application mode
    pub mode: AppMode,
    /// Index of the focused field in the active schema
    pub focused_field: usize,
    /// Edit buffer for the focused field
    pub input: String,
    /// Cursor position within the edit buffer, in characters
    pub cursor_position: usize,
    /// Selected row of the submissions table
    pub ledger_selected: usize,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// Temporary status message to display
    pub status_message: Option<String>,
    /// Input buffer for filename entry
    pub filename_input: String,
    /// Filename proposed when exporting
    pub export_filename: String,
}

impl Default for App {
    fn default() -> Self {
        let registry = SchemaRegistry::builtin();
        let schema = registry
            .lookup(DEFAULT_FORM_TYPE)
            .cloned()
            .unwrap_or_else(|_| registry.first().clone());
        Self::with_schema(registry, schema)
    }
}

impl App {
    /// Creates the application with `form_type` selected.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::UnknownFormType`] when the registry has no such
    /// form type.
    pub fn new(registry: SchemaRegistry, form_type: &str) -> DomainResult<Self> {
        let schema = registry.lookup(form_type)?.clone();
        Ok(Self::with_schema(registry, schema))
    }

    fn with_schema(registry: SchemaRegistry, schema: Schema) -> Self {
        Self {
            registry,
            schema,
            values: FormValues::new(),
            errors: ErrorMap::new(),
            progress: 0.0,
            ledger: SubmissionLedger::new(),
            notifications: Vec::new(),
            mode: AppMode::Normal,
            focused_field: 0,
            input: String::new(),
            cursor_position: 0,
            ledger_selected: 0,
            help_scroll: 0,
            status_message: None,
            filename_input: String::new(),
            export_filename: DEFAULT_EXPORT_FILENAME.to_string(),
        }
    }

    pub fn with_export_filename(mut self, filename: &str) -> Self {
        self.export_filename = filename.to_string();
        self
    }

    /// Makes `form_type` the active schema and discards all unsaved input.
    ///
    /// On an unknown key nothing changes and the error is returned.
    pub fn select_form_type(&mut self, form_type: &str) -> DomainResult<()> {
        let schema = match self.registry.lookup(form_type) {
            Ok(schema) => schema.clone(),
            Err(err) => {
                warn!("rejected form type change: {}", err);
                return Err(err);
            }
        };

        info!("form type changed from {} to {}", self.schema.key, schema.key);
        self.schema = schema;
        self.reset_form();
        self.focused_field = 0;
        self.discard_edit_buffer();
        if self.mode == AppMode::Editing {
            self.mode = AppMode::Normal;
        }
        Ok(())
    }

    /// Merges `value` into the form values and recomputes progress.
    ///
    /// Names outside the active schema are rejected without changing state.
    pub fn set_field_value(&mut self, name: &str, value: FieldValue) -> DomainResult<()> {
        if !self.schema.contains_field(name) {
            let err = DomainError::UnknownField {
                form_type: self.schema.key.clone(),
                field: name.to_string(),
            };
            warn!("rejected field update: {}", err);
            return Err(err);
        }

        self.values.insert(name.to_string(), value);
        self.recompute_progress();
        debug!("{}.{} updated, progress {:.1}%", self.schema.key, name, self.progress);
        Ok(())
    }

    fn recompute_progress(&mut self) {
        self.progress = compute_progress(&self.schema, &self.values);
    }

    /// Checks the ledger entry at `index` out into the form.
    ///
    /// The entry leaves the ledger, its values replace the current ones, the
    /// error map is cleared and progress is recomputed from the loaded values.
    /// An entry submitted under another form type switches the active schema
    /// to that form type first.
    pub fn load_for_edit(&mut self, index: usize) -> DomainResult<()> {
        let Some(entry) = self.ledger.get(index) else {
            return Err(DomainError::LedgerIndexOutOfRange { index, len: self.ledger.len() });
        };
        let form_type = entry.form_type.clone();
        let schema = if form_type == self.schema.key {
            None
        } else {
            Some(self.registry.lookup(&form_type)?.clone())
        };

        let entry = self.ledger.remove(index)?;
        if let Some(schema) = schema {
            self.schema = schema;
        }
        self.values = entry.values;
        self.errors.clear();
        self.recompute_progress();
        self.focused_field = 0;
        self.discard_edit_buffer();
        self.clamp_ledger_selection();
        info!("ledger entry {} loaded for editing into {}", entry.id, self.schema.key);
        Ok(())
    }

    /// Clears values, errors and progress.
    pub fn reset_form(&mut self) {
        self.values.clear();
        self.errors.clear();
        self.progress = 0.0;
    }

    /// Validates the form and, when every required field is present, appends
    /// it to the ledger and resets the form.
    ///
    /// On failure the errors are stored and returned, and the ledger, values
    /// and progress are left as they were.
    pub fn submit(&mut self) -> Result<u64, ErrorMap> {
        let errors = compute_errors(&self.schema, &self.values);
        if !errors.is_empty() {
            warn!("submit of {} rejected: {} required field(s) missing", self.schema.key, errors.len());
            self.errors = errors.clone();
            return Err(errors);
        }

        let values = std::mem::take(&mut self.values);
        let id = self.ledger.append(&self.schema.key, values);
        self.reset_form();
        self.notify(Notification::Submitted);
        info!("{} submitted as ledger entry {}", self.schema.key, id);
        Ok(id)
    }

    /// Removes the ledger entry at `index`; nothing else changes.
    pub fn delete_entry(&mut self, index: usize) -> DomainResult<LedgerEntry> {
        let entry = self.ledger.remove(index)?;
        self.clamp_ledger_selection();
        self.notify(Notification::Deleted);
        info!("ledger entry {} deleted", entry.id);
        Ok(entry)
    }

    fn notify(&mut self, notification: Notification) {
        self.status_message = Some(notification.to_string());
        self.notifications.push(notification);
    }

    pub fn progress_percent(&self) -> u16 {
        rounded_progress(self.progress)
    }

    pub fn focused_descriptor(&self) -> Option<&FieldDescriptor> {
        self.schema.fields.get(self.focused_field)
    }

    pub fn focus_next(&mut self) {
        let len = self.schema.fields.len();
        if len > 0 {
            self.focused_field = (self.focused_field + 1) % len;
        }
    }

    pub fn focus_previous(&mut self) {
        let len = self.schema.fields.len();
        if len > 0 {
            self.focused_field = (self.focused_field + len - 1) % len;
        }
    }

    /// Selects the next (or previous) form type in registry order.
    pub fn cycle_form_type(&mut self, forward: bool) {
        let key = self.registry.cycle_key(&self.schema.key, forward).to_string();
        if let Err(err) = self.select_form_type(&key) {
            self.status_message = Some(err.to_string());
        }
    }

    /// Starts editing the focused field.
    ///
    /// Dropdowns have no free-form input, so they advance to the next option
    /// instead.
    pub fn start_editing(&mut self) {
        let Some(field) = self.focused_descriptor() else {
            return;
        };
        if matches!(field.kind, FieldKind::Dropdown { .. }) {
            self.cycle_dropdown(true);
            return;
        }

        self.input = self
            .values
            .get(&field.name)
            .map(|value| value.to_string())
            .unwrap_or_default();
        self.cursor_position = self.input.chars().count();
        self.mode = AppMode::Editing;
        self.status_message = None;
    }

    /// Stores the edit buffer into the focused field and moves focus down.
    pub fn finish_editing(&mut self) {
        if let Some(field) = self.focused_descriptor().cloned() {
            let value = FieldValue::from_input(&field.kind, &self.input);
            if let Err(err) = self.set_field_value(&field.name, value) {
                self.status_message = Some(err.to_string());
            }
        }

        if self.focused_field + 1 < self.schema.fields.len() {
            self.focused_field += 1;
        }
        self.mode = AppMode::Normal;
        self.discard_edit_buffer();
    }

    pub fn cancel_editing(&mut self) {
        self.mode = AppMode::Normal;
        self.discard_edit_buffer();
    }

    fn discard_edit_buffer(&mut self) {
        self.input.clear();
        self.cursor_position = 0;
    }

    /// Moves the focused dropdown to its next (or previous) option.
    ///
    /// The cycle passes through "nothing selected" between the last and the
    /// first option.
    pub fn cycle_dropdown(&mut self, forward: bool) {
        let Some(field) = self.focused_descriptor() else {
            return;
        };
        let FieldKind::Dropdown { options } = &field.kind else {
            return;
        };

        let current = self
            .values
            .get(&field.name)
            .and_then(FieldValue::as_text)
            .and_then(|text| options.iter().position(|option| option == text));
        let next = match (current, forward) {
            (None, true) => Some(0),
            (None, false) => options.len().checked_sub(1),
            (Some(index), true) if index + 1 < options.len() => Some(index + 1),
            (Some(index), false) if index > 0 => Some(index - 1),
            (Some(_), _) => None,
        };

        let name = field.name.clone();
        let value = next
            .and_then(|index| options.get(index))
            .map(|option| FieldValue::from(option.as_str()))
            .unwrap_or_else(|| FieldValue::from(""));
        if let Err(err) = self.set_field_value(&name, value) {
            self.status_message = Some(err.to_string());
        }
    }

    pub fn clear_focused_field(&mut self) {
        if let Some(name) = self.focused_descriptor().map(|field| field.name.clone()) {
            if let Err(err) = self.set_field_value(&name, FieldValue::from("")) {
                self.status_message = Some(err.to_string());
            }
        }
    }

    /// Submits the form, reporting the outcome in the status bar.
    pub fn submit_form(&mut self) {
        if let Err(errors) = self.submit() {
            self.status_message = Some(format!(
                "{} required field(s) missing",
                errors.len()
            ));
        }
    }

    /// Switches to ledger mode so a submitted row can be edited or deleted.
    pub fn start_ledger(&mut self) {
        if self.ledger.is_empty() {
            self.status_message = Some("No submitted entries".to_string());
            return;
        }
        self.clamp_ledger_selection();
        self.mode = AppMode::Ledger;
        self.status_message = None;
    }

    pub fn leave_ledger(&mut self) {
        self.mode = AppMode::Normal;
    }

    pub fn ledger_next(&mut self) {
        if self.ledger_selected + 1 < self.ledger.len() {
            self.ledger_selected += 1;
        }
    }

    pub fn ledger_previous(&mut self) {
        self.ledger_selected = self.ledger_selected.saturating_sub(1);
    }

    pub fn edit_selected_entry(&mut self) {
        match self.load_for_edit(self.ledger_selected) {
            Ok(()) => {
                self.mode = AppMode::Normal;
                self.status_message = Some("Entry loaded for editing".to_string());
            }
            Err(err) => self.status_message = Some(err.to_string()),
        }
    }

    pub fn delete_selected_entry(&mut self) {
        if let Err(err) = self.delete_entry(self.ledger_selected) {
            self.status_message = Some(err.to_string());
        }
        if self.ledger.is_empty() {
            self.mode = AppMode::Normal;
        }
    }

    fn clamp_ledger_selection(&mut self) {
        self.ledger_selected = self.ledger_selected.min(self.ledger.len().saturating_sub(1));
    }

    /// Switches to CSV export mode to prompt for a filename.
    pub fn start_csv_export(&mut self) {
        self.mode = AppMode::ExportCsv;
        self.filename_input = self.export_filename.clone();
        self.cursor_position = self.filename_input.chars().count();
        self.status_message = None;
    }

    /// Returns the filename input if not empty, otherwise the default.
    pub fn get_export_filename(&self) -> String {
        if self.filename_input.is_empty() {
            self.export_filename.clone()
        } else {
            self.filename_input.clone()
        }
    }

    /// Processes the result of a CSV export: the number of rows written or
    /// an error message.
    pub fn set_csv_export_result(&mut self, filename: &str, result: Result<usize, String>) {
        match result {
            Ok(rows) => {
                self.export_filename = filename.to_string();
                self.status_message = Some(format!("Exported {} row(s) to {}", rows, filename));
            }
            Err(error) => {
                self.status_message = Some(format!("Export failed: {}", error));
            }
        }

        self.mode = AppMode::Normal;
        self.filename_input.clear();
        self.cursor_position = 0;
    }

    pub fn cancel_filename_input(&mut self) {
        self.mode = AppMode::Normal;
        self.filename_input.clear();
        self.cursor_position = 0;
    }

    /// The buffer keys are typed into in the current mode.
    fn active_buffer(&mut self) -> Option<&mut String> {
        match self.mode {
            AppMode::Editing => Some(&mut self.input),
            AppMode::ExportCsv => Some(&mut self.filename_input),
            AppMode::Normal | AppMode::Ledger | AppMode::Help => None,
        }
    }

    pub fn insert_char(&mut self, c: char) {
        let position = self.cursor_position;
        if let Some(buffer) = self.active_buffer() {
            let at = byte_offset(buffer, position);
            buffer.insert(at, c);
            self.cursor_position += 1;
        }
    }

    pub fn delete_char_before_cursor(&mut self) {
        let position = self.cursor_position;
        if position == 0 {
            return;
        }
        if let Some(buffer) = self.active_buffer() {
            let at = byte_offset(buffer, position - 1);
            buffer.remove(at);
            self.cursor_position -= 1;
        }
    }

    pub fn delete_char_at_cursor(&mut self) {
        let position = self.cursor_position;
        if let Some(buffer) = self.active_buffer() {
            if position < buffer.chars().count() {
                let at = byte_offset(buffer, position);
                buffer.remove(at);
            }
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        let len = self.active_buffer().map(|buffer| buffer.chars().count()).unwrap_or(0);
        if self.cursor_position < len {
            self.cursor_position += 1;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_position = self.active_buffer().map(|buffer| buffer.chars().count()).unwrap_or(0);
    }
}

fn byte_offset(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map(|(offset, _)| offset)
        .unwrap_or(text.len())
}
