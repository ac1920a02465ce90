//! Application state management for the terminal cart.
//!
//! This module contains the main application state and mode management
//! for the terminal user interface.

use super::store::{CartStore, Field};
use crate::domain::{AppResult, Intent, ItemId, LineItem};
use std::cell::Cell;
use std::rc::Rc;

/// Represents the current mode of the application.
///
/// The mode determines how keyboard input is interpreted and which
/// overlays are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Cart navigation, intents and shortcuts
    Normal,
    /// Help screen is displayed
    Help,
    /// CSV export dialog is open
    ExportCsv,
}

/// Main application state: the cart store plus UI state.
///
/// The store is owned here and passed by reference to the views and the
/// input handler. The app subscribes to every cart field so any change
/// schedules a redraw.
///
/// # Examples
///
/// ```
/// use tcart::application::{App, CartStore};
/// use tcart::domain::Intent;
///
/// let mut app = App::new(CartStore::default(), "$");
/// app.dispatch(Intent::Increment(1));
/// assert_eq!(app.store.state().amount(), 4);
/// ```
#[derive(Debug)]
pub struct App {
    /// The cart store
    pub store: CartStore,
    /// Currency symbol shown before money values
    pub currency: String,
    /// Index of the highlighted row in the item list
    pub selected: usize,
    /// Current application mode
    pub mode: AppMode,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// Temporary status message to display
    pub status_message: Option<String>,
    /// Input buffer for filename entry
    pub filename_input: String,
    /// Cursor position within the filename buffer
    pub cursor_position: usize,
    redraw: Rc<Cell<bool>>,
}

impl Default for App {
    fn default() -> Self {
        Self::new(CartStore::default(), "$")
    }
}

impl App {
    pub fn new(mut store: CartStore, currency: impl Into<String>) -> Self {
        let redraw = Rc::new(Cell::new(true));
        for field in Field::ALL {
            let redraw = Rc::clone(&redraw);
            store.subscribe(field, move |_| redraw.set(true));
        }

        Self {
            store,
            currency: currency.into(),
            selected: 0,
            mode: AppMode::Normal,
            help_scroll: 0,
            status_message: None,
            filename_input: String::new(),
            cursor_position: 0,
            redraw,
        }
    }

    /// Submits an intent to the store and keeps the selection in range.
    pub fn dispatch(&mut self, intent: Intent) {
        self.store.dispatch(intent);
        self.clamp_selection();
    }

    /// Returns and resets the pending-redraw flag.
    pub fn take_redraw(&mut self) -> bool {
        self.redraw.replace(false)
    }

    pub fn request_redraw(&self) {
        self.redraw.set(true);
    }

    pub fn selected_item(&self) -> Option<&LineItem> {
        self.store.state().items().get(self.selected)
    }

    pub fn selected_id(&self) -> Option<ItemId> {
        self.selected_item().map(|item| item.id)
    }

    /// Highlights the row showing the given item, if it is still in the cart.
    pub fn select_id(&mut self, id: ItemId) {
        if let Some(idx) = self.store.state().items().iter().position(|item| item.id == id) {
            self.selected = idx;
            self.request_redraw();
        }
    }

    pub fn select_next(&mut self) {
        let len = self.store.state().items().len();
        if self.selected + 1 < len {
            self.selected += 1;
            self.request_redraw();
        }
    }

    pub fn select_previous(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.request_redraw();
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.store.state().items().len();
        let clamped = self.selected.min(len.saturating_sub(1));
        if clamped != self.selected {
            self.selected = clamped;
            self.request_redraw();
        }
    }

    pub fn show_help(&mut self) {
        self.mode = AppMode::Help;
        self.help_scroll = 0;
        self.request_redraw();
    }

    pub fn close_help(&mut self) {
        self.mode = AppMode::Normal;
        self.request_redraw();
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.request_redraw();
    }

    pub fn clear_status(&mut self) {
        if self.status_message.take().is_some() {
            self.request_redraw();
        }
    }

    /// Switches to CSV export mode to prompt for a filename.
    pub fn start_csv_export(&mut self) {
        self.mode = AppMode::ExportCsv;
        self.filename_input = "cart.csv".to_string();
        self.cursor_position = self.filename_input.len();
        self.status_message = None;
        self.request_redraw();
    }

    /// Returns the filename input if not empty, otherwise the default.
    pub fn get_csv_export_filename(&self) -> String {
        if self.filename_input.is_empty() {
            "cart.csv".to_string()
        } else {
            self.filename_input.clone()
        }
    }

    /// Cancels filename input and returns to normal mode.
    pub fn cancel_filename_input(&mut self) {
        self.mode = AppMode::Normal;
        self.filename_input.clear();
        self.cursor_position = 0;
        self.request_redraw();
    }

    /// Processes the result of a CSV export and returns to normal mode.
    pub fn set_csv_export_result(&mut self, result: AppResult<String>) {
        match result {
            Ok(filename) => {
                self.status_message = Some(format!("Exported to {}", filename));
            }
            Err(error) => {
                tracing::warn!(%error, "export failed");
                self.status_message = Some(format!("Export failed: {}", error));
            }
        }

        self.mode = AppMode::Normal;
        self.filename_input.clear();
        self.cursor_position = 0;
        self.request_redraw();
    }

    /// Inserts a character at the cursor in the filename buffer.
    pub fn insert_char(&mut self, c: char) {
        self.filename_input.insert(self.cursor_position, c);
        self.cursor_position += c.len_utf8();
        self.request_redraw();
    }

    pub fn delete_char_before_cursor(&mut self) {
        if let Some(c) = self.filename_input[..self.cursor_position].chars().next_back() {
            self.cursor_position -= c.len_utf8();
            self.filename_input.remove(self.cursor_position);
            self.request_redraw();
        }
    }

    pub fn delete_char_at_cursor(&mut self) {
        if self.cursor_position < self.filename_input.len() {
            self.filename_input.remove(self.cursor_position);
            self.request_redraw();
        }
    }

    pub fn move_cursor_left(&mut self) {
        if let Some(c) = self.filename_input[..self.cursor_position].chars().next_back() {
            self.cursor_position -= c.len_utf8();
            self.request_redraw();
        }
    }

    pub fn move_cursor_right(&mut self) {
        if let Some(c) = self.filename_input[self.cursor_position..].chars().next() {
            self.cursor_position += c.len_utf8();
            self.request_redraw();
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_position = 0;
        self.request_redraw();
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_position = self.filename_input.len();
        self.request_redraw();
    }
}
