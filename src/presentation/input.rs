use super::views::{ElementId, HitMap};
use crate::application::{App, AppMode};
use crate::domain::{Intent, ItemId};
use crate::infrastructure::FileRepository;
use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use std::path::Path;

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match app.mode {
            AppMode::Normal => Self::handle_normal_mode(app, key, modifiers),
            AppMode::Help => Self::handle_help_mode(app, key),
            AppMode::ExportCsv => Self::handle_filename_input_mode(app, key),
        }
    }

    /// Resolves a left click through the last frame's hit map.
    pub fn handle_mouse_event(app: &mut App, event: MouseEvent, hits: &HitMap) {
        if app.mode != AppMode::Normal {
            return;
        }
        if !matches!(event.kind, MouseEventKind::Down(MouseButton::Left)) {
            return;
        }

        let Some(element) = hits.element_at(event.column, event.row) else {
            return;
        };

        app.clear_status();
        if let ElementId::CartItem(id) = element {
            app.select_id(id);
        } else if let Some(intent) = element.intent() {
            if let Some(id) = intent_target(intent) {
                app.select_id(id);
            }
            app.dispatch(intent);
        }
    }

    fn handle_normal_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            if let KeyCode::Char('e') = key {
                app.start_csv_export();
            }
            return;
        }

        app.clear_status();

        match key {
            KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => app.select_next(),
            KeyCode::Char('+') | KeyCode::Char('=') => {
                if let Some(id) = app.selected_id() {
                    app.dispatch(Intent::Increment(id));
                }
            }
            KeyCode::Char('-') => {
                if let Some(id) = app.selected_id() {
                    app.dispatch(Intent::Decrement(id));
                }
            }
            KeyCode::Char('x') | KeyCode::Delete => {
                if let Some(id) = app.selected_id() {
                    app.dispatch(Intent::RemoveItem(id));
                }
            }
            KeyCode::Char('C') => app.dispatch(Intent::ClearCart),
            KeyCode::F(1) | KeyCode::Char('?') => app.show_help(),
            KeyCode::Char('q') => {
                // Will be handled by main loop
            }
            _ => {}
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.close_help();
                return;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                app.help_scroll = app.help_scroll.saturating_sub(1);
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
            _ => return,
        }
        app.request_redraw();
    }

    fn handle_filename_input_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => {
                let filename = app.get_csv_export_filename();
                let result = FileRepository::export_csv(app.store.state(), Path::new(&filename));
                app.set_csv_export_result(result);
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

fn intent_target(intent: Intent) -> Option<ItemId> {
    match intent {
        Intent::Increment(id) | Intent::Decrement(id) => Some(id),
        Intent::RemoveItem(_) | Intent::ClearCart => None,
    }
}
