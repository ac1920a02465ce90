//! Presentation layer handling terminal UI and user input.
//!
//! This module renders the cart views with ratatui, turns keyboard and
//! mouse input into intents, and formats the plain-text cart summary used
//! by the headless mode.

pub mod ui;
pub mod input;
pub mod text;
pub mod views;

pub use ui::*;
pub use input::*;
pub use text::*;
pub use views::*;
