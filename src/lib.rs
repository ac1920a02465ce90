//! TCART - Terminal Shopping Cart Library
//!
//! A terminal shopping cart built in Rust: a reducer-driven cart store with
//! derived totals, observer subscriptions and ratatui views.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
