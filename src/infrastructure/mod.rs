//! Infrastructure layer providing external service integrations.
//!
//! File I/O for catalogs, action scripts and CSV export, plus command-line
//! configuration and log setup.

pub mod config;
pub mod logging;
pub mod persistence;

pub use config::*;
pub use logging::*;
pub use persistence::*;
