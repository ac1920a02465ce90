//! Application layer managing state and user workflows.
//!
//! This module owns the cart store, coordinates between the domain layer
//! and the presentation layer, and replays scripted actions.

pub mod state;
pub mod store;
pub mod replay;

pub use state::*;
pub use store::*;
pub use replay::*;
