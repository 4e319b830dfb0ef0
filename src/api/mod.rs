//! API endpoint handlers module
//!
//! Contains all HTTP endpoint handler implementations.

pub mod convert;
pub mod events;
pub mod health;

pub use events::handle_event;
