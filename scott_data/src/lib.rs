//! Shared game model for Scott Adams adventures.

pub mod defs;
pub mod validate;

pub use defs::*;
pub use validate::{ValidationError, validate_game};
