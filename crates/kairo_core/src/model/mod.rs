//! Domain model for the Kairo state tree.
//!
//! # Responsibility
//! - Define tasks, settings, notifications, messages and the root state.
//! - Decode persisted records tolerantly, encode them canonically.
//!
//! # Invariants
//! - Enum-like fields are closed enums; free-form strings never reach state.

pub mod inbox;
pub(crate) mod lenient;
pub mod settings;
pub mod state;
pub mod task;

pub use lenient::parse_iso_date;
