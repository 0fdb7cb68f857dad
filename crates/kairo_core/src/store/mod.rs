//! State container: actions, reducer, persistence hook.
//!
//! # Responsibility
//! - Hold the single `AppState` and apply actions synchronously.
//! - Mirror changed slices to key-value storage after each reduce.
//!
//! # Invariants
//! - Replaying one action sequence from one initial state yields equal states.
//! - Unrecognized actions leave state unchanged.

pub mod action;
pub mod dispatch;
pub mod persistence;
pub mod reducer;
pub mod slice;

pub use action::Action;
pub use dispatch::{ListenerId, Store};
pub use persistence::{PersistError, PersistedState, PersistenceAdapter};
pub use reducer::reduce;
pub use slice::{changed_slices, Slice};
