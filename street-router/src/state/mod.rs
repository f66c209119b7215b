//! Path states and how they are derived.
//!
//! A [`PathState`] is an immutable snapshot of one candidate path. The
//! only way to get a new one from an existing one is a [`StateEditor`]
//! bound to that state and to the edge being crossed. States live in a
//! [`StateArena`], which hands out [`crate::domain::StateId`] handles and
//! keeps the back-references that form each path's history.

mod arena;
mod editor;
mod error;
mod path_state;

pub use arena::StateArena;
pub use editor::StateEditor;
pub use error::TraversalError;
pub use path_state::{BackRef, PathState, StateRef};
