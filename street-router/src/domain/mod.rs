//! Core value types shared by every layer of the router.
//!
//! Modes, search direction and the index handles used to address
//! vertices, edges and path states.

mod direction;
mod ids;
mod mode;

pub use direction::SearchDirection;
pub use ids::{EdgeId, EdgeKind, StateId, VertexId};
pub use mode::{StreetMode, TraverseMode};
