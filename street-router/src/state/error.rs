//! Contract violations raised by the traversal machinery.
//!
//! "No way through" is not an error: edges report it as an empty result.
//! Everything here means a caller or an edge broke the contract, and the
//! search must not carry on as if the edge were simply infeasible.

use crate::domain::{EdgeId, StateId, VertexId};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TraversalError {
    /// The state is not at the vertex the edge is entered from
    #[error("state {state} is at {actual} but edge {edge} is entered from {expected}")]
    WrongVertex {
        state: StateId,
        edge: EdgeId,
        expected: VertexId,
        actual: VertexId,
    },

    /// No state with this handle exists in the arena
    #[error("unknown state {0}")]
    UnknownState(StateId),

    /// The state belongs to a different search request
    #[error("state was produced by a different search")]
    ForeignState,

    /// A child state does not point back to an earlier state
    #[error("state does not point back to an earlier state of this search")]
    DanglingBackReference,

    /// Weight increments must be finite and non-negative
    #[error("weight increment must be finite and non-negative, got {0}")]
    InvalidWeightIncrement(f64),

    /// An edge's travel time does not fit the state clock
    #[error("edge {edge} takes {seconds} s, which is out of range")]
    TravelTimeOutOfRange { edge: EdgeId, seconds: f64 },

    /// Mode and vehicle flags contradict each other
    #[error("inconsistent state flags: {0}")]
    InconsistentFlags(&'static str),
}
