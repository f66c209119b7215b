//! Directed edges and the traversal contract.
//!
//! Every edge kind implements [`Edge::traverse`]: given a state at the
//! edge's entry vertex (the `from` vertex in a depart-at search, the `to`
//! vertex in an arrive-by search) it returns the states reachable by
//! crossing it.
//!
//! - `Ok(vec![])` means the edge cannot be crossed from this state. This is
//!   an ordinary outcome, not a failure.
//! - `Ok` with one state is the usual case.
//! - `Ok` with several states means the edge offers several distinct
//!   continuations.
//! - `Err` is reserved for contract violations (see [`TraversalError`]).
//!
//! Traversal reads the state, the edge and the facilities it refers to. It
//! never modifies any of them, so sibling edges can be traversed in any
//! order or in parallel with identical results.

mod parking;
mod parking_link;
mod rental;
mod street;

#[cfg(test)]
pub(crate) mod testing;

use std::fmt;

use geo::LineString;

use crate::domain::{EdgeId, EdgeKind, VertexId};
use crate::state::{PathState, StateRef};

pub use crate::state::TraversalError;
pub use parking::VehicleParkingEdge;
pub use parking_link::StreetVehicleParkingLink;
pub use rental::VehicleRentalEdge;
pub use street::{StreetEdge, StreetPermission};

/// The outcome of crossing one edge from one state.
pub type TraversalResult = Result<Vec<PathState>, TraversalError>;

/// A directed edge of the search graph.
pub trait Edge: fmt::Debug + Send + Sync {
    fn id(&self) -> EdgeId;

    fn kind(&self) -> EdgeKind {
        EdgeKind::Other
    }

    fn from_vertex(&self) -> VertexId;

    fn to_vertex(&self) -> VertexId;

    /// Cross the edge from `s0`.
    fn traverse(&self, s0: StateRef<'_>) -> TraversalResult;

    fn name(&self) -> &str;

    fn geometry(&self) -> Option<&LineString<f64>> {
        None
    }

    fn distance_meters(&self) -> f64 {
        0.0
    }
}
