//! Immutable snapshots of a candidate path.

use std::ops::Deref;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use super::{StateEditor, TraversalError};
use crate::domain::{EdgeId, EdgeKind, SearchDirection, StateId, TraverseMode, VertexId};
use crate::edge::Edge;
use crate::request::{RoutingPreferences, StreetSearchRequest};

/// How a state was reached: the previous state and the edge crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackRef {
    pub state: StateId,
    pub edge: EdgeId,
    pub kind: EdgeKind,
}

/// A partial path ending at one vertex.
///
/// States are never modified after creation. New states come from
/// [`StateEditor`] or from the initial-state constructors on
/// [`super::StateArena`].
#[derive(Debug, Clone)]
pub struct PathState {
    pub(super) vertex: VertexId,
    pub(super) weight: f64,
    /// Seconds relative to the request start time. Negative in arrive-by
    /// searches.
    pub(super) time_offset: i64,
    pub(super) mode: TraverseMode,
    pub(super) vehicle_parked: bool,
    pub(super) renting_vehicle: bool,
    pub(super) request: Arc<StreetSearchRequest>,
    pub(super) back: Option<BackRef>,
}

impl PathState {
    pub(super) fn root(
        vertex: VertexId,
        request: Arc<StreetSearchRequest>,
        mode: TraverseMode,
        vehicle_parked: bool,
        renting_vehicle: bool,
    ) -> Result<Self, TraversalError> {
        check_flags(mode, vehicle_parked, renting_vehicle)?;
        Ok(Self {
            vertex,
            weight: 0.0,
            time_offset: 0,
            mode,
            vehicle_parked,
            renting_vehicle,
            request,
            back: None,
        })
    }

    pub fn vertex(&self) -> VertexId {
        self.vertex
    }

    /// Accumulated generalized cost.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn time_offset_seconds(&self) -> i64 {
        self.time_offset
    }

    /// Seconds travelled since the search started, whatever its direction.
    pub fn elapsed_seconds(&self) -> u64 {
        self.time_offset.unsigned_abs()
    }

    /// Wall-clock time at this state.
    pub fn time(&self) -> DateTime<Utc> {
        self.request.start_time() + Duration::seconds(self.time_offset)
    }

    pub fn non_transit_mode(&self) -> TraverseMode {
        self.mode
    }

    pub fn is_vehicle_parked(&self) -> bool {
        self.vehicle_parked
    }

    pub fn is_renting_vehicle(&self) -> bool {
        self.renting_vehicle
    }

    pub fn wheelchair(&self) -> bool {
        self.request.wheelchair()
    }

    pub fn request(&self) -> &StreetSearchRequest {
        &self.request
    }

    pub fn preferences(&self) -> &RoutingPreferences {
        self.request.preferences()
    }

    pub fn search_direction(&self) -> SearchDirection {
        self.request.search_direction()
    }

    pub fn back(&self) -> Option<BackRef> {
        self.back
    }

    pub fn back_state(&self) -> Option<StateId> {
        self.back.map(|b| b.state)
    }

    pub fn back_edge(&self) -> Option<EdgeId> {
        self.back.map(|b| b.edge)
    }

    pub fn back_edge_kind(&self) -> Option<EdgeKind> {
        self.back.map(|b| b.kind)
    }

    pub fn is_initial(&self) -> bool {
        self.back.is_none()
    }
}

/// Rejects flag combinations no real path can be in.
pub(super) fn check_flags(
    mode: TraverseMode,
    vehicle_parked: bool,
    renting_vehicle: bool,
) -> Result<(), TraversalError> {
    if vehicle_parked && renting_vehicle {
        return Err(TraversalError::InconsistentFlags("vehicle parked while renting"));
    }
    if vehicle_parked && mode != TraverseMode::Walk {
        return Err(TraversalError::InconsistentFlags(
            "vehicle parked but still riding it",
        ));
    }
    if renting_vehicle && mode == TraverseMode::Walk {
        return Err(TraversalError::InconsistentFlags("renting a vehicle on foot"));
    }
    Ok(())
}

/// A state together with its handle in the arena.
///
/// This is what edges receive: enough to read the state and to record it
/// as the predecessor of whatever they produce.
#[derive(Debug, Clone, Copy)]
pub struct StateRef<'a> {
    id: StateId,
    state: &'a PathState,
}

impl<'a> StateRef<'a> {
    pub(super) fn new(id: StateId, state: &'a PathState) -> Self {
        Self { id, state }
    }

    pub fn id(&self) -> StateId {
        self.id
    }

    pub fn state(&self) -> &'a PathState {
        self.state
    }

    /// Start deriving a child state across `edge`.
    ///
    /// Fails if the state is not at the vertex `edge` is entered from in
    /// this search's direction.
    pub fn edit<E: Edge + ?Sized>(self, edge: &E) -> Result<StateEditor<'a>, TraversalError> {
        StateEditor::new(self, edge)
    }
}

impl Deref for StateRef<'_> {
    type Target = PathState;

    fn deref(&self) -> &PathState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consistent_flags() {
        assert!(check_flags(TraverseMode::Walk, false, false).is_ok());
        assert!(check_flags(TraverseMode::Walk, true, false).is_ok());
        assert!(check_flags(TraverseMode::Bicycle, false, true).is_ok());
        assert!(check_flags(TraverseMode::Car, false, false).is_ok());
    }

    #[test]
    fn inconsistent_flags() {
        assert!(check_flags(TraverseMode::Walk, true, true).is_err());
        assert!(check_flags(TraverseMode::Car, true, false).is_err());
        assert!(check_flags(TraverseMode::Car, true, true).is_err());
        assert!(check_flags(TraverseMode::Walk, false, true).is_err());
    }
}
