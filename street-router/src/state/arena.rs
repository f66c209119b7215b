//! Append-only storage for the states of one search.

use std::sync::Arc;

use super::{PathState, StateRef, TraversalError};
use crate::domain::{StateId, StreetMode, TraverseMode, VertexId};
use crate::request::StreetSearchRequest;

/// All states of one search, addressed by [`StateId`].
///
/// The arena is bound to a single request. A state may only be added if
/// it was derived under that request and its predecessor is already
/// stored, so back-references always point to smaller handles and the
/// path history cannot contain cycles.
#[derive(Debug)]
pub struct StateArena {
    request: Arc<StreetSearchRequest>,
    states: Vec<PathState>,
}

impl StateArena {
    pub fn new(request: Arc<StreetSearchRequest>) -> Self {
        Self {
            request,
            states: Vec::new(),
        }
    }

    pub fn request(&self) -> &Arc<StreetSearchRequest> {
        &self.request
    }

    /// Add the synthetic start state: walking, nothing parked or rented.
    pub fn initial(&mut self, vertex: VertexId) -> StateId {
        let state = PathState {
            vertex,
            weight: 0.0,
            time_offset: 0,
            mode: TraverseMode::Walk,
            vehicle_parked: false,
            renting_vehicle: false,
            request: Arc::clone(&self.request),
            back: None,
        };
        self.insert(state)
    }

    /// Add a start state with explicit mode and flags.
    pub fn initial_with(
        &mut self,
        vertex: VertexId,
        mode: TraverseMode,
        vehicle_parked: bool,
        renting_vehicle: bool,
    ) -> Result<StateId, TraversalError> {
        let state = PathState::root(
            vertex,
            Arc::clone(&self.request),
            mode,
            vehicle_parked,
            renting_vehicle,
        )?;
        Ok(self.insert(state))
    }

    /// Add the start state a search for this request begins from.
    ///
    /// Park-and-ride searches start on the vehicle when departing and on
    /// foot with the vehicle already parked when searching back from the
    /// arrival. Plain bike and car searches start on the vehicle.
    pub fn origin(&mut self, vertex: VertexId) -> StateId {
        let street_mode = self.request.mode();
        let (mode, parked) = if street_mode.includes_parking() {
            if self.request.arrive_by() {
                (TraverseMode::Walk, true)
            } else {
                (street_mode.vehicle_mode().unwrap_or(TraverseMode::Walk), false)
            }
        } else {
            match street_mode {
                StreetMode::Bike => (TraverseMode::Bicycle, false),
                StreetMode::Car => (TraverseMode::Car, false),
                _ => (TraverseMode::Walk, false),
            }
        };

        let state = PathState {
            vertex,
            weight: 0.0,
            time_offset: 0,
            mode,
            vehicle_parked: parked,
            renting_vehicle: false,
            request: Arc::clone(&self.request),
            back: None,
        };
        self.insert(state)
    }

    /// Store a state produced by an edge traversal.
    pub fn push(&mut self, state: PathState) -> Result<StateId, TraversalError> {
        if !Arc::ptr_eq(&state.request, &self.request) {
            return Err(TraversalError::ForeignState);
        }
        let parent = state
            .back_state()
            .and_then(|id| self.states.get(id.0))
            .ok_or(TraversalError::DanglingBackReference)?;
        if state.weight < parent.weight {
            return Err(TraversalError::InvalidWeightIncrement(
                state.weight - parent.weight,
            ));
        }
        Ok(self.insert(state))
    }

    fn insert(&mut self, state: PathState) -> StateId {
        let id = StateId(self.states.len());
        self.states.push(state);
        id
    }

    pub fn get(&self, id: StateId) -> Option<StateRef<'_>> {
        self.states.get(id.0).map(|s| StateRef::new(id, s))
    }

    pub fn state(&self, id: StateId) -> Result<StateRef<'_>, TraversalError> {
        self.get(id).ok_or(TraversalError::UnknownState(id))
    }

    /// The states from the start of the search up to and including `id`.
    pub fn path(&self, id: StateId) -> Result<Vec<StateRef<'_>>, TraversalError> {
        let mut path = Vec::new();
        let mut current = Some(id);
        while let Some(id) = current {
            let state = self.state(id)?;
            current = state.back_state();
            path.push(state);
        }
        path.reverse();
        Ok(path)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = StateRef<'_>> {
        self.states
            .iter()
            .enumerate()
            .map(|(i, s)| StateRef::new(StateId(i), s))
    }
}
