//! Staging area for deriving one child state.

use super::path_state::check_flags;
use super::{BackRef, PathState, StateRef, TraversalError};
use crate::domain::TraverseMode;
use crate::edge::{Edge, TraversalResult};

/// Derives a child from one parent state across one edge.
///
/// The editor works on a private copy; the parent is never touched.
/// Nothing becomes visible until [`StateEditor::make_state`], which either
/// yields the complete child or fails as a whole. Dropping an editor
/// without committing produces nothing.
#[derive(Debug)]
pub struct StateEditor<'a> {
    parent: StateRef<'a>,
    child: PathState,
    defect: Option<TraversalError>,
}

impl<'a> StateEditor<'a> {
    pub(super) fn new<E: Edge + ?Sized>(
        parent: StateRef<'a>,
        edge: &E,
    ) -> Result<Self, TraversalError> {
        let (entry, exit) = if parent.search_direction().is_forward() {
            (edge.from_vertex(), edge.to_vertex())
        } else {
            (edge.to_vertex(), edge.from_vertex())
        };
        if parent.vertex() != entry {
            return Err(TraversalError::WrongVertex {
                state: parent.id(),
                edge: edge.id(),
                expected: entry,
                actual: parent.vertex(),
            });
        }

        let mut child = parent.state().clone();
        child.vertex = exit;
        child.back = Some(BackRef {
            state: parent.id(),
            edge: edge.id(),
            kind: edge.kind(),
        });

        Ok(Self {
            parent,
            child,
            defect: None,
        })
    }

    /// Add to the accumulated weight. Negative or non-finite increments
    /// poison the edit.
    pub fn increment_weight(&mut self, weight: f64) {
        if !weight.is_finite() || weight < 0.0 {
            self.defect
                .get_or_insert(TraversalError::InvalidWeightIncrement(weight));
            return;
        }
        self.child.weight += weight;
    }

    /// Advance the clock. Arrive-by searches run the clock backwards.
    pub fn increment_time_in_seconds(&mut self, seconds: u32) {
        let seconds = i64::from(seconds);
        if self.parent.search_direction().is_forward() {
            self.child.time_offset += seconds;
        } else {
            self.child.time_offset -= seconds;
        }
    }

    pub fn set_vehicle_parked(&mut self, parked: bool, mode: TraverseMode) {
        self.child.vehicle_parked = parked;
        self.child.mode = mode;
    }

    pub fn begin_vehicle_renting(&mut self, mode: TraverseMode) {
        self.child.renting_vehicle = true;
        self.child.mode = mode;
    }

    pub fn drop_off_rented_vehicle(&mut self) {
        self.child.renting_vehicle = false;
        self.child.mode = TraverseMode::Walk;
    }

    /// Commit the edit.
    pub fn make_state(self) -> Result<PathState, TraversalError> {
        if let Some(defect) = self.defect {
            return Err(defect);
        }
        check_flags(
            self.child.mode,
            self.child.vehicle_parked,
            self.child.renting_vehicle,
        )?;
        Ok(self.child)
    }

    /// Commit the edit as a single-element traversal result.
    pub fn make_states(self) -> TraversalResult {
        Ok(vec![self.make_state()?])
    }
}
