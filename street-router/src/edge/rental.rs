//! Picking up and returning rental vehicles at docked stations.

use std::sync::Arc;

use tracing::trace;

use super::{Edge, TraversalResult};
use crate::domain::{EdgeId, EdgeKind, TraverseMode, VertexId};
use crate::facility::VehicleRentalStation;
use crate::request::ModeSwitchCost;
use crate::state::StateRef;

/// The mode switch at a rental station, a loop at the station's vertex.
///
/// Departing searches pick up while walking and drop off while riding.
/// Arrive-by searches see the same transitions backwards: a riding state
/// becomes a walking one by undoing the pickup, and a walking state starts
/// riding by undoing the drop-off. Each transition is charged with the
/// matching pickup or drop-off cost either way.
#[derive(Debug, Clone)]
pub struct VehicleRentalEdge {
    id: EdgeId,
    vertex: VertexId,
    station: Arc<VehicleRentalStation>,
}

impl VehicleRentalEdge {
    pub fn new(id: EdgeId, vertex: VertexId, station: Arc<VehicleRentalStation>) -> Self {
        Self {
            id,
            vertex,
            station,
        }
    }

    pub fn station(&self) -> &VehicleRentalStation {
        &self.station
    }

    fn begin_renting(&self, s0: StateRef<'_>, cost: ModeSwitchCost) -> TraversalResult {
        let mut s1 = s0.edit(self)?;
        s1.increment_weight(f64::from(cost.cost));
        s1.increment_time_in_seconds(cost.time);
        s1.begin_vehicle_renting(self.station.form_factor);
        s1.make_states()
    }

    fn stop_renting(&self, s0: StateRef<'_>, cost: ModeSwitchCost) -> TraversalResult {
        let mut s1 = s0.edit(self)?;
        s1.increment_weight(f64::from(cost.cost));
        s1.increment_time_in_seconds(cost.time);
        s1.drop_off_rented_vehicle();
        s1.make_states()
    }
}

impl Edge for VehicleRentalEdge {
    fn id(&self) -> EdgeId {
        self.id
    }

    fn kind(&self) -> EdgeKind {
        EdgeKind::VehicleRental
    }

    fn from_vertex(&self) -> VertexId {
        self.vertex
    }

    fn to_vertex(&self) -> VertexId {
        self.vertex
    }

    fn traverse(&self, s0: StateRef<'_>) -> TraversalResult {
        let street_mode = s0.request().mode();
        if !street_mode.includes_renting()
            || street_mode.vehicle_mode() != Some(self.station.form_factor)
        {
            return Ok(Vec::new());
        }

        let rental = s0.preferences().rental;
        let use_availability = rental.use_availability_information;
        let mode = s0.non_transit_mode();
        let renting = s0.is_renting_vehicle();

        match (s0.search_direction().is_forward(), renting) {
            (true, false) if mode == TraverseMode::Walk => {
                if !self.station.allows_pickup(use_availability) {
                    trace!(edge = %self.id, station = %self.station.id, "no vehicles to pick up");
                    return Ok(Vec::new());
                }
                self.begin_renting(s0, rental.pickup())
            }
            (true, true) if mode == self.station.form_factor => {
                if !self.station.allows_dropoff(use_availability) {
                    trace!(edge = %self.id, station = %self.station.id, "no spaces to drop off");
                    return Ok(Vec::new());
                }
                self.stop_renting(s0, rental.dropoff())
            }
            (false, true) if mode == self.station.form_factor => {
                if !self.station.allows_pickup(use_availability) {
                    return Ok(Vec::new());
                }
                self.stop_renting(s0, rental.pickup())
            }
            (false, false) if mode == TraverseMode::Walk => {
                if !self.station.allows_dropoff(use_availability) {
                    return Ok(Vec::new());
                }
                self.begin_renting(s0, rental.dropoff())
            }
            _ => Ok(Vec::new()),
        }
    }

    fn name(&self) -> &str {
        &self.station.name
    }
}
