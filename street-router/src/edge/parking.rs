//! Parking and unparking a vehicle.

use std::sync::Arc;

use tracing::trace;

use super::{Edge, TraversalResult};
use crate::domain::{EdgeId, EdgeKind, TraverseMode, VertexId};
use crate::facility::VehicleParking;
use crate::state::StateRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transition {
    Park,
    Unpark,
}

/// The mode switch at a parking facility.
///
/// In a depart-at search the edge parks the vehicle and continues on foot.
/// In an arrive-by search the path is explored backwards from the
/// destination, so the same edge takes a parked, walking state and
/// unparks the vehicle. Both directions charge the same park cost and time
/// and apply the same capacity and admission checks.
///
/// Which preference bucket (bike or car) applies is decided by the
/// request's street mode, not by the facility.
#[derive(Debug, Clone)]
pub struct VehicleParkingEdge {
    id: EdgeId,
    from: VertexId,
    to: VertexId,
    parking: Arc<VehicleParking>,
}

impl VehicleParkingEdge {
    /// A parking edge from one entrance to another, or from an entrance
    /// back onto itself when `from == to`.
    pub fn between(
        id: EdgeId,
        from: VertexId,
        to: VertexId,
        parking: Arc<VehicleParking>,
    ) -> Self {
        Self {
            id,
            from,
            to,
            parking,
        }
    }

    pub fn parking(&self) -> &VehicleParking {
        &self.parking
    }

    fn traverse_park(&self, s0: StateRef<'_>) -> TraversalResult {
        let street_mode = s0.request().mode();
        if !street_mode.includes_walking() || s0.is_vehicle_parked() {
            return Ok(Vec::new());
        }
        let Some(vehicle) = street_mode.vehicle_mode() else {
            return Ok(Vec::new());
        };
        if s0.is_renting_vehicle() {
            trace!(edge = %self.id, "rented vehicles cannot be parked");
            return Ok(Vec::new());
        }
        let mode = s0.non_transit_mode();
        if mode != TraverseMode::Walk && mode != vehicle {
            return Ok(Vec::new());
        }
        self.switch_mode(s0, vehicle, Transition::Park)
    }

    fn traverse_unpark(&self, s0: StateRef<'_>) -> TraversalResult {
        if s0.non_transit_mode() != TraverseMode::Walk || !s0.is_vehicle_parked() {
            return Ok(Vec::new());
        }
        let Some(vehicle) = s0.request().mode().vehicle_mode() else {
            return Ok(Vec::new());
        };
        self.switch_mode(s0, vehicle, Transition::Unpark)
    }

    fn switch_mode(
        &self,
        s0: StateRef<'_>,
        vehicle: TraverseMode,
        transition: Transition,
    ) -> TraversalResult {
        let request = s0.request();
        let parking_request = request.parking();

        if !self.parking.has_spaces_available(
            vehicle,
            request.wheelchair(),
            parking_request.use_availability_information(),
        ) {
            trace!(edge = %self.id, parking = %self.parking.id(), %vehicle, "no spaces available");
            return Ok(Vec::new());
        }
        if !parking_request.filter().matches(&self.parking) {
            trace!(edge = %self.id, parking = %self.parking.id(), "parking rejected by filter");
            return Ok(Vec::new());
        }
        let Some(cost) = s0.preferences().parking(vehicle) else {
            return Ok(Vec::new());
        };

        let mut s1 = s0.edit(self)?;
        s1.increment_weight(f64::from(cost.cost));
        s1.increment_time_in_seconds(cost.time);
        match transition {
            Transition::Park => s1.set_vehicle_parked(true, TraverseMode::Walk),
            Transition::Unpark => s1.set_vehicle_parked(false, vehicle),
        }
        s1.increment_weight(f64::from(parking_request.penalty_for(&self.parking)));
        s1.make_states()
    }
}

impl Edge for VehicleParkingEdge {
    fn id(&self) -> EdgeId {
        self.id
    }

    fn kind(&self) -> EdgeKind {
        EdgeKind::VehicleParking
    }

    fn from_vertex(&self) -> VertexId {
        self.from
    }

    fn to_vertex(&self) -> VertexId {
        self.to
    }

    fn traverse(&self, s0: StateRef<'_>) -> TraversalResult {
        if !s0.request().mode().includes_parking() {
            return Ok(Vec::new());
        }
        if s0.request().arrive_by() {
            self.traverse_unpark(s0)
        } else {
            self.traverse_park(s0)
        }
    }

    fn name(&self) -> &str {
        self.parking.name()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::StreetMode;
    use crate::request::{StreetSearchRequest, VehicleParkingFilterRequest, VehicleParkingRequest};
    use crate::state::StateArena;
    use proptest::prelude::*;

    fn tag_set() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec(prop::sample::select(vec!["a", "b", "c", "d"]), 0..4)
            .prop_map(|tags| tags.into_iter().map(String::from).collect())
    }

    fn mode_strategy() -> impl Strategy<Value = StreetMode> {
        prop::sample::select(vec![
            StreetMode::Walk,
            StreetMode::Bike,
            StreetMode::BikeToPark,
            StreetMode::BikeRental,
            StreetMode::Car,
            StreetMode::CarToPark,
        ])
    }

    fn flags_strategy() -> impl Strategy<Value = (TraverseMode, bool, bool)> {
        prop::sample::select(vec![
            (TraverseMode::Walk, false, false),
            (TraverseMode::Walk, true, false),
            (TraverseMode::Bicycle, false, false),
            (TraverseMode::Bicycle, false, true),
            (TraverseMode::Car, false, false),
            (TraverseMode::Car, false, true),
        ])
    }

    proptest! {
        #[test]
        fn children_never_get_cheaper(
            mode in mode_strategy(),
            arrive_by in any::<bool>(),
            (traverse_mode, parked, renting) in flags_strategy(),
            park_cost in 0u32..1000,
            unpreferred_cost in 0u32..1000,
            tags in tag_set(),
            not in tag_set(),
            select in tag_set(),
        ) {
            let filter = VehicleParkingFilterRequest::from_tags(not, select).unwrap();
            let request = StreetSearchRequest::builder()
                .with_mode(mode)
                .with_arrive_by(arrive_by)
                .with_preferences(|p| p
                    .with_bike(|bike| bike.park_cost = park_cost)
                    .with_car(|car| car.park_cost = park_cost))
                .with_parking(VehicleParkingRequest::new()
                    .with_filter(filter.clone())
                    .with_preferred(VehicleParkingFilterRequest::from_tags(Vec::<&str>::new(), ["a"]).unwrap())
                    .with_unpreferred_cost(unpreferred_cost))
                .build()
                .unwrap();
            let mut arena = StateArena::new(Arc::new(request));
            let s0 = arena.initial_with(VertexId(0), traverse_mode, parked, renting).unwrap();
            let parking = Arc::new(
                VehicleParking::builder("p")
                    .tags(tags)
                    .bicycle_places(true)
                    .car_places(true)
                    .build(),
            );

            let parent = arena.state(s0).unwrap();
            let edge = VehicleParkingEdge::between(EdgeId(0), VertexId(0), VertexId(0), parking.clone());
            let result = edge.traverse(parent).unwrap();

            prop_assert!(result.len() <= 1);
            for child in &result {
                prop_assert!(child.weight() >= parent.weight());
                prop_assert!(child.is_vehicle_parked() != parent.is_vehicle_parked());
            }
            if !filter.matches(&parking) {
                prop_assert!(result.is_empty());
            }
            if renting {
                prop_assert!(result.is_empty());
            }
        }
    }
}
