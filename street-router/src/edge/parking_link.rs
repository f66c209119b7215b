//! Links between the street network and a parking facility's entrance.

use std::sync::Arc;

use tracing::trace;

use super::{Edge, TraversalResult};
use crate::domain::{EdgeId, EdgeKind, TraverseMode, VertexId};
use crate::facility::{VehicleParking, VehicleParkingEntrance};
use crate::state::StateRef;

/// Connects a street vertex with a parking entrance vertex (either way).
///
/// Facilities rejected by the request's admission filter cannot be
/// entered at all.
#[derive(Debug, Clone)]
pub struct StreetVehicleParkingLink {
    id: EdgeId,
    from: VertexId,
    to: VertexId,
    parking: Arc<VehicleParking>,
    entrance: VehicleParkingEntrance,
}

impl StreetVehicleParkingLink {
    pub fn new(
        id: EdgeId,
        from: VertexId,
        to: VertexId,
        parking: Arc<VehicleParking>,
        entrance: VehicleParkingEntrance,
    ) -> Self {
        Self {
            id,
            from,
            to,
            parking,
            entrance,
        }
    }

    pub fn parking(&self) -> &VehicleParking {
        &self.parking
    }

    pub fn entrance(&self) -> &VehicleParkingEntrance {
        &self.entrance
    }
}

impl Edge for StreetVehicleParkingLink {
    fn id(&self) -> EdgeId {
        self.id
    }

    fn kind(&self) -> EdgeKind {
        EdgeKind::VehicleParkingLink
    }

    fn from_vertex(&self) -> VertexId {
        self.from
    }

    fn to_vertex(&self) -> VertexId {
        self.to
    }

    fn traverse(&self, s0: StateRef<'_>) -> TraversalResult {
        // Hopping link to link would let paths use entrances as shortcuts.
        if s0.back_edge_kind() == Some(EdgeKind::VehicleParkingLink) {
            return Ok(Vec::new());
        }

        let accessible = if s0.non_transit_mode() == TraverseMode::Car {
            self.entrance.car_accessible
        } else {
            self.entrance.walk_accessible
        };
        if !accessible {
            trace!(edge = %self.id, entrance = %self.entrance.id, "entrance closed to mode");
            return Ok(Vec::new());
        }

        if !s0.request().parking().filter().matches(&self.parking) {
            trace!(edge = %self.id, parking = %self.parking.id(), "parking rejected by filter");
            return Ok(Vec::new());
        }

        let mut s1 = s0.edit(self)?;
        s1.increment_weight(1.0);
        s1.make_states()
    }

    fn name(&self) -> &str {
        &self.entrance.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StreetMode;
    use crate::edge::testing::FixedEdge;
    use crate::facility::FacilityId;
    use crate::request::{StreetSearchRequest, VehicleParkingFilterRequest, VehicleParkingRequest};
    use crate::state::StateArena;
    use geo::Point;

    fn parking(tags: &[&str]) -> Arc<VehicleParking> {
        Arc::new(
            VehicleParking::builder("parking")
                .location(Point::new(1.0, 1.0))
                .tags(tags.iter().copied())
                .bicycle_places(true)
                .build(),
        )
    }

    fn entrance(walk: bool, car: bool) -> VehicleParkingEntrance {
        VehicleParkingEntrance {
            id: FacilityId::new("entrance"),
            name: "entrance".into(),
            location: Point::new(1.0, 1.0),
            walk_accessible: walk,
            car_accessible: car,
        }
    }

    fn link(parking: Arc<VehicleParking>, entrance: VehicleParkingEntrance) -> StreetVehicleParkingLink {
        StreetVehicleParkingLink::new(EdgeId(0), VertexId(0), VertexId(1), parking, entrance)
    }

    fn arena(mode: StreetMode, not: &[&str], select: &[&str]) -> StateArena {
        let filter =
            VehicleParkingFilterRequest::from_tags(not.iter().copied(), select.iter().copied())
                .unwrap();
        let request = StreetSearchRequest::builder()
            .with_mode(mode)
            .with_parking(VehicleParkingRequest::new().with_filter(filter))
            .with_preferences(|p| p.with_bike(|bike| bike.park_cost = 0))
            .build()
            .unwrap();
        StateArena::new(Arc::new(request))
    }

    #[test]
    fn admission_filter_cases() {
        let cases: [(&[&str], &[&str], &[&str], bool); 7] = [
            (&[], &[], &[], true),
            (&["a-tag"], &[], &[], true),
            (&["a"], &["a"], &[], false),
            (&["a"], &["a"], &["a"], false),
            (&["a", "b"], &["b"], &["a"], false),
            (&["a", "b"], &[], &["a"], true),
            (&["a", "b"], &[], &["c"], false),
        ];
        for (tags, not, select, should_traverse) in cases {
            let mut arena = arena(StreetMode::BikeToPark, not, select);
            let s0 = arena.initial(VertexId(0));
            assert_eq!(arena.state(s0).unwrap().weight(), 0.0);

            let result = link(parking(tags), entrance(true, true))
                .traverse(arena.state(s0).unwrap())
                .unwrap();

            assert_eq!(
                !result.is_empty(),
                should_traverse,
                "Parking[tags={tags:?}], Request[not={not:?}, select={select:?}]"
            );
        }
    }

    #[test]
    fn link_costs_one() {
        let mut arena = arena(StreetMode::Walk, &[], &[]);
        let s0 = arena.initial(VertexId(0));

        let result = link(parking(&[]), entrance(true, false))
            .traverse(arena.state(s0).unwrap())
            .unwrap();

        assert_eq!(result[0].weight(), 1.0);
        assert_eq!(result[0].vertex(), VertexId(1));
    }

    #[test]
    fn car_needs_car_accessible_entrance() {
        let mut arena = arena(StreetMode::CarToPark, &[], &[]);
        let s0 = arena.origin(VertexId(0));
        assert_eq!(arena.state(s0).unwrap().non_transit_mode(), TraverseMode::Car);

        let walk_only = link(parking(&[]), entrance(true, false));
        assert!(walk_only.traverse(arena.state(s0).unwrap()).unwrap().is_empty());

        let car_ok = link(parking(&[]), entrance(false, true));
        assert_eq!(car_ok.traverse(arena.state(s0).unwrap()).unwrap().len(), 1);
    }

    #[test]
    fn cannot_chain_links() {
        let mut arena = arena(StreetMode::Walk, &[], &[]);
        let s0 = arena.initial(VertexId(0));
        let first = link(parking(&[]), entrance(true, true));
        let second = StreetVehicleParkingLink::new(
            EdgeId(1),
            VertexId(1),
            VertexId(2),
            parking(&[]),
            entrance(true, true),
        );

        let child = first.traverse(arena.state(s0).unwrap()).unwrap().remove(0);
        let s1 = arena.push(child).unwrap();
        assert!(second.traverse(arena.state(s1).unwrap()).unwrap().is_empty());

        // Any other edge in between makes the second link usable again.
        let street = FixedEdge::new(EdgeId(2), VertexId(1), VertexId(1));
        let child = street.traverse(arena.state(s1).unwrap()).unwrap().remove(0);
        let s2 = arena.push(child).unwrap();
        assert_eq!(second.traverse(arena.state(s2).unwrap()).unwrap().len(), 1);
    }
}
