//! Plain street segments.

use geo::line_measures::LengthMeasurable;
use geo::{Haversine, LineString};
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::{Edge, TraversalError, TraversalResult};
use crate::domain::{EdgeId, EdgeKind, TraverseMode, VertexId};
use crate::state::StateRef;

/// Which modes may use a street.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreetPermission {
    pub walk: bool,
    pub bike: bool,
    pub car: bool,
}

impl StreetPermission {
    pub const ALL: Self = Self {
        walk: true,
        bike: true,
        car: true,
    };
    pub const PEDESTRIAN: Self = Self {
        walk: true,
        bike: false,
        car: false,
    };
    pub const PEDESTRIAN_AND_BICYCLE: Self = Self {
        walk: true,
        bike: true,
        car: false,
    };
    pub const CAR: Self = Self {
        walk: false,
        bike: false,
        car: true,
    };

    pub fn allows(&self, mode: TraverseMode) -> bool {
        match mode {
            TraverseMode::Walk => self.walk,
            TraverseMode::Bicycle => self.bike,
            TraverseMode::Car => self.car,
        }
    }
}

impl Default for StreetPermission {
    fn default() -> Self {
        Self::ALL
    }
}

/// A street segment between two intersections.
///
/// Time is the length divided by the current mode's speed, rounded up to
/// whole seconds; weight is that time times the mode's reluctance.
#[derive(Debug, Clone)]
pub struct StreetEdge {
    id: EdgeId,
    from: VertexId,
    to: VertexId,
    name: String,
    geometry: Option<LineString<f64>>,
    length_m: f64,
    permission: StreetPermission,
    wheelchair_accessible: bool,
}

impl StreetEdge {
    pub fn new(
        id: EdgeId,
        from: VertexId,
        to: VertexId,
        name: impl Into<String>,
        length_m: f64,
    ) -> Self {
        Self {
            id,
            from,
            to,
            name: name.into(),
            geometry: None,
            length_m,
            permission: StreetPermission::ALL,
            wheelchair_accessible: true,
        }
    }

    /// A street whose length is the Haversine length of its geometry.
    pub fn from_geometry(
        id: EdgeId,
        from: VertexId,
        to: VertexId,
        name: impl Into<String>,
        geometry: LineString<f64>,
    ) -> Self {
        let length_m = geometry.length(&Haversine);
        Self {
            geometry: Some(geometry),
            ..Self::new(id, from, to, name, length_m)
        }
    }

    pub fn with_permission(mut self, permission: StreetPermission) -> Self {
        self.permission = permission;
        self
    }

    pub fn with_wheelchair_accessible(mut self, accessible: bool) -> Self {
        self.wheelchair_accessible = accessible;
        self
    }

    pub fn permission(&self) -> StreetPermission {
        self.permission
    }

    pub fn is_wheelchair_accessible(&self) -> bool {
        self.wheelchair_accessible
    }
}

impl Edge for StreetEdge {
    fn id(&self) -> EdgeId {
        self.id
    }

    fn kind(&self) -> EdgeKind {
        EdgeKind::Street
    }

    fn from_vertex(&self) -> VertexId {
        self.from
    }

    fn to_vertex(&self) -> VertexId {
        self.to
    }

    fn traverse(&self, s0: StateRef<'_>) -> TraversalResult {
        let mode = s0.non_transit_mode();
        if !self.permission.allows(mode) {
            trace!(edge = %self.id, %mode, "street closed to mode");
            return Ok(Vec::new());
        }
        if s0.wheelchair() && !self.wheelchair_accessible {
            trace!(edge = %self.id, "street not wheelchair accessible");
            return Ok(Vec::new());
        }

        let preferences = s0.preferences();
        let seconds = (self.length_m / preferences.speed(mode)).ceil();
        if !(0.0..=f64::from(u32::MAX)).contains(&seconds) {
            return Err(TraversalError::TravelTimeOutOfRange {
                edge: self.id,
                seconds,
            });
        }

        let mut s1 = s0.edit(self)?;
        s1.increment_time_in_seconds(seconds as u32);
        s1.increment_weight(seconds * preferences.reluctance(mode));
        s1.make_states()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn geometry(&self) -> Option<&LineString<f64>> {
        self.geometry.as_ref()
    }

    fn distance_meters(&self) -> f64 {
        self.length_m
    }
}
