//! Vehicle-parking facilities.

use std::collections::BTreeSet;
use std::fmt;

use geo::Point;
use serde::{Deserialize, Serialize};

use crate::domain::TraverseMode;

/// Identifier of a facility or of one of its entrances.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FacilityId(String);

impl FacilityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FacilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Live space counts reported for a facility.
///
/// `None` means the feed carries no data for that kind of space, which is
/// different from `Some(0)` (known to be full).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleParkingSpaces {
    pub bicycle_spaces: Option<u32>,
    pub car_spaces: Option<u32>,
    pub wheelchair_accessible_car_spaces: Option<u32>,
}

/// A way into a parking facility from the street network.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleParkingEntrance {
    pub id: FacilityId,
    pub name: String,
    pub location: Point<f64>,
    pub walk_accessible: bool,
    pub car_accessible: bool,
}

/// A place where a bicycle or car can be left for the rest of a trip.
///
/// Facilities are immutable once built; fresh availability arrives as a
/// new snapshot built with [`VehicleParking::with_availability`].
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleParking {
    id: FacilityId,
    name: String,
    location: Point<f64>,
    tags: BTreeSet<String>,
    bicycle_places: bool,
    car_places: bool,
    wheelchair_accessible_car_places: bool,
    availability: Option<VehicleParkingSpaces>,
    entrances: Vec<VehicleParkingEntrance>,
}

impl VehicleParking {
    pub fn builder(id: impl Into<String>) -> VehicleParkingBuilder {
        VehicleParkingBuilder::new(id)
    }

    pub fn id(&self) -> &FacilityId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> Point<f64> {
        self.location
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    pub fn entrances(&self) -> &[VehicleParkingEntrance] {
        &self.entrances
    }

    pub fn availability(&self) -> Option<&VehicleParkingSpaces> {
        self.availability.as_ref()
    }

    /// Returns a copy of this facility carrying a new availability snapshot.
    pub fn with_availability(&self, availability: Option<VehicleParkingSpaces>) -> Self {
        Self {
            availability,
            ..self.clone()
        }
    }

    /// Whether a vehicle of `mode` can be left here.
    ///
    /// Live counts are consulted only when `use_availability` is set and the
    /// feed has data for that kind of space; otherwise the static
    /// "has places for this mode" flag decides. Nobody parks a `WALK`.
    pub fn has_spaces_available(
        &self,
        mode: TraverseMode,
        wheelchair_accessible: bool,
        use_availability: bool,
    ) -> bool {
        let live = if use_availability {
            self.live_spaces(mode, wheelchair_accessible)
        } else {
            None
        };

        if !mode.is_vehicle() {
            return false;
        }
        match (mode, live) {
            (_, Some(spaces)) => spaces > 0,
            (TraverseMode::Bicycle, None) => self.bicycle_places,
            (TraverseMode::Car, None) if wheelchair_accessible => {
                self.wheelchair_accessible_car_places
            }
            (TraverseMode::Car, None) => self.car_places,
            (TraverseMode::Walk, None) => false,
        }
    }

    fn live_spaces(&self, mode: TraverseMode, wheelchair_accessible: bool) -> Option<u32> {
        let availability = self.availability.as_ref()?;
        match mode {
            TraverseMode::Bicycle => availability.bicycle_spaces,
            TraverseMode::Car if wheelchair_accessible => {
                availability.wheelchair_accessible_car_spaces
            }
            TraverseMode::Car => availability.car_spaces,
            TraverseMode::Walk => None,
        }
    }
}

/// Fluent builder for [`VehicleParking`].
#[derive(Debug)]
pub struct VehicleParkingBuilder {
    inner: VehicleParking,
}

impl VehicleParkingBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            inner: VehicleParking {
                id: FacilityId::new(id),
                name: String::new(),
                location: Point::new(0.0, 0.0),
                tags: BTreeSet::new(),
                bicycle_places: false,
                car_places: false,
                wheelchair_accessible_car_places: false,
                availability: None,
                entrances: Vec::new(),
            },
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.inner.name = name.into();
        self
    }

    pub fn location(mut self, location: Point<f64>) -> Self {
        self.inner.location = location;
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inner.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn bicycle_places(mut self, value: bool) -> Self {
        self.inner.bicycle_places = value;
        self
    }

    pub fn car_places(mut self, value: bool) -> Self {
        self.inner.car_places = value;
        self
    }

    pub fn wheelchair_accessible_car_places(mut self, value: bool) -> Self {
        self.inner.wheelchair_accessible_car_places = value;
        self
    }

    pub fn availability(mut self, availability: VehicleParkingSpaces) -> Self {
        self.inner.availability = Some(availability);
        self
    }

    pub fn entrance(mut self, entrance: VehicleParkingEntrance) -> Self {
        self.inner.entrances.push(entrance);
        self
    }

    /// Build the facility.
    ///
    /// A facility built without entrances gets one at its own location,
    /// open to pedestrians and cars.
    pub fn build(self) -> VehicleParking {
        let mut parking = self.inner;
        if parking.entrances.is_empty() {
            parking.entrances.push(VehicleParkingEntrance {
                id: FacilityId::new(format!("{}:entrance", parking.id)),
                name: parking.name.clone(),
                location: parking.location,
                walk_accessible: true,
                car_accessible: true,
            });
        }
        parking
    }
}
