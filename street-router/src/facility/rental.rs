//! Docked vehicle-rental stations.

use geo::Point;

use super::FacilityId;
use crate::domain::TraverseMode;

/// A station where rental vehicles of one form factor are picked up and returned.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleRentalStation {
    pub id: FacilityId,
    pub name: String,
    pub location: Point<f64>,
    /// `BICYCLE` or `CAR`.
    pub form_factor: TraverseMode,
    pub vehicles_available: u32,
    pub spaces_available: u32,
}

impl VehicleRentalStation {
    /// Whether a vehicle can be taken from the station.
    ///
    /// Counts are only trusted when `use_availability` is set.
    pub fn allows_pickup(&self, use_availability: bool) -> bool {
        !use_availability || self.vehicles_available > 0
    }

    /// Whether a vehicle can be returned to the station.
    pub fn allows_dropoff(&self, use_availability: bool) -> bool {
        !use_availability || self.spaces_available > 0
    }
}
