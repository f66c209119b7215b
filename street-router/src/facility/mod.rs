//! Facilities that mode-switch edges consult: parking and rental stations.
//!
//! Facilities are read-only from the router's point of view. Edges hold
//! them behind `Arc` and only ever ask questions of them.

mod parking;
mod rental;

pub use parking::{
    FacilityId, VehicleParking, VehicleParkingBuilder, VehicleParkingEntrance,
    VehicleParkingSpaces,
};
pub use rental::VehicleRentalStation;
