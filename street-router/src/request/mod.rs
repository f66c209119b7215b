//! Per-search configuration consumed by edges.
//!
//! Requests are immutable once built. Edges only read them.

mod error;
mod parking;
mod preferences;
mod street;

pub use error::RequestError;
pub use parking::{
    ParkingPreference, PreferredBy, VehicleParkingFilter, VehicleParkingFilterRequest,
    VehicleParkingRequest,
};
pub use preferences::{
    BikePreferences, CarPreferences, ModeSwitchCost, RoutingPreferences, VehicleRentalPreferences,
    WalkPreferences,
};
pub use street::{StreetSearchRequest, StreetSearchRequestBuilder};
