//! Per-mode routing preferences.
//!
//! Costs are unit-less weight increments; times are whole seconds.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::RequestError;
use crate::domain::TraverseMode;

/// Cost and time charged for one mode switch (parking, pickup, dropoff).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeSwitchCost {
    pub cost: u32,
    pub time: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkPreferences {
    /// Metres per second.
    pub speed: f64,
    pub reluctance: f64,
}

impl Default for WalkPreferences {
    fn default() -> Self {
        Self {
            speed: 1.33,
            reluctance: 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BikePreferences {
    /// Metres per second.
    pub speed: f64,
    pub reluctance: f64,
    /// Cost of parking (or unparking) a bike.
    pub park_cost: u32,
    /// Seconds spent parking (or unparking) a bike.
    pub park_time: u32,
}

impl BikePreferences {
    pub fn park_duration(&self) -> Duration {
        Duration::seconds(i64::from(self.park_time))
    }
}

impl Default for BikePreferences {
    fn default() -> Self {
        Self {
            speed: 5.0,
            reluctance: 2.0,
            park_cost: 120,
            park_time: 60,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarPreferences {
    /// Metres per second.
    pub speed: f64,
    pub reluctance: f64,
    pub park_cost: u32,
    pub park_time: u32,
}

impl CarPreferences {
    pub fn park_duration(&self) -> Duration {
        Duration::seconds(i64::from(self.park_time))
    }
}

impl Default for CarPreferences {
    fn default() -> Self {
        Self {
            speed: 11.0,
            reluctance: 2.0,
            park_cost: 120,
            park_time: 60,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleRentalPreferences {
    pub pickup_cost: u32,
    pub pickup_time: u32,
    pub dropoff_cost: u32,
    pub dropoff_time: u32,
    /// Trust live vehicle and dock counts at stations.
    pub use_availability_information: bool,
}

impl Default for VehicleRentalPreferences {
    fn default() -> Self {
        Self {
            pickup_cost: 120,
            pickup_time: 60,
            dropoff_cost: 30,
            dropoff_time: 30,
            use_availability_information: false,
        }
    }
}

impl VehicleRentalPreferences {
    pub fn pickup(&self) -> ModeSwitchCost {
        ModeSwitchCost {
            cost: self.pickup_cost,
            time: self.pickup_time,
        }
    }

    pub fn dropoff(&self) -> ModeSwitchCost {
        ModeSwitchCost {
            cost: self.dropoff_cost,
            time: self.dropoff_time,
        }
    }
}

/// All preferences for one search.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingPreferences {
    pub walk: WalkPreferences,
    pub bike: BikePreferences,
    pub car: CarPreferences,
    pub rental: VehicleRentalPreferences,
}

impl RoutingPreferences {
    pub fn with_walk(mut self, f: impl FnOnce(&mut WalkPreferences)) -> Self {
        f(&mut self.walk);
        self
    }

    pub fn with_bike(mut self, f: impl FnOnce(&mut BikePreferences)) -> Self {
        f(&mut self.bike);
        self
    }

    pub fn with_car(mut self, f: impl FnOnce(&mut CarPreferences)) -> Self {
        f(&mut self.car);
        self
    }

    pub fn with_rental(mut self, f: impl FnOnce(&mut VehicleRentalPreferences)) -> Self {
        f(&mut self.rental);
        self
    }

    /// Travel speed for `mode` in metres per second.
    pub fn speed(&self, mode: TraverseMode) -> f64 {
        match mode {
            TraverseMode::Walk => self.walk.speed,
            TraverseMode::Bicycle => self.bike.speed,
            TraverseMode::Car => self.car.speed,
        }
    }

    pub fn reluctance(&self, mode: TraverseMode) -> f64 {
        match mode {
            TraverseMode::Walk => self.walk.reluctance,
            TraverseMode::Bicycle => self.bike.reluctance,
            TraverseMode::Car => self.car.reluctance,
        }
    }

    /// The parking bucket for a vehicle mode; walking has none.
    pub fn parking(&self, vehicle: TraverseMode) -> Option<ModeSwitchCost> {
        match vehicle {
            TraverseMode::Bicycle => Some(ModeSwitchCost {
                cost: self.bike.park_cost,
                time: self.bike.park_time,
            }),
            TraverseMode::Car => Some(ModeSwitchCost {
                cost: self.car.park_cost,
                time: self.car.park_time,
            }),
            TraverseMode::Walk => None,
        }
    }

    pub fn validate(&self) -> Result<(), RequestError> {
        let checks = [
            ("walk.speed", self.walk.speed, true),
            ("bike.speed", self.bike.speed, true),
            ("car.speed", self.car.speed, true),
            ("walk.reluctance", self.walk.reluctance, false),
            ("bike.reluctance", self.bike.reluctance, false),
            ("car.reluctance", self.car.reluctance, false),
        ];
        for (name, value, strictly_positive) in checks {
            let in_range = if strictly_positive {
                value > 0.0
            } else {
                value >= 0.0
            };
            if !value.is_finite() || !in_range {
                return Err(RequestError::InvalidPreference { name, value });
            }
        }
        Ok(())
    }
}
