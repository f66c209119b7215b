//! Travel modes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The non-transit mode a path is currently travelling in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TraverseMode {
    Walk,
    Bicycle,
    Car,
}

impl TraverseMode {
    /// Returns true for modes that use a vehicle.
    pub fn is_vehicle(self) -> bool {
        matches!(self, TraverseMode::Bicycle | TraverseMode::Car)
    }
}

impl fmt::Display for TraverseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TraverseMode::Walk => "WALK",
            TraverseMode::Bicycle => "BICYCLE",
            TraverseMode::Car => "CAR",
        };
        f.pad(name)
    }
}

/// The street mode requested for a search.
///
/// A street mode describes which combinations of walking, cycling and
/// driving a path may use, including the park-and-ride and rental
/// combinations that switch mode along the way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StreetMode {
    /// No street access at all.
    NotSet,
    #[default]
    Walk,
    Bike,
    /// Cycle to a parking facility, leave the bike, continue on foot.
    BikeToPark,
    BikeRental,
    Car,
    /// Drive to a parking facility, leave the car, continue on foot.
    CarToPark,
    /// Be picked up or dropped off by car.
    CarPickup,
    CarRental,
    /// Demand-responsive services; reached on foot.
    Flexible,
}

impl StreetMode {
    pub fn includes_walking(self) -> bool {
        matches!(
            self,
            StreetMode::Walk
                | StreetMode::BikeToPark
                | StreetMode::BikeRental
                | StreetMode::CarToPark
                | StreetMode::CarPickup
                | StreetMode::CarRental
                | StreetMode::Flexible
        )
    }

    pub fn includes_biking(self) -> bool {
        matches!(
            self,
            StreetMode::Bike | StreetMode::BikeToPark | StreetMode::BikeRental
        )
    }

    pub fn includes_driving(self) -> bool {
        matches!(
            self,
            StreetMode::Car | StreetMode::CarToPark | StreetMode::CarPickup | StreetMode::CarRental
        )
    }

    pub fn includes_parking(self) -> bool {
        matches!(self, StreetMode::BikeToPark | StreetMode::CarToPark)
    }

    pub fn includes_renting(self) -> bool {
        matches!(self, StreetMode::BikeRental | StreetMode::CarRental)
    }

    /// The vehicle mode a parking or rental transition works with.
    ///
    /// Biking takes precedence over driving; modes with neither yield `None`.
    pub fn vehicle_mode(self) -> Option<TraverseMode> {
        if self.includes_biking() {
            Some(TraverseMode::Bicycle)
        } else if self.includes_driving() {
            Some(TraverseMode::Car)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [StreetMode; 10] = [
        StreetMode::NotSet,
        StreetMode::Walk,
        StreetMode::Bike,
        StreetMode::BikeToPark,
        StreetMode::BikeRental,
        StreetMode::Car,
        StreetMode::CarToPark,
        StreetMode::CarPickup,
        StreetMode::CarRental,
        StreetMode::Flexible,
    ];

    #[test]
    fn parking_modes_include_walking() {
        for mode in ALL.iter().filter(|m| m.includes_parking()) {
            assert!(mode.includes_walking(), "{mode:?}");
        }
    }

    #[test]
    fn parking_modes() {
        let parking: Vec<_> = ALL.iter().filter(|m| m.includes_parking()).collect();
        assert_eq!(parking, vec![&StreetMode::BikeToPark, &StreetMode::CarToPark]);
    }

    #[test]
    fn no_mode_both_bikes_and_drives() {
        for mode in ALL {
            assert!(!(mode.includes_biking() && mode.includes_driving()), "{mode:?}");
        }
    }

    #[test]
    fn vehicle_mode_selection() {
        assert_eq!(StreetMode::BikeToPark.vehicle_mode(), Some(TraverseMode::Bicycle));
        assert_eq!(StreetMode::CarToPark.vehicle_mode(), Some(TraverseMode::Car));
        assert_eq!(StreetMode::BikeRental.vehicle_mode(), Some(TraverseMode::Bicycle));
        assert_eq!(StreetMode::Walk.vehicle_mode(), None);
        assert_eq!(StreetMode::Flexible.vehicle_mode(), None);
    }

    #[test]
    fn serde_names() {
        let mode: StreetMode = serde_json::from_str("\"BIKE_TO_PARK\"").unwrap();
        assert_eq!(mode, StreetMode::BikeToPark);
        assert_eq!(
            serde_json::to_string(&TraverseMode::Bicycle).unwrap(),
            "\"BICYCLE\""
        );
    }

    #[test]
    fn display() {
        assert_eq!(TraverseMode::Car.to_string(), "CAR");
        assert!(TraverseMode::Car.is_vehicle());
        assert!(!TraverseMode::Walk.is_vehicle());
    }
}
