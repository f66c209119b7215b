//! The immutable request a street search runs under.

use chrono::{DateTime, Utc};

use super::{RequestError, RoutingPreferences, VehicleParkingRequest};
use crate::domain::{SearchDirection, StreetMode};

/// Everything a traversal needs to know about the search it belongs to.
///
/// Requests are built once with [`StreetSearchRequestBuilder`] and then
/// shared behind an `Arc` by every state of the search.
#[derive(Debug, Clone)]
pub struct StreetSearchRequest {
    start_time: DateTime<Utc>,
    mode: StreetMode,
    direction: SearchDirection,
    wheelchair: bool,
    preferences: RoutingPreferences,
    parking: VehicleParkingRequest,
}

impl StreetSearchRequest {
    pub fn builder() -> StreetSearchRequestBuilder {
        StreetSearchRequestBuilder::default()
    }

    /// A builder pre-filled with this request's values.
    pub fn to_builder(&self) -> StreetSearchRequestBuilder {
        StreetSearchRequestBuilder {
            start_time: self.start_time,
            mode: self.mode,
            direction: self.direction,
            wheelchair: self.wheelchair,
            preferences: self.preferences,
            parking: self.parking.clone(),
        }
    }

    /// Departure time for depart-at searches, arrival time for arrive-by.
    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn mode(&self) -> StreetMode {
        self.mode
    }

    pub fn search_direction(&self) -> SearchDirection {
        self.direction
    }

    pub fn arrive_by(&self) -> bool {
        self.direction.is_in_reverse()
    }

    pub fn wheelchair(&self) -> bool {
        self.wheelchair
    }

    pub fn preferences(&self) -> &RoutingPreferences {
        &self.preferences
    }

    pub fn parking(&self) -> &VehicleParkingRequest {
        &self.parking
    }
}

/// Mutable staging area for a [`StreetSearchRequest`].
#[derive(Debug, Clone, Default)]
pub struct StreetSearchRequestBuilder {
    start_time: DateTime<Utc>,
    mode: StreetMode,
    direction: SearchDirection,
    wheelchair: bool,
    preferences: RoutingPreferences,
    parking: VehicleParkingRequest,
}

impl StreetSearchRequestBuilder {
    pub fn with_start_time(mut self, start_time: DateTime<Utc>) -> Self {
        self.start_time = start_time;
        self
    }

    pub fn with_mode(mut self, mode: StreetMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_direction(mut self, direction: SearchDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_arrive_by(self, arrive_by: bool) -> Self {
        self.with_direction(SearchDirection::from_arrive_by(arrive_by))
    }

    pub fn with_wheelchair(mut self, wheelchair: bool) -> Self {
        self.wheelchair = wheelchair;
        self
    }

    pub fn with_preferences(mut self, f: impl FnOnce(RoutingPreferences) -> RoutingPreferences) -> Self {
        self.preferences = f(self.preferences);
        self
    }

    pub fn with_parking(mut self, parking: VehicleParkingRequest) -> Self {
        self.parking = parking;
        self
    }

    pub fn build(self) -> Result<StreetSearchRequest, RequestError> {
        self.preferences.validate()?;
        Ok(StreetSearchRequest {
            start_time: self.start_time,
            mode: self.mode,
            direction: self.direction,
            wheelchair: self.wheelchair,
            preferences: self.preferences,
            parking: self.parking,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn defaults() {
        let request = StreetSearchRequest::builder().build().unwrap();

        assert_eq!(request.mode(), StreetMode::Walk);
        assert!(!request.arrive_by());
        assert!(!request.wheelchair());
        assert_eq!(request.start_time(), DateTime::<Utc>::default());
        assert_eq!(request.parking().unpreferred_cost(), 0);
    }

    #[test]
    fn builder_sets_fields() {
        let start = Utc.with_ymd_and_hms(2024, 3, 15, 8, 30, 0).unwrap();
        let request = StreetSearchRequest::builder()
            .with_start_time(start)
            .with_mode(StreetMode::BikeToPark)
            .with_arrive_by(true)
            .with_wheelchair(true)
            .with_preferences(|p| p.with_bike(|bike| bike.park_cost = 0))
            .with_parking(VehicleParkingRequest::new().with_unpreferred_cost(10))
            .build()
            .unwrap();

        assert_eq!(request.start_time(), start);
        assert_eq!(request.mode(), StreetMode::BikeToPark);
        assert_eq!(request.search_direction(), SearchDirection::Reverse);
        assert!(request.wheelchair());
        assert_eq!(request.preferences().bike.park_cost, 0);
        assert_eq!(request.parking().unpreferred_cost(), 10);
    }

    #[test]
    fn to_builder_copies() {
        let request = StreetSearchRequest::builder()
            .with_mode(StreetMode::CarToPark)
            .build()
            .unwrap();
        let reversed = request.to_builder().with_arrive_by(true).build().unwrap();

        assert_eq!(reversed.mode(), StreetMode::CarToPark);
        assert!(reversed.arrive_by());
        assert!(!request.arrive_by());
    }

    #[test]
    fn invalid_preferences_fail_build() {
        let result = StreetSearchRequest::builder()
            .with_preferences(|p| p.with_walk(|walk| walk.speed = -1.0))
            .build();

        assert!(matches!(
            result,
            Err(RequestError::InvalidPreference { name: "walk.speed", .. })
        ));
    }
}
