//! Search time window and transfer limits.

use chrono::{DateTime, Duration, Utc};

use crate::request::RequestError;

/// The resolved search parameters of a [`super::RaptorRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    earliest_departure_time: Option<DateTime<Utc>>,
    latest_arrival_time: Option<DateTime<Utc>>,
    search_window: Option<Duration>,
    number_of_additional_transfers: u32,
    max_number_of_transfers: u32,
}

impl SearchParams {
    /// Defaults for a request that has not been given any times yet.
    pub(super) fn defaults() -> Self {
        Self {
            earliest_departure_time: None,
            latest_arrival_time: None,
            search_window: None,
            number_of_additional_transfers: 5,
            max_number_of_transfers: 12,
        }
    }

    pub fn earliest_departure_time(&self) -> Option<DateTime<Utc>> {
        self.earliest_departure_time
    }

    pub fn latest_arrival_time(&self) -> Option<DateTime<Utc>> {
        self.latest_arrival_time
    }

    /// How far past the earliest departure (or before the latest arrival)
    /// departures are considered. `None` lets the engine decide.
    pub fn search_window(&self) -> Option<Duration> {
        self.search_window
    }

    pub fn number_of_additional_transfers(&self) -> u32 {
        self.number_of_additional_transfers
    }

    pub fn max_number_of_transfers(&self) -> u32 {
        self.max_number_of_transfers
    }

    pub fn to_builder(&self) -> SearchParamsBuilder {
        SearchParamsBuilder {
            params: self.clone(),
        }
    }
}

/// Accumulates [`SearchParams`] inside a [`super::RaptorRequestBuilder`].
#[derive(Debug, Clone)]
pub struct SearchParamsBuilder {
    params: SearchParams,
}

impl SearchParamsBuilder {
    pub fn earliest_departure_time(&mut self, time: DateTime<Utc>) -> &mut Self {
        self.params.earliest_departure_time = Some(time);
        self
    }

    pub fn latest_arrival_time(&mut self, time: DateTime<Utc>) -> &mut Self {
        self.params.latest_arrival_time = Some(time);
        self
    }

    pub fn search_window(&mut self, window: Duration) -> &mut Self {
        self.params.search_window = Some(window);
        self
    }

    pub fn number_of_additional_transfers(&mut self, transfers: u32) -> &mut Self {
        self.params.number_of_additional_transfers = transfers;
        self
    }

    pub fn max_number_of_transfers(&mut self, transfers: u32) -> &mut Self {
        self.params.max_number_of_transfers = transfers;
        self
    }

    pub fn build(&self) -> Result<SearchParams, RequestError> {
        let params = &self.params;
        match (params.earliest_departure_time, params.latest_arrival_time) {
            (None, None) => return Err(RequestError::MissingSearchTime),
            (Some(departure), Some(arrival)) if arrival <= departure => {
                return Err(RequestError::ArrivalBeforeDeparture);
            }
            _ => {}
        }
        if params.search_window.is_some_and(|w| w < Duration::zero()) {
            return Err(RequestError::InvalidSearchParams(
                "search window must not be negative",
            ));
        }
        if params.number_of_additional_transfers > params.max_number_of_transfers {
            return Err(RequestError::InvalidSearchParams(
                "additional transfers exceed the transfer limit",
            ));
        }
        Ok(params.clone())
    }
}
