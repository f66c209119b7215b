//! Request validation errors.
//!
//! These are configuration mistakes found while building a request. They
//! are never produced during traversal.

/// A request could not be built from the supplied configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RequestError {
    /// A tag filter contained an empty or whitespace-only tag
    #[error("parking filter tags must not be blank")]
    BlankTag,

    /// A preference value is out of range
    #[error("invalid preference {name}: {value}")]
    InvalidPreference { name: &'static str, value: f64 },

    /// Neither end of the search window is fixed
    #[error("earliest departure time or latest arrival time must be set")]
    MissingSearchTime,

    /// Latest arrival lies before earliest departure
    #[error("latest arrival time must be after earliest departure time")]
    ArrivalBeforeDeparture,

    /// The search window or a transfer limit is out of range
    #[error("invalid search parameters: {0}")]
    InvalidSearchParams(&'static str),
}
