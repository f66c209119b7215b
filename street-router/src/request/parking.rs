//! The parking part of a street search request.
//!
//! Two separate mechanisms act on a facility:
//!
//! - the admission filter ([`VehicleParkingFilterRequest`]) decides whether
//!   a facility may be used at all;
//! - the preferred predicate ([`ParkingPreference`]) only decides whether
//!   using it costs an extra `unpreferred_cost`.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use super::RequestError;
use crate::facility::VehicleParking;

/// A single condition on a facility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VehicleParkingFilter {
    /// Matches facilities carrying at least one of these tags.
    Tags(BTreeSet<String>),
}

impl VehicleParkingFilter {
    /// Build a tag filter. Blank tags are a configuration error.
    pub fn tags<I, S>(tags: I) -> Result<Self, RequestError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tags: BTreeSet<String> = tags.into_iter().map(Into::into).collect();
        if tags.iter().any(|t| t.trim().is_empty()) {
            return Err(RequestError::BlankTag);
        }
        Ok(VehicleParkingFilter::Tags(tags))
    }

    pub fn matches(&self, parking: &VehicleParking) -> bool {
        match self {
            VehicleParkingFilter::Tags(tags) => !tags.is_disjoint(parking.tags()),
        }
    }

    /// A filter without tags constrains nothing and is dropped.
    fn is_subject_to_filtering(&self) -> bool {
        match self {
            VehicleParkingFilter::Tags(tags) => !tags.is_empty(),
        }
    }
}

/// Exclusion (`not`) and inclusion (`select`) filters.
///
/// A facility passes when no `not` filter matches it and, if any `select`
/// filters are present, at least one of them matches. A tag present in both
/// lists therefore excludes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VehicleParkingFilterRequest {
    not: Vec<VehicleParkingFilter>,
    select: Vec<VehicleParkingFilter>,
}

impl VehicleParkingFilterRequest {
    pub fn new(
        not: impl IntoIterator<Item = VehicleParkingFilter>,
        select: impl IntoIterator<Item = VehicleParkingFilter>,
    ) -> Self {
        Self {
            not: not
                .into_iter()
                .filter(VehicleParkingFilter::is_subject_to_filtering)
                .collect(),
            select: select
                .into_iter()
                .filter(VehicleParkingFilter::is_subject_to_filtering)
                .collect(),
        }
    }

    /// Shorthand for one exclusion and one inclusion tag filter.
    pub fn from_tags<N, S, T>(not: N, select: S) -> Result<Self, RequestError>
    where
        N: IntoIterator<Item = T>,
        S: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Ok(Self::new(
            [VehicleParkingFilter::tags(not)?],
            [VehicleParkingFilter::tags(select)?],
        ))
    }

    /// A filter that admits every facility.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn not(&self) -> &[VehicleParkingFilter] {
        &self.not
    }

    pub fn select(&self) -> &[VehicleParkingFilter] {
        &self.select
    }

    pub fn matches(&self, parking: &VehicleParking) -> bool {
        if !self.select.is_empty() && !self.select.iter().any(|f| f.matches(parking)) {
            return false;
        }
        !self.not.iter().any(|f| f.matches(parking))
    }
}

/// Decides whether a reachable facility is preferred.
///
/// Non-preferred facilities stay usable; they only cost more.
pub trait ParkingPreference: fmt::Debug + Send + Sync {
    fn matches(&self, parking: &VehicleParking) -> bool;
}

impl ParkingPreference for VehicleParkingFilterRequest {
    fn matches(&self, parking: &VehicleParking) -> bool {
        VehicleParkingFilterRequest::matches(self, parking)
    }
}

/// Adapts any predicate over a facility into a [`ParkingPreference`].
pub struct PreferredBy<F>(pub F);

impl<F> fmt::Debug for PreferredBy<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PreferredBy(..)")
    }
}

impl<F> ParkingPreference for PreferredBy<F>
where
    F: Fn(&VehicleParking) -> bool + Send + Sync,
{
    fn matches(&self, parking: &VehicleParking) -> bool {
        (self.0)(parking)
    }
}

/// Parking options for one search.
#[derive(Debug, Clone)]
pub struct VehicleParkingRequest {
    filter: VehicleParkingFilterRequest,
    preferred: Arc<dyn ParkingPreference>,
    unpreferred_cost: u32,
    use_availability_information: bool,
}

impl Default for VehicleParkingRequest {
    fn default() -> Self {
        Self {
            filter: VehicleParkingFilterRequest::empty(),
            preferred: Arc::new(VehicleParkingFilterRequest::empty()),
            unpreferred_cost: 0,
            use_availability_information: false,
        }
    }
}

impl VehicleParkingRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, filter: VehicleParkingFilterRequest) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_preferred(mut self, preferred: impl ParkingPreference + 'static) -> Self {
        self.preferred = Arc::new(preferred);
        self
    }

    pub fn with_unpreferred_cost(mut self, cost: u32) -> Self {
        self.unpreferred_cost = cost;
        self
    }

    pub fn with_use_availability_information(mut self, value: bool) -> Self {
        self.use_availability_information = value;
        self
    }

    /// The admission filter.
    pub fn filter(&self) -> &VehicleParkingFilterRequest {
        &self.filter
    }

    pub fn preferred(&self) -> &dyn ParkingPreference {
        self.preferred.as_ref()
    }

    pub fn unpreferred_cost(&self) -> u32 {
        self.unpreferred_cost
    }

    pub fn use_availability_information(&self) -> bool {
        self.use_availability_information
    }

    /// The extra weight for using `parking`: zero when it is preferred.
    pub fn penalty_for(&self, parking: &VehicleParking) -> u32 {
        if self.preferred.matches(parking) {
            0
        } else {
            self.unpreferred_cost
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parking(tags: &[&str]) -> VehicleParking {
        VehicleParking::builder("p").tags(tags.iter().copied()).build()
    }

    fn filter(not: &[&str], select: &[&str]) -> VehicleParkingFilterRequest {
        VehicleParkingFilterRequest::from_tags(not.iter().copied(), select.iter().copied())
            .unwrap()
    }

    #[test]
    fn admission_cases() {
        let cases: [(&[&str], &[&str], &[&str], bool); 7] = [
            (&[], &[], &[], true),
            (&["a-tag"], &[], &[], true),
            (&["a"], &["a"], &[], false),
            (&["a"], &["a"], &["a"], false),
            (&["a", "b"], &["b"], &["a"], false),
            (&["a", "b"], &[], &["a"], true),
            (&["a", "b"], &[], &["c"], false),
        ];
        for (tags, not, select, expected) in cases {
            assert_eq!(
                filter(not, select).matches(&parking(tags)),
                expected,
                "tags={tags:?} not={not:?} select={select:?}"
            );
        }
    }

    #[test]
    fn empty_filters_are_dropped() {
        let request = filter(&[], &[]);
        assert!(request.not().is_empty());
        assert!(request.select().is_empty());
    }

    #[test]
    fn blank_tag_is_rejected() {
        assert_eq!(
            VehicleParkingFilter::tags(["ok", "  "]),
            Err(RequestError::BlankTag)
        );
        assert!(VehicleParkingFilterRequest::from_tags([""], ["a"]).is_err());
    }

    #[test]
    fn any_select_filter_admits() {
        let request = VehicleParkingFilterRequest::new(
            [],
            [
                VehicleParkingFilter::tags(["x"]).unwrap(),
                VehicleParkingFilter::tags(["b"]).unwrap(),
            ],
        );
        assert!(request.matches(&parking(&["b"])));
        assert!(!request.matches(&parking(&["c"])));
    }

    #[test]
    fn default_request_prefers_everything() {
        let request = VehicleParkingRequest::default().with_unpreferred_cost(300);
        assert_eq!(request.penalty_for(&parking(&["anything"])), 0);
        assert!(!request.use_availability_information());
    }

    #[test]
    fn tag_preference_penalises_others() {
        let request = VehicleParkingRequest::new()
            .with_preferred(filter(&[], &["covered"]))
            .with_unpreferred_cost(300);

        assert_eq!(request.penalty_for(&parking(&["covered"])), 0);
        assert_eq!(request.penalty_for(&parking(&["open-air"])), 300);
    }

    #[test]
    fn predicate_preference() {
        let request = VehicleParkingRequest::new()
            .with_preferred(PreferredBy(|p: &VehicleParking| p.name() == "Central"))
            .with_unpreferred_cost(50);

        let central = VehicleParking::builder("c").name("Central").build();
        assert_eq!(request.penalty_for(&central), 0);
        assert_eq!(request.penalty_for(&parking(&[])), 50);
        assert_eq!(format!("{:?}", PreferredBy(|_: &VehicleParking| true)), "PreferredBy(..)");
    }
}
