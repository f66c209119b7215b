//! Algorithm profiles and optimization toggles.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which variant of the transit search a request runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RaptorProfile {
    /// Pareto optimal on arrival time, transfers, cost and more.
    #[default]
    MultiCriteria,
    /// Arrival time and transfers, tracking the full path.
    Standard,
    /// Best arrival time only.
    BestTime,
    MinTravelDuration,
    MinTravelDurationBestTime,
}

impl RaptorProfile {
    pub fn abbreviation(self) -> &'static str {
        match self {
            RaptorProfile::MultiCriteria => "MC",
            RaptorProfile::Standard => "Std",
            RaptorProfile::BestTime => "BT",
            RaptorProfile::MinTravelDuration => "TD",
            RaptorProfile::MinTravelDurationBestTime => "TDBT",
        }
    }
}

impl fmt::Display for RaptorProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

/// Optional behaviours a search may switch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Optimization {
    /// Expand independent work in parallel.
    Parallel,
    /// Prune states that cannot beat arrivals already found at the destination.
    ParetoCheckAgainstDestination,
    /// Only consider transfers from stops reached in the previous round.
    TransfersStopFilter,
}

const PARALLEL: u8 = 0b0000_0001;
const PARETO_CHECK_AGAINST_DESTINATION: u8 = 0b0000_0010;
const TRANSFERS_STOP_FILTER: u8 = 0b0000_0100;

impl Optimization {
    pub const ALL: [Optimization; 3] = [
        Optimization::Parallel,
        Optimization::ParetoCheckAgainstDestination,
        Optimization::TransfersStopFilter,
    ];

    fn bit(self) -> u8 {
        match self {
            Optimization::Parallel => PARALLEL,
            Optimization::ParetoCheckAgainstDestination => PARETO_CHECK_AGAINST_DESTINATION,
            Optimization::TransfersStopFilter => TRANSFERS_STOP_FILTER,
        }
    }

    pub fn is_one_of(self, optimizations: &OptimizationSet) -> bool {
        optimizations.contains(self)
    }
}

/// A set of [`Optimization`]s packed into one byte.
///
/// Insertion order is irrelevant; iteration always follows declaration
/// order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct OptimizationSet {
    bits: u8,
}

impl OptimizationSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, optimization: Optimization) {
        self.bits |= optimization.bit();
    }

    pub fn remove(&mut self, optimization: Optimization) {
        self.bits &= !optimization.bit();
    }

    #[inline]
    pub fn contains(&self, optimization: Optimization) -> bool {
        self.bits & optimization.bit() != 0
    }

    pub fn clear(&mut self) {
        self.bits = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Optimization> + '_ {
        Optimization::ALL.into_iter().filter(|o| self.contains(*o))
    }
}

impl FromIterator<Optimization> for OptimizationSet {
    fn from_iter<I: IntoIterator<Item = Optimization>>(iter: I) -> Self {
        let mut set = Self::new();
        for optimization in iter {
            set.insert(optimization);
        }
        set
    }
}

impl fmt::Debug for OptimizationSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abbreviations() {
        assert_eq!(RaptorProfile::MultiCriteria.abbreviation(), "MC");
        assert_eq!(RaptorProfile::Standard.abbreviation(), "Std");
        assert_eq!(RaptorProfile::BestTime.abbreviation(), "BT");
        assert_eq!(RaptorProfile::MinTravelDuration.abbreviation(), "TD");
        assert_eq!(RaptorProfile::MinTravelDurationBestTime.to_string(), "TDBT");
    }

    #[test]
    fn set_operations() {
        let mut set = OptimizationSet::new();
        assert!(set.is_empty());

        set.insert(Optimization::TransfersStopFilter);
        set.insert(Optimization::Parallel);
        set.insert(Optimization::Parallel);
        assert!(set.contains(Optimization::Parallel));
        assert!(!set.contains(Optimization::ParetoCheckAgainstDestination));
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![Optimization::Parallel, Optimization::TransfersStopFilter]
        );

        set.remove(Optimization::Parallel);
        assert!(!Optimization::Parallel.is_one_of(&set));
        set.clear();
        assert!(set.is_empty());
    }

    #[test]
    fn order_independent() {
        let a: OptimizationSet = [
            Optimization::ParetoCheckAgainstDestination,
            Optimization::Parallel,
        ]
        .into_iter()
        .collect();
        let b: OptimizationSet = [
            Optimization::Parallel,
            Optimization::ParetoCheckAgainstDestination,
        ]
        .into_iter()
        .collect();
        assert_eq!(a, b);
        assert_eq!(format!("{a:?}"), "{Parallel, ParetoCheckAgainstDestination}");
    }

    #[test]
    fn serde_names() {
        let parsed: Vec<Optimization> =
            serde_json::from_str(r#"["PARALLEL", "PARETO_CHECK_AGAINST_DESTINATION"]"#).unwrap();
        assert_eq!(
            parsed,
            vec![
                Optimization::Parallel,
                Optimization::ParetoCheckAgainstDestination
            ]
        );
        let profile: RaptorProfile = serde_json::from_str(r#""BEST_TIME""#).unwrap();
        assert_eq!(profile, RaptorProfile::BestTime);
    }
}
