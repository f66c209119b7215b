//! Search configuration for the street router.

use crate::raptor::{Optimization, OptimizationSet};

/// Configuration parameters for a street search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Traverse the edges leaving a state in parallel.
    /// Results are identical to a sequential run.
    pub parallel: bool,

    /// Maximum number of states to expand before giving up.
    pub max_states: usize,

    /// States heavier than this are discarded.
    pub max_weight: Option<f64>,
}

impl SearchConfig {
    pub fn new(parallel: bool, max_states: usize, max_weight: Option<f64>) -> Self {
        Self {
            parallel,
            max_states,
            max_weight,
        }
    }

    /// Turn on the optimizations the street search understands.
    pub fn with_optimizations(mut self, optimizations: &OptimizationSet) -> Self {
        if optimizations.contains(Optimization::Parallel) {
            self.parallel = true;
        }
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            parallel: false,
            max_states: 10_000,
            max_weight: None,
        }
    }
}
