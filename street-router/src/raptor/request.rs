//! The transit search request and its builder.

use std::sync::Arc;
use std::time::Duration;

use super::debug::{DebugRequest, DebugRequestBuilder, NoopTimers, RaptorTimers};
use super::optimization::{Optimization, OptimizationSet, RaptorProfile};
use super::params::{SearchParams, SearchParamsBuilder};
use super::slack::{DefaultSlackProvider, SlackProvider};
use crate::domain::SearchDirection;
use crate::request::RequestError;

/// A fully resolved, immutable transit search request.
///
/// Use [`RaptorRequestBuilder`] to create one, or
/// [`RaptorRequest::to_builder`] to derive a modified copy.
#[derive(Debug, Clone)]
pub struct RaptorRequest {
    search_params: SearchParams,
    profile: RaptorProfile,
    search_direction: SearchDirection,
    optimizations: OptimizationSet,
    slack_provider: Arc<dyn SlackProvider>,
    performance_timers: Arc<dyn RaptorTimers>,
    debug: DebugRequest,
    alias: String,
}

impl RaptorRequest {
    pub fn to_builder(&self) -> RaptorRequestBuilder {
        RaptorRequestBuilder {
            search_params: self.search_params.to_builder(),
            profile: self.profile,
            search_direction: self.search_direction,
            optimizations: self.optimizations,
            slack_provider: Arc::clone(&self.slack_provider),
            performance_timers: Arc::clone(&self.performance_timers),
            debug: self.debug.to_builder(),
        }
    }

    pub fn search_params(&self) -> &SearchParams {
        &self.search_params
    }

    pub fn profile(&self) -> RaptorProfile {
        self.profile
    }

    pub fn search_direction(&self) -> SearchDirection {
        self.search_direction
    }

    pub fn optimizations(&self) -> &OptimizationSet {
        &self.optimizations
    }

    pub fn optimization_enabled(&self, optimization: Optimization) -> bool {
        self.optimizations.contains(optimization)
    }

    pub fn slack_provider(&self) -> &dyn SlackProvider {
        self.slack_provider.as_ref()
    }

    pub fn performance_timers(&self) -> &dyn RaptorTimers {
        self.performance_timers.as_ref()
    }

    pub fn debug(&self) -> &DebugRequest {
        &self.debug
    }

    /// Short name for logs and timers, see [`generate_request_alias`].
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Report how long a phase of this request took.
    pub fn record_timing(&self, phase: &str, elapsed: Duration) {
        self.performance_timers.record(&self.alias, phase, elapsed);
    }
}

/// Accumulates the parts of a [`RaptorRequest`].
#[derive(Debug, Clone)]
pub struct RaptorRequestBuilder {
    search_params: SearchParamsBuilder,
    profile: RaptorProfile,
    search_direction: SearchDirection,
    optimizations: OptimizationSet,
    slack_provider: Arc<dyn SlackProvider>,
    performance_timers: Arc<dyn RaptorTimers>,
    debug: DebugRequestBuilder,
}

/// A fresh builder has no search times set, so it does not build until
/// at least one is given.
impl Default for RaptorRequestBuilder {
    fn default() -> Self {
        Self {
            search_params: SearchParams::defaults().to_builder(),
            profile: RaptorProfile::default(),
            search_direction: SearchDirection::Forward,
            optimizations: OptimizationSet::new(),
            slack_provider: Arc::new(DefaultSlackProvider::default()),
            performance_timers: Arc::new(NoopTimers),
            debug: DebugRequestBuilder::default(),
        }
    }
}

impl RaptorRequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search_params(&mut self) -> &mut SearchParamsBuilder {
        &mut self.search_params
    }

    pub fn profile(&self) -> RaptorProfile {
        self.profile
    }

    pub fn set_profile(&mut self, profile: RaptorProfile) -> &mut Self {
        self.profile = profile;
        self
    }

    pub fn search_direction(&self) -> SearchDirection {
        self.search_direction
    }

    pub fn set_search_direction(&mut self, direction: SearchDirection) -> &mut Self {
        self.search_direction = direction;
        self
    }

    pub fn slack_provider(&self) -> &dyn SlackProvider {
        self.slack_provider.as_ref()
    }

    pub fn set_slack_provider(&mut self, provider: impl SlackProvider + 'static) -> &mut Self {
        self.slack_provider = Arc::new(provider);
        self
    }

    pub fn optimizations(&self) -> &OptimizationSet {
        &self.optimizations
    }

    pub fn enable_optimization(&mut self, optimization: Optimization) -> &mut Self {
        self.optimizations.insert(optimization);
        self
    }

    pub fn disable_optimization(&mut self, optimization: Optimization) -> &mut Self {
        self.optimizations.remove(optimization);
        self
    }

    pub fn clear_optimizations(&mut self) -> &mut Self {
        self.optimizations.clear();
        self
    }

    pub fn performance_timers(&self) -> &dyn RaptorTimers {
        self.performance_timers.as_ref()
    }

    pub fn set_performance_timers(&mut self, timers: impl RaptorTimers + 'static) -> &mut Self {
        self.performance_timers = Arc::new(timers);
        self
    }

    pub fn debug(&mut self) -> &mut DebugRequestBuilder {
        &mut self.debug
    }

    /// Name the request from its profile, direction and optimizations.
    /// Set those before calling this.
    pub fn generate_alias(&self) -> String {
        generate_request_alias(self.profile, self.search_direction, &self.optimizations)
    }

    pub fn build(&self) -> Result<RaptorRequest, RequestError> {
        Ok(RaptorRequest {
            search_params: self.search_params.build()?,
            profile: self.profile,
            search_direction: self.search_direction,
            optimizations: self.optimizations,
            slack_provider: Arc::clone(&self.slack_provider),
            performance_timers: Arc::clone(&self.performance_timers),
            debug: self.debug.build(),
            alias: self.generate_alias(),
        })
    }
}

/// `<profile>[-Rev][-LL][-DP]`: `-Rev` for reverse searches, `-LL` when
/// running in parallel, `-DP` when pruning against destination arrivals.
///
/// This string is a key in logs and metrics; keep the format stable.
pub fn generate_request_alias(
    profile: RaptorProfile,
    direction: SearchDirection,
    optimizations: &OptimizationSet,
) -> String {
    let mut name = profile.abbreviation().to_string();
    if direction.is_in_reverse() {
        name.push_str("-Rev");
    }
    if Optimization::Parallel.is_one_of(optimizations) {
        name.push_str("-LL");
    }
    if Optimization::ParetoCheckAgainstDestination.is_one_of(optimizations) {
        name.push_str("-DP");
    }
    name
}
