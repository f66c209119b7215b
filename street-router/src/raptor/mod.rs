//! Configuration for the transit (Raptor) search.
//!
//! Builders accumulate search parameters, profile, direction,
//! optimizations, slack, timers and debug settings, and resolve them into
//! an immutable [`RaptorRequest`]. Each request carries a short alias such
//! as `MC-Rev-LL` used to correlate logs and timings.

mod debug;
mod optimization;
mod params;
mod request;
mod slack;

pub use debug::{DebugRequest, DebugRequestBuilder, LoggingTimers, NoopTimers, RaptorTimers};
pub use optimization::{Optimization, OptimizationSet, RaptorProfile};
pub use params::{SearchParams, SearchParamsBuilder};
pub use request::{RaptorRequest, RaptorRequestBuilder, generate_request_alias};
pub use slack::{DefaultSlackProvider, SlackProvider};
