//! Debug tracing requests and performance timer sinks.

use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;

use tracing::debug;

/// Stops and paths to trace while a search runs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DebugRequest {
    stops: BTreeSet<usize>,
    path: Vec<usize>,
    path_from_stop_index: usize,
}

impl DebugRequest {
    pub fn stops(&self) -> &BTreeSet<usize> {
        &self.stops
    }

    /// A path to follow, as a sequence of stop indices.
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    /// Start tracing the path from this position in it.
    pub fn path_from_stop_index(&self) -> usize {
        self.path_from_stop_index
    }

    pub fn is_enabled(&self) -> bool {
        !self.stops.is_empty() || !self.path.is_empty()
    }

    pub fn to_builder(&self) -> DebugRequestBuilder {
        DebugRequestBuilder {
            request: self.clone(),
        }
    }
}

/// Accumulates a [`DebugRequest`] inside a [`super::RaptorRequestBuilder`].
#[derive(Debug, Clone, Default)]
pub struct DebugRequestBuilder {
    request: DebugRequest,
}

impl DebugRequestBuilder {
    pub fn add_stops(&mut self, stops: impl IntoIterator<Item = usize>) -> &mut Self {
        self.request.stops.extend(stops);
        self
    }

    pub fn set_path(&mut self, path: Vec<usize>) -> &mut Self {
        self.request.path = path;
        self
    }

    pub fn path_from_stop_index(&mut self, index: usize) -> &mut Self {
        self.request.path_from_stop_index = index;
        self
    }

    pub fn build(&self) -> DebugRequest {
        self.request.clone()
    }
}

/// Receives timings for the phases of a search, keyed by request alias.
pub trait RaptorTimers: fmt::Debug + Send + Sync {
    fn record(&self, alias: &str, phase: &str, elapsed: Duration);
}

/// Discards every timing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTimers;

impl RaptorTimers for NoopTimers {
    fn record(&self, _alias: &str, _phase: &str, _elapsed: Duration) {}
}

/// Emits timings as `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingTimers;

impl RaptorTimers for LoggingTimers {
    fn record(&self, alias: &str, phase: &str, elapsed: Duration) {
        debug!(alias, phase, elapsed_ms = elapsed.as_millis() as u64, "timer");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_request_is_disabled() {
        assert!(!DebugRequest::default().is_enabled());
    }

    #[test]
    fn builder_accumulates() {
        let mut builder = DebugRequestBuilder::default();
        builder.add_stops([4, 2]).add_stops([4, 7]);
        builder.set_path(vec![2, 5, 7]).path_from_stop_index(1);

        let request = builder.build();

        assert!(request.is_enabled());
        assert_eq!(request.stops().iter().copied().collect::<Vec<_>>(), vec![2, 4, 7]);
        assert_eq!(request.path(), &[2, 5, 7]);
        assert_eq!(request.path_from_stop_index(), 1);
        assert_eq!(request.to_builder().build(), request);
    }
}
