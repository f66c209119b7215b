//! Minimal edges for unit tests.

use super::{Edge, TraversalResult};
use crate::domain::{EdgeId, VertexId};
use crate::state::StateRef;

/// Always traversable; charges a fixed weight and time.
#[derive(Debug)]
pub(crate) struct FixedEdge {
    id: EdgeId,
    from: VertexId,
    to: VertexId,
    weight: f64,
    seconds: u32,
}

impl FixedEdge {
    pub(crate) fn new(id: EdgeId, from: VertexId, to: VertexId) -> Self {
        Self {
            id,
            from,
            to,
            weight: 0.0,
            seconds: 0,
        }
    }

    pub(crate) fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub(crate) fn with_seconds(mut self, seconds: u32) -> Self {
        self.seconds = seconds;
        self
    }
}

impl Edge for FixedEdge {
    fn id(&self) -> EdgeId {
        self.id
    }

    fn from_vertex(&self) -> VertexId {
        self.from
    }

    fn to_vertex(&self) -> VertexId {
        self.to
    }

    fn traverse(&self, s0: StateRef<'_>) -> TraversalResult {
        let mut s1 = s0.edit(self)?;
        s1.increment_weight(self.weight);
        s1.increment_time_in_seconds(self.seconds);
        s1.make_states()
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

/// Offers one continuation per configured weight.
#[derive(Debug)]
pub(crate) struct ForkEdge {
    id: EdgeId,
    from: VertexId,
    to: VertexId,
    weights: Vec<f64>,
}

impl ForkEdge {
    pub(crate) fn new(id: EdgeId, from: VertexId, to: VertexId, weights: Vec<f64>) -> Self {
        Self {
            id,
            from,
            to,
            weights,
        }
    }
}

impl Edge for ForkEdge {
    fn id(&self) -> EdgeId {
        self.id
    }

    fn from_vertex(&self) -> VertexId {
        self.from
    }

    fn to_vertex(&self) -> VertexId {
        self.to
    }

    fn traverse(&self, s0: StateRef<'_>) -> TraversalResult {
        let mut states = Vec::with_capacity(self.weights.len());
        for &weight in &self.weights {
            let mut s1 = s0.edit(self)?;
            s1.increment_weight(weight);
            states.push(s1.make_state()?);
        }
        Ok(states)
    }

    fn name(&self) -> &str {
        "fork"
    }
}
