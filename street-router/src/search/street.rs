//! Best-first expansion of path states.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, trace, warn};

use super::config::SearchConfig;
use crate::domain::{StateId, TraverseMode, VertexId};
use crate::edge::{Edge, TraversalResult};
use crate::graph::{Graph, GraphError};
use crate::request::StreetSearchRequest;
use crate::state::{PathState, StateArena, StateRef, TraversalError};

/// Error from a street search.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchError {
    #[error("invalid graph: {0}")]
    Graph(#[from] GraphError),

    #[error("traversal failed: {0}")]
    Traversal(#[from] TraversalError),
}

/// States that agree on these are interchangeable for the rest of the
/// search, so only the lightest one is expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct StateKey {
    vertex: VertexId,
    mode: TraverseMode,
    vehicle_parked: bool,
    renting_vehicle: bool,
}

impl StateKey {
    fn of(state: &PathState) -> Self {
        Self {
            vertex: state.vertex(),
            mode: state.non_transit_mode(),
            vehicle_parked: state.is_vehicle_parked(),
            renting_vehicle: state.is_renting_vehicle(),
        }
    }
}

/// Min-heap entry. Ties go to the older state.
#[derive(Debug, Clone, Copy)]
struct Queued {
    weight: f64,
    id: StateId,
}

impl PartialEq for Queued {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Queued {}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Queued {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .total_cmp(&self.weight)
            .then_with(|| other.id.cmp(&self.id))
    }
}

/// Result of a street search.
#[derive(Debug)]
pub struct SearchResult {
    arena: StateArena,
    settled: HashMap<StateKey, StateId>,

    /// Number of states expanded.
    pub states_explored: usize,
}

impl SearchResult {
    pub fn arena(&self) -> &StateArena {
        &self.arena
    }

    /// The lightest state that reached `vertex`, whatever its mode.
    pub fn best_state_at(&self, vertex: VertexId) -> Option<StateRef<'_>> {
        self.best_matching(vertex, |_| true)
    }

    /// The lightest state at `vertex` that can end a trip: no rented
    /// vehicle in hand and, for park-and-ride, the vehicle left at a
    /// facility.
    pub fn best_final_state_at(&self, vertex: VertexId) -> Option<StateRef<'_>> {
        self.best_matching(vertex, is_final)
    }

    fn best_matching(
        &self,
        vertex: VertexId,
        accept: impl Fn(&PathState) -> bool,
    ) -> Option<StateRef<'_>> {
        self.settled
            .iter()
            .filter(|(key, _)| key.vertex == vertex)
            .filter_map(|(_, &id)| self.arena.get(id))
            .filter(|state| accept(state))
            .min_by(|a, b| {
                a.weight()
                    .total_cmp(&b.weight())
                    .then_with(|| a.id().cmp(&b.id()))
            })
    }

    /// The search states from the origin to the best final state at
    /// `vertex`, or an empty path if it was not reached.
    pub fn path_to(&self, vertex: VertexId) -> Result<Vec<StateRef<'_>>, TraversalError> {
        match self.best_final_state_at(vertex) {
            Some(state) => self.arena.path(state.id()),
            None => Ok(Vec::new()),
        }
    }
}

fn is_final(state: &PathState) -> bool {
    if state.is_renting_vehicle() {
        return false;
    }
    if state.request().mode().includes_parking() {
        // A reverse search ends where the vehicle is picked back up.
        return state.is_vehicle_parked() == state.search_direction().is_forward();
    }
    true
}

/// Street search over one graph.
pub struct StreetSearch<'a> {
    graph: &'a Graph,
    config: &'a SearchConfig,
}

impl<'a> StreetSearch<'a> {
    pub fn new(graph: &'a Graph, config: &'a SearchConfig) -> Self {
        Self { graph, config }
    }

    /// Search from `origin`, which is the destination for arrive-by
    /// requests.
    pub fn run(
        &self,
        origin: VertexId,
        request: Arc<StreetSearchRequest>,
    ) -> Result<SearchResult, SearchError> {
        if self.graph.vertex(origin).is_none() {
            return Err(GraphError::UnknownVertex(origin).into());
        }

        let mut arena = StateArena::new(request);
        let s0 = arena.origin(origin);
        debug!(
            %origin,
            mode = ?arena.request().mode(),
            direction = ?arena.request().search_direction(),
            parallel = self.config.parallel,
            "starting street search"
        );

        let mut best: HashMap<StateKey, f64> = HashMap::new();
        let mut settled: HashMap<StateKey, StateId> = HashMap::new();
        let mut queue = BinaryHeap::new();
        let root = arena.state(s0)?;
        best.insert(StateKey::of(&root), root.weight());
        queue.push(Queued {
            weight: root.weight(),
            id: s0,
        });

        let mut states_explored = 0;
        while let Some(Queued { weight, id }) = queue.pop() {
            let state = arena.state(id)?;
            let key = StateKey::of(&state);
            if best.get(&key).is_some_and(|&w| w < weight) {
                continue;
            }
            if settled.contains_key(&key) {
                continue;
            }
            if states_explored >= self.config.max_states {
                warn!(
                    states_explored,
                    queued = queue.len() + 1,
                    "state budget exhausted, stopping search"
                );
                break;
            }
            states_explored += 1;
            settled.insert(key, id);

            let children = self.expand(state)?;
            for child in children {
                if self.config.max_weight.is_some_and(|max| child.weight() > max) {
                    continue;
                }
                let child_key = StateKey::of(&child);
                if best.get(&child_key).is_some_and(|&w| w <= child.weight()) {
                    continue;
                }
                best.insert(child_key, child.weight());
                let weight = child.weight();
                let id = arena.push(child)?;
                trace!(state = %id, vertex = %child_key.vertex, weight, "queued");
                queue.push(Queued { weight, id });
            }
        }

        debug!(states_explored, states = arena.len(), "street search finished");
        Ok(SearchResult {
            arena,
            settled,
            states_explored,
        })
    }

    /// All children of `state`, in edge insertion order.
    fn expand(&self, state: StateRef<'_>) -> TraversalResult {
        let edges: Vec<&dyn Edge> = self
            .graph
            .edges_for(state.vertex(), state.search_direction())
            .collect();

        let results: Vec<TraversalResult> = if self.config.parallel {
            edges.par_iter().map(|edge| edge.traverse(state)).collect()
        } else {
            edges.iter().map(|edge| edge.traverse(state)).collect()
        };

        let mut children = Vec::new();
        for result in results {
            children.extend(result?);
        }
        Ok(children)
    }
}
