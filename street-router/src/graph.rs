//! The street graph: vertices, edges and adjacency in both directions.

use std::sync::Arc;

use geo::{LineString, Point};

use crate::domain::{EdgeId, SearchDirection, VertexId};
use crate::edge::{
    Edge, StreetEdge, StreetPermission, StreetVehicleParkingLink, VehicleParkingEdge,
    VehicleRentalEdge,
};
use crate::facility::{VehicleParking, VehicleRentalStation};

/// Error building a graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("unknown vertex {0}")]
    UnknownVertex(VertexId),

    #[error("unknown vertex label {0:?}")]
    UnknownLabel(String),
}

/// A point in the street network.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    pub label: String,
    pub location: Point<f64>,
}

/// Vertices are addressed by [`VertexId`], edges by [`EdgeId`]; both are
/// indices into the graph's own storage and are never reused.
#[derive(Debug, Default)]
pub struct Graph {
    vertices: Vec<Vertex>,
    edges: Vec<Box<dyn Edge>>,
    outgoing: Vec<Vec<EdgeId>>,
    incoming: Vec<Vec<EdgeId>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vertex(&mut self, label: impl Into<String>, location: Point<f64>) -> VertexId {
        let id = VertexId(self.vertices.len());
        self.vertices.push(Vertex {
            label: label.into(),
            location,
        });
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());
        id
    }

    /// Add an edge built from its freshly assigned id.
    ///
    /// Both endpoints must already be in the graph.
    pub fn add_edge<E, F>(&mut self, build: F) -> Result<EdgeId, GraphError>
    where
        E: Edge + 'static,
        F: FnOnce(EdgeId) -> E,
    {
        let id = EdgeId(self.edges.len());
        let edge = build(id);
        let (from, to) = (edge.from_vertex(), edge.to_vertex());
        self.check_vertex(from)?;
        self.check_vertex(to)?;

        self.outgoing[from.0].push(id);
        self.incoming[to.0].push(id);
        self.edges.push(Box::new(edge));
        Ok(id)
    }

    fn check_vertex(&self, vertex: VertexId) -> Result<(), GraphError> {
        if vertex.0 < self.vertices.len() {
            Ok(())
        } else {
            Err(GraphError::UnknownVertex(vertex))
        }
    }

    /// A street usable in both directions, as two edges whose length is
    /// the distance between the endpoints.
    pub fn add_street(
        &mut self,
        a: VertexId,
        b: VertexId,
        name: &str,
        permission: StreetPermission,
        wheelchair_accessible: bool,
    ) -> Result<(EdgeId, EdgeId), GraphError> {
        self.check_vertex(a)?;
        self.check_vertex(b)?;
        let (pa, pb) = (self.vertices[a.0].location, self.vertices[b.0].location);
        let geometry = LineString::from(vec![pa, pb]);
        let reversed = LineString::from(vec![pb, pa]);

        let forward = self.add_edge(|id| {
            StreetEdge::from_geometry(id, a, b, name, geometry)
                .with_permission(permission)
                .with_wheelchair_accessible(wheelchair_accessible)
        })?;
        let backward = self.add_edge(|id| {
            StreetEdge::from_geometry(id, b, a, name, reversed)
                .with_permission(permission)
                .with_wheelchair_accessible(wheelchair_accessible)
        })?;
        Ok((forward, backward))
    }

    /// Add a parking facility attached to the street vertex `street`.
    ///
    /// Every entrance gets its own vertex, linked to the street in both
    /// directions. Parking edges join every ordered pair of entrances,
    /// including each entrance with itself, so a vehicle left at one
    /// entrance can be walked away from through another. Returns the
    /// entrance vertices.
    pub fn add_parking(
        &mut self,
        street: VertexId,
        parking: Arc<VehicleParking>,
    ) -> Result<Vec<VertexId>, GraphError> {
        self.check_vertex(street)?;
        let mut entrances = Vec::with_capacity(parking.entrances().len());
        for entrance in parking.entrances() {
            let vertex = self.add_vertex(entrance.id.as_str(), entrance.location);
            self.add_edge(|id| {
                StreetVehicleParkingLink::new(
                    id,
                    street,
                    vertex,
                    Arc::clone(&parking),
                    entrance.clone(),
                )
            })?;
            self.add_edge(|id| {
                StreetVehicleParkingLink::new(
                    id,
                    vertex,
                    street,
                    Arc::clone(&parking),
                    entrance.clone(),
                )
            })?;
            entrances.push(vertex);
        }
        for &from in &entrances {
            for &to in &entrances {
                self.add_edge(|id| {
                    VehicleParkingEdge::between(id, from, to, Arc::clone(&parking))
                })?;
            }
        }
        Ok(entrances)
    }

    /// Add a rental station as a loop at `vertex`.
    pub fn add_rental_station(
        &mut self,
        vertex: VertexId,
        station: Arc<VehicleRentalStation>,
    ) -> Result<EdgeId, GraphError> {
        self.add_edge(|id| VehicleRentalEdge::new(id, vertex, station))
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id.0)
    }

    pub fn find_vertex(&self, label: &str) -> Result<VertexId, GraphError> {
        self.vertices
            .iter()
            .position(|v| v.label == label)
            .map(VertexId)
            .ok_or_else(|| GraphError::UnknownLabel(label.to_string()))
    }

    pub fn edge(&self, id: EdgeId) -> Option<&dyn Edge> {
        self.edges.get(id.0).map(|e| &**e)
    }

    pub fn outgoing(&self, vertex: VertexId) -> &[EdgeId] {
        self.outgoing.get(vertex.0).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn incoming(&self, vertex: VertexId) -> &[EdgeId] {
        self.incoming.get(vertex.0).map(Vec::as_slice).unwrap_or_default()
    }

    /// The edges a search in `direction` can take from `vertex`, in
    /// insertion order.
    pub fn edges_for(
        &self,
        vertex: VertexId,
        direction: SearchDirection,
    ) -> impl Iterator<Item = &dyn Edge> {
        let ids = if direction.is_forward() {
            self.outgoing(vertex)
        } else {
            self.incoming(vertex)
        };
        ids.iter().filter_map(|&id| self.edge(id))
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
