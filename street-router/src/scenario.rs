//! Loading a street network and a search request from JSON.
//!
//! A scenario file lists vertices by label, streets between them, parking
//! facilities and rental stations attached to them, and the search to
//! run. Everything that has a sensible default may be omitted.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use geo::Point;
use serde::Deserialize;

use crate::domain::{SearchDirection, StreetMode, TraverseMode, VertexId};
use crate::edge::StreetPermission;
use crate::facility::{
    FacilityId, VehicleParking, VehicleParkingEntrance, VehicleParkingSpaces,
    VehicleRentalStation,
};
use crate::graph::{Graph, GraphError};
use crate::raptor::{LoggingTimers, Optimization, RaptorProfile, RaptorRequest, RaptorRequestBuilder};
use crate::request::{
    RequestError, RoutingPreferences, StreetSearchRequest, VehicleParkingFilterRequest,
    VehicleParkingRequest,
};
use crate::search::{SearchConfig, SearchError, SearchResult, StreetSearch};

/// Error loading a scenario.
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid scenario JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid request: {0}")]
    Request(#[from] RequestError),

    #[error("invalid graph: {0}")]
    Graph(#[from] GraphError),
}

/// A vertex of the street network.
#[derive(Debug, Deserialize)]
pub struct VertexDto {
    pub label: String,
    pub lon: f64,
    pub lat: f64,
}

/// A two-way street between two vertex labels.
#[derive(Debug, Deserialize)]
pub struct StreetDto {
    pub from: String,
    pub to: String,

    #[serde(default)]
    pub name: String,

    /// Modes allowed on the street (all by default)
    #[serde(default)]
    pub permission: StreetPermission,

    #[serde(default = "yes")]
    pub wheelchair_accessible: bool,
}

/// An entrance to a parking facility.
#[derive(Debug, Deserialize)]
pub struct EntranceDto {
    pub id: String,

    #[serde(default)]
    pub name: String,

    pub lon: f64,
    pub lat: f64,

    #[serde(default = "yes")]
    pub walk_accessible: bool,

    #[serde(default = "yes")]
    pub car_accessible: bool,
}

/// A parking facility attached to a street vertex.
#[derive(Debug, Deserialize)]
pub struct ParkingDto {
    pub id: String,

    #[serde(default)]
    pub name: String,

    /// Label of the street vertex the entrances connect to
    pub street: String,

    pub lon: f64,
    pub lat: f64,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub bicycle_places: bool,

    #[serde(default)]
    pub car_places: bool,

    #[serde(default)]
    pub wheelchair_accessible_car_places: bool,

    /// Live space counts, if the facility reports them
    pub availability: Option<VehicleParkingSpaces>,

    /// Entrances (one at the facility's location if empty)
    #[serde(default)]
    pub entrances: Vec<EntranceDto>,
}

/// A docked rental station at a street vertex.
#[derive(Debug, Deserialize)]
pub struct RentalStationDto {
    pub id: String,

    #[serde(default)]
    pub name: String,

    /// Label of the vertex the station sits at
    pub vertex: String,

    pub form_factor: TraverseMode,

    #[serde(default)]
    pub vehicles_available: u32,

    #[serde(default)]
    pub spaces_available: u32,
}

/// Parking options of the request.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ParkingRequestDto {
    /// Facilities carrying any of these tags are never used
    pub not: Vec<String>,

    /// If non-empty, only facilities carrying one of these tags are used
    pub select: Vec<String>,

    /// Facilities without any of these tags cost `unpreferred_cost` extra
    pub preferred: Vec<String>,

    pub unpreferred_cost: u32,

    pub use_availability_information: bool,
}

/// The street search to run.
#[derive(Debug, Deserialize)]
pub struct RequestDto {
    /// Departure time, or arrival time when `arrive_by` is set
    pub time: DateTime<Utc>,

    #[serde(default)]
    pub mode: StreetMode,

    #[serde(default)]
    pub arrive_by: bool,

    #[serde(default)]
    pub wheelchair: bool,

    #[serde(default)]
    pub preferences: RoutingPreferences,

    #[serde(default)]
    pub parking: ParkingRequestDto,
}

/// Driver settings; see [`SearchConfig`].
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchDto {
    pub max_states: Option<usize>,
    pub max_weight: Option<f64>,
    pub profile: RaptorProfile,
    pub optimizations: Vec<Optimization>,
}

/// The whole scenario file.
#[derive(Debug, Deserialize)]
pub struct ScenarioFile {
    pub vertices: Vec<VertexDto>,

    #[serde(default)]
    pub streets: Vec<StreetDto>,

    #[serde(default)]
    pub parkings: Vec<ParkingDto>,

    #[serde(default)]
    pub rental_stations: Vec<RentalStationDto>,

    /// Label of the vertex the trip starts at
    pub from: String,

    /// Label of the vertex the trip ends at
    pub to: String,

    pub request: RequestDto,

    #[serde(default)]
    pub search: SearchDto,
}

fn yes() -> bool {
    true
}

/// A loaded scenario, ready to run.
#[derive(Debug)]
pub struct Scenario {
    pub graph: Graph,
    pub request: Arc<StreetSearchRequest>,
    pub raptor: RaptorRequest,
    pub config: SearchConfig,
    pub from: VertexId,
    pub to: VertexId,
}

impl Scenario {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, ScenarioError> {
        let file: ScenarioFile = serde_json::from_str(json)?;
        Self::from_file(file)
    }

    pub fn from_file(file: ScenarioFile) -> Result<Self, ScenarioError> {
        let graph = build_graph(&file)?;
        let from = graph.find_vertex(&file.from)?;
        let to = graph.find_vertex(&file.to)?;
        let request = build_request(&file.request)?;
        let raptor = build_raptor_request(&file.request, &file.search)?;

        let defaults = SearchConfig::default();
        let config = SearchConfig::new(
            false,
            file.search.max_states.unwrap_or(defaults.max_states),
            file.search.max_weight,
        )
        .with_optimizations(raptor.optimizations());

        Ok(Self {
            graph,
            request: Arc::new(request),
            raptor,
            config,
            from,
            to,
        })
    }

    /// Where the search starts: the trip's destination for arrive-by
    /// requests, its origin otherwise.
    pub fn search_origin(&self) -> VertexId {
        if self.request.arrive_by() { self.to } else { self.from }
    }

    /// The other end of the trip.
    pub fn search_target(&self) -> VertexId {
        if self.request.arrive_by() { self.from } else { self.to }
    }

    pub fn run(&self) -> Result<SearchResult, SearchError> {
        let started = Instant::now();
        let result = StreetSearch::new(&self.graph, &self.config)
            .run(self.search_origin(), Arc::clone(&self.request));
        self.raptor.record_timing("street", started.elapsed());
        result
    }
}

fn build_graph(file: &ScenarioFile) -> Result<Graph, GraphError> {
    let mut graph = Graph::new();
    for vertex in &file.vertices {
        graph.add_vertex(vertex.label.as_str(), Point::new(vertex.lon, vertex.lat));
    }

    for street in &file.streets {
        let from = graph.find_vertex(&street.from)?;
        let to = graph.find_vertex(&street.to)?;
        graph.add_street(
            from,
            to,
            &street.name,
            street.permission,
            street.wheelchair_accessible,
        )?;
    }

    for dto in &file.parkings {
        let street = graph.find_vertex(&dto.street)?;
        let mut builder = VehicleParking::builder(dto.id.as_str())
            .name(dto.name.as_str())
            .location(Point::new(dto.lon, dto.lat))
            .tags(dto.tags.iter().map(String::as_str))
            .bicycle_places(dto.bicycle_places)
            .car_places(dto.car_places)
            .wheelchair_accessible_car_places(dto.wheelchair_accessible_car_places);
        if let Some(availability) = dto.availability {
            builder = builder.availability(availability);
        }
        for entrance in &dto.entrances {
            builder = builder.entrance(VehicleParkingEntrance {
                id: FacilityId::new(entrance.id.as_str()),
                name: entrance.name.clone(),
                location: Point::new(entrance.lon, entrance.lat),
                walk_accessible: entrance.walk_accessible,
                car_accessible: entrance.car_accessible,
            });
        }
        graph.add_parking(street, Arc::new(builder.build()))?;
    }

    for dto in &file.rental_stations {
        let vertex = graph.find_vertex(&dto.vertex)?;
        let location = graph
            .vertex(vertex)
            .map(|v| v.location)
            .ok_or(GraphError::UnknownVertex(vertex))?;
        let station = VehicleRentalStation {
            id: FacilityId::new(dto.id.as_str()),
            name: dto.name.clone(),
            location,
            form_factor: dto.form_factor,
            vehicles_available: dto.vehicles_available,
            spaces_available: dto.spaces_available,
        };
        graph.add_rental_station(vertex, Arc::new(station))?;
    }

    Ok(graph)
}

fn build_request(dto: &RequestDto) -> Result<StreetSearchRequest, RequestError> {
    let parking = &dto.parking;
    let mut parking_request = VehicleParkingRequest::new()
        .with_filter(VehicleParkingFilterRequest::from_tags(
            parking.not.iter().map(String::as_str),
            parking.select.iter().map(String::as_str),
        )?)
        .with_unpreferred_cost(parking.unpreferred_cost)
        .with_use_availability_information(parking.use_availability_information);
    if !parking.preferred.is_empty() {
        parking_request = parking_request.with_preferred(VehicleParkingFilterRequest::from_tags(
            Vec::<&str>::new(),
            parking.preferred.iter().map(String::as_str),
        )?);
    }

    let preferences = dto.preferences;
    StreetSearchRequest::builder()
        .with_start_time(dto.time)
        .with_mode(dto.mode)
        .with_arrive_by(dto.arrive_by)
        .with_wheelchair(dto.wheelchair)
        .with_preferences(|_| preferences)
        .with_parking(parking_request)
        .build()
}

fn build_raptor_request(
    request: &RequestDto,
    search: &SearchDto,
) -> Result<RaptorRequest, RequestError> {
    let mut builder = RaptorRequestBuilder::new();
    builder
        .set_profile(search.profile)
        .set_search_direction(SearchDirection::from_arrive_by(request.arrive_by))
        .set_performance_timers(LoggingTimers);
    if request.arrive_by {
        builder.search_params().latest_arrival_time(request.time);
    } else {
        builder.search_params().earliest_departure_time(request.time);
    }
    for &optimization in &search.optimizations {
        builder.enable_optimization(optimization);
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::domain::EdgeKind;

    const PARK_AND_RIDE: &str = include_str!("../demos/park-and-ride.json");

    #[test]
    fn demo_scenario_runs() {
        let scenario = Scenario::from_json(PARK_AND_RIDE).unwrap();

        assert_eq!(scenario.request.mode(), StreetMode::BikeToPark);
        assert_eq!(scenario.raptor.alias(), "MC-LL");
        assert!(scenario.config.parallel);

        let result = scenario.run().unwrap();
        let path = result.path_to(scenario.search_target()).unwrap();
        let junction = scenario.graph.find_vertex("junction").unwrap();
        assert!(path.iter().any(|s| s.vertex() == junction));
        assert!(
            path.iter()
                .any(|s| s.back_edge_kind() == Some(EdgeKind::VehicleParking))
        );
        let arrival = path.last().unwrap();
        assert!(arrival.is_vehicle_parked());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(PARK_AND_RIDE.as_bytes()).unwrap();

        let scenario = Scenario::load(file.path()).unwrap();

        assert_eq!(scenario.graph.find_vertex("home").unwrap(), scenario.from);
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Scenario::load(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ScenarioError::Io { .. }));
    }

    fn minimal(extra: &str) -> String {
        format!(
            r#"{{
                "vertices": [
                    {{"label": "a", "lon": 10.0, "lat": 59.0}},
                    {{"label": "b", "lon": 10.0, "lat": 59.001}}
                ],
                "streets": [{{"from": "a", "to": "b"}}],
                "from": "a",
                "to": "b",
                "request": {{"time": "2024-03-15T08:00:00Z" {extra}}}
            }}"#
        )
    }

    #[test]
    fn defaults_fill_in() {
        let scenario = Scenario::from_json(&minimal("")).unwrap();

        assert_eq!(scenario.request.mode(), StreetMode::Walk);
        assert_eq!(scenario.raptor.alias(), "MC");
        assert_eq!(scenario.config, SearchConfig::default());
        assert_eq!(scenario.graph.edge_count(), 2);
    }

    #[test]
    fn arrive_by_searches_from_destination() {
        let scenario = Scenario::from_json(&minimal(r#", "arrive_by": true"#)).unwrap();

        assert_eq!(scenario.search_origin(), scenario.to);
        assert_eq!(scenario.raptor.alias(), "MC-Rev");
        let result = scenario.run().unwrap();
        assert!(result.best_final_state_at(scenario.from).is_some());
    }

    #[test]
    fn blank_tag_is_rejected() {
        let err =
            Scenario::from_json(&minimal(r#", "parking": {"not": [" "]}"#)).unwrap_err();
        assert!(matches!(err, ScenarioError::Request(RequestError::BlankTag)));
    }

    #[test]
    fn unknown_label() {
        let json = minimal("").replace(r#""to": "b""#, r#""to": "c""#);
        let err = Scenario::from_json(&json).unwrap_err();
        assert!(matches!(err, ScenarioError::Graph(GraphError::UnknownLabel(_))));
    }

    #[test]
    fn bad_json() {
        assert!(matches!(
            Scenario::from_json("{"),
            Err(ScenarioError::Json(_))
        ));
    }
}
