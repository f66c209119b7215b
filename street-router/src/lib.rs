//! Street routing with park-and-ride and vehicle rental.
//!
//! A search expands immutable path states across a graph of street,
//! parking and rental edges. Each edge decides which states lie on its
//! far side; the search keeps the lightest state per vertex and mode.
//! The `raptor` module holds the request configuration for the transit
//! search that street legs feed into.

pub mod domain;
pub mod edge;
pub mod facility;
pub mod graph;
pub mod raptor;
pub mod request;
pub mod scenario;
pub mod search;
pub mod state;
