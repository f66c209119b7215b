//! Street search driver.
//!
//! Runs a best-first search on weight over a [`crate::graph::Graph`],
//! growing a [`crate::state::StateArena`] by traversing edges. Depart-at
//! searches follow outgoing edges from the origin; arrive-by searches
//! follow incoming edges back from the destination.

mod config;
mod street;


pub use config::SearchConfig;
pub use street::{SearchError, SearchResult, StreetSearch};
