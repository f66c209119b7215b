use std::path::PathBuf;
use std::process::ExitCode;

use street_router::scenario::Scenario;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) else {
        eprintln!("usage: street-router <scenario.json>");
        return ExitCode::FAILURE;
    };

    let scenario = match Scenario::load(&path) {
        Ok(scenario) => scenario,
        Err(e) => {
            error!(path = %path.display(), "{e}");
            return ExitCode::FAILURE;
        }
    };
    info!(
        alias = scenario.raptor.alias(),
        vertices = scenario.graph.vertex_count(),
        edges = scenario.graph.edge_count(),
        "loaded scenario"
    );

    let result = match scenario.run() {
        Ok(result) => result,
        Err(e) => {
            error!("search failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    let path = match result.path_to(scenario.search_target()) {
        Ok(path) => path,
        Err(e) => {
            error!("could not rebuild path: {e}");
            return ExitCode::FAILURE;
        }
    };
    if path.is_empty() {
        println!("No route found.");
        return ExitCode::from(2);
    }

    // Arrive-by paths are built from the destination; print them in travel order.
    let mut steps = path;
    if scenario.request.arrive_by() {
        steps.reverse();
    }
    for state in &steps {
        let label = scenario
            .graph
            .vertex(state.vertex())
            .map_or("?", |v| v.label.as_str());
        let via = state
            .back_edge()
            .and_then(|id| scenario.graph.edge(id))
            .map_or("", |edge| edge.name());
        println!(
            "{}  {:<12} {:<8} {:>8.1}  {}",
            state.time().format("%H:%M:%S"),
            label,
            state.non_transit_mode(),
            state.weight(),
            via,
        );
    }
    info!(
        states_explored = result.states_explored,
        alias = scenario.raptor.alias(),
        "done"
    );
    ExitCode::SUCCESS
}
