use anyhow::Context;
use clap::Parser;
use poolpath::export::GraphJson;
use poolpath_osm::{build_graph, logging, read_input, InputFormat};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// Builds a routable street graph from OpenStreetMap data and writes it as JSON.
#[derive(Parser, Debug)]
#[command(name = "poolpath-osm", version, about)]
struct Cli {
    /// Street data: cached element JSON, Overpass JSON or a PBF extract.
    input: PathBuf,

    /// Where to write the graph JSON.
    out: PathBuf,

    /// Input format, inferred from the file name when omitted.
    #[arg(short, long, value_enum)]
    format: Option<InputFormat>,

    /// Logging verbosity level (`trace`, `debug`, `info`, `warn`, `error`).
    #[arg(short, long, default_value = "info")]
    verbosity: String,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    logging::setup(&args.verbosity);

    let load_timer = Instant::now();
    let data = read_input(&args.input, args.format)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let (graph, summary) = build_graph(&data.ways, &data.way_nodes);

    info!(
        vertices = graph.number_of_vertices(),
        edges = graph.number_of_edges(),
        missing_nodes = summary.missing_nodes,
        elapsed = ?load_timer.elapsed(),
        "loaded graph"
    );

    let file = File::create(&args.out).with_context(|| format!("failed to create {}", args.out.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, &GraphJson::from_graph(&graph))
        .map_err(anyhow::Error::from)
        .and_then(|_| writer.flush().map_err(anyhow::Error::from))
        .with_context(|| format!("failed to write {}", args.out.display()))?;
    info!(out = %args.out.display(), "saved graph");
    Ok(())
}
