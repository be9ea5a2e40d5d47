//! Importing OpenStreetMap street data into routable graphs.

pub mod error;
pub mod graph_builder;
pub mod input;
pub mod logging;
pub mod osm;

pub use error::ImportError;
pub use graph_builder::{build_graph, BuildSummary};
pub use input::{read_input, InputFormat};
