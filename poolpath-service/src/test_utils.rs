use poolpath::route::Router;
use poolpath_osm::build_graph;
use poolpath_osm::osm::{OsmNode, OsmWay};
use std::sync::Arc;

// A junction at 2 joining 1, 3 and 4, plus the separate street 5-6
pub fn street_router() -> Router {
    let nodes = vec![
        OsmNode { id: 1, lat: 48.7700, long: 9.1700 },
        OsmNode { id: 2, lat: 48.7710, long: 9.1700 },
        OsmNode { id: 3, lat: 48.7720, long: 9.1700 },
        OsmNode { id: 4, lat: 48.7710, long: 9.1710 },
        OsmNode { id: 5, lat: 48.7800, long: 9.1800 },
        OsmNode { id: 6, lat: 48.7810, long: 9.1800 },
    ];
    let ways = vec![
        OsmWay { id: 10, nodes: vec![1, 2, 3] },
        OsmWay { id: 11, nodes: vec![2, 4] },
        OsmWay { id: 12, nodes: vec![5, 6] },
    ];
    let (graph, _) = build_graph(&ways, &nodes);
    Router::new(Arc::new(graph))
}
