use super::categorize::*;
use super::models::*;
use crate::error::ImportError;
use osmpbfreader::objects::NodeId;
use std::collections::HashSet;
use std::io::{Read, Seek};
use std::path::Path;
use std::time::Instant;
use tracing::debug;

struct Reader {
    needed: HashSet<NodeId>,
    nodes: Vec<OsmNode>,
    ways: Vec<OsmWay>,
}

impl Reader {
    fn new() -> Reader {
        Reader {
            needed: HashSet::new(),
            nodes: Vec::new(),
            ways: Vec::new(),
        }
    }

    fn read_ways<R: Read>(&mut self, pbf: &mut osmpbfreader::OsmPbfReader<R>) -> Result<(), ImportError> {
        for obj in pbf.par_iter() {
            if let osmpbfreader::OsmObj::Way(way) = obj? {
                let properties =
                    RoadProperties::from_tags(way.tags.iter().map(|(key, val)| (key.as_str(), val.as_str())));
                if properties.drivable() {
                    self.needed.extend(way.nodes.iter().copied());
                    self.ways.push(OsmWay {
                        id: way.id.0,
                        nodes: way.nodes.iter().map(|node| node.0).collect(),
                    });
                }
            }
        }
        Ok(())
    }

    fn read_nodes<R: Read>(&mut self, pbf: &mut osmpbfreader::OsmPbfReader<R>) -> Result<(), ImportError> {
        for obj in pbf.par_iter() {
            if let osmpbfreader::OsmObj::Node(node) = obj? {
                if self.needed.contains(&node.id) {
                    self.nodes.push(OsmNode {
                        id: node.id.0,
                        lat: node.lat(),
                        long: node.lon(),
                    });
                }
            }
        }
        Ok(())
    }
}

pub fn read_pbf<R: Read + Seek>(input: R) -> Result<ElementData, ImportError> {
    let mut r = Reader::new();
    let mut pbf = osmpbfreader::OsmPbfReader::new(input);

    {
        let t = Instant::now();
        r.read_ways(&mut pbf)?;
        debug!(ways = r.ways.len(), elapsed = ?t.elapsed(), "decoded ways");
    }
    {
        let t = Instant::now();
        pbf.rewind()?;
        r.read_nodes(&mut pbf)?;
        debug!(nodes = r.nodes.len(), elapsed = ?t.elapsed(), "decoded nodes");
    }

    Ok(ElementData {
        way_nodes: r.nodes,
        ways: r.ways,
    })
}

pub fn read_pbf_file<P: AsRef<Path>>(path: P) -> Result<ElementData, ImportError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_pbf(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file() {
        let result = read_pbf_file("/nonexistent/streets.osm.pbf");
        assert!(matches!(result, Err(ImportError::Io { .. })));
    }
}
