use super::categorize::RoadProperties;
use super::models::*;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};

// Element of an Overpass API JSON response
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Node {
        id: i64,
        lat: f64,
        lon: f64,
    },
    Way {
        id: i64,
        nodes: Vec<i64>,
        #[serde(default)]
        tags: HashMap<String, String>,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
pub struct OverpassResponse {
    pub elements: Vec<Element>,
}

impl OverpassResponse {
    /// Keeps the drivable ways and the nodes they reference.
    pub fn into_element_data(self) -> ElementData {
        let mut nodes = Vec::new();
        let mut ways = Vec::new();
        for element in self.elements {
            match element {
                Element::Node { id, lat, lon } => nodes.push(OsmNode { id, lat, long: lon }),
                Element::Way { id, nodes, tags } => {
                    let properties =
                        RoadProperties::from_tags(tags.iter().map(|(k, v)| (k.as_str(), v.as_str())));
                    if properties.drivable() {
                        ways.push(OsmWay { id, nodes });
                    }
                }
                Element::Other => {}
            }
        }

        let referenced: HashSet<i64> = ways.iter().flat_map(|w| w.nodes.iter().copied()).collect();
        nodes.retain(|node| referenced.contains(&node.id));

        ElementData {
            way_nodes: nodes,
            ways,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overpass_response() {
        let json = r#"{
            "version": 0.6,
            "elements": [
                {"type": "node", "id": 1, "lat": 48.77, "lon": 9.17},
                {"type": "node", "id": 2, "lat": 48.78, "lon": 9.18, "tags": {"highway": "traffic_signals"}},
                {"type": "node", "id": 3, "lat": 48.79, "lon": 9.19},
                {"type": "way", "id": 10, "nodes": [1, 2], "tags": {"highway": "residential"}},
                {"type": "way", "id": 11, "nodes": [2, 3], "tags": {"highway": "footway"}},
                {"type": "way", "id": 12, "nodes": [3, 1]},
                {"type": "relation", "id": 20, "members": []}
            ]
        }"#;
        let response: OverpassResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.elements.len(), 7);

        let data = response.into_element_data();
        assert_eq!(data.ways, vec![OsmWay { id: 10, nodes: vec![1, 2] }]);
        assert_eq!(data.way_nodes.iter().map(|n| n.id).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(data.way_nodes[0].long, 9.17);
    }
}
